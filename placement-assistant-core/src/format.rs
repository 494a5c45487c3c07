//! Display helpers for messages

use chrono::{DateTime, Local, TimeZone};

use crate::session::{Message, Sender};

/// Hour and minute in 12-hour form, e.g. `09:05 AM`
pub fn format_time<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%I:%M %p").to_string()
}

/// Display time of a message in the local time zone
pub fn local_time(message: &Message) -> String {
    format_time(&message.timestamp.with_timezone(&Local))
}

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Message body as HTML, with line breaks turned into `<br>`
pub fn text_to_html(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

/// A message as the HTML fragment the web panel renders
pub fn render_html<Tz: TimeZone>(message: &Message, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let time = format_time(&message.timestamp.with_timezone(tz));
    let avatar = match message.sender {
        Sender::Bot => "<div class=\"chatbot-avatar-small\">🤖</div>",
        Sender::User => "",
    };
    format!(
        "<div class=\"chatbot-message chatbot-message-{sender}\"><div class=\"chatbot-message-content\">{avatar}<div class=\"chatbot-message-text\">{body}<span class=\"chatbot-message-time\">{time}</span></div></div></div>",
        sender = message.sender,
        body = text_to_html(&message.text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_time_pads_and_uses_meridiem() {
        let morning = Utc.with_ymd_and_hms(2026, 5, 1, 9, 5, 0).unwrap();
        assert_eq!(format_time(&morning), "09:05 AM");

        let evening = Utc.with_ymd_and_hms(2026, 5, 1, 21, 45, 59).unwrap();
        assert_eq!(format_time(&evening), "09:45 PM");

        let noon = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(format_time(&noon), "12:00 PM");
    }

    #[test]
    fn test_format_time_respects_offset() {
        let ts = Utc.with_ymd_and_hms(2026, 5, 1, 23, 30, 0).unwrap();
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(format_time(&ts.with_timezone(&ist)), "05:00 AM");
    }

    #[test]
    fn test_text_to_html() {
        assert_eq!(text_to_html("a\nb"), "a<br>b");
        assert_eq!(text_to_html("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
    }

    #[test]
    fn test_render_html() {
        let ts = Utc.with_ymd_and_hms(2026, 5, 1, 14, 7, 0).unwrap();
        let html = render_html(&Message::user("hi\nthere", ts), &Utc);
        assert!(html.starts_with(
            "<div class=\"chatbot-message chatbot-message-user\"><div class=\"chatbot-message-content\"><div class=\"chatbot-message-text\">"
        ));
        assert!(!html.contains("chatbot-avatar-small"));
        assert!(html.contains("hi<br>there"));
        assert!(html.contains("<span class=\"chatbot-message-time\">02:07 PM</span>"));
    }

    #[test]
    fn test_render_html_bot_has_avatar() {
        let ts = Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap();
        let html = render_html(&Message::bot("Hello!", ts), &Utc);
        assert!(html.starts_with(
            "<div class=\"chatbot-message chatbot-message-bot\"><div class=\"chatbot-message-content\"><div class=\"chatbot-avatar-small\">🤖</div><div class=\"chatbot-message-text\">Hello!"
        ));
        assert!(html.ends_with("08:00 AM</span></div></div></div>"));
    }
}
