//! The ordered keyword rule table
//!
//! Order matters: the first rule with a matching keyword wins, so an earlier
//! rule shadows any later one that shares a keyword. `help` is listed under
//! both [`Topic::GeneralHelp`] and [`Topic::Support`]; only the former can
//! ever answer it.

use serde::Serialize;
use std::fmt;

/// What a rule answers about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Registration,
    Login,
    JobApplication,
    Profile,
    JobPosting,
    GeneralHelp,
    Greeting,
    Support,
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Topic::Registration => "registration",
            Topic::Login => "login",
            Topic::JobApplication => "job application",
            Topic::Profile => "profile",
            Topic::JobPosting => "company job posting",
            Topic::GeneralHelp => "general help",
            Topic::Greeting => "greeting",
            Topic::Support => "contact/support",
        };
        f.write_str(label)
    }
}

/// A keyword group and the canned response it triggers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Rule {
    pub topic: Topic,
    /// Lowercase substrings, any one of which selects this rule
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

impl Rule {
    /// The first keyword found in `normalized`, if any
    pub fn matched_keyword(&self, normalized: &str) -> Option<&'static str> {
        self.keywords
            .iter()
            .copied()
            .find(|keyword| normalized.contains(keyword))
    }
}

pub static RULES: [Rule; 8] = [
    Rule {
        topic: Topic::Registration,
        keywords: &["register", "sign up", "signup"],
        response: "To register:\n\n👨‍🎓 As Student:\n1. Click 'Register as Student'\n2. Fill in username, email, and password\n3. Complete your profile after login\n\n🏢 As Company:\n1. Click 'Register as Company'\n2. Fill in company details\n3. Start posting jobs!\n\nNeed help with registration?",
    },
    Rule {
        topic: Topic::Login,
        keywords: &["login", "sign in", "signin"],
        response: "To login:\n\n1. Click the 'Login' button\n2. Enter your email and password\n3. You'll be redirected to your dashboard\n\nForgot your password? Contact support for assistance.",
    },
    Rule {
        topic: Topic::JobApplication,
        keywords: &["apply", "job", "application"],
        response: "To apply for jobs:\n\n1. Login to your student account\n2. Browse available jobs\n3. Click 'Apply' on any job\n4. Track your applications in 'My Applications'\n\nMake sure your profile is complete for better chances!",
    },
    Rule {
        topic: Topic::Profile,
        keywords: &["profile", "update profile"],
        response: "To update your profile:\n\n👨‍🎓 Students:\n• Go to 'Profile' from dashboard\n• Add your skills, bio, and links\n• Complete all fields for better visibility\n\n🏢 Companies:\n• Go to 'Company Profile'\n• Add company details and logo\n• Keep information up to date",
    },
    Rule {
        topic: Topic::JobPosting,
        keywords: &["post job", "posting", "company"],
        response: "To post a job:\n\n1. Login as a company\n2. Complete your company profile\n3. Go to 'Post Job'\n4. Fill in job details (title, description, salary, etc.)\n5. Set application deadline\n6. Publish!\n\nYou can manage applicants from the same page.",
    },
    Rule {
        topic: Topic::GeneralHelp,
        keywords: &["help", "how", "what"],
        response: "I can help you with:\n\n✅ Registration process\n✅ Login issues\n✅ Job applications\n✅ Profile management\n✅ Posting jobs\n✅ General questions\n\nWhat specific help do you need?",
    },
    Rule {
        topic: Topic::Greeting,
        keywords: &["hi", "hello", "hey"],
        response: "Hello! 👋 Welcome to Placement Management System. How can I assist you today?",
    },
    Rule {
        topic: Topic::Support,
        keywords: &["contact", "support", "help"],
        response: "For support:\n\n📧 Email: support@placement.com\n📞 Phone: +1-234-567-8900\n💬 Chat: Available 24/7\n\nIs there something specific I can help with?",
    },
];

/// Replies used when no keyword group matches
pub static FALLBACK_RESPONSES: [&str; 4] = [
    "I'm here to help! Could you be more specific about what you need?",
    "That's a great question! Try asking about registration, jobs, or profiles.",
    "I can help with registration, job applications, and profile setup. What do you need?",
    "Let me help you! You can ask about:\n• How to register\n• How to apply for jobs\n• How to update your profile\n• How to post jobs",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_order_is_fixed() {
        let order: Vec<Topic> = RULES.iter().map(|r| r.topic).collect();
        assert_eq!(
            order,
            vec![
                Topic::Registration,
                Topic::Login,
                Topic::JobApplication,
                Topic::Profile,
                Topic::JobPosting,
                Topic::GeneralHelp,
                Topic::Greeting,
                Topic::Support,
            ]
        );
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for rule in &RULES {
            for keyword in rule.keywords {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }

    #[test]
    fn test_help_is_shadowed_for_support() {
        let help = RULES.iter().position(|r| r.keywords.contains(&"help"));
        let support = RULES.iter().position(|r| r.topic == Topic::Support);
        assert!(help < support);
        assert_eq!(RULES[help.unwrap()].topic, Topic::GeneralHelp);
    }

    #[test]
    fn test_matched_keyword() {
        let rule = &RULES[0];
        assert_eq!(rule.matched_keyword("how do i sign up"), Some("sign up"));
        assert_eq!(rule.matched_keyword("nothing here"), None);
    }
}
