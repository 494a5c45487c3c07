//! A single chat session: history plus the responder that feeds it

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};
use uuid::Uuid;

use super::store::{Message, MessageStore, Sender};
use crate::config::AssistantConfig;
use crate::responder::ResponseDispatcher;
use crate::scheduler::{ReplyScheduler, TokioScheduler};
use crate::utils::{non_blank, truncate, Clock, SystemClock};

const EVENT_CAPACITY: usize = 64;

/// Outcome of [`ChatSession::submit_user_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The message was appended and a reply is on its way
    Accepted,
    /// The text was blank; nothing was appended or scheduled
    Ignored,
}

struct Shared {
    session_id: Uuid,
    store: Mutex<MessageStore>,
    dispatcher: ResponseDispatcher,
    clock: Arc<dyn Clock>,
    events: broadcast::Sender<Message>,
    /// Replies scheduled but not yet appended
    pending: watch::Sender<usize>,
}

impl Shared {
    fn append(&self, sender: Sender, text: String) {
        let mut store = self.store.lock();
        // Stamped under the lock so timestamps never decrease along the history.
        let message = Message::new(sender, text, self.clock.now());
        store.append(message.clone());
        // No receivers is fine: nobody is rendering.
        let _ = self.events.send(message);
    }

    fn reply_to(&self, text: &str) {
        let reply = self.dispatcher.dispatch(text);
        debug!(session_id = %self.session_id, reply = %truncate(&reply, 40), "Appending bot reply");
        self.append(Sender::Bot, reply);
        self.pending.send_modify(|n| *n = n.saturating_sub(1));
    }
}

/// Conversation state of one session
///
/// Owns the message history for the lifetime of the session; nothing is
/// persisted. Bot replies are appended by a scheduled task after
/// `reply_delay` and are never cancelled.
pub struct ChatSession {
    shared: Arc<Shared>,
    scheduler: Arc<dyn ReplyScheduler>,
    reply_delay: Duration,
}

impl ChatSession {
    /// Create a session using the system clock and the tokio scheduler
    pub fn new(reply_delay: Duration) -> Self {
        Self::with_parts(
            ResponseDispatcher::new(),
            Arc::new(TokioScheduler::new()),
            Arc::new(SystemClock),
            reply_delay,
        )
    }

    /// Create a session from the assistant configuration
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(config.reply_delay())
    }

    /// Create a session with explicit collaborators
    pub fn with_parts(
        dispatcher: ResponseDispatcher,
        scheduler: Arc<dyn ReplyScheduler>,
        clock: Arc<dyn Clock>,
        reply_delay: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (pending, _) = watch::channel(0);
        Self {
            shared: Arc::new(Shared {
                session_id: Uuid::new_v4(),
                store: Mutex::new(MessageStore::new()),
                dispatcher,
                clock,
                events,
                pending,
            }),
            scheduler,
            reply_delay,
        }
    }

    /// Session identifier, used to correlate log lines
    pub fn id(&self) -> Uuid {
        self.shared.session_id
    }

    /// Seed the welcome message
    ///
    /// Call once when the session starts; later calls do nothing.
    pub fn init_session(&self) {
        let shared = &self.shared;
        let mut store = shared.store.lock();
        if let Some(welcome) = store.seed_welcome(shared.clock.now()) {
            let _ = shared.events.send(welcome.clone());
            info!(session_id = %shared.session_id, "Chat session started");
        }
    }

    /// Submit text typed by the user
    ///
    /// Surrounding whitespace is trimmed. Blank input is ignored. Otherwise
    /// the user message is appended immediately and the bot reply is
    /// scheduled.
    pub fn submit_user_text(&self, text: &str) -> Submission {
        let Some(text) = non_blank(text) else {
            debug!(session_id = %self.shared.session_id, "Ignoring blank submission");
            return Submission::Ignored;
        };

        debug!(
            session_id = %self.shared.session_id,
            preview = %truncate(text, 40),
            "Appending user message"
        );
        self.shared.append(Sender::User, text.to_string());
        self.shared.pending.send_modify(|n| *n += 1);

        let shared = Arc::clone(&self.shared);
        let text = text.to_string();
        self.scheduler
            .schedule(self.reply_delay, Box::new(move || shared.reply_to(&text)));

        Submission::Accepted
    }

    /// Snapshot of the history in insertion order
    pub fn history(&self) -> Vec<Message> {
        self.shared.store.lock().messages().to_vec()
    }

    /// Messages from index `start` onwards, in insertion order
    pub fn history_since(&self, start: usize) -> Vec<Message> {
        let store = self.shared.store.lock();
        store.messages().get(start..).unwrap_or_default().to_vec()
    }

    /// Number of replies scheduled but not yet appended
    pub fn pending_replies(&self) -> usize {
        *self.shared.pending.borrow()
    }

    /// Wait until every scheduled reply has been appended
    pub async fn idle(&self) {
        let mut pending = self.shared.pending.subscribe();
        // The sender lives in `shared`, which outlives this borrow.
        let _ = pending.wait_for(|n| *n == 0).await;
    }

    /// Number of messages so far
    pub fn len(&self) -> usize {
        self.shared.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.store.lock().is_empty()
    }

    /// Receive every message appended from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.shared.events.subscribe()
    }

    /// The responder answering this session
    pub fn dispatcher(&self) -> &ResponseDispatcher {
        &self.shared.dispatcher
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.shared.session_id)
            .field("messages", &self.len())
            .field("reply_delay", &self.reply_delay)
            .finish()
    }
}
