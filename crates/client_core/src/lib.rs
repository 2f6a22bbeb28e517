use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use shared::{
    domain::{MessageId, Origin},
    protocol::{ChatMessage, SessionEvent},
};
use thiserror::Error;
use tokio::{runtime::Handle, sync::broadcast, task::JoinHandle};
use tracing::{debug, info};

pub mod auth;
mod composer;
pub mod config;
pub mod directory;
pub mod exit;

pub use composer::{Key, KeyOutcome, Modifiers};
pub use config::SessionConfig;

use composer::Composer;

const SESSION_EVENT_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("chat session must be opened inside a tokio runtime")]
    NoRuntime,
}

/// Source of the display-formatted time-of-day stamped on each message.
pub trait Clock: Send + Sync {
    fn time_of_day(&self) -> String;
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn time_of_day(&self) -> String {
        chrono::Local::now().format("%H:%M").to_string()
    }
}

struct SessionState {
    messages: Vec<ChatMessage>,
    next_id: u64,
    closed: bool,
}

impl SessionState {
    fn append(&mut self, text: String, origin: Origin, clock: &dyn Clock) -> ChatMessage {
        let message = ChatMessage {
            id: MessageId(self.next_id),
            text,
            origin,
            timestamp: clock.time_of_day(),
        };
        self.next_id += 1;
        self.messages.push(message.clone());
        message
    }
}

fn lock_state(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Message log controller for one open chat view.
///
/// Owns the append-only message sequence and every outstanding reply task. Dropping
/// (or [`ChatSession::close`]-ing) the session aborts replies that have not fired yet.
pub struct ChatSession {
    config: SessionConfig,
    clock: Arc<dyn Clock>,
    state: Arc<Mutex<SessionState>>,
    composer: Composer,
    reply_tasks: Vec<JoinHandle<()>>,
    runtime: Handle,
    events: broadcast::Sender<SessionEvent>,
}

impl ChatSession {
    pub fn open(config: SessionConfig) -> Result<Self, SessionError> {
        Self::open_with_clock(config, Arc::new(LocalClock))
    }

    pub fn open_with_clock(
        config: SessionConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SessionError> {
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);

        let mut state = SessionState {
            messages: Vec::new(),
            next_id: 1,
            closed: false,
        };
        state.append(config.welcome_text.clone(), Origin::Remote, clock.as_ref());

        info!(
            "session: opened display_name={} reply_delay_ms={}",
            config.display_name,
            config.reply_delay.as_millis()
        );

        Ok(Self {
            config,
            clock,
            state: Arc::new(Mutex::new(state)),
            composer: Composer::default(),
            reply_tasks: Vec::new(),
            runtime,
            events,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn display_name(&self) -> &str {
        &self.config.display_name
    }

    /// Appends `raw_text` as a local message and schedules the counterpart reply.
    ///
    /// Whitespace-only input is ignored: nothing is appended, nothing is scheduled and
    /// the composer keeps its contents.
    pub fn submit(&mut self, raw_text: &str) -> Option<MessageId> {
        if raw_text.trim().is_empty() {
            debug!("session: ignored empty submit");
            return None;
        }

        let id = {
            let mut guard = lock_state(&self.state);
            let message = guard.append(raw_text.to_string(), Origin::Local, self.clock.as_ref());
            let id = message.id;
            // Event order must match id order; send before releasing the lock.
            let _ = self.events.send(SessionEvent::MessageAppended(message));
            id
        };
        self.composer.clear();
        debug!("session: local append id={id}");

        self.schedule_reply();
        Some(id)
    }

    pub fn consume_keystroke(&mut self, key: Key, modifiers: Modifiers) -> KeyOutcome {
        match self.composer.edit(key, modifiers) {
            Some(outcome) => outcome,
            None => {
                let text = self.composer.text().to_string();
                KeyOutcome::Submitted(self.submit(&text))
            }
        }
    }

    pub fn composer_text(&self) -> &str {
        self.composer.text()
    }

    pub fn set_composer_text(&mut self, text: impl Into<String>) {
        self.composer.set_text(text.into());
    }

    /// Ordered snapshot of the message log.
    pub fn view(&self) -> Vec<ChatMessage> {
        lock_state(&self.state).messages.clone()
    }

    pub fn message_count(&self) -> usize {
        lock_state(&self.state).messages.len()
    }

    pub fn pending_replies(&self) -> usize {
        self.reply_tasks
            .iter()
            .filter(|task| !task.is_finished())
            .count()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Tears the session down, discarding any reply that has not fired yet.
    pub fn close(self) {
        drop(self);
    }

    fn schedule_reply(&mut self) {
        self.reply_tasks.retain(|task| !task.is_finished());

        let state = Arc::downgrade(&self.state);
        let clock = Arc::clone(&self.clock);
        let events = self.events.clone();
        let delay = self.config.reply_delay;
        let text = self.config.reply_text.clone();

        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            fire_reply(state, text, clock, events);
        });
        self.reply_tasks.push(task);
    }
}

fn fire_reply(
    state: Weak<Mutex<SessionState>>,
    text: String,
    clock: Arc<dyn Clock>,
    events: broadcast::Sender<SessionEvent>,
) {
    let Some(state) = state.upgrade() else {
        debug!("session: reply discarded reason=session_dropped");
        return;
    };

    let mut guard = lock_state(&state);
    if guard.closed {
        debug!("session: reply discarded reason=session_closed");
        return;
    }
    let message = guard.append(text, Origin::Remote, clock.as_ref());
    debug!("session: reply fired id={}", message.id);
    let _ = events.send(SessionEvent::MessageAppended(message));
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        let message_count = {
            let mut guard = lock_state(&self.state);
            guard.closed = true;
            guard.messages.len()
        };

        let mut discarded = 0usize;
        for task in self.reply_tasks.drain(..) {
            if !task.is_finished() {
                discarded += 1;
            }
            task.abort();
        }

        info!(
            "session: closed display_name={} messages={} discarded_replies={}",
            self.config.display_name, message_count, discarded
        );
        let _ = self.events.send(SessionEvent::Closed);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
