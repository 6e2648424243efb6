use chrono::Utc;
use serde::Serialize;

/// Lower bound (Unix seconds) sent to the status API as `from_date`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PollCursor(i64);

impl PollCursor {
    pub fn now() -> Self {
        PollCursor(Utc::now().timestamp())
    }

    pub fn from_unix(secs: i64) -> Self {
        PollCursor(secs)
    }

    pub fn as_unix(&self) -> i64 {
        self.0
    }

    /// Move to the current time. Never moves backwards.
    fn advance(&mut self) {
        self.0 = self.0.max(Utc::now().timestamp());
    }
}

/// The only mutable state the loop carries between iterations.
#[derive(Debug)]
pub struct LoopState {
    cursor: PollCursor,
    last_notified: String,
}

impl LoopState {
    pub fn new(cursor: PollCursor) -> Self {
        LoopState { cursor, last_notified: String::new() }
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    pub fn last_notified(&self) -> &str {
        &self.last_notified
    }

    /// Called only after the chat transport accepted `message`.
    pub(super) fn record_delivery(&mut self, message: String) {
        self.last_notified = message;
        self.cursor.advance();
    }
}
