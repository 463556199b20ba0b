use crate::state::{GameSession, LogEntry, Tone};

/// Ordered narration buffered during a reduction and committed at the end.
///
/// Entries receive their ids and timestamp only on [`Journal::commit`], so a
/// reduction that bails out early leaves the session log untouched.
#[derive(Debug, Default)]
pub struct Journal {
    lines: Vec<(Tone, String)>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tone: Tone, text: impl Into<String>) {
        self.lines.push((tone, text.into()));
    }

    pub fn system(&mut self, text: impl Into<String>) {
        self.push(Tone::System, text);
    }

    pub fn player(&mut self, text: impl Into<String>) {
        self.push(Tone::Player, text);
    }

    pub fn enemy(&mut self, text: impl Into<String>) {
        self.push(Tone::Enemy, text);
    }

    pub fn reward(&mut self, text: impl Into<String>) {
        self.push(Tone::Reward, text);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends the buffered lines to `session.log`, then drops the oldest
    /// entries beyond `capacity`.
    pub fn commit(self, session: &mut GameSession, timestamp: u64, capacity: Option<usize>) {
        for (tone, text) in self.lines {
            let id = session.counters.log_id();
            session.log.push(LogEntry {
                id,
                text,
                tone,
                timestamp,
            });
        }
        if let Some(capacity) = capacity {
            let excess = session.log.len().saturating_sub(capacity);
            if excess > 0 {
                session.log.drain(..excess);
            }
        }
    }
}
