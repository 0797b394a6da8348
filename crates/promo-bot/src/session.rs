//! Per-user conversation state
//!
//! Replaces the original process-wide dictionary with an explicit keyed
//! store: one typed dialog state per user, an explicit cancel transition,
//! and a TTL so abandoned dialogs do not linger.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use promo_core::value_objects::UserId;

/// Dialog a user is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversation {
    /// Admin is expected to send a code (or "auto" / "cancel") next
    AwaitingCode,
}

struct Entry {
    state: Conversation,
    started_at: Instant,
}

/// Short-lived keyed store for conversation state
pub struct ConversationStore {
    entries: DashMap<UserId, Entry>,
    ttl: Duration,
}

impl ConversationStore {
    /// Abandoned dialogs expire after this long
    pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Enter a dialog, replacing any previous one for the user
    pub fn begin(&self, user_id: UserId, state: Conversation) {
        self.entries.insert(
            user_id,
            Entry {
                state,
                started_at: Instant::now(),
            },
        );
    }

    /// Current dialog for the user, discarding an expired one
    pub fn get(&self, user_id: UserId) -> Option<Conversation> {
        let expired = match self.entries.get(&user_id) {
            Some(entry) if entry.started_at.elapsed() <= self.ttl => {
                return Some(entry.state);
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(&user_id);
        }
        None
    }

    /// Explicit cancel / completion transition
    pub fn end(&self, user_id: UserId) {
        self.entries.remove(&user_id);
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}
