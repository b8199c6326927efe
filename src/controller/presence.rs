use std::time::{Duration, Instant};

use crate::config::PresenceSettings;
use crate::token::TokenId;

/// What the reader situation currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    /// Nothing on the reader, and the removal has been handled.
    NoToken,
    /// Read on the last poll, or missed for less than the debounce window.
    Present { token: TokenId, last_seen: Instant },
    /// Missed for longer than the debounce window; waiting for it to come back.
    Grace { token: TokenId, last_seen: Instant },
}

/// The outcome of one reader observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing to act on.
    Idle,
    /// The current token was read again.
    Heartbeat(TokenId),
    /// A different token appeared, possibly after none.
    Changed(TokenId),
    /// The token has been missing for `elapsed`, not yet long enough to
    /// count as removed.
    Grace { elapsed: Duration },
    /// The token has been gone past the removal timeout. Reported once.
    Removed,
}

/// Debounces an intermittent reader into token transitions.
///
/// Pure: time comes in with every observation.
#[derive(Debug)]
pub struct PresenceMachine {
    state: Presence,
    debounce: Duration,
    removal_timeout: Duration,
}

impl PresenceMachine {
    pub fn new(settings: &PresenceSettings) -> Self {
        Self {
            state: Presence::NoToken,
            debounce: Duration::from_millis(settings.debounce_ms),
            removal_timeout: Duration::from_millis(settings.removal_timeout_ms),
        }
    }

    pub fn observe(&mut self, read: Option<TokenId>, now: Instant) -> Transition {
        match read {
            Some(id) => {
                let same = self.current().is_some_and(|cur| *cur == id);
                self.state = Presence::Present {
                    token: id.clone(),
                    last_seen: now,
                };
                if same {
                    Transition::Heartbeat(id)
                } else {
                    Transition::Changed(id)
                }
            }
            None => self.missed(now),
        }
    }

    pub fn state(&self) -> &Presence {
        &self.state
    }

    /// The token being played for, including while it is in grace.
    pub fn current(&self) -> Option<&TokenId> {
        match &self.state {
            Presence::NoToken => None,
            Presence::Present { token, .. } | Presence::Grace { token, .. } => Some(token),
        }
    }

    fn missed(&mut self, now: Instant) -> Transition {
        let (token, last_seen) = match &self.state {
            Presence::NoToken => return Transition::Idle,
            Presence::Present { token, last_seen } | Presence::Grace { token, last_seen } => {
                (token.clone(), *last_seen)
            }
        };

        let elapsed = now.saturating_duration_since(last_seen);
        if elapsed > self.removal_timeout {
            self.state = Presence::NoToken;
            Transition::Removed
        } else if elapsed >= self.debounce {
            self.state = Presence::Grace { token, last_seen };
            Transition::Grace { elapsed }
        } else {
            Transition::Idle
        }
    }
}
