//! Per-visitor session state.
//!
//! State is a plain value owned by whoever keeps the session store; every
//! transition takes the old state and returns the new one.

use serde::{Deserialize, Serialize};

/// Data remembered for a single browser session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Pages counted by the visit counter
    pub visits: u64,
}

impl SessionState {
    /// Count one more visit.
    #[must_use]
    pub fn record_visit(self) -> Self {
        Self {
            visits: self.visits.saturating_add(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_zero() {
        assert_eq!(SessionState::default().visits, 0);
    }

    #[test]
    fn test_record_visit_returns_next_state() {
        let first = SessionState::default().record_visit();
        let second = first.record_visit();

        assert_eq!(first.visits, 1);
        assert_eq!(second.visits, 2);
    }

    #[test]
    fn test_record_visit_saturates() {
        let state = SessionState { visits: u64::MAX };
        assert_eq!(state.record_visit().visits, u64::MAX);
    }
}
