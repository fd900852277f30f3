//! # Form Lifecycle
//!
//! Every form runs the same small state machine:
//!
//! ```text
//!          submit               reply ok
//!   Idle ─────────► Submitting ──────────► Succeeded { until }
//!    ▲                  │                        │
//!    │                  │ reply err /            │ tick past `until`
//!    │                  ▼ local check fails      │
//!    └──────────── Failed(msg) ◄─────────────────┘ (back to Idle)
//! ```
//!
//! `Submitting` is the in-flight guard: a second submit is dropped while a
//! request is outstanding. Local validation errors go straight to `Failed`
//! without passing through `Submitting`.

use std::time::{Duration, Instant};

/// How long the key and schema forms show their success banner.
pub const SUCCESS_FLASH: Duration = Duration::from_secs(3);
/// How long the result viewer shows "Copied".
pub const COPIED_FLASH: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded { until: Instant },
    Failed(String),
}

impl FormPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormPhase::Submitting)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, FormPhase::Succeeded { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FormPhase::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn succeed(&mut self, now: Instant, flash: Duration) {
        *self = FormPhase::Succeeded { until: now + flash };
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        *self = FormPhase::Failed(message.into());
    }

    /// Drops an expired success banner. Returns true if the phase changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let FormPhase::Succeeded { until } = self
            && now >= *until
        {
            *self = FormPhase::Idle;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let phase = FormPhase::default();
        assert_eq!(phase, FormPhase::Idle);
        assert!(!phase.is_submitting());
        assert_eq!(phase.error(), None);
    }

    #[test]
    fn test_success_expires_after_flash() {
        let start = Instant::now();
        let mut phase = FormPhase::Submitting;
        phase.succeed(start, SUCCESS_FLASH);
        assert!(phase.is_succeeded());

        assert!(!phase.tick(start + Duration::from_millis(2999)));
        assert!(phase.is_succeeded());

        assert!(phase.tick(start + SUCCESS_FLASH));
        assert_eq!(phase, FormPhase::Idle);
    }

    #[test]
    fn test_tick_leaves_failure_alone() {
        let mut phase = FormPhase::Failed("nope".into());
        assert!(!phase.tick(Instant::now() + Duration::from_secs(60)));
        assert_eq!(phase.error(), Some("nope"));
    }
}
