use std::time::Duration;

/// What a repeating background fetch does when one attempt fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log and keep the loop alive. Parked polling and stream reconnects
    /// both use this: transient backend unavailability must not halt them.
    Continue,
    /// Stop the loop on the first failure.
    Abort,
}

/// Retry behavior of a background loop, made explicit instead of living
/// implicitly inside a timer callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub on_failure: FailurePolicy,
}

impl RetryPolicy {
    pub const fn continue_every(interval: Duration) -> Self {
        RetryPolicy {
            interval,
            on_failure: FailurePolicy::Continue,
        }
    }

    pub const fn abort_after(interval: Duration) -> Self {
        RetryPolicy {
            interval,
            on_failure: FailurePolicy::Abort,
        }
    }

    pub fn keeps_going(&self) -> bool {
        self.on_failure == FailurePolicy::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continue_policy_keeps_going() {
        let policy = RetryPolicy::continue_every(Duration::from_secs(2));
        assert!(policy.keeps_going());
        assert_eq!(policy.interval, Duration::from_secs(2));
    }

    #[test]
    fn abort_policy_stops() {
        assert!(!RetryPolicy::abort_after(Duration::from_secs(1)).keeps_going());
    }
}
