use std::time::{Duration, Instant};

/// Timestamps of the calls admitted for one key, oldest first.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallWindow {
    calls: Vec<Instant>,
}

impl CallWindow {
    /// Drops every call that is `period` or more older than `now`.
    pub(crate) fn prune(&mut self, now: Instant, period: Duration) {
        self.calls
            .retain(|t| now.saturating_duration_since(*t) < period);
    }

    /// Prunes, then records `now` if fewer than `max_calls` remain.
    /// A rejected call leaves the window untouched.
    pub(crate) fn try_admit(&mut self, now: Instant, max_calls: u32, period: Duration) -> bool {
        self.prune(now, period);

        if self.calls.len() < max_calls as usize {
            self.calls.push(now);
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.calls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_secs(60);

    #[test]
    fn test_admits_up_to_max() {
        let now = Instant::now();
        let mut window = CallWindow::default();

        assert!(window.try_admit(now, 2, PERIOD));
        assert!(window.try_admit(now, 2, PERIOD));
        assert!(!window.try_admit(now, 2, PERIOD));
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn test_call_exactly_one_period_old_is_pruned() {
        let start = Instant::now();
        let mut window = CallWindow::default();
        assert!(window.try_admit(start, 1, PERIOD));

        assert!(!window.try_admit(start + PERIOD - Duration::from_millis(1), 1, PERIOD));
        assert!(window.try_admit(start + PERIOD, 1, PERIOD));
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_prune_keeps_recent_calls() {
        let start = Instant::now();
        let mut window = CallWindow::default();
        window.try_admit(start, 5, PERIOD);
        window.try_admit(start + Duration::from_secs(30), 5, PERIOD);

        window.prune(start + Duration::from_secs(75), PERIOD);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_zero_max_calls_never_admits() {
        let mut window = CallWindow::default();
        assert!(!window.try_admit(Instant::now(), 0, PERIOD));
        assert_eq!(window.len(), 0);
    }
}
