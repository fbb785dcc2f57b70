use std::time::{Duration, Instant};

pub const SHAKE_DURATION: Duration = Duration::from_millis(500);

/// Cancellable deadline behind the transient "shake" after a wrong guess.
///
/// Arming replaces any pending deadline, so an older timer can never clear a
/// newer shake.
#[derive(Debug, Clone)]
pub struct ShakeTimer {
    duration: Duration,
    deadline: Option<Instant>,
}

impl Default for ShakeTimer {
    fn default() -> Self {
        Self::new(SHAKE_DURATION)
    }
}

impl ShakeTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            deadline: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.duration);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    /// Clear the flag once its deadline has passed. Returns true if this call
    /// expired it.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_after_duration() {
        let start = Instant::now();
        let mut timer = ShakeTimer::default();
        timer.arm(start);
        assert!(timer.is_active());

        assert!(!timer.tick(start + Duration::from_millis(499)));
        assert!(timer.is_active());

        assert!(timer.tick(start + SHAKE_DURATION));
        assert!(!timer.is_active());
        assert!(!timer.tick(start + Duration::from_secs(2)));
    }

    #[test]
    fn test_rearm_supersedes_pending_deadline() {
        let start = Instant::now();
        let mut timer = ShakeTimer::default();
        timer.arm(start);
        timer.arm(start + Duration::from_millis(400));

        // the first deadline would have fired here
        assert!(!timer.tick(start + Duration::from_millis(600)));
        assert!(timer.is_active());
        assert!(timer.tick(start + Duration::from_millis(900)));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut timer = ShakeTimer::new(Duration::from_millis(50));
        timer.arm(start);
        timer.cancel();
        assert!(!timer.is_active());
        assert!(!timer.tick(start + Duration::from_secs(1)));
    }
}
