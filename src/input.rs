// Energy Monitor - Button Input
//
// Edge-triggered debouncing for the two active-LOW buttons.  The monitor loop
// polls every ~100 ms plus capture time, so a press is reported on the first
// poll that sees it, and further presses are ignored for a lockout window.

use std::time::{Duration, Instant};

use heapless::Vec;

use crate::events::ButtonEvent;

pub struct Debouncer {
    lockout: Duration,

    // Level seen on the previous poll
    was_pressed: bool,

    // When the last press was reported
    last_accept: Option<Instant>,
}

impl Debouncer {
    pub fn new(lockout: Duration) -> Self {
        Self {
            lockout,
            was_pressed: false,
            last_accept: None,
        }
    }

    /// Feed the current level.  Returns `true` on an accepted press edge.
    pub fn update(&mut self, pressed: bool, now: Instant) -> bool {
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        if !edge {
            return false;
        }

        // ---- lockout after an accepted press ----
        if let Some(last) = self.last_accept {
            if now.saturating_duration_since(last) < self.lockout {
                return false;
            }
        }
        self.last_accept = Some(now);
        true
    }
}

/// Both buttons of the board.
pub struct InputManager {
    train: Debouncer,
    counter: Debouncer,
}

impl InputManager {
    pub fn new(lockout: Duration) -> Self {
        Self {
            train: Debouncer::new(lockout),
            counter: Debouncer::new(lockout),
        }
    }

    /// Poll both levels (`true` = pressed).  The mode toggle is reported
    /// before a training request seen on the same poll.
    pub fn update(
        &mut self,
        train_pressed: bool,
        counter_pressed: bool,
        now: Instant,
    ) -> Vec<ButtonEvent, 2> {
        let mut events = Vec::new();
        if self.counter.update(counter_pressed, now) {
            let _ = events.push(ButtonEvent::ToggleCounter);
        }
        if self.train.update(train_pressed, now) {
            let _ = events.push(ButtonEvent::Train);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCKOUT: Duration = Duration::from_millis(500);

    #[test]
    fn test_reports_press_edge_once() {
        let t0 = Instant::now();
        let mut button = Debouncer::new(LOCKOUT);
        assert!(!button.update(false, t0));
        assert!(button.update(true, t0 + Duration::from_millis(100)));
        // Held down: no repeat
        assert!(!button.update(true, t0 + Duration::from_millis(900)));
        assert!(!button.update(false, t0 + Duration::from_millis(1000)));
        assert!(button.update(true, t0 + Duration::from_millis(1100)));
    }

    #[test]
    fn test_lockout_swallows_bounce() {
        let t0 = Instant::now();
        let mut button = Debouncer::new(LOCKOUT);
        assert!(button.update(true, t0));
        assert!(!button.update(false, t0 + Duration::from_millis(10)));
        assert!(!button.update(true, t0 + Duration::from_millis(20)));
        assert!(!button.update(false, t0 + Duration::from_millis(600)));
        assert!(button.update(true, t0 + Duration::from_millis(700)));
    }

    #[test]
    fn test_toggle_reported_before_train() {
        let t0 = Instant::now();
        let mut input = InputManager::new(LOCKOUT);
        let events = input.update(true, true, t0);
        assert_eq!(events.as_slice(), &[ButtonEvent::ToggleCounter, ButtonEvent::Train]);
        assert!(input.update(true, true, t0 + Duration::from_millis(100)).is_empty());
    }
}
