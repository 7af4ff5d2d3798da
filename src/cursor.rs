use crate::ease::{Ease, Tween};

pub const CURSOR_EASE: Ease = Ease::Power2Out;

#[derive(Clone, Debug)]
pub struct PointerFollower {
    duration_ms: f64,
    x: Tween,
    y: Tween,
}

impl PointerFollower {
    pub fn new(duration_ms: u32) -> Self {
        let rest = Tween {
            from: 0.0,
            to: 0.0,
            start_ms: 0.0,
            duration_ms: 0.0,
            ease: CURSOR_EASE,
        };
        Self {
            duration_ms: f64::from(duration_ms),
            x: rest,
            y: rest,
        }
    }

    #[cfg(test)]
    pub fn target(&self) -> (f64, f64) {
        (self.x.to, self.y.to)
    }

    pub fn position(&self, now_ms: f64) -> (f64, f64) {
        (self.x.sample(now_ms), self.y.sample(now_ms))
    }

    #[cfg(test)]
    pub fn is_settled(&self, now_ms: f64) -> bool {
        self.x.is_done(now_ms) && self.y.is_done(now_ms)
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64, now_ms: f64) {
        let (current_x, current_y) = self.position(now_ms);
        self.x = self.retarget(current_x, x, now_ms);
        self.y = self.retarget(current_y, y, now_ms);
    }

    fn retarget(&self, from: f64, to: f64, now_ms: f64) -> Tween {
        Tween {
            from,
            to,
            start_ms: now_ms,
            duration_ms: self.duration_ms,
            ease: CURSOR_EASE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_lags_then_reaches_target() {
        let mut follower = PointerFollower::new(300);
        follower.pointer_moved(100.0, 50.0, 0.0);

        let (x, y) = follower.position(100.0);
        assert!(x > 0.0 && x < 100.0);
        assert!(y > 0.0 && y < 50.0);
        assert!(!follower.is_settled(100.0));

        assert_eq!(follower.position(300.0), (100.0, 50.0));
        assert!(follower.is_settled(300.0));
    }

    #[test]
    fn retarget_starts_from_current_position() {
        let mut follower = PointerFollower::new(300);
        follower.pointer_moved(100.0, 0.0, 0.0);
        let (midway, _) = follower.position(150.0);

        follower.pointer_moved(0.0, 0.0, 150.0);
        assert_eq!(follower.position(150.0).0, midway);
        assert_eq!(follower.target(), (0.0, 0.0));
        assert_eq!(follower.position(450.0).0, 0.0);
    }

    #[test]
    fn zero_duration_snaps() {
        let mut follower = PointerFollower::new(0);
        follower.pointer_moved(12.0, 34.0, 5.0);
        assert_eq!(follower.position(5.0), (12.0, 34.0));
    }
}
