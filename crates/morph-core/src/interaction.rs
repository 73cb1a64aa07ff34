use glam::Vec2;

/// Pointer state, in canvas-centred CSS pixels.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct InteractionState {
    pub pointer: Vec2,
    pub pointer_velocity: Vec2,
    pub is_hovering: bool,
    pub is_moving: bool,
    pub last_move_ms: f64,
}

impl InteractionState {
    pub fn speed(&self) -> f32 {
        self.pointer_velocity.length()
    }
}

/// Owns `InteractionState`; the simulation only ever reads it.
pub struct InteractionTracker {
    state: InteractionState,
    idle_timeout_ms: f64,
    velocity_decay: f32,
}

impl InteractionTracker {
    pub fn new(idle_timeout_ms: f64, velocity_decay: f32) -> Self {
        Self {
            state: InteractionState::default(),
            idle_timeout_ms: idle_timeout_ms.max(0.0),
            velocity_decay: velocity_decay.clamp(0.0, 1.0),
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Record a pointer sample. Non-finite coordinates are dropped.
    pub fn pointer_move(&mut self, position: Vec2, now_ms: f64) {
        if !position.is_finite() {
            return;
        }
        // The previous position starts at the centre and survives a leave.
        self.state.pointer_velocity = position - self.state.pointer;
        self.state.pointer = position;
        self.state.is_hovering = true;
        self.state.is_moving = true;
        self.state.last_move_ms = now_ms;
    }

    pub fn pointer_leave(&mut self) {
        self.state.is_hovering = false;
        self.state.is_moving = false;
        self.state.pointer_velocity = Vec2::ZERO;
    }

    /// Once the pointer has been still past the idle timeout, stop treating it
    /// as moving and bleed off the stored velocity one tick at a time.
    pub fn decay(&mut self, now_ms: f64) {
        if now_ms - self.state.last_move_ms > self.idle_timeout_ms {
            self.state.is_moving = false;
            self.state.pointer_velocity *= self.velocity_decay;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_records_velocity_between_samples() {
        let mut t = InteractionTracker::new(100.0, 0.9);
        t.pointer_move(Vec2::new(10.0, 0.0), 0.0);
        assert_eq!(t.state().pointer_velocity, Vec2::new(10.0, 0.0));
        t.pointer_move(Vec2::new(16.0, -8.0), 16.0);
        assert_eq!(t.state().pointer_velocity, Vec2::new(6.0, -8.0));
        assert!(t.state().is_hovering && t.state().is_moving);
        assert_eq!(t.state().last_move_ms, 16.0);
    }

    #[test]
    fn leave_clears_flags_and_velocity() {
        let mut t = InteractionTracker::new(100.0, 0.9);
        t.pointer_move(Vec2::ZERO, 0.0);
        t.pointer_move(Vec2::new(5.0, 5.0), 10.0);
        t.pointer_leave();
        let s = t.state();
        assert!(!s.is_hovering && !s.is_moving);
        assert_eq!(s.pointer_velocity, Vec2::ZERO);
    }

    #[test]
    fn reentry_measures_from_last_position() {
        let mut t = InteractionTracker::new(100.0, 0.9);
        t.pointer_move(Vec2::new(40.0, 0.0), 0.0);
        t.pointer_leave();
        t.pointer_move(Vec2::new(30.0, 5.0), 500.0);
        assert_eq!(t.state().pointer_velocity, Vec2::new(-10.0, 5.0));
        assert!(t.state().is_hovering);
    }

    #[test]
    fn idle_decay_waits_for_timeout() {
        let mut t = InteractionTracker::new(100.0, 0.9);
        t.pointer_move(Vec2::ZERO, 0.0);
        t.pointer_move(Vec2::new(10.0, 0.0), 10.0);

        t.decay(50.0);
        assert!(t.state().is_moving);
        assert_eq!(t.state().pointer_velocity, Vec2::new(10.0, 0.0));

        t.decay(111.0);
        assert!(!t.state().is_moving);
        assert!(t.state().is_hovering);
        assert!((t.state().pointer_velocity.x - 9.0).abs() < 1e-5);

        for _ in 0..100 {
            t.decay(500.0);
        }
        assert!(t.state().speed() < 1e-3);
    }

    #[test]
    fn nan_samples_are_ignored() {
        let mut t = InteractionTracker::new(100.0, 0.9);
        t.pointer_move(Vec2::new(f32::NAN, 1.0), 0.0);
        assert!(!t.state().is_hovering);
    }
}
