//! Morph scheduler.
//!
//! Walks a fixed shape sequence on a timer while the showcase is on screen and
//! parks on the default shape otherwise. The timer is plain data polled at
//! frame boundaries, so a retarget can never land in the middle of a
//! simulation step, and clearing it is just dropping it.

use crate::context::ViewingContext;
use crate::shapes::ShapeKind;
use crate::store::ParticleStore;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MorphState {
    Idle(ShapeKind),
    Sequencing { index: usize },
}

/// Repeating deadline in host milliseconds.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct IntervalTimer {
    pub period_ms: f64,
    pub next_due_ms: f64,
}

impl IntervalTimer {
    pub fn new(now_ms: f64, period_ms: f64) -> Self {
        Self {
            period_ms,
            next_due_ms: now_ms + period_ms,
        }
    }

    /// Fire at most once; missed periods are dropped, not queued.
    ///
    /// Non-finite timestamps never fire. A deadline poisoned by one is
    /// re-armed from the next good timestamp instead.
    pub fn fire(&mut self, now_ms: f64) -> bool {
        if !now_ms.is_finite() {
            return false;
        }
        if !self.next_due_ms.is_finite() {
            self.next_due_ms = now_ms + self.period_ms;
            return false;
        }
        if now_ms < self.next_due_ms {
            return false;
        }
        let missed = ((now_ms - self.next_due_ms) / self.period_ms).floor();
        self.next_due_ms += missed * self.period_ms + self.period_ms;
        true
    }
}

pub struct MorphScheduler {
    sequence: Vec<ShapeKind>,
    interval_ms: f64,
    state: MorphState,
    /// Next index to resume from when sequencing restarts.
    index: usize,
    timer: Option<IntervalTimer>,
}

impl MorphScheduler {
    /// An empty sequence is replaced by the default shape alone.
    pub fn new(sequence: Vec<ShapeKind>, interval_ms: f64) -> Self {
        let sequence = if sequence.is_empty() {
            vec![ShapeKind::Sphere]
        } else {
            sequence
        };
        Self {
            sequence,
            interval_ms: interval_ms.max(1.0),
            state: MorphState::Idle(ShapeKind::Sphere),
            index: 0,
            timer: None,
        }
    }

    pub fn state(&self) -> MorphState {
        self.state
    }

    pub fn timer(&self) -> Option<IntervalTimer> {
        self.timer
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub fn sequence(&self) -> &[ShapeKind] {
        &self.sequence
    }

    /// React to a change of viewing context.
    pub fn enter(&mut self, context: ViewingContext, now_ms: f64, store: &mut ParticleStore) {
        match context {
            ViewingContext::Showcase => {
                if !matches!(self.state, MorphState::Sequencing { .. }) || self.timer.is_none() {
                    self.state = MorphState::Sequencing { index: self.index };
                    self.timer = Some(IntervalTimer::new(now_ms, self.interval_ms));
                    log::debug!("morph sequencing from index {}", self.index);
                }
            }
            ViewingContext::Static | ViewingContext::Hidden => {
                self.cancel();
                store.retarget(ShapeKind::Sphere);
                self.index = 0;
                self.state = MorphState::Idle(ShapeKind::Sphere);
            }
        }
    }

    /// Advance the sequence when the timer is due. Returns the new shape.
    pub fn poll(&mut self, now_ms: f64, store: &mut ParticleStore) -> Option<ShapeKind> {
        let MorphState::Sequencing { index } = self.state else {
            return None;
        };
        let timer = self.timer.as_mut()?;
        if !timer.fire(now_ms) {
            return None;
        }

        let next = (index + 1) % self.sequence.len();
        let shape = self.sequence[next];
        self.index = next;
        self.state = MorphState::Sequencing { index: next };
        store.retarget(shape);
        log::debug!("morph step {} -> {}", next, shape.name());
        Some(shape)
    }

    /// Clear the timer. Safe to call any number of times.
    pub fn cancel(&mut self) {
        if self.timer.take().is_some() {
            log::debug!("morph timer cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_fires_once_per_poll_and_drops_missed_periods() {
        let mut t = IntervalTimer::new(0.0, 100.0);
        assert!(!t.fire(99.0));
        assert!(t.fire(100.0));
        assert!(!t.fire(150.0));
        assert!(t.fire(1_000.0));
        assert_eq!(t.next_due_ms, 1_100.0);
    }

    #[test]
    fn timer_ignores_non_finite_timestamps() {
        let mut t = IntervalTimer::new(0.0, 100.0);
        for _ in 0..5 {
            assert!(!t.fire(f64::NAN));
            assert!(!t.fire(f64::INFINITY));
        }
        assert_eq!(t.next_due_ms, 100.0);
        assert!(t.fire(100.0));

        let mut poisoned = IntervalTimer::new(f64::NAN, 100.0);
        assert!(!poisoned.fire(500.0));
        assert_eq!(poisoned.next_due_ms, 600.0);
        assert!(poisoned.fire(600.0));
    }

    #[test]
    fn timer_skips_a_clock_jump_in_one_step() {
        let mut t = IntervalTimer::new(0.0, 2_500.0);
        assert!(t.fire(1.7e12));
        assert!(t.next_due_ms > 1.7e12);
        assert!(t.next_due_ms <= 1.7e12 + 2_500.0);
        assert!(!t.fire(1.7e12 + 1.0));
    }

    #[test]
    fn empty_sequence_falls_back_to_sphere() {
        let s = MorphScheduler::new(Vec::new(), 2500.0);
        assert_eq!(s.sequence(), &[ShapeKind::Sphere]);
    }
}
