//! Pointer stream → gesture classification.
//!
//! The recognizer is fed one pointer event at a time and returns the gestures
//! that event completes. It never reads a clock on its own: timestamps come in
//! with the samples, and the host calls [`GestureRecognizer::poll`] once
//! [`GestureRecognizer::tap_deadline`] has passed to flush an unmatched tap.

use crate::config::GestureConfig;
use crate::model::{PointerPhase, PointerSample};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// Scale relative to the inter-pointer distance when the pinch began.
    Pinch { scale: f64, center: (f64, f64) },
    /// The pinch pair broke up; the next pinch starts a new baseline.
    PinchEnd,
    /// Delta since the previous sample of the single active pointer.
    Pan { dx: f64, dy: f64 },
    Swipe { direction: SwipeDirection, velocity: f64 },
    Tap { x: f64, y: f64 },
    DoubleTap { x: f64, y: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    OnePointer,
    TwoPointers,
}

#[derive(Clone, Copy, Debug)]
struct PinchBaseline {
    ids: (i32, i32),
    distance: f64,
}

#[derive(Clone, Copy, Debug)]
struct PendingTap {
    x: f64,
    y: f64,
    time: f64,
}

#[derive(Debug, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    /// Active pointers in arrival order.
    pointers: Vec<PointerSample>,
    pinch: Option<PinchBaseline>,
    /// Last sample used for pan deltas.
    pan_last: Option<(f64, f64)>,
    /// Start of a single-pointer gesture still eligible for swipe/tap.
    candidate: Option<PointerSample>,
    pending_tap: Option<PendingTap>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self { config, ..Default::default() }
    }

    pub fn phase(&self) -> GesturePhase {
        match self.pointers.len() {
            0 => GesturePhase::Idle,
            1 => GesturePhase::OnePointer,
            _ => GesturePhase::TwoPointers,
        }
    }

    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    /// Drops all tracking state, including a pending tap.
    pub fn reset(&mut self) {
        self.pointers.clear();
        self.pinch = None;
        self.pan_last = None;
        self.candidate = None;
        self.pending_tap = None;
    }

    pub fn handle(&mut self, phase: PointerPhase, sample: PointerSample) -> Vec<Gesture> {
        match phase {
            PointerPhase::Down => self.pointer_down(sample),
            PointerPhase::Move => self.pointer_move(sample),
            PointerPhase::Up => self.pointer_up(sample, true),
            PointerPhase::Cancel => self.pointer_up(sample, false),
        }
    }

    /// When the pending tap should be confirmed, if one is waiting.
    pub fn tap_deadline(&self) -> Option<f64> {
        self.pending_tap.map(|t| t.time + self.config.tap_window_ms)
    }

    /// Emits the pending tap once its confirmation window has elapsed.
    pub fn poll(&mut self, now: f64) -> Option<Gesture> {
        let tap = self.pending_tap?;
        if now - tap.time >= self.config.tap_window_ms {
            self.pending_tap = None;
            return Some(Gesture::Tap { x: tap.x, y: tap.y });
        }
        None
    }

    fn index_of(&self, id: i32) -> Option<usize> {
        self.pointers.iter().position(|p| p.id == id)
    }

    fn pointer_down(&mut self, sample: PointerSample) -> Vec<Gesture> {
        if self.index_of(sample.id).is_some() {
            return Vec::new();
        }
        let mut out = Vec::new();
        self.pointers.push(sample);
        match self.pointers.len() {
            1 => {
                if let Some(tap) = self.poll(sample.timestamp) {
                    out.push(tap);
                }
                self.candidate = Some(sample);
                self.pan_last = Some((sample.x, sample.y));
            }
            2 => {
                self.candidate = None;
                self.pan_last = None;
                self.latch_pinch();
            }
            _ => {}
        }
        out
    }

    fn pointer_move(&mut self, sample: PointerSample) -> Vec<Gesture> {
        let Some(idx) = self.index_of(sample.id) else {
            return Vec::new();
        };
        self.pointers[idx] = sample;

        if self.pointers.len() >= 2 {
            let (a, b) = (self.pointers[0], self.pointers[1]);
            let latched = matches!(self.pinch, Some(p) if p.ids == (a.id, b.id));
            if !latched {
                return self.relatch_pinch();
            }
            let Some(base) = self.pinch else {
                return Vec::new();
            };
            if base.distance <= 0.0 {
                return Vec::new();
            }
            let scale = distance(&a, &b) / base.distance;
            return vec![Gesture::Pinch { scale, center: midpoint(&a, &b) }];
        }

        let Some((lx, ly)) = self.pan_last else {
            self.pan_last = Some((sample.x, sample.y));
            return Vec::new();
        };
        self.pan_last = Some((sample.x, sample.y));
        vec![Gesture::Pan { dx: sample.x - lx, dy: sample.y - ly }]
    }

    fn pointer_up(&mut self, sample: PointerSample, classify: bool) -> Vec<Gesture> {
        let Some(idx) = self.index_of(sample.id) else {
            return Vec::new();
        };
        self.pointers.remove(idx);
        let mut out = Vec::new();

        match self.pointers.len() {
            0 => {
                self.pinch = None;
                self.pan_last = None;
                match self.candidate.take() {
                    Some(start) if classify => out.extend(self.classify_release(start, sample)),
                    _ => {}
                }
            }
            1 => {
                // Re-baseline on the survivor so the next pan has no jump.
                out.push(Gesture::PinchEnd);
                self.pinch = None;
                let rest = self.pointers[0];
                self.pan_last = Some((rest.x, rest.y));
            }
            _ => {
                let (a, b) = (self.pointers[0], self.pointers[1]);
                if !matches!(self.pinch, Some(p) if p.ids == (a.id, b.id)) {
                    out.extend(self.relatch_pinch());
                }
            }
        }
        out
    }

    /// A new pair takes over; consumers must re-anchor on the next pinch.
    fn relatch_pinch(&mut self) -> Vec<Gesture> {
        let had_pinch = self.pinch.is_some();
        self.latch_pinch();
        if had_pinch { vec![Gesture::PinchEnd] } else { Vec::new() }
    }

    fn latch_pinch(&mut self) {
        if self.pointers.len() < 2 {
            self.pinch = None;
            return;
        }
        let (a, b) = (self.pointers[0], self.pointers[1]);
        self.pinch = Some(PinchBaseline { ids: (a.id, b.id), distance: distance(&a, &b) });
    }

    fn classify_release(&mut self, start: PointerSample, end: PointerSample) -> Vec<Gesture> {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let displacement = (dx * dx + dy * dy).sqrt();
        let elapsed = (end.timestamp - start.timestamp).max(1.0);
        let velocity = displacement / elapsed;

        if displacement > self.config.swipe_min_distance && velocity > self.config.swipe_min_velocity {
            let direction = if dx.abs() > dy.abs() {
                if dx > 0.0 { SwipeDirection::Right } else { SwipeDirection::Left }
            } else if dy > 0.0 {
                SwipeDirection::Down
            } else {
                SwipeDirection::Up
            };
            return vec![Gesture::Swipe { direction, velocity }];
        }
        self.register_tap(end.x, end.y, end.timestamp)
    }

    fn register_tap(&mut self, x: f64, y: f64, time: f64) -> Vec<Gesture> {
        let slop = self.config.double_tap_slop;
        match self.pending_tap.take() {
            Some(prev)
                if time - prev.time < self.config.tap_window_ms
                    && (x - prev.x).abs() < slop
                    && (y - prev.y).abs() < slop =>
            {
                vec![Gesture::DoubleTap { x: (x + prev.x) / 2.0, y: (y + prev.y) / 2.0 }]
            }
            Some(prev) => {
                // The earlier tap can no longer pair up; settle it now.
                self.pending_tap = Some(PendingTap { x, y, time });
                vec![Gesture::Tap { x: prev.x, y: prev.y }]
            }
            None => {
                self.pending_tap = Some(PendingTap { x, y, time });
                Vec::new()
            }
        }
    }
}

fn distance(a: &PointerSample, b: &PointerSample) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

fn midpoint(a: &PointerSample, b: &PointerSample) -> (f64, f64) {
    ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: i32, x: f64, y: f64, t: f64) -> PointerSample {
        PointerSample::new(id, x, y, t)
    }

    fn recognizer() -> GestureRecognizer {
        GestureRecognizer::new(GestureConfig::default())
    }

    fn tap(r: &mut GestureRecognizer, x: f64, y: f64, t: f64) -> Vec<Gesture> {
        let mut out = r.handle(PointerPhase::Down, p(1, x, y, t));
        out.extend(r.handle(PointerPhase::Up, p(1, x, y, t + 20.0)));
        out
    }

    #[test]
    fn fast_release_is_a_swipe() {
        let mut r = recognizer();
        r.handle(PointerPhase::Down, p(1, 0.0, 0.0, 1000.0));
        let out = r.handle(PointerPhase::Up, p(1, 60.0, 5.0, 1100.0));
        match out.as_slice() {
            [Gesture::Swipe { direction, velocity }] => {
                assert_eq!(*direction, SwipeDirection::Right);
                assert!((velocity - 0.602).abs() < 0.01, "velocity {}", velocity);
            }
            other => panic!("expected swipe, got {:?}", other),
        }
        assert!(r.tap_deadline().is_none());
    }

    #[test]
    fn short_release_is_not_a_swipe() {
        let mut r = recognizer();
        r.handle(PointerPhase::Down, p(1, 0.0, 0.0, 1000.0));
        let out = r.handle(PointerPhase::Up, p(1, 40.0, 0.0, 1100.0));
        assert!(out.iter().all(|g| !matches!(g, Gesture::Swipe { .. })));
        assert_eq!(r.tap_deadline(), Some(1400.0));
    }

    #[test]
    fn vertical_swipe_direction_uses_dominant_axis() {
        let mut r = recognizer();
        r.handle(PointerPhase::Down, p(1, 100.0, 300.0, 0.0));
        let out = r.handle(PointerPhase::Up, p(1, 110.0, 150.0, 100.0));
        assert!(matches!(out.as_slice(), [Gesture::Swipe { direction: SwipeDirection::Up, .. }]));
    }

    #[test]
    fn two_quick_taps_make_one_double_tap() {
        let mut r = recognizer();
        let mut out = tap(&mut r, 100.0, 100.0, 0.0);
        out.extend(tap(&mut r, 110.0, 105.0, 230.0));
        assert_eq!(out, vec![Gesture::DoubleTap { x: 105.0, y: 102.5 }]);
        assert!(r.tap_deadline().is_none());
        assert_eq!(r.poll(10_000.0), None);
    }

    #[test]
    fn unmatched_tap_confirms_after_window() {
        let mut r = recognizer();
        assert!(tap(&mut r, 10.0, 20.0, 0.0).is_empty());
        assert_eq!(r.poll(200.0), None);
        assert_eq!(r.poll(320.0), Some(Gesture::Tap { x: 10.0, y: 20.0 }));
        assert_eq!(r.poll(400.0), None);
    }

    #[test]
    fn distant_second_tap_settles_the_first() {
        let mut r = recognizer();
        tap(&mut r, 0.0, 0.0, 0.0);
        let out = tap(&mut r, 200.0, 0.0, 100.0);
        assert_eq!(out, vec![Gesture::Tap { x: 0.0, y: 0.0 }]);
        assert_eq!(r.poll(500.0), Some(Gesture::Tap { x: 200.0, y: 0.0 }));
    }

    #[test]
    fn late_second_tap_flushes_stale_pending_on_down() {
        let mut r = recognizer();
        tap(&mut r, 0.0, 0.0, 0.0);
        let out = r.handle(PointerPhase::Down, p(1, 0.0, 0.0, 900.0));
        assert_eq!(out, vec![Gesture::Tap { x: 0.0, y: 0.0 }]);
    }

    #[test]
    fn pinch_scale_is_relative_to_gesture_start() {
        let mut r = recognizer();
        r.handle(PointerPhase::Down, p(1, 500.0, 500.0, 0.0));
        r.handle(PointerPhase::Down, p(2, 600.0, 500.0, 5.0));
        let out = r.handle(PointerPhase::Move, p(2, 650.0, 500.0, 20.0));
        match out.as_slice() {
            [Gesture::Pinch { scale, center }] => {
                assert!((scale - 1.5).abs() < 1e-9);
                assert_eq!(*center, (575.0, 500.0));
            }
            other => panic!("expected pinch, got {:?}", other),
        }
        // Baseline stays latched: moving back returns to 1.0.
        let out = r.handle(PointerPhase::Move, p(2, 600.0, 500.0, 30.0));
        assert!(matches!(out.as_slice(), [Gesture::Pinch { scale, .. }] if (scale - 1.0).abs() < 1e-9));
    }

    #[test]
    fn pinch_ignores_absolute_position() {
        let mut r = recognizer();
        r.handle(PointerPhase::Down, p(7, -1000.0, 40.0, 0.0));
        r.handle(PointerPhase::Down, p(9, -1000.0, 140.0, 0.0));
        let out = r.handle(PointerPhase::Move, p(9, -1000.0, 190.0, 10.0));
        assert!(matches!(out.as_slice(), [Gesture::Pinch { scale, .. }] if (scale - 1.5).abs() < 1e-9));
    }

    #[test]
    fn lifting_one_finger_rebaselines_pan_without_jump() {
        let mut r = recognizer();
        r.handle(PointerPhase::Down, p(1, 0.0, 0.0, 0.0));
        r.handle(PointerPhase::Down, p(2, 100.0, 0.0, 0.0));
        r.handle(PointerPhase::Move, p(2, 300.0, 50.0, 10.0));
        let out = r.handle(PointerPhase::Up, p(1, 0.0, 0.0, 20.0));
        assert_eq!(out, vec![Gesture::PinchEnd]);
        assert_eq!(r.phase(), GesturePhase::OnePointer);
        let out = r.handle(PointerPhase::Move, p(2, 305.0, 52.0, 30.0));
        assert_eq!(out, vec![Gesture::Pan { dx: 5.0, dy: 2.0 }]);
        // Candidacy was dropped when the second finger arrived.
        let out = r.handle(PointerPhase::Up, p(2, 900.0, 52.0, 40.0));
        assert!(out.is_empty());
        assert!(r.tap_deadline().is_none());
    }

    #[test]
    fn pan_deltas_are_incremental() {
        let mut r = recognizer();
        r.handle(PointerPhase::Down, p(1, 10.0, 10.0, 0.0));
        assert_eq!(r.handle(PointerPhase::Move, p(1, 15.0, 10.0, 16.0)), vec![Gesture::Pan { dx: 5.0, dy: 0.0 }]);
        assert_eq!(r.handle(PointerPhase::Move, p(1, 15.0, 4.0, 32.0)), vec![Gesture::Pan { dx: 0.0, dy: -6.0 }]);
    }

    #[test]
    fn malformed_input_is_ignored() {
        let mut r = recognizer();
        assert!(r.handle(PointerPhase::Up, p(4, 0.0, 0.0, 0.0)).is_empty());
        assert!(r.handle(PointerPhase::Move, p(4, 0.0, 0.0, 0.0)).is_empty());
        r.handle(PointerPhase::Down, p(1, 0.0, 0.0, 0.0));
        assert!(r.handle(PointerPhase::Down, p(1, 50.0, 50.0, 5.0)).is_empty());
        assert_eq!(r.active_pointers(), 1);
        assert_eq!(r.phase(), GesturePhase::OnePointer);
    }

    #[test]
    fn cancel_never_classifies() {
        let mut r = recognizer();
        r.handle(PointerPhase::Down, p(1, 0.0, 0.0, 0.0));
        assert!(r.handle(PointerPhase::Cancel, p(1, 300.0, 0.0, 50.0)).is_empty());
        assert!(r.tap_deadline().is_none());
        assert_eq!(r.phase(), GesturePhase::Idle);
    }

    #[test]
    fn third_pointer_leaving_keeps_pinch_baseline() {
        let mut r = recognizer();
        r.handle(PointerPhase::Down, p(1, 0.0, 0.0, 0.0));
        r.handle(PointerPhase::Down, p(2, 100.0, 0.0, 0.0));
        r.handle(PointerPhase::Down, p(3, 50.0, 50.0, 0.0));
        assert!(r.handle(PointerPhase::Up, p(3, 50.0, 50.0, 5.0)).is_empty());
        let out = r.handle(PointerPhase::Move, p(2, 200.0, 0.0, 10.0));
        assert!(matches!(out.as_slice(), [Gesture::Pinch { scale, .. }] if (scale - 2.0).abs() < 1e-9));
    }

    #[test]
    fn pair_change_relatches_baseline() {
        let mut r = recognizer();
        r.handle(PointerPhase::Down, p(1, 0.0, 0.0, 0.0));
        r.handle(PointerPhase::Down, p(2, 100.0, 0.0, 0.0));
        r.handle(PointerPhase::Down, p(3, 0.0, 300.0, 0.0));
        // Pair is now (2, 3) with a fresh baseline.
        assert_eq!(r.handle(PointerPhase::Up, p(1, 0.0, 0.0, 5.0)), vec![Gesture::PinchEnd]);
        let out = r.handle(PointerPhase::Move, p(3, 0.0, 300.0, 10.0));
        assert!(matches!(out.as_slice(), [Gesture::Pinch { scale, .. }] if (scale - 1.0).abs() < 1e-9));
    }
}
