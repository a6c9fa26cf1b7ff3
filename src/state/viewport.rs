// Display zoom/pan state driven by gestures and the zoom buttons.
use crate::state::gesture::{Gesture, SwipeDirection};

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 3.0;
const ZOOM_STEP: f64 = 1.2;
const FULLSCREEN_SWIPE_VELOCITY: f64 = 0.5;
const EPS: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    /// Scale captured at the first pinch event of the current gesture.
    pinch_origin: Option<f64>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: 1.0, translate_x: 0.0, translate_y: 0.0, pinch_origin: None }
    }
}

impl Viewport {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_identity_scale(&self) -> bool {
        (self.scale - 1.0).abs() < EPS
    }

    /// Returns true when the transform changed.
    pub fn apply(&mut self, gesture: &Gesture) -> bool {
        match *gesture {
            Gesture::Pinch { scale, .. } => self.pinch(scale),
            Gesture::PinchEnd => {
                self.pinch_origin = None;
                false
            }
            Gesture::Pan { dx, dy } => self.pan(dx, dy),
            Gesture::DoubleTap { .. } => {
                self.toggle_zoom();
                true
            }
            Gesture::Swipe { .. } | Gesture::Tap { .. } => false,
        }
    }

    pub fn pinch(&mut self, relative: f64) -> bool {
        if !relative.is_finite() || relative <= 0.0 {
            return false;
        }
        let origin = *self.pinch_origin.get_or_insert(self.scale);
        let next = (origin * relative).clamp(MIN_SCALE, MAX_SCALE);
        let changed = (next - self.scale).abs() > EPS;
        self.scale = next;
        changed
    }

    /// A view at 1x cannot be panned.
    pub fn pan(&mut self, dx: f64, dy: f64) -> bool {
        if self.is_identity_scale() || !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        self.translate_x += dx;
        self.translate_y += dy;
        true
    }

    pub fn toggle_zoom(&mut self) {
        if self.is_identity_scale() {
            self.scale = 2.0;
        } else {
            self.scale = 1.0;
            self.translate_x = 0.0;
            self.translate_y = 0.0;
        }
    }

    pub fn zoom_in(&mut self) {
        self.scale = (self.scale * ZOOM_STEP).min(MAX_SCALE);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale / ZOOM_STEP).max(MIN_SCALE);
    }

    /// One zoom step per wheel notch; scrolling up zooms in.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        let before = self.scale;
        if delta_y < 0.0 {
            self.zoom_in();
        } else if delta_y > 0.0 {
            self.zoom_out();
        }
        self.scale != before
    }

    pub fn percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    pub fn css_transform(&self) -> String {
        format!(
            "transform: translate({:.1}px, {:.1}px) scale({:.3}); transform-origin: center center;",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Fullscreen state after a swipe: a fast swipe up enters, a fast swipe down leaves.
pub fn fullscreen_after_swipe(fullscreen: bool, direction: SwipeDirection, velocity: f64) -> bool {
    match direction {
        SwipeDirection::Up if velocity > FULLSCREEN_SWIPE_VELOCITY => true,
        SwipeDirection::Down if velocity > FULLSCREEN_SWIPE_VELOCITY && fullscreen => false,
        _ => fullscreen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinch_clamps_to_limits() {
        let mut v = Viewport::default();
        v.pinch(10.0);
        assert_eq!(v.scale, MAX_SCALE);
        v.apply(&Gesture::PinchEnd);
        v.pinch(0.01);
        assert_eq!(v.scale, MIN_SCALE);
    }

    #[test]
    fn pinch_is_anchored_to_gesture_start() {
        let mut v = Viewport::default();
        v.pinch(1.2);
        v.pinch(1.5);
        assert!((v.scale - 1.5).abs() < 1e-9);
        v.apply(&Gesture::PinchEnd);
        v.pinch(1.2);
        assert!((v.scale - 1.8).abs() < 1e-9);
    }

    #[test]
    fn pan_is_noop_at_unit_scale() {
        let mut v = Viewport::default();
        assert!(!v.apply(&Gesture::Pan { dx: 10.0, dy: 5.0 }));
        assert_eq!((v.translate_x, v.translate_y), (0.0, 0.0));
        v.zoom_in();
        assert!(v.apply(&Gesture::Pan { dx: 10.0, dy: 5.0 }));
        assert!(v.apply(&Gesture::Pan { dx: -4.0, dy: 1.0 }));
        assert_eq!((v.translate_x, v.translate_y), (6.0, 6.0));
    }

    #[test]
    fn double_tap_toggles_and_resets_translate_on_unzoom() {
        let mut v = Viewport::default();
        v.apply(&Gesture::DoubleTap { x: 0.0, y: 0.0 });
        assert_eq!(v.scale, 2.0);
        v.pan(30.0, -10.0);
        v.apply(&Gesture::DoubleTap { x: 0.0, y: 0.0 });
        assert_eq!((v.scale, v.translate_x, v.translate_y), (1.0, 0.0, 0.0));
    }

    #[test]
    fn going_to_2x_keeps_translate() {
        let mut v = Viewport { scale: 1.0, translate_x: 12.0, translate_y: 3.0, pinch_origin: None };
        v.toggle_zoom();
        assert_eq!((v.scale, v.translate_x, v.translate_y), (2.0, 12.0, 3.0));
    }

    #[test]
    fn scale_stays_bounded_under_random_pinches() {
        let mut v = Viewport::default();
        let mut seed = 0x2545_f491_u64;
        for i in 0..2000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let rel = (seed % 1000) as f64 / 200.0;
            v.pinch(rel);
            if i % 7 == 0 {
                v.apply(&Gesture::PinchEnd);
            }
            assert!((MIN_SCALE..=MAX_SCALE).contains(&v.scale));
        }
    }

    #[test]
    fn swipes_toggle_fullscreen() {
        assert!(fullscreen_after_swipe(false, SwipeDirection::Up, 0.8));
        assert!(!fullscreen_after_swipe(false, SwipeDirection::Up, 0.4));
        assert!(!fullscreen_after_swipe(true, SwipeDirection::Down, 0.8));
        assert!(fullscreen_after_swipe(true, SwipeDirection::Left, 2.0));
    }

    #[test]
    fn zoom_buttons_respect_limits() {
        let mut v = Viewport::default();
        for _ in 0..20 {
            v.zoom_out();
        }
        assert_eq!(v.scale, MIN_SCALE);
        for _ in 0..20 {
            v.zoom_in();
        }
        assert_eq!(v.scale, MAX_SCALE);
        assert_eq!(v.percent(), 300);
    }

    #[test]
    fn wheel_steps_zoom_by_direction() {
        let mut v = Viewport::default();
        assert!(v.wheel(-100.0));
        assert!((v.scale - ZOOM_STEP).abs() < 1e-9);
        assert!(v.wheel(100.0));
        assert!((v.scale - 1.0).abs() < 1e-9);
        assert!(!v.wheel(0.0));
        assert!(!v.wheel(f64::NAN));
        v.scale = MAX_SCALE;
        assert!(!v.wheel(-1.0));
    }
}
