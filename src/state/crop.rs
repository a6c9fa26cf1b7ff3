//! Crop rectangle geometry.
//!
//! [`apply_handle_drag`] is a pure function from the previous rectangle and a
//! drag delta (in image units) to the next rectangle. It is cheap enough to run
//! on every pointer move and never fails: bad input is clamped.

use crate::model::{finite_or_zero, ImageBounds, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    Move,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
    North,
    South,
    East,
    West,
}

impl Handle {
    pub const RESIZE: [Handle; 8] = [
        Handle::NorthWest,
        Handle::North,
        Handle::NorthEast,
        Handle::East,
        Handle::SouthEast,
        Handle::South,
        Handle::SouthWest,
        Handle::West,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "move" => Handle::Move,
            "nw" => Handle::NorthWest,
            "ne" => Handle::NorthEast,
            "sw" => Handle::SouthWest,
            "se" => Handle::SouthEast,
            "n" => Handle::North,
            "s" => Handle::South,
            "e" => Handle::East,
            "w" => Handle::West,
            _ => return None,
        })
    }

    pub fn key(self) -> &'static str {
        match self {
            Handle::Move => "move",
            Handle::NorthWest => "nw",
            Handle::NorthEast => "ne",
            Handle::SouthWest => "sw",
            Handle::SouthEast => "se",
            Handle::North => "n",
            Handle::South => "s",
            Handle::East => "e",
            Handle::West => "w",
        }
    }

    pub fn has_north(self) -> bool {
        matches!(self, Handle::North | Handle::NorthWest | Handle::NorthEast)
    }

    pub fn has_south(self) -> bool {
        matches!(self, Handle::South | Handle::SouthWest | Handle::SouthEast)
    }

    pub fn has_west(self) -> bool {
        matches!(self, Handle::West | Handle::NorthWest | Handle::SouthWest)
    }

    pub fn has_east(self) -> bool {
        matches!(self, Handle::East | Handle::NorthEast | Handle::SouthEast)
    }

    pub fn is_corner(self) -> bool {
        (self.has_north() || self.has_south()) && (self.has_west() || self.has_east())
    }

    /// Position as fractions of the crop box, for drawing the grab handles.
    pub fn anchor(self) -> (f64, f64) {
        let fx = if self.has_west() { 0.0 } else if self.has_east() { 1.0 } else { 0.5 };
        let fy = if self.has_north() { 0.0 } else if self.has_south() { 1.0 } else { 0.5 };
        (fx, fy)
    }

    pub fn cursor(self) -> &'static str {
        match self {
            Handle::Move => "move",
            Handle::NorthWest | Handle::SouthEast => "nwse-resize",
            Handle::NorthEast | Handle::SouthWest => "nesw-resize",
            Handle::North | Handle::South => "ns-resize",
            Handle::East | Handle::West => "ew-resize",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AspectPreset {
    pub label: &'static str,
    pub ratio: Option<f64>,
}

pub const ASPECT_PRESETS: &[AspectPreset] = &[
    AspectPreset { label: "Free", ratio: None },
    AspectPreset { label: "1:1", ratio: Some(1.0) },
    AspectPreset { label: "4:3", ratio: Some(4.0 / 3.0) },
    AspectPreset { label: "3:4", ratio: Some(3.0 / 4.0) },
    AspectPreset { label: "16:9", ratio: Some(16.0 / 9.0) },
    AspectPreset { label: "9:16", ratio: Some(9.0 / 16.0) },
];

/// Zero, negative and non-finite ratios mean "unlocked".
pub fn sanitize_ratio(ratio: Option<f64>) -> Option<f64> {
    ratio.filter(|r| r.is_finite() && *r > 0.0)
}

/// Converts a display-space delta to image units.
pub fn display_to_image(delta: (f64, f64), display: ImageBounds, image: ImageBounds) -> (f64, f64) {
    let sx = if display.width > 0.0 && image.width > 0.0 { display.width / image.width } else { 1.0 };
    let sy = if display.height > 0.0 && image.height > 0.0 { display.height / image.height } else { 1.0 };
    (delta.0 / sx, delta.1 / sy)
}

impl Rect {
    /// Centered box covering 80% of the image, reshaped to the lock if one is given.
    pub fn centered_default(bounds: ImageBounds, lock: Option<f64>) -> Rect {
        let b = bounds.sanitized();
        let rect = Rect::new(b.width * 0.1, b.height * 0.1, b.width * 0.8, b.height * 0.8);
        let rect = clamp_rect(rect, b);
        match sanitize_ratio(lock) {
            Some(r) => rect.fit_aspect_ratio(Some(r), b),
            None => rect,
        }
    }

    /// Reshapes around the current center so width/height matches `ratio`.
    pub fn fit_aspect_ratio(&self, ratio: Option<f64>, bounds: ImageBounds) -> Rect {
        let b = bounds.sanitized();
        let Some(r) = sanitize_ratio(ratio) else {
            let mut out = clamp_rect(*self, b);
            out.aspect_ratio = None;
            return out;
        };
        let (cx, cy) = self.center();
        let mut w = self.width;
        let mut h = w / r;
        if h > self.height {
            h = self.height;
            w = h * r;
        }
        let (w, h) = fit_ratio_size(w, h, r, b.width, b.height, b);
        let rect = Rect { x: cx - w / 2.0, y: cy - h / 2.0, width: w, height: h, aspect_ratio: Some(r) };
        clamp_rect(rect, b)
    }

    /// True when all crop invariants hold for `bounds`.
    pub fn is_valid_for(&self, bounds: ImageBounds) -> bool {
        let b = bounds.sanitized();
        let (min_w, min_h) = b.min_size();
        let eps = 1e-6;
        self.x >= -eps
            && self.y >= -eps
            && self.width >= min_w - eps
            && self.height >= min_h - eps
            && self.right() <= b.width + eps
            && self.bottom() <= b.height + eps
    }
}

pub fn apply_handle_drag(
    previous: &Rect,
    handle: Handle,
    delta: (f64, f64),
    bounds: ImageBounds,
    lock: Option<f64>,
) -> Rect {
    let b = bounds.sanitized();
    let lock = sanitize_ratio(lock);
    let dx = finite_or_zero(delta.0);
    let dy = finite_or_zero(delta.1);
    let start = clamp_rect(*previous, b);

    let next = match handle {
        Handle::Move => Rect {
            x: (start.x + dx).clamp(0.0, b.width - start.width),
            y: (start.y + dy).clamp(0.0, b.height - start.height),
            ..start
        },
        _ => resize(&start, handle, dx, dy, b, lock),
    };
    let mut out = clamp_rect(next, b);
    out.aspect_ratio = lock;
    out
}

fn resize(start: &Rect, handle: Handle, dx: f64, dy: f64, b: ImageBounds, lock: Option<f64>) -> Rect {
    let (min_w, min_h) = b.min_size();
    let mut left = start.x;
    let mut right = start.right();
    let mut top = start.y;
    let mut bottom = start.bottom();

    // An edge stops at the image border or `min` short of its opposite edge.
    if handle.has_west() {
        left = (left + dx).clamp(0.0, right - min_w);
    }
    if handle.has_east() {
        right = (right + dx).clamp(left + min_w, b.width);
    }
    if handle.has_north() {
        top = (top + dy).clamp(0.0, bottom - min_h);
    }
    if handle.has_south() {
        bottom = (bottom + dy).clamp(top + min_h, b.height);
    }

    let Some(r) = lock else {
        return Rect::new(left, top, right - left, bottom - top);
    };

    let horizontal = match handle {
        Handle::East | Handle::West => true,
        Handle::North | Handle::South => false,
        _ => dx.abs() >= dy.abs(),
    };
    let (w, h) = if horizontal {
        let w = right - left;
        (w, w / r)
    } else {
        let h = bottom - top;
        (h * r, h)
    };

    // Room available from the anchored (undragged) edges.
    let avail_w = if handle.has_west() { right } else { b.width - left };
    let avail_h = if handle.has_north() { bottom } else { b.height - top };
    let (w, h) = fit_ratio_size(w, h, r, avail_w, avail_h, b);

    let x = if handle.has_west() { right - w } else { left };
    let y = if handle.has_north() { bottom - h } else { top };
    Rect::new(x, y, w, h)
}

/// Limits a ratio-locked size to the available room, then raises it to the
/// minimum. Bounds and minimum win over the ratio when they conflict.
fn fit_ratio_size(mut w: f64, mut h: f64, r: f64, avail_w: f64, avail_h: f64, b: ImageBounds) -> (f64, f64) {
    let (min_w, min_h) = b.min_size();
    if w > avail_w {
        w = avail_w;
        h = w / r;
    }
    if h > avail_h {
        h = avail_h;
        w = h * r;
    }
    if w < min_w {
        w = min_w;
        h = w / r;
    }
    if h < min_h {
        h = min_h;
        w = h * r;
    }
    (w.clamp(min_w, b.width), h.clamp(min_h, b.height))
}

/// Final pass: size into [min, extent], slide inside, then shrink to fit.
fn clamp_rect(rect: Rect, b: ImageBounds) -> Rect {
    let (min_w, min_h) = b.min_size();
    let width = finite_or_zero(rect.width).clamp(min_w, b.width);
    let height = finite_or_zero(rect.height).clamp(min_h, b.height);
    let x = finite_or_zero(rect.x).clamp(0.0, b.width - width);
    let y = finite_or_zero(rect.y).clamp(0.0, b.height - height);
    Rect {
        x,
        y,
        width: width.min(b.width - x),
        height: height.min(b.height - y),
        aspect_ratio: rect.aspect_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn bounds() -> ImageBounds {
        ImageBounds::new(1000.0, 800.0)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    struct XorShift(u64);

    impl XorShift {
        fn next(&mut self) -> u64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            self.0
        }

        fn range(&mut self, lo: f64, hi: f64) -> f64 {
            lo + (self.next() % 10_000) as f64 / 10_000.0 * (hi - lo)
        }
    }

    #[test]
    fn default_rect_is_centered_80_percent() {
        let r = Rect::centered_default(bounds(), None);
        assert_eq!((r.x, r.y, r.width, r.height), (100.0, 80.0, 800.0, 640.0));
    }

    #[test]
    fn move_clamps_without_resizing() {
        let r = Rect::new(100.0, 100.0, 200.0, 150.0);
        let out = apply_handle_drag(&r, Handle::Move, (5000.0, -5000.0), bounds(), None);
        assert_eq!((out.x, out.y, out.width, out.height), (800.0, 0.0, 200.0, 150.0));
    }

    #[test]
    fn move_ignores_lock_shape() {
        let r = Rect::new(100.0, 100.0, 200.0, 150.0);
        let out = apply_handle_drag(&r, Handle::Move, (10.0, 10.0), bounds(), Some(1.0));
        assert_eq!((out.width, out.height), (200.0, 150.0));
    }

    #[test]
    fn edge_handles_move_one_edge() {
        let r = Rect::new(100.0, 100.0, 200.0, 200.0);
        let e = apply_handle_drag(&r, Handle::East, (40.0, 99.0), bounds(), None);
        assert_eq!((e.x, e.y, e.width, e.height), (100.0, 100.0, 240.0, 200.0));
        let n = apply_handle_drag(&r, Handle::North, (99.0, -30.0), bounds(), None);
        assert_eq!((n.x, n.y, n.width, n.height), (100.0, 70.0, 200.0, 230.0));
    }

    #[test]
    fn corner_handles_move_two_edges() {
        let r = Rect::new(100.0, 100.0, 200.0, 200.0);
        let nw = apply_handle_drag(&r, Handle::NorthWest, (-20.0, 10.0), bounds(), None);
        assert_eq!((nw.x, nw.y, nw.width, nw.height), (80.0, 110.0, 220.0, 190.0));
    }

    #[test]
    fn minimum_size_holds_against_the_opposite_edge() {
        let r = Rect::new(100.0, 100.0, 200.0, 200.0);
        let w = apply_handle_drag(&r, Handle::West, (500.0, 0.0), bounds(), None);
        assert!(approx(w.width, 50.0));
        assert!(approx(w.right(), 300.0), "right edge must stay put");
        let s = apply_handle_drag(&r, Handle::South, (0.0, -900.0), bounds(), None);
        assert!(approx(s.height, 50.0));
        assert!(approx(s.y, 100.0));
    }

    #[test]
    fn locked_horizontal_drag_recomputes_height() {
        let r = Rect::new(100.0, 100.0, 320.0, 180.0);
        let out = apply_handle_drag(&r, Handle::SouthEast, (80.0, 10.0), bounds(), Some(16.0 / 9.0));
        assert!(approx(out.width, 400.0));
        assert!(approx(out.height, 225.0));
        assert!((out.width / out.height - 16.0 / 9.0).abs() < 1e-3);
    }

    #[test]
    fn locked_vertical_drag_recomputes_width() {
        let r = Rect::new(100.0, 100.0, 200.0, 200.0);
        let out = apply_handle_drag(&r, Handle::North, (0.0, -50.0), bounds(), Some(1.0));
        assert!(approx(out.height, 250.0));
        assert!(approx(out.width, 250.0));
        assert!(approx(out.bottom(), 300.0));
    }

    #[test]
    fn locked_west_drag_keeps_right_edge() {
        let r = Rect::new(300.0, 100.0, 200.0, 200.0);
        let out = apply_handle_drag(&r, Handle::West, (-100.0, 0.0), bounds(), Some(1.0));
        assert!(approx(out.right(), 500.0));
        assert!(approx(out.width, 300.0));
        assert!(approx(out.height, 300.0));
    }

    #[test]
    fn locked_resize_is_limited_by_room() {
        let r = Rect::new(100.0, 500.0, 200.0, 200.0);
        // Width wants 600 but only 300 rows are below the top edge.
        let out = apply_handle_drag(&r, Handle::East, (400.0, 0.0), bounds(), Some(1.0));
        assert!(approx(out.width, 300.0) && approx(out.height, 300.0), "{:?}", out);
        assert!(out.is_valid_for(bounds()));
    }

    #[test]
    fn degenerate_inputs_are_clamped() {
        let r = Rect::new(-50.0, f64::NAN, 5000.0, 10.0);
        let out = apply_handle_drag(&r, Handle::SouthEast, (f64::INFINITY, -3.0), bounds(), Some(0.0));
        assert!(out.is_valid_for(bounds()), "{:?}", out);
        assert_eq!(out.aspect_ratio, None);

        let neg = ImageBounds::new(-10.0, -10.0);
        let out = apply_handle_drag(&r, Handle::Move, (1.0, 1.0), neg, None);
        assert_eq!((out.x, out.y, out.width, out.height), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn random_drag_sequences_keep_invariants() {
        let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);
        let handles = [
            Handle::Move,
            Handle::NorthWest,
            Handle::NorthEast,
            Handle::SouthWest,
            Handle::SouthEast,
            Handle::North,
            Handle::South,
            Handle::East,
            Handle::West,
        ];
        for (w, h) in [(1000.0, 800.0), (120.0, 90.0), (4000.0, 300.0)] {
            let b = ImageBounds::new(w, h);
            let mut rect = Rect::centered_default(b, None);
            for _ in 0..3000 {
                let handle = handles[(rng.next() % handles.len() as u64) as usize];
                let delta = (rng.range(-300.0, 300.0), rng.range(-300.0, 300.0));
                rect = apply_handle_drag(&rect, handle, delta, b, None);
                assert!(rect.is_valid_for(b), "{:?} after {:?} on {:?}", rect, handle, b);
            }
        }
    }

    #[test]
    fn images_below_minimum_use_their_extent() {
        let mut rng = XorShift(0x0bad_cafe_f00d_d00d);
        let handles = [
            Handle::Move,
            Handle::NorthWest,
            Handle::NorthEast,
            Handle::SouthWest,
            Handle::SouthEast,
            Handle::North,
            Handle::South,
            Handle::East,
            Handle::West,
        ];
        for (w, h) in [(30.0, 20.0), (10.0, 400.0)] {
            let b = ImageBounds::new(w, h);
            for lock in [None, Some(1.0), Some(16.0 / 9.0)] {
                let mut rect = Rect::centered_default(b, lock);
                assert!(rect.is_valid_for(b), "default {:?} on {:?} lock {:?}", rect, b, lock);
                for _ in 0..2000 {
                    let handle = handles[(rng.next() % handles.len() as u64) as usize];
                    let delta = (rng.range(-60.0, 60.0), rng.range(-60.0, 60.0));
                    rect = apply_handle_drag(&rect, handle, delta, b, lock);
                    assert!(rect.is_valid_for(b), "{:?} after {:?} on {:?} lock {:?}", rect, handle, b, lock);
                }
            }
        }

        // A 10px wide image can only be cropped to its full width.
        let narrow = ImageBounds::new(10.0, 400.0);
        let r = apply_handle_drag(&Rect::centered_default(narrow, None), Handle::East, (-30.0, 0.0), narrow, None);
        assert!(approx(r.width, 10.0) && approx(r.x, 0.0), "{:?}", r);
    }

    #[test]
    fn random_locked_resizes_keep_ratio() {
        let mut rng = XorShift(0x1234_5678_9abc_def1);
        let b = bounds();
        for preset in ASPECT_PRESETS.iter().filter_map(|p| p.ratio) {
            let mut rect = Rect::centered_default(b, Some(preset));
            assert!((rect.width / rect.height - preset).abs() < 1e-3);
            for _ in 0..2000 {
                let handle = Handle::RESIZE[(rng.next() % 8) as usize];
                let delta = (rng.range(-200.0, 200.0), rng.range(-200.0, 200.0));
                rect = apply_handle_drag(&rect, handle, delta, b, Some(preset));
                assert!(rect.is_valid_for(b), "{:?}", rect);
                assert!(
                    (rect.width / rect.height - preset).abs() < 1e-3,
                    "ratio drifted: {:?} after {:?}",
                    rect,
                    handle
                );
            }
        }
    }

    #[test]
    fn fit_aspect_ratio_preserves_center() {
        let r = Rect::new(100.0, 100.0, 400.0, 200.0);
        let out = r.fit_aspect_ratio(Some(1.0), bounds());
        assert!(approx(out.width, 200.0) && approx(out.height, 200.0));
        assert_eq!(out.center(), (300.0, 200.0));
        assert_eq!(out.aspect_ratio, Some(1.0));
    }

    #[test]
    fn display_deltas_scale_to_image_units() {
        let d = display_to_image((50.0, 20.0), ImageBounds::new(500.0, 400.0), bounds());
        assert_eq!(d, (100.0, 40.0));
    }

    #[test]
    fn handle_names_parse() {
        for h in Handle::RESIZE {
            assert_eq!(Handle::parse(h.key()), Some(h));
        }
        assert_eq!(Handle::parse("move"), Some(Handle::Move));
        assert_eq!(Handle::parse("x"), None);
    }
}
