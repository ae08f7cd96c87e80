//! Background image placement
//!
//! The image is described in card-relative percentages: `x`/`y` locate its
//! centre, `size` is its width as a percentage of the card width. [`recompute`]
//! is the single place where size and position are reconciled against the
//! card's pixel dimensions; callers never adjust them piecemeal.
//!
//! Placement rules, in order:
//! 1. No source: the layer is hidden.
//! 2. `size` is clamped to the configured range, width follows from it and
//!    height follows from the aspect ratio.
//! 3. A height above the allowed fraction of the card height is capped; width
//!    is recomputed from the aspect ratio and `size` is derived back from it.
//! 4. The centre is clamped so the whole box stays inside the card. An axis
//!    where the box is larger than the card centres at 50.

use serde::{Deserialize, Serialize};

/// Centre used for a fresh or cleared image
pub const CENTER: f64 = 50.0;

/// A rectangle in CSS pixels (viewport coordinates)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// A rect at the origin
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Whether both dimensions are non-zero
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Limits applied by [`recompute`]
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ImageLimits {
    /// Smallest width, percent of card width
    pub min_size: f64,
    /// Largest width, percent of card width
    pub max_size: f64,
    /// Tallest height, fraction of card height
    pub max_height_ratio: f64,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self { min_size: 12.0, max_size: 80.0, max_height_ratio: 0.9 }
    }
}

impl ImageLimits {
    /// Clamp a size slider value (a fraction of the card width) to a size percentage
    pub fn size_from_slider(&self, fraction: f64) -> f64 {
        if fraction.is_nan() {
            return self.min_size;
        }
        (fraction * 100.0).clamp(self.min_size, self.max_size)
    }
}

/// Background image descriptor
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ImageState {
    /// Displayable image reference (data URI); empty when no image is set
    pub src: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    /// Natural width over natural height
    pub aspect_ratio: f64,
}

impl ImageState {
    pub fn new(size: f64) -> Self {
        Self { src: String::new(), x: CENTER, y: CENTER, size, aspect_ratio: 1.0 }
    }

    pub fn has_source(&self) -> bool {
        !self.src.is_empty()
    }

    /// Install a freshly loaded source, recentred. Size is kept.
    pub fn load_source(&mut self, src: String) {
        self.src = src;
        self.x = CENTER;
        self.y = CENTER;
    }

    /// Take the aspect ratio from natural pixel dimensions
    ///
    /// Returns false (and changes nothing) when either dimension is zero.
    pub fn set_natural_size(&mut self, width: f64, height: f64) -> bool {
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        self.aspect_ratio = width / height;
        true
    }

    /// Back to the empty lifecycle value. Size is kept.
    pub fn clear(&mut self) {
        self.src.clear();
        self.x = CENTER;
        self.y = CENTER;
        self.aspect_ratio = 1.0;
    }
}

/// Outcome of a placement pass
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Placement {
    /// No image: hide the layer
    Hidden,
    /// The card has no measurable size yet; nothing is applied
    Deferred,
    /// Apply these values
    Placed {
        size: f64,
        x: f64,
        y: f64,
        width_px: f64,
        height_px: f64,
    },
}

/// Clamp a centre coordinate so a box with the given half extent stays inside [0, 100]
///
/// When the half extent exceeds 50 the range is empty and the box centres at 50.
pub fn clamp_center(value: f64, half: f64) -> f64 {
    if half > CENTER {
        return CENTER;
    }
    value.clamp(half, 100.0 - half)
}

/// Reconcile size and position with the card dimensions
///
/// Pure: returns the new state alongside what to apply to the surface.
/// Running it on its own output yields the same output.
pub fn recompute(state: &ImageState, card: Rect, limits: &ImageLimits) -> (ImageState, Placement) {
    if !state.has_source() {
        return (state.clone(), Placement::Hidden);
    }
    if !card.is_measured() {
        return (state.clone(), Placement::Deferred);
    }

    let aspect = if state.aspect_ratio > 0.0 && state.aspect_ratio.is_finite() {
        state.aspect_ratio
    } else {
        1.0
    };

    let mut size = state.size.clamp(limits.min_size, limits.max_size);
    let mut width_px = size / 100.0 * card.width;
    let mut height_px = width_px / aspect;

    let max_height = card.height * limits.max_height_ratio;
    if height_px > max_height {
        height_px = max_height;
        width_px = height_px * aspect;
        size = width_px / card.width * 100.0;
    }

    let half_width_pct = width_px / 2.0 / card.width * 100.0;
    let half_height_pct = height_px / 2.0 / card.height * 100.0;

    let next = ImageState {
        src: state.src.clone(),
        x: clamp_center(state.x, half_width_pct),
        y: clamp_center(state.y, half_height_pct),
        size,
        aspect_ratio: state.aspect_ratio,
    };
    let placement = Placement::Placed { size, x: next.x, y: next.y, width_px, height_px };
    (next, placement)
}

/// Pointer position in viewport pixels
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPos {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerPos {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// Drag gesture state: idle, or dragging with the grab offset
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct DragSession {
    pub active: bool,
    pub pointer_id: i32,
    /// Pointer minus image centre at pointer-down, pixels
    pub offset_x: f64,
    pub offset_y: f64,
}

impl DragSession {
    /// Idle -> Dragging
    ///
    /// Only starts when an image is loaded. The offset keeps the image from
    /// jumping its centre to the pointer.
    pub fn start(&mut self, pointer_id: i32, pointer: PointerPos, card: Rect, image: &ImageState) -> bool {
        if !image.has_source() {
            return false;
        }
        let center_x = card.left + image.x / 100.0 * card.width;
        let center_y = card.top + image.y / 100.0 * card.height;

        *self = DragSession {
            active: true,
            pointer_id,
            offset_x: pointer.client_x - center_x,
            offset_y: pointer.client_y - center_y,
        };
        true
    }

    /// New unclamped centre, in card percentages, for a pointer move
    ///
    /// `None` while idle or when the card has no size.
    pub fn center_for(&self, pointer: PointerPos, card: Rect) -> Option<(f64, f64)> {
        if !self.active || !card.is_measured() {
            return None;
        }
        let center_x = pointer.client_x - self.offset_x;
        let center_y = pointer.client_y - self.offset_y;
        Some((
            (center_x - card.left) / card.width * 100.0,
            (center_y - card.top) / card.height * 100.0,
        ))
    }

    /// Dragging -> Idle. Returns whether a drag was active.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(size: f64, aspect_ratio: f64) -> ImageState {
        ImageState { src: "data:image/png;base64,AAAA".to_string(), x: 50.0, y: 50.0, size, aspect_ratio }
    }

    fn placed(p: &Placement) -> (f64, f64, f64, f64, f64) {
        match *p {
            Placement::Placed { size, x, y, width_px, height_px } => (size, x, y, width_px, height_px),
            ref other => panic!("expected placement, got {:?}", other),
        }
    }

    #[test]
    fn test_no_source_hides() {
        let (_, placement) = recompute(&ImageState::new(28.0), Rect::sized(1000.0, 500.0), &ImageLimits::default());
        assert_eq!(placement, Placement::Hidden);
    }

    #[test]
    fn test_unmeasured_card_defers() {
        let state = loaded(28.0, 1.0);
        let (next, placement) = recompute(&state, Rect::sized(0.0, 500.0), &ImageLimits::default());
        assert_eq!(placement, Placement::Deferred);
        assert_eq!(next, state);
    }

    #[test]
    fn test_wide_image_keeps_size() {
        let (next, placement) = recompute(&loaded(80.0, 4.0), Rect::sized(1000.0, 500.0), &ImageLimits::default());
        let (size, _, _, width, height) = placed(&placement);
        assert_eq!(size, 80.0);
        assert_eq!(next.size, 80.0);
        assert_eq!(width, 800.0);
        assert_eq!(height, 200.0);
    }

    #[test]
    fn test_tall_image_back_derives_size() {
        let (next, placement) = recompute(&loaded(80.0, 4.0), Rect::sized(1000.0, 100.0), &ImageLimits::default());
        let (size, _, _, width, height) = placed(&placement);
        assert!((height - 90.0).abs() < 1e-9);
        assert!((width - 360.0).abs() < 1e-9);
        assert!((size - 36.0).abs() < 1e-9);
        assert!((next.size - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_position_clamped_inside_card() {
        let mut state = loaded(40.0, 1.0);
        state.x = -30.0;
        state.y = 140.0;
        // 400x400 box on a 1000x1000 card: half extents 20%
        let (next, _) = recompute(&state, Rect::sized(1000.0, 1000.0), &ImageLimits::default());
        assert_eq!(next.x, 20.0);
        assert_eq!(next.y, 80.0);
    }

    #[test]
    fn test_oversized_axis_centres() {
        assert_eq!(clamp_center(10.0, 60.0), 50.0);
        assert_eq!(clamp_center(95.0, 60.0), 50.0);
        assert_eq!(clamp_center(95.0, 10.0), 90.0);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut state = loaded(75.0, 0.5);
        state.x = 3.0;
        let card = Rect::sized(640.0, 400.0);
        let (once, first) = recompute(&state, card, &ImageLimits::default());
        let (twice, second) = recompute(&once, card, &ImageLimits::default());
        assert_eq!(once, twice);
        assert_eq!(first, second);
    }

    #[test]
    fn test_size_from_slider_clamps() {
        let limits = ImageLimits::default();
        assert_eq!(limits.size_from_slider(0.05), 12.0);
        assert_eq!(limits.size_from_slider(0.95), 80.0);
        assert!((limits.size_from_slider(0.28) - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_clear_resets_everything_but_size() {
        let mut state = loaded(44.0, 2.5);
        state.x = 12.0;
        state.y = 70.0;
        state.clear();
        assert_eq!(state.src, "");
        assert_eq!((state.x, state.y), (50.0, 50.0));
        assert_eq!(state.aspect_ratio, 1.0);
        assert_eq!(state.size, 44.0);
    }

    #[test]
    fn test_natural_size_ignores_zero() {
        let mut state = loaded(28.0, 1.5);
        assert!(!state.set_natural_size(0.0, 300.0));
        assert_eq!(state.aspect_ratio, 1.5);
        assert!(state.set_natural_size(800.0, 200.0));
        assert_eq!(state.aspect_ratio, 4.0);
    }

    #[test]
    fn test_drag_keeps_grab_offset() {
        let card = Rect::new(100.0, 50.0, 1000.0, 500.0);
        let image = loaded(20.0, 1.0);
        let mut drag = DragSession::default();

        // Centre sits at (600, 300); grab 10px right and 5px below it
        assert!(drag.start(1, PointerPos::new(610.0, 305.0), card, &image));
        assert_eq!((drag.offset_x, drag.offset_y), (10.0, 5.0));

        // Not moving the pointer keeps the centre where it was
        assert_eq!(drag.center_for(PointerPos::new(610.0, 305.0), card), Some((50.0, 50.0)));
        assert_eq!(drag.center_for(PointerPos::new(710.0, 355.0), card), Some((60.0, 60.0)));
    }

    #[test]
    fn test_drag_requires_source_and_stop_is_idempotent() {
        let mut drag = DragSession::default();
        assert!(!drag.start(1, PointerPos::default(), Rect::sized(10.0, 10.0), &ImageState::new(28.0)));
        assert!(!drag.active);
        assert!(!drag.stop());
        assert_eq!(drag.center_for(PointerPos::default(), Rect::sized(10.0, 10.0)), None);
    }
}
