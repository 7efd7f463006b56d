//! Window geometry shared across platform adapters.

/// Integer rectangle in the platform's left/top/right/bottom convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at the origin with the given extent.
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Per-edge safe insets reported for a display cutout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CutoutInsets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Computes the drawable rectangle of a window, excluding any display-cutout
/// intrusion.
///
/// Starts from the full decor bounds and shrinks only the edges whose window
/// frame actually falls inside the cutout's unsafe margin. A window already
/// clear of the cutout on an edge keeps its full extent there; with no cutout
/// the decor bounds are returned unmodified.
///
/// `visible_frame` is the window's visible display frame in screen
/// coordinates; the screen extent is reconstructed from it because its
/// right/bottom are reported relative to the window position.
pub fn compute_safe_area(
    decor_width: i32,
    decor_height: i32,
    visible_frame: Rect,
    cutout: Option<CutoutInsets>,
) -> Rect {
    let rect = Rect::from_size(decor_width, decor_height);
    let Some(insets) = cutout else {
        return rect;
    };

    let screen_width = visible_frame.left + visible_frame.right;
    let screen_height = visible_frame.top + visible_frame.bottom;

    let mut safe = rect;
    if visible_frame.left < insets.left {
        safe.left += insets.left - visible_frame.left;
    }
    if screen_width - (visible_frame.left + rect.right) < insets.right {
        safe.right -= insets.right;
    }
    if visible_frame.top < insets.top {
        safe.top += insets.top - visible_frame.top;
    }
    if screen_height - (visible_frame.top + rect.bottom) < insets.bottom {
        safe.bottom -= insets.bottom;
    }
    safe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_cutout_keeps_decor_bounds() {
        let frame = Rect::new(0, 0, 1080, 2160);
        let safe = compute_safe_area(1080, 2160, frame, None);
        assert_eq!(safe, Rect::new(0, 0, 1080, 2160));
    }

    #[test]
    fn top_cutout_shrinks_encroached_edge() {
        // Window starts at the very top of the screen, under the cutout.
        let frame = Rect::new(0, 0, 1080, 2160);
        let insets = CutoutInsets {
            top: 80,
            ..Default::default()
        };
        let safe = compute_safe_area(1080, 2160, frame, Some(insets));
        assert_eq!(safe.top, 80);
        assert_eq!(safe.left, 0);
        assert_eq!(safe.right, 1080);
    }

    #[test]
    fn window_clear_of_cutout_is_untouched() {
        // Window frame already sits below the unsafe margin.
        let frame = Rect::new(0, 80, 1080, 2080);
        let insets = CutoutInsets {
            top: 80,
            ..Default::default()
        };
        let safe = compute_safe_area(1080, 2080, frame, Some(insets));
        assert_eq!(safe.top, 0);
    }

    #[test]
    fn partial_overlap_shrinks_by_remaining_margin() {
        // Window top is 30px into an 80px unsafe margin.
        let frame = Rect::new(0, 30, 1080, 2130);
        let insets = CutoutInsets {
            top: 80,
            ..Default::default()
        };
        let safe = compute_safe_area(1080, 2130, frame, Some(insets));
        assert_eq!(safe.top, 50);
    }

    #[test]
    fn rect_extent() {
        let r = Rect::new(10, 20, 110, 220);
        assert_eq!(r.width(), 100);
        assert_eq!(r.height(), 200);
    }
}
