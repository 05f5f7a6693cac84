//! Views: bordered panels with an optional padded content area.
//!
//! A [`View`] owns a frame surface, boxed and titled once at construction,
//! and optionally a separate content surface inset by the padding. All
//! per-frame drawing goes to the content surface; with zero padding the
//! frame doubles as the content.
//!
//! Views never reorder: whichever was created later is drawn on top.

use tracing::debug;

use crate::error::LayoutError;
use crate::fb::{CellStyle, Rgb};
use crate::surface::{Screen, SurfaceId};

/// Style used for view borders and titles.
pub const BORDER_STYLE: CellStyle = CellStyle::new(Rgb::new(160, 160, 170), Rgb::new(0, 0, 0));

/// Ellipsis marking a truncated title.
pub const ELLIPSIS: char = '…';

/// Rectangle in screen space: `height`, `width`, then top-left `(y, x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub height: u16,
    pub width: u16,
    pub y: u16,
    pub x: u16,
}

impl Rect {
    pub const fn new(height: u16, width: u16, y: u16, x: u16) -> Self {
        Self {
            height,
            width,
            y,
            x,
        }
    }
}

/// A framed panel on a [`Screen`].
#[derive(Debug, Clone)]
pub struct View {
    frame: SurfaceId,
    content: Option<SurfaceId>,
    visible: bool,
}

impl View {
    /// Lay out a new view on top of `screen`.
    ///
    /// `padding > 0` creates a content surface of
    /// `(height - 2 * padding, width - 2 * padding)` inset by `padding` on
    /// every side. A title is written into the top border, shortened with
    /// [`ELLIPSIS`] if it is wider than the border's interior.
    pub fn new(screen: &mut Screen, rect: Rect, padding: u16, title: Option<&str>) -> Result<Self, LayoutError> {
        let inset = u32::from(padding) * 2;
        if padding > 0 && (inset >= u32::from(rect.height) || inset >= u32::from(rect.width)) {
            return Err(LayoutError::PaddingTooLarge {
                padding,
                height: rect.height,
                width: rect.width,
            });
        }

        let frame = screen.new_surface(rect.height, rect.width, rect.y, rect.x)?;
        {
            let surface = screen.surface_mut(frame);
            surface.set_style(BORDER_STYLE);
            surface.draw_box();
            if let Some(title) = title.filter(|t| !t.is_empty()) {
                let fitted = fit_title(title, rect.width);
                if !fitted.is_empty() {
                    surface.put_str(0, 1, &fitted)?;
                }
            }
            surface.set_style(CellStyle::default());
        }

        let content = if padding > 0 {
            Some(screen.new_surface(
                rect.height - 2 * padding,
                rect.width - 2 * padding,
                rect.y + padding,
                rect.x + padding,
            )?)
        } else {
            None
        };

        debug!(?rect, padding, ?title, "laid out view");
        Ok(Self {
            frame,
            content,
            visible: true,
        })
    }

    pub fn frame(&self) -> SurfaceId {
        self.frame
    }

    /// Surface that per-frame drawing targets.
    pub fn content(&self) -> SurfaceId {
        self.content.unwrap_or(self.frame)
    }

    /// `(height, width)` of the content surface.
    pub fn content_extents(&self, screen: &Screen) -> (u16, u16) {
        screen.surface_extents(self.content())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the frame and content together.
    pub fn set_visible(&mut self, screen: &mut Screen, visible: bool) {
        self.visible = visible;
        screen.set_visible(self.frame, visible);
        if let Some(content) = self.content {
            screen.set_visible(content, visible);
        }
    }

    pub fn toggle_visibility(&mut self, screen: &mut Screen) {
        self.set_visible(screen, !self.visible);
        debug!(frame = self.frame.index(), visible = self.visible, "toggled view");
    }
}

/// Shorten `title` to fit inside the top border of a `width`-wide frame.
///
/// # Examples
///
/// ```
/// use terra_term::view::fit_title;
///
/// assert_eq!(fit_title("Terra", 10), "Terra");
/// assert_eq!(fit_title("Frame Metrics", 10), "Frame M…");
/// ```
pub fn fit_title(title: &str, width: u16) -> String {
    let interior = usize::from(width.saturating_sub(2));
    if title.chars().count() <= interior {
        return title.to_string();
    }
    if interior == 0 {
        return String::new();
    }
    let mut fitted: String = title.chars().take(interior - 1).collect();
    fitted.push(ELLIPSIS);
    fitted
}

/// Rectangle of `height x width` centered inside `extents` (`(height, width)`).
pub fn center_in(extents: (u16, u16), height: u16, width: u16) -> Result<Rect, LayoutError> {
    let (parent_height, parent_width) = extents;
    if height > parent_height || width > parent_width {
        return Err(LayoutError::CannotCenter {
            height,
            width,
            parent_height,
            parent_width,
        });
    }
    Ok(Rect::new(
        height,
        width,
        (parent_height - height) / 2,
        (parent_width - width) / 2,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_view_has_inset_content() {
        let mut screen = Screen::new(20, 40);
        let view = View::new(&mut screen, Rect::new(10, 20, 2, 3), 2, None).unwrap();

        assert_ne!(view.frame(), view.content());
        assert_eq!(view.content_extents(&screen), (6, 16));
        assert_eq!(screen.surface(view.content()).origin(), (4, 5));
    }

    #[test]
    fn unpadded_view_draws_into_frame() {
        let mut screen = Screen::new(20, 40);
        let view = View::new(&mut screen, Rect::new(5, 5, 0, 0), 0, None).unwrap();
        assert_eq!(view.frame(), view.content());
        assert_eq!(screen.surface_count(), 1);
    }

    #[test]
    fn oversized_padding_is_a_layout_error() {
        let mut screen = Screen::new(20, 40);
        let err = View::new(&mut screen, Rect::new(4, 10, 0, 0), 2, None).unwrap_err();
        assert!(matches!(err, LayoutError::PaddingTooLarge { .. }));
    }

    #[test]
    fn view_off_screen_is_a_layout_error() {
        let mut screen = Screen::new(10, 10);
        let err = View::new(&mut screen, Rect::new(5, 5, 8, 0), 1, None).unwrap_err();
        assert!(matches!(err, LayoutError::DoesNotFit { .. }));
    }

    #[test]
    fn title_is_written_into_top_border() {
        let mut screen = Screen::new(5, 12);
        let view = View::new(&mut screen, Rect::new(5, 12, 0, 0), 1, Some("Terra")).unwrap();
        assert_eq!(screen.surface(view.frame()).row_text(0), "┌Terra─────┐");
    }

    #[test]
    fn long_title_is_truncated_with_ellipsis() {
        let mut screen = Screen::new(5, 8);
        let view = View::new(&mut screen, Rect::new(5, 8, 0, 0), 1, Some("Frame Metrics")).unwrap();
        assert_eq!(screen.surface(view.frame()).row_text(0), "┌Frame…┐");
    }

    #[test]
    fn fit_title_edge_cases() {
        assert_eq!(fit_title("abc", 5), "abc");
        assert_eq!(fit_title("abcd", 5), "ab…");
        assert_eq!(fit_title("abcd", 3), "…");
        assert_eq!(fit_title("abcd", 2), "");
    }

    #[test]
    fn toggle_keeps_frame_and_content_in_lock_step() {
        let mut screen = Screen::new(20, 40);
        let mut view = View::new(&mut screen, Rect::new(10, 20, 0, 0), 1, None).unwrap();

        view.toggle_visibility(&mut screen);
        assert!(!view.is_visible());
        assert!(!screen.surface(view.frame()).is_visible());
        assert!(!screen.surface(view.content()).is_visible());

        view.toggle_visibility(&mut screen);
        assert!(view.is_visible());
        assert!(screen.surface(view.frame()).is_visible());
        assert!(screen.surface(view.content()).is_visible());
    }

    #[test]
    fn center_in_parent() {
        assert_eq!(center_in((24, 80), 10, 20).unwrap(), Rect::new(10, 20, 7, 30));
        assert_eq!(center_in((10, 20), 10, 20).unwrap(), Rect::new(10, 20, 0, 0));
        assert!(matches!(
            center_in((10, 20), 11, 5),
            Err(LayoutError::CannotCenter { .. })
        ));
    }
}
