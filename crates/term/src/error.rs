//! Error types for surfaces and layout.

use thiserror::Error;

/// A drawing call could not complete.
///
/// Drawing errors never roll back: a glyph that triggered
/// [`SurfaceError::CursorOverflow`] has still been written.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    /// Target cell lies outside the surface.
    #[error("cell ({y}, {x}) is outside a {height}x{width} surface")]
    OutOfBounds {
        y: u16,
        x: u16,
        height: u16,
        width: u16,
    },

    /// The cursor cannot advance past the bottom-right cell.
    #[error("cursor cannot advance past the bottom-right cell")]
    CursorOverflow,
}

/// A requested layout does not fit the available space.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A surface rectangle extends past the screen or has no area.
    #[error(
        "{height}x{width} surface at ({y}, {x}) does not fit a {screen_height}x{screen_width} screen"
    )]
    DoesNotFit {
        height: u16,
        width: u16,
        y: u16,
        x: u16,
        screen_height: u16,
        screen_width: u16,
    },

    /// A centered rectangle is larger than its parent.
    #[error("{parent_height}x{parent_width} is too small to center a {height}x{width} view")]
    CannotCenter {
        height: u16,
        width: u16,
        parent_height: u16,
        parent_width: u16,
    },

    /// Padding consumes the whole view.
    #[error("padding {padding} leaves no content area in a {height}x{width} view")]
    PaddingTooLarge { padding: u16, height: u16, width: u16 },

    /// Decorating a freshly laid out view failed.
    #[error("failed to decorate view: {0}")]
    Surface(#[from] SurfaceError),
}
