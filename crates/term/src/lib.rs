//! Terminal presentation layer for Terra.
//!
//! Drawing happens in two stages. Views draw into curses-style [`Surface`]s
//! owned by a [`Screen`]; the screen composites the visible surfaces into a
//! [`FrameBuffer`], and [`TerminalRenderer`] flushes only the changed cells
//! to the terminal.
//!
//! Everything above the renderer is plain in-memory state, so the views and
//! the scene built on them are testable without a terminal.

pub mod codepage;
pub mod error;
pub mod fb;
pub mod panels;
pub mod renderer;
pub mod surface;
pub mod view;

pub use terra_core as core;
pub use terra_types as types;

pub use codepage::{glyph, CP437};
pub use error::{LayoutError, SurfaceError};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use panels::{CodePageView, EchoInputView, FrameMetricsView, MapView};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use surface::{Screen, Surface, SurfaceId};
pub use view::{center_in, fit_title, Rect, View};
