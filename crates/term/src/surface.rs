//! Character-grid surfaces and the panel stack that composites them.
//!
//! A [`Surface`] is a rectangular grid of cells with a cursor, placed at a
//! fixed screen position. Surfaces live in a [`Screen`], which hands out
//! [`SurfaceId`]s and composites every visible surface into a
//! [`FrameBuffer`] in creation order: later surfaces cover earlier ones.
//!
//! Drawing follows curses conventions: coordinates are `(y, x)` relative to
//! the surface, [`Surface::draw_glyph`] advances the cursor and wraps to the
//! next row, and advancing past the bottom-right cell is an error even
//! though the glyph is written. [`Surface::insert_glyph`] never moves the
//! cursor, which is how the bottom-right cell is filled safely.

use crate::error::{LayoutError, SurfaceError};
use crate::fb::{Cell, CellStyle, FrameBuffer};

/// Handle to a surface owned by a [`Screen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(usize);

impl SurfaceId {
    /// Position in the stack; higher is drawn later.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A rectangular drawing surface.
#[derive(Debug, Clone)]
pub struct Surface {
    y: u16,
    x: u16,
    buf: FrameBuffer,
    cursor: (u16, u16),
    visible: bool,
    style: CellStyle,
}

impl Surface {
    fn new(height: u16, width: u16, y: u16, x: u16) -> Self {
        Self {
            y,
            x,
            buf: FrameBuffer::new(width, height),
            cursor: (0, 0),
            visible: true,
            style: CellStyle::default(),
        }
    }

    pub fn height(&self) -> u16 {
        self.buf.height()
    }

    pub fn width(&self) -> u16 {
        self.buf.width()
    }

    /// `(height, width)`.
    pub fn extents(&self) -> (u16, u16) {
        (self.height(), self.width())
    }

    /// Screen position of the top-left cell as `(y, x)`.
    pub fn origin(&self) -> (u16, u16) {
        (self.y, self.x)
    }

    /// Cursor as `(y, x)`.
    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Style applied to subsequently drawn glyphs.
    pub fn set_style(&mut self, style: CellStyle) {
        self.style = style;
    }

    pub fn glyph_at(&self, y: u16, x: u16) -> Option<char> {
        self.buf.get(x, y).map(|c| c.ch)
    }

    /// Row `y` as a string.
    pub fn row_text(&self, y: u16) -> String {
        self.buf.row_text(y)
    }

    pub(crate) fn buffer(&self) -> &FrameBuffer {
        &self.buf
    }

    fn check(&self, y: u16, x: u16) -> Result<(), SurfaceError> {
        if y >= self.height() || x >= self.width() {
            return Err(SurfaceError::OutOfBounds {
                y,
                x,
                height: self.height(),
                width: self.width(),
            });
        }
        Ok(())
    }

    /// Move the cursor to `(y, x)`.
    pub fn move_cursor(&mut self, y: u16, x: u16) -> Result<(), SurfaceError> {
        self.check(y, x)?;
        self.cursor = (y, x);
        Ok(())
    }

    /// Write `ch` at `(y, x)` and advance the cursor past it.
    ///
    /// Returns [`SurfaceError::CursorOverflow`] when `(y, x)` is the
    /// bottom-right cell; the glyph is written regardless and the cursor
    /// stays on that cell.
    pub fn draw_glyph(&mut self, y: u16, x: u16, ch: char) -> Result<(), SurfaceError> {
        self.check(y, x)?;
        self.buf.put_char(x, y, ch, self.style);
        self.cursor = (y, x);
        self.advance_cursor()
    }

    /// Write `ch` at the cursor and advance it.
    pub fn put_glyph(&mut self, ch: char) -> Result<(), SurfaceError> {
        let (y, x) = self.cursor;
        self.draw_glyph(y, x, ch)
    }

    /// Insert `ch` at `(y, x)`, shifting the rest of the row right.
    ///
    /// The cursor is left on `(y, x)`, so this never overflows.
    pub fn insert_glyph(&mut self, y: u16, x: u16, ch: char) -> Result<(), SurfaceError> {
        self.check(y, x)?;
        self.buf.shift_row_right(x, y);
        self.buf.put_char(x, y, ch, self.style);
        self.cursor = (y, x);
        Ok(())
    }

    /// Write `s` starting at `(y, x)`, wrapping like [`Surface::put_glyph`].
    pub fn put_str(&mut self, y: u16, x: u16, s: &str) -> Result<(), SurfaceError> {
        self.move_cursor(y, x)?;
        for ch in s.chars() {
            self.put_glyph(ch)?;
        }
        Ok(())
    }

    /// Overwrite row `y` with `text`, truncated or blank-padded to the width.
    ///
    /// Safe on the last row: the bottom-right cell is inserted.
    pub fn put_line(&mut self, y: u16, text: &str) -> Result<(), SurfaceError> {
        self.check(y, 0)?;
        let width = self.width();
        let mut chars = text.chars();
        for x in 0..width {
            let ch = chars.next().unwrap_or(' ');
            if self.is_last_cell(y, x) {
                self.insert_glyph(y, x, ch)?;
            } else {
                self.draw_glyph(y, x, ch)?;
            }
        }
        Ok(())
    }

    /// Horizontal run of `n` copies of `ch` from `(y, x)`, clipped to the row.
    pub fn hline(&mut self, y: u16, x: u16, ch: char, n: u16) -> Result<(), SurfaceError> {
        self.check(y, x)?;
        let end = x.saturating_add(n).min(self.width());
        for cx in x..end {
            self.buf.put_char(cx, y, ch, self.style);
        }
        Ok(())
    }

    /// Vertical run of `n` copies of `ch` from `(y, x)`, clipped to the column.
    pub fn vline(&mut self, y: u16, x: u16, ch: char, n: u16) -> Result<(), SurfaceError> {
        self.check(y, x)?;
        let end = y.saturating_add(n).min(self.height());
        for cy in y..end {
            self.buf.put_char(x, cy, ch, self.style);
        }
        Ok(())
    }

    /// Draw a single-line border around the edge of the surface.
    pub fn draw_box(&mut self) {
        let (h, w) = self.extents();
        if w < 2 || h < 2 {
            return;
        }
        let style = self.style;
        let fb = &mut self.buf;

        fb.put_char(0, 0, '┌', style);
        fb.put_char(w - 1, 0, '┐', style);
        fb.put_char(0, h - 1, '└', style);
        fb.put_char(w - 1, h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(dx, 0, '─', style);
            fb.put_char(dx, h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(0, dy, '│', style);
            fb.put_char(w - 1, dy, '│', style);
        }
    }

    /// Blank every cell and home the cursor.
    pub fn clear(&mut self) {
        self.buf.clear(Cell::new(' ', self.style));
        self.cursor = (0, 0);
    }

    fn is_last_cell(&self, y: u16, x: u16) -> bool {
        y + 1 == self.height() && x + 1 == self.width()
    }

    fn advance_cursor(&mut self) -> Result<(), SurfaceError> {
        let (y, x) = self.cursor;
        if x + 1 < self.width() {
            self.cursor = (y, x + 1);
        } else if y + 1 < self.height() {
            self.cursor = (y + 1, 0);
        } else {
            return Err(SurfaceError::CursorOverflow);
        }
        Ok(())
    }
}

/// The screen: a fixed-size stack of surfaces.
#[derive(Debug, Clone)]
pub struct Screen {
    height: u16,
    width: u16,
    surfaces: Vec<Surface>,
}

impl Screen {
    pub fn new(height: u16, width: u16) -> Self {
        Self {
            height,
            width,
            surfaces: Vec::new(),
        }
    }

    /// `(height, width)`.
    pub fn extents(&self) -> (u16, u16) {
        (self.height, self.width)
    }

    /// Create a visible surface on top of the stack.
    pub fn new_surface(&mut self, height: u16, width: u16, y: u16, x: u16) -> Result<SurfaceId, LayoutError> {
        let fits = height > 0
            && width > 0
            && u32::from(y) + u32::from(height) <= u32::from(self.height)
            && u32::from(x) + u32::from(width) <= u32::from(self.width);
        if !fits {
            return Err(LayoutError::DoesNotFit {
                height,
                width,
                y,
                x,
                screen_height: self.height,
                screen_width: self.width,
            });
        }

        self.surfaces.push(Surface::new(height, width, y, x));
        Ok(SurfaceId(self.surfaces.len() - 1))
    }

    /// Borrow a surface.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this screen.
    pub fn surface(&self, id: SurfaceId) -> &Surface {
        &self.surfaces[id.0]
    }

    /// Mutably borrow a surface.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this screen.
    pub fn surface_mut(&mut self, id: SurfaceId) -> &mut Surface {
        &mut self.surfaces[id.0]
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn draw_glyph(&mut self, id: SurfaceId, y: u16, x: u16, ch: char) -> Result<(), SurfaceError> {
        self.surface_mut(id).draw_glyph(y, x, ch)
    }

    pub fn insert_glyph(&mut self, id: SurfaceId, y: u16, x: u16, ch: char) -> Result<(), SurfaceError> {
        self.surface_mut(id).insert_glyph(y, x, ch)
    }

    pub fn draw_box(&mut self, id: SurfaceId) {
        self.surface_mut(id).draw_box();
    }

    pub fn set_visible(&mut self, id: SurfaceId, visible: bool) {
        self.surface_mut(id).set_visible(visible);
    }

    /// `(height, width)` of a surface.
    pub fn surface_extents(&self, id: SurfaceId) -> (u16, u16) {
        self.surface(id).extents()
    }

    /// Composite every visible surface into `fb`, bottom of the stack first.
    ///
    /// `fb` is resized to the screen and cleared before compositing, so a
    /// caller can reuse one buffer across frames.
    pub fn compose_into(&self, fb: &mut FrameBuffer) {
        fb.resize(self.width, self.height);
        fb.clear(Cell::default());
        for surface in self.surfaces.iter().filter(|s| s.visible) {
            fb.blit(surface.buffer(), surface.x, surface.y);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn compose(&self) -> FrameBuffer {
        let mut fb = FrameBuffer::new(self.width, self.height);
        self.compose_into(&mut fb);
        fb
    }
}
