//! Concrete views used by the world scene.

use crate::codepage::{glyph, CP437};
use crate::core::FrameData;
use crate::error::{LayoutError, SurfaceError};
use crate::fb::CellStyle;
use crate::surface::Screen;
use crate::types::{GlyphIndex, TARGET_FPS};
use crate::view::{Rect, View, BORDER_STYLE};

/// Displays the simulation's visible grid.
#[derive(Debug, Clone)]
pub struct MapView {
    view: View,
}

impl MapView {
    pub fn new(screen: &mut Screen, rect: Rect) -> Result<Self, LayoutError> {
        Ok(Self {
            view: View::new(screen, rect, 1, Some("Terra"))?,
        })
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// `(height, width)` available for map cells.
    pub fn map_extents(&self, screen: &Screen) -> (u16, u16) {
        self.view.content_extents(screen)
    }

    /// Draw `cells` row-major into the content area.
    ///
    /// Cells beyond the content area are ignored. The bottom-right cell is
    /// inserted rather than drawn so the cursor never has to advance off
    /// the surface.
    pub fn draw_map(&self, screen: &mut Screen, cells: &[GlyphIndex]) -> Result<(), SurfaceError> {
        let surface = screen.surface_mut(self.view.content());
        let (h, w) = surface.extents();
        let w = usize::from(w);
        let area = cells.len().min(usize::from(h) * w);

        for (i, &cell) in cells[..area].iter().enumerate() {
            let y = (i / w) as u16;
            let x = (i % w) as u16;
            if i + 1 == usize::from(h) * w {
                surface.insert_glyph(y, x, glyph(cell))?;
            } else {
                surface.draw_glyph(y, x, glyph(cell))?;
            }
        }
        Ok(())
    }
}

/// Displays frame clock metrics.
#[derive(Debug, Clone)]
pub struct FrameMetricsView {
    view: View,
}

impl FrameMetricsView {
    pub const HEIGHT: u16 = 8;

    pub fn new(screen: &mut Screen, width: u16, y: u16, x: u16) -> Result<Self, LayoutError> {
        let rect = Rect::new(Self::HEIGHT, width, y, x);
        Ok(Self {
            view: View::new(screen, rect, 1, Some("Frame Metrics"))?,
        })
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn redraw(&self, screen: &mut Screen, frame: &FrameData) -> Result<(), SurfaceError> {
        let surface = screen.surface_mut(self.view.content());
        let lines = [
            format!("target fps  {:>10}", TARGET_FPS),
            format!("delta ms    {:>10.1}", frame.delta_ms()),
            format!("run time s  {:>10.1}", frame.run_time),
            format!("frames      {:>10}", frame.total_frames),
            format!("blown       {:>10}", frame.blown_frames),
            format!("slack ms    {:>10.1}", frame.frame_left * 1000.0),
        ];
        for (row, line) in (0..surface.height()).zip(lines.iter()) {
            surface.put_line(row, line)?;
        }
        Ok(())
    }
}

/// Displays the full code page as a 16x16 table with hex headers.
#[derive(Debug, Clone)]
pub struct CodePageView {
    view: View,
}

impl CodePageView {
    const DIM: u16 = 16;
    const GRID_PAD: u16 = 3;
    pub const HEIGHT: u16 = Self::DIM + 4;
    pub const WIDTH: u16 = Self::DIM * 2 + 3;

    pub fn new(screen: &mut Screen, y: u16, x: u16) -> Result<Self, LayoutError> {
        let rect = Rect::new(Self::HEIGHT, Self::WIDTH, y, x);
        let view = View::new(screen, rect, 0, Some("Code Page 437"))?;
        let this = Self { view };
        this.draw_codepage(screen)?;
        Ok(this)
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    fn draw_codepage(&self, screen: &mut Screen) -> Result<(), SurfaceError> {
        let (h, w) = (Self::HEIGHT, Self::WIDTH);
        let surface = screen.surface_mut(self.view.content());

        surface.set_style(BORDER_STYLE);
        surface.draw_glyph(1, 1, '\\')?;
        surface.hline(2, 1, '─', w - 2)?;
        surface.vline(1, 2, '│', h - 2)?;
        surface.draw_glyph(2, 0, '├')?;
        surface.draw_glyph(2, 2, '┼')?;
        surface.draw_glyph(2, w - 1, '┤')?;
        surface.draw_glyph(h - 1, 2, '┴')?;

        for i in 0..Self::DIM {
            surface.draw_glyph(1, i * 2 + Self::GRID_PAD, hex_digit(i))?;
            surface.draw_glyph(i + Self::GRID_PAD, 1, hex_digit(i))?;
        }

        surface.set_style(CellStyle::default());
        for (i, &ch) in CP437.iter().enumerate() {
            let (y, x) = ((i as u16) / Self::DIM, (i as u16) % Self::DIM);
            surface.draw_glyph(y + Self::GRID_PAD, x * 2 + Self::GRID_PAD, ch)?;
        }
        Ok(())
    }
}

/// Echoes typed characters; a scratch pad for checking input handling.
#[derive(Debug, Clone)]
pub struct EchoInputView {
    view: View,
}

impl EchoInputView {
    pub const GREETING: &'static str = "Hello from Terra!";

    pub fn new(screen: &mut Screen, rect: Rect) -> Result<Self, LayoutError> {
        let view = View::new(screen, rect, 1, Some("Echo"))?;
        let surface = screen.surface_mut(view.content());
        surface.put_str(0, 0, Self::GREETING)?;
        surface.move_cursor(2.min(surface.height() - 1), 0)?;
        Ok(Self { view })
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Write `ch` at the cursor.
    pub fn echo(&self, screen: &mut Screen, ch: char) -> Result<(), SurfaceError> {
        screen.surface_mut(self.view.content()).put_glyph(ch)
    }
}

fn hex_digit(v: u16) -> char {
    char::from_digit(u32::from(v), 16)
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('?')
}
