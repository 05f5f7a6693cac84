//! The world scene: owns the simulation, the screen and every view, and
//! mediates between input, simulation and drawing once per frame.

use tracing::{debug, info, warn};

use crate::core::{FrameData, Simulation};
use crate::term::{
    center_in, CodePageView, EchoInputView, FrameMetricsView, LayoutError, MapView, Rect, Screen,
    SurfaceError,
};
use crate::types::{Command, GlyphIndex};

/// Size of the echo panel, centred on screen.
pub const ECHO_EXTENTS: (u16, u16) = (10, 20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    Running,
    Stopped,
}

/// Primary scene: metrics and code page in the left column, the map filling
/// the rest of the screen, and the echo panel floating in the middle.
pub struct WorldScene {
    screen: Screen,
    sim: Simulation,
    metrics: FrameMetricsView,
    codepage: CodePageView,
    map: MapView,
    echo: EchoInputView,
    state: SceneState,
    grid: Vec<GlyphIndex>,
    echo_full: bool,
}

impl WorldScene {
    /// Lay out every view on a `(height, width)` screen and generate the
    /// first map.
    ///
    /// Fails if the screen cannot hold the layout.
    pub fn new(extents: (u16, u16), sim: Simulation) -> Result<Self, LayoutError> {
        let (screen_h, screen_w) = extents;
        let mut screen = Screen::new(screen_h, screen_w);

        let left_w = CodePageView::WIDTH;
        let metrics = FrameMetricsView::new(&mut screen, left_w, 0, 0)?;
        let mut codepage = CodePageView::new(&mut screen, FrameMetricsView::HEIGHT, 0)?;
        codepage.view_mut().set_visible(&mut screen, false);

        let map_rect = Rect::new(screen_h, screen_w.saturating_sub(left_w), 0, left_w);
        let map = MapView::new(&mut screen, map_rect)?;

        let echo_rect = center_in(extents, ECHO_EXTENTS.0, ECHO_EXTENTS.1)?;
        let mut echo = EchoInputView::new(&mut screen, echo_rect)?;
        echo.view_mut().set_visible(&mut screen, false);

        debug!(screen_h, screen_w, "laid out world scene");

        let mut scene = Self {
            screen,
            sim,
            metrics,
            codepage,
            map,
            echo,
            state: SceneState::Running,
            grid: Vec::new(),
            echo_full: false,
        };
        scene.new_map();
        Ok(scene)
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SceneState::Running
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn map_view(&self) -> &MapView {
        &self.map
    }

    pub fn codepage_visible(&self) -> bool {
        self.codepage.view().is_visible()
    }

    pub fn echo_visible(&self) -> bool {
        self.echo.view().is_visible()
    }

    /// Whether the echo panel has run out of room.
    pub fn echo_full(&self) -> bool {
        self.echo_full
    }

    /// Apply at most one command read this tick.
    pub fn handle_input(&mut self, command: Option<Command>) {
        let Some(command) = command else {
            return;
        };

        match command {
            Command::GenerateMap => self.new_map(),
            Command::Quit => {
                info!("quit requested");
                self.state = SceneState::Stopped;
            }
            Command::ToggleCodePage => self.codepage.view_mut().toggle_visibility(&mut self.screen),
            Command::ToggleEcho => self.echo.view_mut().toggle_visibility(&mut self.screen),
            Command::Echo(ch) => {
                if let Err(err) = self.echo.echo(&mut self.screen, ch) {
                    if self.echo_full {
                        debug!(%err, "echo panel is full");
                    } else {
                        warn!(%err, "echo panel is full");
                        self.echo_full = true;
                    }
                }
            }
        }
    }

    /// Advance the simulation by the frame's delta and redraw.
    ///
    /// Does nothing once the scene has stopped.
    pub fn update(&mut self, frame: &FrameData) -> Result<(), SurfaceError> {
        if !self.is_running() {
            return Ok(());
        }
        self.sim.update(frame.delta_ms());
        self.redraw(frame)
    }

    fn redraw(&mut self, frame: &FrameData) -> Result<(), SurfaceError> {
        self.metrics.redraw(&mut self.screen, frame)?;
        self.sim.visible_grid_into(&mut self.grid);
        self.map.draw_map(&mut self.screen, &self.grid)
    }

    fn new_map(&mut self) {
        let (h, w) = self.map.map_extents(&self.screen);
        self.sim.create_map(usize::from(h), usize::from(w));
    }
}
