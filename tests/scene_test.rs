//! World scene behaviour through the facade.

use terra::core::{FrameData, Simulation};
use terra::term::CodePageView;
use terra::types::Command;
use terra::{SceneState, WorldScene};

const EXTENTS: (u16, u16) = (32, 100);

fn frame(delta_time: f64) -> FrameData {
    FrameData {
        delta_time,
        ..FrameData::default()
    }
}

#[test]
fn test_regenerate_replaces_terrain() {
    let mut scene = WorldScene::new(EXTENTS, Simulation::new(11)).unwrap();
    let before = scene.simulation().terrain().clone();

    scene.handle_input(Some(Command::GenerateMap));
    let after = scene.simulation().terrain();
    assert_eq!(after.bounds(), before.bounds());
    assert_ne!(after.cells(), before.cells());
    assert_eq!(scene.simulation().entities().len(), 3);
}

#[test]
fn test_toggle_twice_restores_composite() {
    let mut scene = WorldScene::new(EXTENTS, Simulation::new(11)).unwrap();
    scene.update(&frame(0.0)).unwrap();
    let original = scene.screen().compose();

    scene.handle_input(Some(Command::ToggleCodePage));
    let shown = scene.screen().compose();
    assert_ne!(shown, original);
    assert!(shown.row_text(8).contains("Code Page 437"));

    scene.handle_input(Some(Command::ToggleCodePage));
    assert_eq!(scene.screen().compose(), original);
}

#[test]
fn test_echo_panel_floats_over_map() {
    let mut scene = WorldScene::new(EXTENTS, Simulation::new(11)).unwrap();
    scene.handle_input(Some(Command::ToggleEcho));
    scene.handle_input(Some(Command::Echo('z')));
    scene.update(&frame(0.0)).unwrap();

    let fb = scene.screen().compose();
    // Echo panel is 10x20 centred on a 32x100 screen: frame at (11, 40).
    assert!(fb.row_text(12).contains("Hello from Terra!"));
    assert_eq!(fb.get(41, 14).map(|c| c.ch), Some('z'));
}

#[test]
fn test_metrics_and_map_titles_are_drawn() {
    let scene = WorldScene::new(EXTENTS, Simulation::new(11)).unwrap();
    let fb = scene.screen().compose();
    let top = fb.row_text(0);
    assert!(top.starts_with("┌Frame Metrics"));
    assert!(top.contains("┌Terra"));
    assert_eq!(fb.get(CodePageView::WIDTH, 0).map(|c| c.ch), Some('┌'));
}

#[test]
fn test_stopped_scene_ignores_updates() {
    let mut scene = WorldScene::new(EXTENTS, Simulation::new(11)).unwrap();
    scene.handle_input(Some(Command::Quit));
    assert_eq!(scene.state(), SceneState::Stopped);

    let before = scene.simulation().visible_grid();
    for _ in 0..50 {
        scene.update(&frame(1.0)).unwrap();
    }
    assert_eq!(scene.simulation().visible_grid(), before);
}
