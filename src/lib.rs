//! Terra (workspace facade crate).
//!
//! Re-exports the workspace crates as `terra::{core,input,term,types}` and
//! holds the application layer: configuration, the world scene, and the
//! headless runner.

pub use terra_core as core;
pub use terra_input as input;
pub use terra_term as term;
pub use terra_types as types;

pub mod config;
pub mod headless;
pub mod scene;

pub use config::TerraConfig;
pub use headless::{run_headless, HeadlessReport};
pub use scene::{SceneState, WorldScene};
