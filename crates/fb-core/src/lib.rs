pub mod bench;
pub mod color;
pub mod config;
pub mod geometry;
pub mod id;
pub mod model;
pub mod scene;
pub mod style;
pub mod surface;

pub use bench::{Bench, BenchError, BenchResult, RunState, Scheduler};
pub use config::BenchConfig;
pub use geometry::Silhouette;
pub use id::NodeId;
pub use model::*;
pub use scene::{GridScene, build_grid_scene, mount_grid_scene};
pub use style::fill_style;
pub use surface::{GroupHandle, RecordingSurface, ShapeHandle, Surface, SurfaceConfig, SurfaceError};

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
