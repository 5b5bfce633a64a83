pub mod gpu;
pub mod paint;
pub mod surface;

pub use gpu::{GpuContext, GpuTarget};
pub use surface::VelloSurface;
