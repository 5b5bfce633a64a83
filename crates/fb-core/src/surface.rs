//! Drawable surface capability.
//!
//! The driver and scene builder only ever talk to a `Surface`; concrete
//! rendering engines (Vello, recording) live behind this trait.

use crate::model::{Color, Point, SceneNode};
use std::fmt;

/// Creation options for one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
}

impl From<&crate::config::CanvasConfig> for SurfaceConfig {
    fn from(canvas: &crate::config::CanvasConfig) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            background: canvas.background,
        }
    }
}

/// Handle to a node created on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeHandle(pub usize);

/// Handle to a composite created on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupHandle(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The surface was disposed; no further drawing is possible.
    Disposed,
    /// A handle that this surface never issued.
    UnknownHandle(usize),
    /// The rendering backend failed.
    Backend(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Disposed => write!(f, "surface already disposed"),
            SurfaceError::UnknownHandle(h) => write!(f, "unknown surface handle {h}"),
            SurfaceError::Backend(msg) => write!(f, "render backend error: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A 2D drawing target owning retained scene nodes.
pub trait Surface {
    fn config(&self) -> SurfaceConfig;

    /// Register one scene node (container or shape).
    fn create_shape(&mut self, node: &SceneNode) -> Result<ShapeHandle, SurfaceError>;

    /// Wrap previously created nodes into one composite positioned at `origin`.
    /// Children keep their order; the first one paints at the back.
    fn group(&mut self, children: &[ShapeHandle], origin: Point)
    -> Result<GroupHandle, SurfaceError>;

    fn position(&self, group: GroupHandle) -> Result<Point, SurfaceError>;

    fn set_position(&mut self, group: GroupHandle, position: Point) -> Result<(), SurfaceError>;

    /// Repaint everything now. Never batched or skipped.
    fn render_now(&mut self) -> Result<(), SurfaceError>;

    /// Release every owned node. Idempotent.
    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn config(&self) -> SurfaceConfig {
        (**self).config()
    }
    fn create_shape(&mut self, node: &SceneNode) -> Result<ShapeHandle, SurfaceError> {
        (**self).create_shape(node)
    }
    fn group(
        &mut self,
        children: &[ShapeHandle],
        origin: Point,
    ) -> Result<GroupHandle, SurfaceError> {
        (**self).group(children, origin)
    }
    fn position(&self, group: GroupHandle) -> Result<Point, SurfaceError> {
        (**self).position(group)
    }
    fn set_position(&mut self, group: GroupHandle, position: Point) -> Result<(), SurfaceError> {
        (**self).set_position(group, position)
    }
    fn render_now(&mut self) -> Result<(), SurfaceError> {
        (**self).render_now()
    }
    fn dispose(&mut self) {
        (**self).dispose()
    }
    fn is_disposed(&self) -> bool {
        (**self).is_disposed()
    }
}

// ─── Recording surface ───────────────────────────────────────────────────

/// One group as seen by the recording surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedGroup {
    pub children: Vec<ShapeHandle>,
    pub position: Point,
}

/// Headless surface that keeps nodes in memory and counts repaints.
///
/// Useful as a zero-cost backend (measures pure harness overhead) and
/// as the test double for the driver.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    config: SurfaceConfig,
    nodes: Vec<SceneNode>,
    groups: Vec<RecordedGroup>,
    /// Group positions captured at each `render_now`.
    frames: Vec<Vec<Point>>,
    disposed: bool,
}

impl RecordingSurface {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            groups: Vec::new(),
            frames: Vec::new(),
            disposed: false,
        }
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn groups(&self) -> &[RecordedGroup] {
        &self.groups
    }

    /// Number of repaints so far.
    pub fn render_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Vec<Point>] {
        &self.frames
    }

    fn check_live(&self) -> Result<(), SurfaceError> {
        if self.disposed {
            Err(SurfaceError::Disposed)
        } else {
            Ok(())
        }
    }

    fn group_mut(&mut self, group: GroupHandle) -> Result<&mut RecordedGroup, SurfaceError> {
        self.groups
            .get_mut(group.0)
            .ok_or(SurfaceError::UnknownHandle(group.0))
    }
}

impl Surface for RecordingSurface {
    fn config(&self) -> SurfaceConfig {
        self.config
    }

    fn create_shape(&mut self, node: &SceneNode) -> Result<ShapeHandle, SurfaceError> {
        self.check_live()?;
        self.nodes.push(node.clone());
        Ok(ShapeHandle(self.nodes.len() - 1))
    }

    fn group(
        &mut self,
        children: &[ShapeHandle],
        origin: Point,
    ) -> Result<GroupHandle, SurfaceError> {
        self.check_live()?;
        if let Some(bad) = children.iter().find(|h| h.0 >= self.nodes.len()) {
            return Err(SurfaceError::UnknownHandle(bad.0));
        }
        self.groups.push(RecordedGroup {
            children: children.to_vec(),
            position: origin,
        });
        Ok(GroupHandle(self.groups.len() - 1))
    }

    fn position(&self, group: GroupHandle) -> Result<Point, SurfaceError> {
        self.groups
            .get(group.0)
            .map(|g| g.position)
            .ok_or(SurfaceError::UnknownHandle(group.0))
    }

    fn set_position(&mut self, group: GroupHandle, position: Point) -> Result<(), SurfaceError> {
        self.check_live()?;
        self.group_mut(group)?.position = position;
        Ok(())
    }

    fn render_now(&mut self) -> Result<(), SurfaceError> {
        self.check_live()?;
        self.frames
            .push(self.groups.iter().map(|g| g.position).collect());
        Ok(())
    }

    fn dispose(&mut self) {
        if !self.disposed {
            log::trace!("disposing recording surface ({} nodes)", self.nodes.len());
        }
        self.nodes.clear();
        self.groups.clear();
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}
