//! `Surface` implementation on top of a Vello scene.
//!
//! Every `render_now` re-encodes the whole surface into a fresh
//! `vello::Scene`. With a `GpuTarget` attached the scene is then
//! rasterized and the call blocks until the GPU is done; without one
//! only the CPU-side encoding cost is measured.

use crate::gpu::GpuTarget;
use crate::paint::{paint_background, paint_nodes, to_peniko};
use fb_core::model::{Point, SceneNode};
use fb_core::surface::{GroupHandle, ShapeHandle, Surface, SurfaceConfig, SurfaceError};
use vello::Scene;

struct Group {
    children: Vec<usize>,
    position: Point,
}

pub struct VelloSurface {
    config: SurfaceConfig,
    nodes: Vec<SceneNode>,
    groups: Vec<Group>,
    scene: Scene,
    target: Option<GpuTarget>,
    frames: u64,
    disposed: bool,
}

impl VelloSurface {
    /// Encode-only surface.
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            groups: Vec::new(),
            scene: Scene::new(),
            target: None,
            frames: 0,
            disposed: false,
        }
    }

    /// Surface that also rasterizes every frame on the GPU.
    pub fn with_target(config: SurfaceConfig, target: GpuTarget) -> Self {
        Self {
            target: Some(target),
            ..Self::new(config)
        }
    }

    pub fn has_gpu(&self) -> bool {
        self.target.is_some()
    }

    /// The most recently encoded frame.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn check_live(&self) -> Result<(), SurfaceError> {
        if self.disposed {
            Err(SurfaceError::Disposed)
        } else {
            Ok(())
        }
    }
}

impl Surface for VelloSurface {
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
        self.groups.push(Group {
            children: children.iter().map(|h| h.0).collect(),
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
        let g = self
            .groups
            .get_mut(group.0)
            .ok_or(SurfaceError::UnknownHandle(group.0))?;
        g.position = position;
        Ok(())
    }

    fn render_now(&mut self) -> Result<(), SurfaceError> {
        self.check_live()?;
        let SurfaceConfig {
            width,
            height,
            background,
        } = self.config;

        self.scene.reset();
        paint_background(&mut self.scene, width, height, background);
        for group in &self.groups {
            let nodes = group.children.iter().map(|&i| &self.nodes[i]);
            paint_nodes(&mut self.scene, nodes, group.position);
        }

        if let Some(target) = &mut self.target {
            target.render(&self.scene, to_peniko(background))?;
        }
        self.frames += 1;
        Ok(())
    }

    fn dispose(&mut self) {
        if !self.disposed {
            log::debug!(
                "disposing vello surface: {} nodes, {} frames",
                self.nodes.len(),
                self.frames
            );
        }
        self.nodes.clear();
        self.groups.clear();
        self.scene.reset();
        self.target = None;
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}
