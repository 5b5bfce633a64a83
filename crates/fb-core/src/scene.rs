//! Grid scene builder.
//!
//! Lays out 100 shapes on a 10×10 grid inside a bordered container. The
//! grid is centered in the container, which is centered in the canvas.
//! The scene is a tiny DAG: one composite group node → container + shapes.

use crate::config::BenchConfig;
use crate::geometry::Silhouette;
use crate::id::NodeId;
use crate::model::*;
use crate::style::{fill_style, gradient, solid_pattern};
use crate::surface::{GroupHandle, Surface, SurfaceError};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;

/// Cells per grid side.
pub const GRID_SIDE: usize = 10;
/// Shapes per grid.
pub const GRID_SHAPES: usize = GRID_SIDE * GRID_SIDE;

/// A composite of one container rectangle plus 100 styled shapes.
#[derive(Debug, Clone)]
pub struct GridScene {
    pub variant: Variant,
    /// Edges go from the group node to each child.
    pub graph: StableDiGraph<SceneNode, ()>,
    /// The composite group node.
    pub root: NodeIndex,
}

impl GridScene {
    fn new(variant: Variant, origin: Point) -> Self {
        let mut graph = StableDiGraph::new();
        let root = graph.add_node(SceneNode::new(NodeId::grid(), NodeKind::Group { origin }));
        Self {
            variant,
            graph,
            root,
        }
    }

    fn push_child(&mut self, node: SceneNode) -> NodeIndex {
        let idx = self.graph.add_node(node);
        self.graph.add_edge(self.root, idx, ());
        idx
    }

    /// Children in insertion order: container first, then shapes by index.
    ///
    /// Sorted by `NodeIndex` so the order doesn't depend on how `petgraph`
    /// iterates its adjacency list.
    pub fn children(&self) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(self.root, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    pub fn child_count(&self) -> usize {
        self.graph
            .neighbors_directed(self.root, petgraph::Direction::Outgoing)
            .count()
    }

    pub fn node(&self, idx: NodeIndex) -> &SceneNode {
        &self.graph[idx]
    }

    /// Position of the composite on the canvas.
    pub fn origin(&self) -> Point {
        match self.graph[self.root].kind {
            NodeKind::Group { origin } => origin,
            _ => Point::ORIGIN,
        }
    }

    pub fn container(&self) -> Option<&SceneNode> {
        self.children()
            .into_iter()
            .map(|idx| &self.graph[idx])
            .find(|n| matches!(n.kind, NodeKind::Container { .. }))
    }

    /// Shapes with their grid index, in index order.
    pub fn shapes(&self) -> Vec<(usize, &ShapeSpec, &FillStyle)> {
        self.children()
            .into_iter()
            .filter_map(|idx| {
                let node = &self.graph[idx];
                match &node.kind {
                    NodeKind::Shape { spec, fill } => Some((node.id.shape_index()?, spec, fill)),
                    _ => None,
                }
            })
            .collect()
    }

    /// `(row, col)` of grid index `i`.
    pub fn cell_of(i: usize) -> (usize, usize) {
        (i / GRID_SIDE, i % GRID_SIDE)
    }
}

/// Container box, centered in the canvas.
pub fn container_bounds(config: &BenchConfig) -> Bounds {
    Bounds {
        x: (config.canvas.width as f64 - config.container.width) / 2.0,
        y: (config.canvas.height as f64 - config.container.height) / 2.0,
        width: config.container.width,
        height: config.container.height,
    }
}

/// Top-left of the first cell: grid centered in the container, container
/// centered in the canvas.
pub fn grid_anchor(config: &BenchConfig) -> Point {
    let grid_side = config.shape.grid_side();
    let container = container_bounds(config);
    Point::new(
        container.x + (config.container.width - grid_side) / 2.0,
        container.y + (config.container.height - grid_side) / 2.0,
    )
}

/// Grid-space top-left of shape `i`.
pub fn cell_position(i: usize, anchor: Point, pitch: f64) -> Point {
    let (row, col) = GridScene::cell_of(i);
    anchor.translate(col as f64 * pitch, row as f64 * pitch)
}

fn shape_geometry(kind: ShapeKind, i: usize, size: f64) -> ShapeGeometry {
    match kind {
        ShapeKind::Rect => ShapeGeometry::Rect {
            width: size,
            height: size,
        },
        ShapeKind::Polygon => ShapeGeometry::Polygon {
            vertices: Silhouette::for_index(i).vertices(size),
        },
    }
}

fn shape_fill(variant: Variant, i: usize, size: f64) -> FillStyle {
    match (variant.kind, variant.family) {
        // Gradient polygons alternate with the flat three-tone palette.
        (ShapeKind::Polygon, FillFamily::Gradient) if i % 2 == 1 => solid_pattern(i),
        (ShapeKind::Polygon, FillFamily::Gradient) => gradient(i, size),
        (_, family) => fill_style(i, family, size),
    }
}

/// Build the grid scene for one variant.
pub fn build_grid_scene(variant: Variant, config: &BenchConfig) -> GridScene {
    let size = config.shape.size;
    let pitch = size + config.shape.gap;
    let anchor = grid_anchor(config);

    let mut scene = GridScene::new(variant, Point::ORIGIN);

    scene.push_child(SceneNode::new(
        NodeId::container(),
        NodeKind::Container {
            bounds: container_bounds(config),
            stroke: config.container.stroke,
            shadow: config.container.shadow,
        },
    ));

    // Geometry, fill and position are all keyed by the same `i`.
    for i in 0..GRID_SHAPES {
        let spec = ShapeSpec {
            geometry: shape_geometry(variant.kind, i, size),
            position: cell_position(i, anchor, pitch),
        };
        let fill = shape_fill(variant, i, size);
        scene.push_child(SceneNode::new(NodeId::shape(i), NodeKind::Shape { spec, fill }));
    }

    log::debug!(
        "built {variant} grid: {} children, anchor ({}, {})",
        scene.child_count(),
        anchor.x,
        anchor.y
    );
    scene
}

/// Register every child of `scene` on `surface` and wrap them in one group.
pub fn mount_grid_scene<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &GridScene,
) -> Result<GroupHandle, SurfaceError> {
    let mut handles = Vec::with_capacity(scene.child_count());
    for idx in scene.children() {
        handles.push(surface.create_shape(scene.node(idx))?);
    }
    surface.group(&handles, scene.origin())
}
