//! Core data model for benchmark scenes.
//!
//! A grid scene is a small tree: one composite group node owning a
//! background container rectangle followed by 100 styled shapes. Shapes
//! carry their geometry (`ShapeSpec`) and exactly one `FillStyle`.

use crate::id::NodeId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// CSS-style HSL: hue in degrees, saturation and lightness in percent.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        Self::from_hsla(h, s, l, 1.0)
    }

    pub fn from_hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        let h = h.rem_euclid(360.0);
        let s = (s / 100.0).clamp(0.0, 1.0);
        let l = (l / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        Self::rgba(r1 + m, g1 + m, b1 + m, a.clamp(0.0, 1.0))
    }

    /// 8-bit channels, rounded.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Emit as a CSS color: hex when opaque, `rgba(...)` otherwise.
    pub fn to_css(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            self.to_hex()
        } else {
            format!("rgba({r}, {g}, {b}, {})", self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        crate::color::parse_color(&s).map_err(serde::de::Error::custom)
    }
}

// ─── Fill styles ─────────────────────────────────────────────────────────

/// A gradient stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32, // 0.0 .. 1.0
    pub color: Color,
}

/// Gradient geometry, in the shape's local coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GradientKind {
    Linear { x1: f64, y1: f64, x2: f64, y2: f64 },
    Radial { cx: f64, cy: f64, r0: f64, r1: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: Color,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// The paint of one shape. Exactly one variant per shape instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FillStyle {
    Solid {
        color: Color,
    },
    Gradient {
        kind: GradientKind,
        stops: SmallVec<[GradientStop; 3]>,
    },
    ShadowedSolid {
        color: Color,
        shadow: Shadow,
    },
}

impl FillStyle {
    /// A representative flat color (first stop for gradients).
    pub fn base_color(&self) -> Color {
        match self {
            FillStyle::Solid { color } | FillStyle::ShadowedSolid { color, .. } => *color,
            FillStyle::Gradient { stops, .. } => {
                stops.first().map_or(Color::TRANSPARENT, |s| s.color)
            }
        }
    }

    pub fn shadow(&self) -> Option<&Shadow> {
        match self {
            FillStyle::ShadowedSolid { shadow, .. } => Some(shadow),
            _ => None,
        }
    }
}

/// A plain stroke (used for the container border).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

// ─── Geometry ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned box in grid space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// Local geometry of a shape. Rectangles are implied by width/height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeGeometry {
    Rect { width: f64, height: f64 },
    Polygon { vertices: SmallVec<[Point; 24]> },
}

/// One positioned shape. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub geometry: ShapeGeometry,
    /// Top-left of the shape's local box, in grid space.
    pub position: Point,
}

impl ShapeSpec {
    /// Bounding box in grid space.
    pub fn bounds(&self) -> Bounds {
        match &self.geometry {
            ShapeGeometry::Rect { width, height } => Bounds {
                x: self.position.x,
                y: self.position.y,
                width: *width,
                height: *height,
            },
            ShapeGeometry::Polygon { vertices } if vertices.is_empty() => Bounds {
                x: self.position.x,
                y: self.position.y,
                ..Bounds::default()
            },
            ShapeGeometry::Polygon { vertices } => {
                let (mut min_x, mut min_y) = (f64::MAX, f64::MAX);
                let (mut max_x, mut max_y) = (f64::MIN, f64::MIN);
                for v in vertices {
                    min_x = min_x.min(v.x);
                    min_y = min_y.min(v.y);
                    max_x = max_x.max(v.x);
                    max_y = max_y.max(v.y);
                }
                Bounds {
                    x: self.position.x + min_x,
                    y: self.position.y + min_y,
                    width: max_x - min_x,
                    height: max_y - min_y,
                }
            }
        }
    }
}

// ─── Benchmark variants ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rect,
    Polygon,
}

/// Determines which `FillStyle` variant a shape uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillFamily {
    Solid,
    Gradient,
    Shadowed,
}

/// One (shape-kind × fill-family) combination. Each gets its own surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    pub kind: ShapeKind,
    pub family: FillFamily,
}

impl Variant {
    /// All six variants in surface-processing order.
    pub const ALL: [Variant; 6] = [
        Variant::new(ShapeKind::Rect, FillFamily::Solid),
        Variant::new(ShapeKind::Rect, FillFamily::Gradient),
        Variant::new(ShapeKind::Rect, FillFamily::Shadowed),
        Variant::new(ShapeKind::Polygon, FillFamily::Solid),
        Variant::new(ShapeKind::Polygon, FillFamily::Gradient),
        Variant::new(ShapeKind::Polygon, FillFamily::Shadowed),
    ];

    pub const fn new(kind: ShapeKind, family: FillFamily) -> Self {
        Self { kind, family }
    }

    pub fn label(&self) -> &'static str {
        match (self.family, self.kind) {
            (FillFamily::Solid, ShapeKind::Rect) => "Solid Square",
            (FillFamily::Gradient, ShapeKind::Rect) => "Gradient Square",
            (FillFamily::Shadowed, ShapeKind::Rect) => "Shadowed Square",
            (FillFamily::Solid, ShapeKind::Polygon) => "Solid Polygon",
            (FillFamily::Gradient, ShapeKind::Polygon) => "Gradient Polygon",
            (FillFamily::Shadowed, ShapeKind::Polygon) => "Shadowed Polygon",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─── Scene nodes ─────────────────────────────────────────────────────────

/// The node kinds in a grid scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Composite that moves and renders all of its children together.
    Group { origin: Point },

    /// Bordered background rectangle. Never interactive.
    Container {
        bounds: Bounds,
        stroke: Stroke,
        shadow: Option<Shadow>,
    },

    /// One benchmark shape.
    Shape { spec: ShapeSpec, fill: FillStyle },
}

/// A single node in a grid scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Benchmark scenes are never user-editable.
    pub selectable: bool,
}

impl SceneNode {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            selectable: false,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        match &self.kind {
            NodeKind::Group { .. } => None,
            NodeKind::Container { bounds, .. } => Some(*bounds),
            NodeKind::Shape { spec, .. } => Some(spec.bounds()),
        }
    }
}
