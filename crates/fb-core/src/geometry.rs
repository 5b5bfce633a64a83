//! Polygon silhouettes for the polygon grids.
//!
//! Every silhouette is a pure function of `size`; all vertices lie in the
//! box `[0, size] × [0, size]`.

use crate::model::Point;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::f64::consts::TAU;

pub type Vertices = SmallVec<[Point; 24]>;

/// The ten named polygon shapes, in grid rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Silhouette {
    Triangle,
    Rhombus,
    Octagon,
    Arrow,
    Lightning,
    Cross,
    Star,
    Heart,
    Butterfly,
    Gear,
}

impl Silhouette {
    pub const ALL: [Silhouette; 10] = [
        Silhouette::Triangle,
        Silhouette::Rhombus,
        Silhouette::Octagon,
        Silhouette::Arrow,
        Silhouette::Lightning,
        Silhouette::Cross,
        Silhouette::Star,
        Silhouette::Heart,
        Silhouette::Butterfly,
        Silhouette::Gear,
    ];

    /// Silhouette used by grid shape `i`.
    pub fn for_index(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }

    pub fn vertices(self, size: f64) -> Vertices {
        match self {
            Silhouette::Triangle => scaled(size, &[(0.5, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            Silhouette::Rhombus => {
                scaled(size, &[(0.5, 0.0), (1.0, 0.5), (0.5, 1.0), (0.0, 0.5)])
            }
            Silhouette::Octagon => radial(size, 8, |_| size / 2.0),
            Silhouette::Arrow => scaled(
                size,
                &[(0.0, 0.5), (0.7, 0.5), (0.7, 0.2), (1.0, 0.5), (0.7, 0.8), (0.7, 0.5)],
            ),
            Silhouette::Lightning => scaled(
                size,
                &[(0.4, 0.0), (0.1, 0.5), (0.5, 0.5), (0.2, 1.0), (0.9, 0.4), (0.5, 0.4)],
            ),
            Silhouette::Cross => scaled(
                size,
                &[
                    (0.35, 0.0),
                    (0.65, 0.0),
                    (0.65, 0.35),
                    (1.0, 0.35),
                    (1.0, 0.65),
                    (0.65, 0.65),
                    (0.65, 1.0),
                    (0.35, 1.0),
                    (0.35, 0.65),
                    (0.0, 0.65),
                    (0.0, 0.35),
                    (0.35, 0.35),
                ],
            ),
            Silhouette::Star => radial(size, 24, |i| alternating_radius(size, i)),
            Silhouette::Heart => scaled(
                size,
                &[
                    (0.5, 0.25),
                    (0.25, 0.0),
                    (0.0, 0.25),
                    (0.0, 0.5),
                    (0.5, 1.0),
                    (1.0, 0.5),
                    (1.0, 0.25),
                    (0.75, 0.0),
                    (0.5, 0.25),
                ],
            ),
            Silhouette::Butterfly => scaled(
                size,
                &[
                    (0.5, 0.2),
                    (0.8, 0.0),
                    (1.0, 0.3),
                    (0.8, 0.5),
                    (1.0, 0.7),
                    (0.8, 1.0),
                    (0.5, 0.8),
                    (0.2, 1.0),
                    (0.0, 0.7),
                    (0.2, 0.5),
                    (0.0, 0.3),
                    (0.2, 0.0),
                ],
            ),
            Silhouette::Gear => radial(size, 16, |i| alternating_radius(size, i)),
        }
    }
}

/// Fixed fractions of `size`.
fn scaled(size: f64, fractions: &[(f64, f64)]) -> Vertices {
    fractions
        .iter()
        .map(|&(fx, fy)| Point::new(size * fx, size * fy))
        .collect()
}

/// `n` equally spaced angles around the box center, `angle = i * (2π / n)`.
fn radial(size: f64, n: usize, radius: impl Fn(usize) -> f64) -> Vertices {
    let center = size / 2.0;
    let step = TAU / n as f64;
    (0..n)
        .map(|i| {
            let angle = i as f64 * step;
            let r = radius(i);
            Point::new(center + r * angle.cos(), center + r * angle.sin())
        })
        .collect()
}

/// Outer radius on odd indices, inner on even.
fn alternating_radius(size: f64, i: usize) -> f64 {
    if i % 2 == 1 { size / 2.0 } else { size / 4.0 }
}
