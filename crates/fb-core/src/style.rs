//! Per-shape fill styles.
//!
//! Hues derive from the shape index through fixed multipliers (37, 47, 57),
//! so neighbouring shapes differ while the palette still cycles mod 360.

use crate::model::{Color, FillFamily, FillStyle, GradientKind, GradientStop, Shadow};
use smallvec::smallvec;

/// The drop shadow used by the shadowed family. Independent of the index.
pub const SHAPE_SHADOW: Shadow = Shadow {
    color: Color::rgba(0.0, 0.0, 0.0, 0.2),
    blur: 5.0,
    offset_x: 2.0,
    offset_y: 2.0,
};

/// Hue in degrees for `index` under `multiplier`, plus a fixed offset.
fn hue(index: usize, multiplier: usize, offset: usize) -> f32 {
    ((index * multiplier + offset) % 360) as f32
}

/// Fill for shape `index` of the given family.
/// `size` is the shape's side length; gradient coordinates scale with it.
pub fn fill_style(index: usize, family: FillFamily, size: f64) -> FillStyle {
    match family {
        FillFamily::Solid => FillStyle::Solid {
            color: solid_color(index),
        },
        FillFamily::Gradient => gradient(index, size),
        FillFamily::Shadowed => FillStyle::ShadowedSolid {
            color: solid_color(index),
            shadow: SHAPE_SHADOW,
        },
    }
}

pub fn solid_color(index: usize) -> Color {
    Color::from_hsl(hue(index, 37, 0), 80.0, 60.0)
}

/// Three-way flat palette (base, light, dark) picked by `index % 3`.
pub fn solid_pattern(index: usize) -> FillStyle {
    let color = match index % 3 {
        0 => Color::from_hsl(hue(index, 37, 0), 80.0, 60.0),
        1 => Color::from_hsl(hue(index, 47, 0), 70.0, 75.0),
        _ => Color::from_hsl(hue(index, 57, 0), 90.0, 45.0),
    };
    FillStyle::Solid { color }
}

/// Gradient template by `index % 3`: diagonal linear, centered radial,
/// horizontal three-stop linear.
pub fn gradient(index: usize, size: f64) -> FillStyle {
    let stop = |offset: f32, color: Color| GradientStop { offset, color };
    match index % 3 {
        0 => FillStyle::Gradient {
            kind: GradientKind::Linear {
                x1: 0.0,
                y1: 0.0,
                x2: size,
                y2: size,
            },
            stops: smallvec![
                stop(0.0, Color::from_hsl(hue(index, 37, 0), 70.0, 50.0)),
                stop(1.0, Color::from_hsl(hue(index, 37, 180), 70.0, 50.0)),
            ],
        },
        1 => FillStyle::Gradient {
            kind: GradientKind::Radial {
                cx: size / 2.0,
                cy: size / 2.0,
                r0: 0.0,
                r1: size / 2.0,
            },
            stops: smallvec![
                stop(0.0, Color::from_hsl(hue(index, 47, 0), 80.0, 60.0)),
                stop(1.0, Color::from_hsl(hue(index, 47, 120), 80.0, 40.0)),
            ],
        },
        _ => FillStyle::Gradient {
            kind: GradientKind::Linear {
                x1: 0.0,
                y1: 0.0,
                x2: size,
                y2: 0.0,
            },
            stops: smallvec![
                stop(0.0, Color::from_hsl(hue(index, 57, 0), 90.0, 55.0)),
                stop(0.5, Color::from_hsl(hue(index, 57, 90), 90.0, 55.0)),
                stop(1.0, Color::from_hsl(hue(index, 57, 180), 90.0, 55.0)),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pure_function() {
        for i in 0..100 {
            for family in [FillFamily::Solid, FillFamily::Gradient, FillFamily::Shadowed] {
                assert_eq!(fill_style(i, family, 30.0), fill_style(i, family, 30.0));
            }
        }
    }

    #[test]
    fn solid_hue_rule() {
        assert_eq!(solid_color(0), Color::from_hsl(0.0, 80.0, 60.0));
        assert_eq!(solid_color(10), Color::from_hsl(10.0, 80.0, 60.0));
        // 37 * 99 = 3663 ≡ 63 (mod 360)
        assert_eq!(solid_color(99), Color::from_hsl(63.0, 80.0, 60.0));
    }

    #[test]
    fn shadowed_shares_solid_color() {
        let FillStyle::ShadowedSolid { color, shadow } = fill_style(7, FillFamily::Shadowed, 30.0)
        else {
            panic!("expected shadowed fill");
        };
        assert_eq!(color, solid_color(7));
        assert_eq!(shadow, SHAPE_SHADOW);
        assert_eq!(fill_style(8, FillFamily::Shadowed, 30.0).shadow(), Some(&SHAPE_SHADOW));
    }

    #[test]
    fn gradient_templates_cycle() {
        match fill_style(3, FillFamily::Gradient, 30.0) {
            FillStyle::Gradient { kind: GradientKind::Linear { x2, y2, .. }, stops } => {
                assert_eq!((x2, y2), (30.0, 30.0));
                assert_eq!(stops.len(), 2);
                assert_eq!(stops[1].color, Color::from_hsl(291.0, 70.0, 50.0));
            }
            other => panic!("expected diagonal linear, got {other:?}"),
        }
        match fill_style(4, FillFamily::Gradient, 30.0) {
            FillStyle::Gradient { kind: GradientKind::Radial { cx, r1, .. }, stops } => {
                assert_eq!((cx, r1), (15.0, 15.0));
                assert_eq!(stops[0].color, Color::from_hsl(188.0, 80.0, 60.0));
            }
            other => panic!("expected radial, got {other:?}"),
        }
        match fill_style(5, FillFamily::Gradient, 30.0) {
            FillStyle::Gradient { kind: GradientKind::Linear { y2, .. }, stops } => {
                assert_eq!(y2, 0.0);
                let offsets: Vec<f32> = stops.iter().map(|s| s.offset).collect();
                assert_eq!(offsets, [0.0, 0.5, 1.0]);
            }
            other => panic!("expected horizontal linear, got {other:?}"),
        }
    }

    #[test]
    fn stop_offsets_in_unit_range() {
        for i in 0..30 {
            if let FillStyle::Gradient { stops, .. } = gradient(i, 30.0) {
                assert!(stops.iter().all(|s| (0.0..=1.0).contains(&s.offset)));
            }
        }
    }

    #[test]
    fn solid_pattern_palette() {
        assert_eq!(solid_pattern(1).base_color(), Color::from_hsl(47.0, 70.0, 75.0));
        assert_eq!(solid_pattern(2).base_color(), Color::from_hsl(114.0, 90.0, 45.0));
    }
}
