use fb_core::model::{FillFamily, Point, ShapeKind, Variant};
use fb_core::{BenchConfig, Surface, SurfaceConfig, SurfaceError, build_grid_scene, mount_grid_scene};
use fb_render::VelloSurface;
use pretty_assertions::assert_eq;

fn mounted(variant: Variant) -> VelloSurface {
    let config = BenchConfig::default();
    let mut surface = VelloSurface::new(SurfaceConfig::from(&config.canvas));
    let scene = build_grid_scene(variant, &config);
    mount_grid_scene(&mut surface, &scene).unwrap();
    surface
}

fn encoded_paths(surface: &VelloSurface) -> u32 {
    surface.scene().encoding().n_paths
}

#[test]
fn mount_copies_container_and_shapes() {
    let surface = mounted(Variant::new(ShapeKind::Rect, FillFamily::Solid));
    assert_eq!(surface.node_count(), 101);
    assert!(!surface.has_gpu());
}

#[test]
fn render_encodes_a_frame() {
    let mut surface = mounted(Variant::new(ShapeKind::Polygon, FillFamily::Gradient));
    assert_eq!(surface.frame_count(), 0);
    surface.render_now().unwrap();
    assert_eq!(surface.frame_count(), 1);
    assert!(!surface.scene().encoding().is_empty());
}

#[test]
fn every_frame_starts_from_a_clean_scene() {
    let mut surface = mounted(Variant::new(ShapeKind::Rect, FillFamily::Solid));
    surface.render_now().unwrap();
    let first = encoded_paths(&surface);
    surface.render_now().unwrap();
    assert_eq!(encoded_paths(&surface), first);
}

#[test]
fn shadows_add_paths() {
    let mut solid = mounted(Variant::new(ShapeKind::Polygon, FillFamily::Solid));
    let mut shadowed = mounted(Variant::new(ShapeKind::Polygon, FillFamily::Shadowed));
    solid.render_now().unwrap();
    shadowed.render_now().unwrap();
    // one extra silhouette per shape
    assert_eq!(encoded_paths(&shadowed), encoded_paths(&solid) + 100);
}

#[test]
fn group_position_is_tracked() {
    let mut surface = mounted(Variant::new(ShapeKind::Rect, FillFamily::Gradient));
    let group = fb_core::GroupHandle(0);
    assert_eq!(surface.position(group).unwrap(), Point::ORIGIN);
    surface.set_position(group, Point::new(3.0, -4.0)).unwrap();
    assert_eq!(surface.position(group).unwrap(), Point::new(3.0, -4.0));
    assert_eq!(
        surface.position(fb_core::GroupHandle(7)),
        Err(SurfaceError::UnknownHandle(7))
    );
}

#[test]
fn disposed_surface_refuses_work() {
    let mut surface = mounted(Variant::new(ShapeKind::Rect, FillFamily::Shadowed));
    surface.dispose();
    assert!(surface.is_disposed());
    assert_eq!(surface.node_count(), 0);
    assert_eq!(surface.render_now(), Err(SurfaceError::Disposed));
    // second dispose is a no-op
    surface.dispose();
    assert!(surface.is_disposed());
}
