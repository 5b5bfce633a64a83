//! Integration tests: timing driver over recording surfaces.
//!
//! Covers full runs, result ordering, the fail-fast path, the
//! at-most-one-run guard, and mount/unmount lifecycle.

use fb_core::bench::{Bench, BenchError, MOTION_PATH, RunState, Scheduler};
use fb_core::config::BenchConfig;
use fb_core::model::{Point, SceneNode, Variant};
use fb_core::surface::{
    GroupHandle, RecordingSurface, ShapeHandle, Surface, SurfaceConfig, SurfaceError,
};
use pretty_assertions::assert_eq;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct TokioYield;

impl Scheduler for TokioYield {
    fn yield_now(&self) -> impl Future<Output = ()> {
        tokio::task::yield_now()
    }
}

/// Recording surface that counts disposals and can fail on demand.
struct FlakySurface {
    inner: RecordingSurface,
    disposed: Arc<AtomicUsize>,
    fail_render_after: Option<usize>,
}

impl FlakySurface {
    fn new(config: SurfaceConfig, disposed: Arc<AtomicUsize>) -> Self {
        Self {
            inner: RecordingSurface::new(config),
            disposed,
            fail_render_after: None,
        }
    }
}

impl Surface for FlakySurface {
    fn config(&self) -> SurfaceConfig {
        self.inner.config()
    }
    fn create_shape(&mut self, node: &SceneNode) -> Result<ShapeHandle, SurfaceError> {
        self.inner.create_shape(node)
    }
    fn group(
        &mut self,
        children: &[ShapeHandle],
        origin: Point,
    ) -> Result<GroupHandle, SurfaceError> {
        self.inner.group(children, origin)
    }
    fn position(&self, group: GroupHandle) -> Result<Point, SurfaceError> {
        self.inner.position(group)
    }
    fn set_position(&mut self, group: GroupHandle, position: Point) -> Result<(), SurfaceError> {
        self.inner.set_position(group, position)
    }
    fn render_now(&mut self) -> Result<(), SurfaceError> {
        if self.fail_render_after == Some(self.inner.render_count()) {
            return Err(SurfaceError::Backend("device lost".into()));
        }
        self.inner.render_now()
    }
    fn dispose(&mut self) {
        if !self.inner.is_disposed() {
            self.disposed.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.dispose();
    }
    fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }
}

fn mounted_bench(config: BenchConfig) -> Bench<RecordingSurface> {
    let mut bench = Bench::new(config);
    bench
        .mount(|_, cfg| Ok(RecordingSurface::new(cfg)))
        .unwrap();
    bench
}

const LABELS: [&str; 6] = [
    "Solid Square",
    "Gradient Square",
    "Shadowed Square",
    "Solid Polygon",
    "Gradient Polygon",
    "Shadowed Polygon",
];

// ─── Completed runs ──────────────────────────────────────────────────────

#[tokio::test]
async fn full_run_produces_six_ordered_results() {
    let bench = mounted_bench(BenchConfig::default());
    let results = bench.run(&TokioYield).await.unwrap();

    let labels: Vec<&str> = results.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, LABELS);
    assert!(results.iter().all(|r| r.elapsed_ms >= 0.0));
    assert_eq!(bench.results(), results);
    assert_eq!(bench.state(), RunState::Idle);
}

#[tokio::test]
async fn every_step_is_repainted_along_the_path() {
    let mut bench = mounted_bench(BenchConfig::default());
    bench.run(&TokioYield).await.unwrap();

    for variant in Variant::ALL {
        let surface = bench.surface_mut(variant).unwrap();
        assert_eq!(surface.render_count(), 400, "{variant}");
        let frames = surface.frames();
        assert_eq!(frames[0], vec![Point::new(1.0, 0.0)]);
        assert_eq!(frames[99], vec![Point::new(100.0, 0.0)]);
        assert_eq!(frames[199], vec![Point::new(100.0, 100.0)]);
        assert_eq!(frames[299], vec![Point::new(0.0, 100.0)]);
        assert_eq!(frames[399], vec![Point::ORIGIN]);
    }
}

#[tokio::test]
async fn steps_per_leg_is_configurable() {
    let config = BenchConfig::from_json_str(r#"{ "motion": { "steps_per_leg": 3 } }"#).unwrap();
    let mut bench = mounted_bench(config);
    bench.run(&TokioYield).await.unwrap();
    let surface = bench.surface_mut(Variant::ALL[5]).unwrap();
    assert_eq!(surface.render_count(), 3 * MOTION_PATH.len());
}

#[tokio::test]
async fn second_run_replaces_results() {
    let bench = mounted_bench(BenchConfig::default());
    bench.run(&TokioYield).await.unwrap();
    let second = bench.run(&TokioYield).await.unwrap();
    assert_eq!(second.len(), 6);
    assert_eq!(bench.results().len(), 6);
}

// ─── Re-entrancy ─────────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_run_is_rejected() {
    let mut bench = mounted_bench(BenchConfig::default());

    let (first, second) = tokio::join!(bench.run(&TokioYield), async {
        // Let the first run take the guard and reach its first yield.
        tokio::task::yield_now().await;
        let state = bench.state();
        (state, bench.run(&TokioYield).await)
    });

    assert_eq!(first.unwrap().len(), 6);
    let (state_during, second) = second;
    assert_eq!(state_during, RunState::Running);
    assert_eq!(second, Err(BenchError::AlreadyRunning));
    assert_eq!(bench.state(), RunState::Idle);

    // No surface saw a second pass.
    for variant in Variant::ALL {
        assert_eq!(bench.surface_mut(variant).unwrap().render_count(), 400);
    }
}

// ─── Fail fast ───────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_surface_aborts_before_any_work() {
    let config = BenchConfig::default();
    let surface_config = SurfaceConfig::from(&config.canvas);
    let mut bench = Bench::new(config);
    for variant in &Variant::ALL[..5] {
        bench
            .mount_surface(*variant, RecordingSurface::new(surface_config))
            .unwrap();
    }
    assert!(!bench.is_mounted());

    let outcome = bench.run(&TokioYield).await;
    assert_eq!(outcome, Err(BenchError::SurfaceNotReady("Shadowed Polygon")));
    assert!(bench.results().is_empty());
    assert_eq!(bench.state(), RunState::Idle);
    for variant in &Variant::ALL[..5] {
        assert_eq!(bench.surface_mut(*variant).unwrap().render_count(), 0);
    }
}

#[tokio::test]
async fn run_after_unmount_fails_fast() {
    let mut bench = mounted_bench(BenchConfig::default());
    bench.run(&TokioYield).await.unwrap();
    bench.unmount();
    let outcome = bench.run(&TokioYield).await;
    assert_eq!(outcome, Err(BenchError::SurfaceNotReady("Solid Square")));
    assert!(bench.results().is_empty());
}

#[tokio::test]
async fn backend_error_aborts_and_resets_state() {
    let disposed = Arc::new(AtomicUsize::new(0));
    let mut bench = Bench::new(BenchConfig::default());
    bench
        .mount(|variant, cfg| {
            let mut surface = FlakySurface::new(cfg, disposed.clone());
            if variant == Variant::ALL[1] {
                surface.fail_render_after = Some(10);
            }
            Ok(surface)
        })
        .unwrap();

    let outcome = bench.run(&TokioYield).await;
    assert_eq!(
        outcome,
        Err(BenchError::Surface {
            label: "Gradient Square",
            source: SurfaceError::Backend("device lost".into()),
        })
    );
    // The first surface finished before the failure.
    assert_eq!(bench.results().len(), 1);
    assert_eq!(bench.state(), RunState::Idle);
}

#[tokio::test]
async fn failed_surface_is_moved_back_home() {
    let disposed = Arc::new(AtomicUsize::new(0));
    let mut bench = Bench::new(BenchConfig::default());
    bench
        .mount(|variant, cfg| {
            let mut surface = FlakySurface::new(cfg, disposed.clone());
            if variant == Variant::ALL[2] {
                // fails on step 151, halfway down the second leg
                surface.fail_render_after = Some(150);
            }
            Ok(surface)
        })
        .unwrap();
    assert!(bench.run(&TokioYield).await.is_err());

    let flaky = bench.surface_mut(Variant::ALL[2]).unwrap();
    assert_eq!(flaky.inner.groups()[0].position, Point::ORIGIN);

    flaky.fail_render_after = None;
    let results = bench.run(&TokioYield).await.unwrap();
    assert_eq!(results.len(), 6);
    let frames = bench.surface_mut(Variant::ALL[2]).unwrap().inner.frames();
    // 150 frames from the failed run, then a full closed loop from the origin
    assert_eq!(frames.len(), 550);
    assert_eq!(frames[150], vec![Point::new(1.0, 0.0)]);
    assert_eq!(frames[549], vec![Point::ORIGIN]);
}

// ─── Lifecycle ───────────────────────────────────────────────────────────

#[test]
fn failed_mount_disposes_created_surfaces() {
    let disposed = Arc::new(AtomicUsize::new(0));
    let mut bench: Bench<FlakySurface> = Bench::new(BenchConfig::default());
    let mut created = 0;
    let outcome = bench.mount(|variant, cfg| {
        if variant == Variant::ALL[3] {
            return Err(SurfaceError::Backend("no adapter".into()));
        }
        created += 1;
        Ok(FlakySurface::new(cfg, disposed.clone()))
    });

    assert_eq!(outcome, Err(SurfaceError::Backend("no adapter".into())));
    assert_eq!(created, 3);
    assert_eq!(disposed.load(Ordering::SeqCst), 3);
    assert!(!bench.is_mounted());
}

#[test]
fn unmount_and_drop_dispose_all_six() {
    let disposed = Arc::new(AtomicUsize::new(0));
    {
        let mut bench = Bench::new(BenchConfig::default());
        bench
            .mount(|_, cfg| Ok(FlakySurface::new(cfg, disposed.clone())))
            .unwrap();
        assert!(bench.is_mounted());
        bench.unmount();
        assert_eq!(disposed.load(Ordering::SeqCst), 6);

        bench
            .mount(|_, cfg| Ok(FlakySurface::new(cfg, disposed.clone())))
            .unwrap();
    }
    assert_eq!(disposed.load(Ordering::SeqCst), 12);
}

#[test]
fn mount_state_is_readable_through_shared_ref() {
    let bench = mounted_bench(BenchConfig::default());
    let shared: &Bench<RecordingSurface> = &bench;
    assert!(shared.is_mounted());
}

#[test]
fn mounted_surfaces_use_canvas_config() {
    let mut bench = mounted_bench(BenchConfig::default());
    for variant in Variant::ALL {
        let surface = bench.surface_mut(variant).unwrap();
        assert_eq!(surface.config().width, 400);
        assert_eq!(surface.nodes().len(), 101);
    }
}
