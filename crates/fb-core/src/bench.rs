//! Animation/timing driver.
//!
//! Owns the six benchmark surfaces. A run walks each surface's composite
//! along a closed four-leg path (right, down, left, up), repainting after
//! every one-pixel step and yielding to the host scheduler in between,
//! and records the wall-clock time per surface.
//!
//! Ordering: steps within a leg, legs within a surface and surfaces within
//! a run are strictly sequential. At most one run is in flight at a time.

use crate::config::BenchConfig;
use crate::model::{Point, Variant};
use crate::scene::{build_grid_scene, mount_grid_scene};
use crate::surface::{GroupHandle, Surface, SurfaceConfig, SurfaceError};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Host scheduler hand-off point.
///
/// `yield_now` is a zero-delay deferral: it returns control to the host
/// so queued work (painting, input) can run, then resumes the driver. It
/// only guarantees that the preceding `render_now` has been issued, not
/// that the host has finished rasterizing it.
pub trait Scheduler {
    fn yield_now(&self) -> impl Future<Output = ()>;
}

/// One straight segment of the motion path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub dx: f64,
    pub dy: f64,
}

/// Right, down, left, up. The path is closed.
pub const MOTION_PATH: [Leg; 4] = [
    Leg { dx: 1.0, dy: 0.0 },
    Leg { dx: 0.0, dy: 1.0 },
    Leg { dx: -1.0, dy: 0.0 },
    Leg { dx: 0.0, dy: -1.0 },
];

/// Driver state, mirrored 1:1 by the trigger control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunState {
    Idle,
    Running,
}

impl RunState {
    pub fn button_label(self) -> &'static str {
        match self {
            RunState::Idle => "Start Performance Test",
            RunState::Running => "Running Test...",
        }
    }

    /// The trigger is disabled while running.
    pub fn trigger_enabled(self) -> bool {
        self == RunState::Idle
    }
}

/// Timing of one surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchResult {
    pub label: String,
    pub elapsed_ms: f64,
}

impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}ms", self.label, self.elapsed_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BenchError {
    /// Another run is still in progress.
    AlreadyRunning,
    /// A surface was never mounted (or was unmounted); nothing was run.
    SurfaceNotReady(&'static str),
    /// A backend failed mid-run.
    Surface {
        label: &'static str,
        source: SurfaceError,
    },
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::AlreadyRunning => write!(f, "a benchmark run is already in progress"),
            BenchError::SurfaceNotReady(label) => write!(f, "surface {label:?} is not initialized"),
            BenchError::Surface { label, source } => write!(f, "surface {label:?}: {source}"),
        }
    }
}

impl std::error::Error for BenchError {}

struct Slot<S> {
    variant: Variant,
    surface: S,
    group: GroupHandle,
}

/// Clears the running flag on every exit path.
struct RunGuard<'a>(&'a AtomicBool);

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunGuard(flag))
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The six surfaces plus the results list.
pub struct Bench<S: Surface> {
    config: BenchConfig,
    /// One slot per `Variant::ALL` entry, in processing order.
    slots: tokio::sync::Mutex<Vec<Option<Slot<S>>>>,
    running: AtomicBool,
    results: Mutex<Vec<BenchResult>>,
}

impl<S: Surface> Bench<S> {
    pub fn new(config: BenchConfig) -> Self {
        Self {
            config,
            slots: tokio::sync::Mutex::new(Variant::ALL.iter().map(|_| None).collect()),
            running: AtomicBool::new(false),
            results: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Create and populate all six surfaces.
    ///
    /// On failure every surface created so far is disposed again, so the
    /// bench is either fully mounted or not mounted at all.
    pub fn mount<F>(&mut self, mut factory: F) -> Result<(), SurfaceError>
    where
        F: FnMut(Variant, SurfaceConfig) -> Result<S, SurfaceError>,
    {
        self.unmount();
        let surface_config = SurfaceConfig::from(&self.config.canvas);
        for variant in Variant::ALL {
            let mounted = factory(variant, surface_config)
                .and_then(|surface| self.mount_surface(variant, surface));
            if let Err(e) = mounted {
                log::warn!("mounting {variant} failed: {e}");
                self.unmount();
                return Err(e);
            }
        }
        log::debug!("mounted {} surfaces", Variant::ALL.len());
        Ok(())
    }

    /// Populate one surface with the grid for `variant` and take ownership.
    /// A surface previously held for `variant` is disposed.
    pub fn mount_surface(&mut self, variant: Variant, mut surface: S) -> Result<(), SurfaceError> {
        let scene = build_grid_scene(variant, &self.config);
        let group = match mount_grid_scene(&mut surface, &scene) {
            Ok(group) => group,
            Err(e) => {
                surface.dispose();
                return Err(e);
            }
        };
        let pos = slot_index(variant);
        let slots = self.slots.get_mut();
        if let Some(mut old) = slots[pos].replace(Slot {
            variant,
            surface,
            group,
        }) {
            old.surface.dispose();
        }
        Ok(())
    }

    /// Dispose every surface and release all owned nodes.
    pub fn unmount(&mut self) {
        for slot in self.slots.get_mut().iter_mut() {
            if let Some(mut slot) = slot.take() {
                slot.surface.dispose();
            }
        }
    }

    /// The surface that renders `variant`, if mounted.
    pub fn surface_mut(&mut self, variant: Variant) -> Option<&mut S> {
        self.slots.get_mut()[slot_index(variant)]
            .as_mut()
            .map(|slot| &mut slot.surface)
    }

    /// Whether all six surfaces are mounted. Reports `false` while a run
    /// holds the surfaces.
    pub fn is_mounted(&self) -> bool {
        self.slots
            .try_lock()
            .is_ok_and(|slots| slots.iter().all(Option::is_some))
    }

    pub fn state(&self) -> RunState {
        if self.running.load(Ordering::Acquire) {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    /// Results of the latest run, in processing order.
    pub fn results(&self) -> Vec<BenchResult> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run the benchmark over all six surfaces.
    ///
    /// Fails fast, without touching any surface, if a run is already in
    /// progress or any surface is missing.
    pub async fn run<Y: Scheduler>(&self, scheduler: &Y) -> Result<Vec<BenchResult>, BenchError> {
        let Some(_guard) = RunGuard::acquire(&self.running) else {
            log::debug!("run rejected: already running");
            return Err(BenchError::AlreadyRunning);
        };
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();

        let mut slots = self.slots.lock().await;
        if let Some(pos) = slots.iter().position(Option::is_none) {
            let label = Variant::ALL[pos].label();
            log::warn!("benchmark aborted: surface {label:?} is not initialized");
            return Err(BenchError::SurfaceNotReady(label));
        }

        let steps = self.config.motion.steps_per_leg;
        for slot in slots.iter_mut().flatten() {
            let label = slot.variant.label();
            let elapsed = animate(slot, steps, scheduler)
                .await
                .map_err(|source| BenchError::Surface { label, source })?;
            let result = BenchResult {
                label: label.to_string(),
                elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            };
            log::info!("{result}");
            self.results
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(result);
        }

        Ok(self.results())
    }
}

impl<S: Surface> Drop for Bench<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn slot_index(variant: Variant) -> usize {
    Variant::ALL
        .iter()
        .position(|v| *v == variant)
        .unwrap_or_default()
}

/// Walk one composite around the motion path, repainting every step.
///
/// On a backend error the composite is put back where it started, so the
/// next run traces the same closed path.
async fn animate<S: Surface, Y: Scheduler>(
    slot: &mut Slot<S>,
    steps_per_leg: u32,
    scheduler: &Y,
) -> Result<Duration, SurfaceError> {
    let home = slot.surface.position(slot.group)?;
    let start = Instant::now();
    match walk_path(slot, steps_per_leg, scheduler).await {
        Ok(()) => Ok(start.elapsed()),
        Err(e) => {
            if let Err(restore) = slot.surface.set_position(slot.group, home) {
                log::warn!("{}: could not restore position: {restore}", slot.variant);
            }
            Err(e)
        }
    }
}

async fn walk_path<S: Surface, Y: Scheduler>(
    slot: &mut Slot<S>,
    steps_per_leg: u32,
    scheduler: &Y,
) -> Result<(), SurfaceError> {
    for leg in MOTION_PATH {
        for _ in 0..steps_per_leg {
            let Point { x, y } = slot.surface.position(slot.group)?;
            slot.surface
                .set_position(slot.group, Point::new(x + leg.dx, y + leg.dy))?;
            slot.surface.render_now()?;
            scheduler.yield_now().await;
        }
    }
    Ok(())
}
