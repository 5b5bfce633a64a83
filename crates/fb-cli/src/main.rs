//! `fill-bench`: runs the six fill-style grids through the motion path
//! and prints one timing line per grid.

mod args;

use args::{Args, Backend, USAGE};
use fb_core::{
    Bench, BenchConfig, BenchResult, RecordingSurface, RunState, Scheduler, Surface, SurfaceConfig,
    SurfaceError,
};
use fb_render::{GpuContext, GpuTarget, VelloSurface};
use std::process::ExitCode;
use std::sync::Arc;

/// Hands control back to the runtime between animation steps.
struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn yield_now(&self) -> impl Future<Output = ()> {
        tokio::task::yield_now()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fill-bench: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        print!("{USAGE}");
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => BenchConfig::load(path)?,
        None => BenchConfig::default(),
    };
    let gpu = gpu_context(&args).await;

    let mut bench: Bench<Box<dyn Surface>> = Bench::new(config);
    bench
        .mount(|_, surface_config| make_surface(args.backend, gpu.as_ref(), surface_config))
        .map_err(|e| format!("mount failed: {e}"))?;

    if !args.json {
        println!("{}", RunState::Running.button_label());
    }
    let outcome = bench.run(&TokioScheduler).await;
    bench.unmount();
    let results = outcome.map_err(|e| e.to_string())?;

    if args.json {
        println!("{}", results_json(&results)?);
    } else {
        for result in &results {
            println!("{result}");
        }
        println!("{}", bench.state().button_label());
    }
    Ok(())
}

/// A shared GPU device when `--gpu` is set; falls back to encode-only.
async fn gpu_context(args: &Args) -> Option<Arc<GpuContext>> {
    if !args.gpu {
        return None;
    }
    if args.backend == Backend::Null {
        log::warn!("--gpu has no effect with the null backend");
        return None;
    }
    match GpuContext::new().await {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            log::warn!("GPU unavailable, measuring scene encoding only: {e}");
            None
        }
    }
}

fn make_surface(
    backend: Backend,
    gpu: Option<&Arc<GpuContext>>,
    config: SurfaceConfig,
) -> Result<Box<dyn Surface>, SurfaceError> {
    Ok(match (backend, gpu) {
        (Backend::Null, _) => Box::new(RecordingSurface::new(config)),
        (Backend::Vello, None) => Box::new(VelloSurface::new(config)),
        (Backend::Vello, Some(ctx)) => {
            let target = GpuTarget::new(Arc::clone(ctx), config.width, config.height)?;
            Box::new(VelloSurface::with_target(config, target))
        }
    })
}

fn results_json(results: &[BenchResult]) -> Result<String, String> {
    serde_json::to_string_pretty(results).map_err(|e| format!("serialize results: {e}"))
}
