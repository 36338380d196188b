use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use image::RgbImage;
use rayon::prelude::*;
use snail_tracer::{
    benchmark_color, pack_rgb, render_scanlines, CancelToken, Framebuffer, ProgressLog, Scene,
    Settings, BENCHMARK_ORACLE,
};

/// Scene instances traced side by side by `bench --parallel`.
const PARALLEL_INSTANCES: usize = 4;

#[derive(Parser, Debug)]
#[command(author, version, about = "Deterministic fixed-point path tracer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the benchmark scene to a PNG
    Render(RenderArgs),
    /// Trace the benchmark pixels and check them against the expected color
    Bench(BenchArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON settings file; the flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(long)]
    spp: Option<u32>,

    /// Worker threads (default: one less than the CPU count)
    #[arg(long)]
    workers: Option<usize>,

    #[arg(long)]
    salt: Option<u32>,

    #[arg(long)]
    seed_offset: Option<u32>,

    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,
}

impl RenderArgs {
    /// Settings file (or defaults) with command-line overrides applied.
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => Settings::default(),
        };

        if let Some(width) = self.width {
            settings.scene.width = width;
        }
        if let Some(height) = self.height {
            settings.scene.height = height;
        }
        if let Some(salt) = self.salt {
            settings.scene.salt = salt;
        }
        if let Some(seed_offset) = self.seed_offset {
            settings.scene.seed_offset = seed_offset;
        }
        if let Some(spp) = self.spp {
            settings.render.samples_per_pixel = spp;
        }
        if self.workers.is_some() {
            settings.render.workers = self.workers;
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Args, Debug)]
struct BenchArgs {
    /// Number of timed runs
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    iterations: u32,

    /// Trace four independent scene instances concurrently
    #[arg(long)]
    parallel: bool,
}

fn render(args: &RenderArgs) -> Result<()> {
    let settings = args.settings()?;
    let scene = Scene::from_config(&settings.scene)?;

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        log::warn!("Received an interrupt, stopping render...");
        handler_token.cancel();
    })
    .context("Failed to install interrupt handler")?;

    let progress = ProgressLog::start();
    let outcome = render_scanlines(&scene, &settings.render, &cancel, |done, total| {
        progress.report(done, total)
    })?;

    save_png(&outcome.framebuffer, &args.output)?;
    if outcome.cancelled {
        log::warn!(
            "Wrote partial image ({}/{} rows) to {}",
            outcome.rows_completed,
            scene.height(),
            args.output.display()
        );
    } else {
        log::info!("Wrote {}", args.output.display());
    }
    Ok(())
}

fn save_png(framebuffer: &Framebuffer, path: &Path) -> Result<()> {
    let image = RgbImage::from_raw(
        framebuffer.width,
        framebuffer.height,
        framebuffer.to_rgb_bytes(),
    )
    .context("Framebuffer does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Trace the benchmark pixels on `instances` fresh scenes at once.
fn bench_colors(instances: usize) -> Result<Vec<[u8; 3]>> {
    if instances == 1 {
        return Ok(vec![benchmark_color(&Scene::benchmark(0, 0))]);
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(instances)
        .build()
        .context("Failed to start benchmark threads")?;
    Ok(pool.install(|| {
        (0..instances)
            .into_par_iter()
            .map(|_| benchmark_color(&Scene::benchmark(0, 0)))
            .collect()
    }))
}

fn bench(args: &BenchArgs) -> Result<()> {
    let instances = if args.parallel { PARALLEL_INSTANCES } else { 1 };
    log::info!(
        "Benchmarking {} run(s) of {} instance(s)",
        args.iterations,
        instances
    );

    let mut total = Duration::ZERO;
    for run in 1..=args.iterations {
        let started = Instant::now();
        let colors = bench_colors(instances)?;
        let elapsed = started.elapsed();
        total += elapsed;

        if let Some(bad) = colors.iter().find(|&&color| color != BENCHMARK_ORACLE) {
            bail!(
                "Benchmark color {:?} does not match expected {:?}",
                bad,
                BENCHMARK_ORACLE
            );
        }
        log::info!(
            "Run {}/{}: {:#08x} in {:.2?}",
            run,
            args.iterations,
            pack_rgb(BENCHMARK_ORACLE),
            elapsed
        );
    }

    log::info!(
        "Average {:.2?} per run",
        total / args.iterations
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render(args) => render(&args),
        Command::Bench(args) => bench(&args),
    }
}
