//! Scanline rendering on a worker pool.
//!
//! Workers claim image rows from a shared counter and write finished pixels
//! into one mutex-guarded [`Framebuffer`]. Each pixel owns its random stream,
//! so the image is identical for any worker count or claim order.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::{ConfigError, Framebuffer, RenderConfig, Scene};

/// Errors that can stop a render before it starts.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render settings: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Shared cancellation flag.
///
/// Clones observe the same flag. Workers poll it before every row and every
/// pixel.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What a render produced.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub framebuffer: Framebuffer,
    /// Rows whose every pixel was rendered
    pub rows_completed: usize,
    /// True if the render stopped early because of a [`CancelToken`]
    pub cancelled: bool,
}

/// Number of workers for an image `height` rows tall.
///
/// Uses the configured count, or one less than the available CPUs, never
/// fewer than one and never more than there are rows.
pub fn worker_count(config: &RenderConfig, height: u32) -> usize {
    let workers = config.workers.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get().saturating_sub(1))
            .unwrap_or(1)
    });
    workers.clamp(1, (height as usize).max(1))
}

/// Render every row of `scene`.
///
/// `progress` runs on the worker that finished a row, with the number of
/// completed rows and the total. Cancelling `cancel` (from any thread,
/// including from inside `progress`) makes workers drop their unfinished
/// pixels; pixels already written stay in the framebuffer.
pub fn render_scanlines<F>(
    scene: &Scene,
    config: &RenderConfig,
    cancel: &CancelToken,
    progress: F,
) -> RenderResult<RenderOutcome>
where
    F: Fn(usize, usize) + Sync,
{
    config.validate()?;

    let width = scene.width();
    let height = scene.height() as usize;
    let spp = config.samples_per_pixel;
    let workers = worker_count(config, scene.height());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("scanline-{i}"))
        .build()?;

    log::info!(
        "Rendering {}x{} at {} spp on {} workers",
        width,
        height,
        spp,
        workers
    );

    let next_row = AtomicUsize::new(0);
    let rows_done = AtomicUsize::new(0);
    let framebuffer = Mutex::new(Framebuffer::new(width, scene.height()));
    let started = Instant::now();

    pool.scope(|s| {
        for _ in 0..workers {
            s.spawn(|_| {
                'rows: loop {
                    if cancel.is_cancelled() {
                        break;
                    }
                    let y = next_row.fetch_add(1, Ordering::SeqCst);
                    if y >= height {
                        break;
                    }

                    for x in 0..width {
                        if cancel.is_cancelled() {
                            break 'rows;
                        }
                        let rgb = scene.trace(x, y as u32, spp);
                        framebuffer
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .set(x, y as u32, rgb);
                    }

                    let done = rows_done.fetch_add(1, Ordering::SeqCst) + 1;
                    progress(done, height);
                }
            });
        }
    });

    let rows_completed = rows_done.into_inner();
    let cancelled = cancel.is_cancelled() && rows_completed < height;
    if cancelled {
        log::warn!(
            "Render cancelled after {}/{} rows",
            rows_completed,
            height
        );
    } else {
        log::info!("Render finished in {:.2?}", started.elapsed());
    }

    Ok(RenderOutcome {
        framebuffer: framebuffer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner),
        rows_completed,
        cancelled,
    })
}

/// Progress reporter that logs percentage done and expected time left.
#[derive(Debug, Clone, Copy)]
pub struct ProgressLog {
    started: Instant,
}

impl ProgressLog {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Linear extrapolation of the time left from the time spent so far.
    pub fn remaining(&self, done: usize, total: usize) -> Duration {
        if done == 0 {
            return Duration::ZERO;
        }
        let per_row = self.started.elapsed() / done as u32;
        per_row * total.saturating_sub(done) as u32
    }

    pub fn report(&self, done: usize, total: usize) {
        log::info!(
            "{}% done -- expected time left: {:.1?}",
            done * 100 / total.max(1),
            self.remaining(done, total)
        );
    }
}

impl Default for ProgressLog {
    fn default() -> Self {
        Self::start()
    }
}
