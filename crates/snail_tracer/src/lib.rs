//! SnailTrace - deterministic fixed-point path tracing.
//!
//! A smallpt-style Monte Carlo path tracer computed entirely in 10^6
//! fixed-point integers, so a pixel traced anywhere yields the same bytes.
//! Renders a Cornell-box benchmark scene either pixel by pixel
//! ([`Scene::trace`]) or as a full image on a worker pool
//! ([`render_scanlines`]).

mod benchmark;
mod config;
mod hittable;
mod integrator;
mod material;
mod renderer;
mod scanline;
mod scene;
mod sphere;
mod triangle;

pub use benchmark::{
    benchmark_camera, benchmark_color, benchmark_spheres, benchmark_triangles, pack_rgb,
    BENCHMARK_ORACLE, BENCHMARK_POINTS,
};
pub use config::{ConfigError, ConfigResult, RenderConfig, SceneConfig, Settings, MAX_RESOLUTION};
pub use hittable::{Hit, Hittable, PrimitiveKind};
pub use integrator::{PathTracer, BLEND_DEPTH, MAX_DEPTH, ROULETTE_DEPTH};
pub use material::{Color, Material, Surface};
pub use renderer::{color_to_rgb, render_pixel, Framebuffer};
pub use scanline::{
    render_scanlines, worker_count, CancelToken, ProgressLog, RenderError, RenderOutcome,
    RenderResult,
};
pub use scene::{Scene, FOV_SCALE};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the fixed-point types from snail_math
pub use snail_math::{Lcg, Ray, Scalar, Vector};
