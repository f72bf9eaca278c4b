//! # fractune
//!
//! Live-tunable fractal shader viewer.
//!
//! A fullscreen procedurally generated image is redrawn every display
//! refresh while a control panel exposes the generator's numeric parameters
//! for real-time tuning.
//!
//! The core of the crate is the binding layer between three things:
//!
//! - a mutable parameter state ([`params::ParamStore`]), organized into
//!   named groups with declared numeric domains,
//! - the generator-facing uniform snapshot
//!   ([`uniforms::GeneratorUniforms`]), re-derived group-wise on every edit,
//! - the per-frame render loop ([`app::App`]), which writes wall-clock time
//!   and viewport size into the snapshot and issues one draw per tick.
//!
//! [`context::RenderContext`] owns store and snapshot as a single unit, so
//! every write path re-projects before the next draw reads, and a snapshot
//! entry never mixes components from two different edits. Everything runs on
//! the winit event-loop thread; edits, resizes and ticks interleave in a
//! well-defined serial order.

pub mod app;
pub mod clock;
pub mod context;
pub mod error;
pub mod panel;
pub mod params;
pub mod shader;
pub mod uniforms;
pub mod viewport;

mod gpu;

pub use app::App;
pub use context::RenderContext;
pub use error::{GpuError, ParamError, ViewerError};
pub use params::{Domain, FieldSpec, Group, GroupSpec, ParamStore, SCHEMA};
pub use uniforms::GeneratorUniforms;
