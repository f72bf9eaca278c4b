//! The compiled fragment generator.
//!
//! The WGSL source is the only thing this crate knows about the pixel math:
//! the generator is an opaque program that consumes the uniform block
//! declared in [`crate::uniforms`] and produces one color per pixel.

pub const SHADER_SOURCE: &str = include_str!("shader.wgsl");
