//! Generator-facing uniform snapshot and its projection from the store.
//!
//! [`GeneratorUniforms`] is the exact byte layout the fragment generator
//! reads. The mapping from parameter groups to uniform entries is fixed:
//!
//! | Group / source          | Uniform entry    | Components            |
//! |-------------------------|------------------|-----------------------|
//! | `Group::FractalBounds`  | `fractal_bounds` | minX, maxX, minY, maxY|
//! | `Group::Easings`        | `easings`        | easing 1..3           |
//! | `Group::LocalPosition`  | `local_position` | X, Y, Z               |
//! | `Group::Intervals`      | `intervals`      | interval 1..3         |
//! | viewport monitor        | `resolution`     | width, height (px)    |
//! | frame clock             | `time`           | seconds since start   |
//!
//! Projection always re-reads every field of a group so a snapshot entry
//! never mixes components from two different edits.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};

use crate::params::{Group, ParamStore};

/// The uniform block consumed by the generator, WGSL `uniform` layout.
///
/// Each vec3 entry carries an explicit pad so the following member lands on
/// a 16-byte boundary, matching the WGSL struct in `shader.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GeneratorUniforms {
    pub fractal_bounds: Vec4,
    pub easings: Vec3,
    _pad0: f32,
    pub local_position: Vec3,
    _pad1: f32,
    pub intervals: Vec3,
    _pad2: f32,
    pub resolution: Vec2,
    pub time: f32,
    _pad3: f32,
}

/// Full projection: derive a complete snapshot from the store.
///
/// Called once at startup; thereafter only dirtied groups are re-projected
/// via [`project_group`].
pub fn project(store: &ParamStore) -> GeneratorUniforms {
    let mut uniforms = GeneratorUniforms::zeroed();
    for group in Group::ALL {
        project_group(store, group, &mut uniforms);
    }
    let [width, height] = store.resolution();
    uniforms.resolution = Vec2::new(width, height);
    uniforms.time = store.time();
    uniforms
}

/// Partial projection: re-derive one group's uniform entry.
///
/// Reads all of the group's fields in one step, so sibling components come
/// from the same store state regardless of which single field was edited.
pub fn project_group(store: &ParamStore, group: Group, uniforms: &mut GeneratorUniforms) {
    let [a, b, c, d] = store.group_values(group);
    match group {
        Group::FractalBounds => uniforms.fractal_bounds = Vec4::new(a, b, c, d),
        Group::Easings => uniforms.easings = Vec3::new(a, b, c),
        Group::LocalPosition => uniforms.local_position = Vec3::new(a, b, c),
        Group::Intervals => uniforms.intervals = Vec3::new(a, b, c),
    }
}
