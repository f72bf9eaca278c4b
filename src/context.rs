//! Shared render context: parameter store plus its projected snapshot.
//!
//! The store and the snapshot are owned together so they can only move in
//! lockstep: every write path re-projects before control returns to the
//! caller, and the draw path only ever sees the snapshot.

use crate::error::ParamError;
use crate::params::{Group, ParamStore};
use crate::uniforms::{self, GeneratorUniforms};

/// Explicitly owned binding between the parameter store and the uniform
/// snapshot the draw call reads. Constructed once at startup, handed by
/// reference to the control panel, viewport monitor and render loop.
pub struct RenderContext {
    store: ParamStore,
    snapshot: GeneratorUniforms,
}

impl RenderContext {
    /// Build the store with schema defaults and take the initial full
    /// projection.
    pub fn new() -> Self {
        let store = ParamStore::new();
        let snapshot = uniforms::project(&store);
        Self { store, snapshot }
    }

    /// Current value of one tunable field.
    pub fn get(&self, group: Group, field: usize) -> f32 {
        self.store.get(group, field)
    }

    /// Edit one tunable field.
    ///
    /// The write is fitted to the field's domain by the store, then every
    /// dirtied group is re-projected into the snapshot before this returns,
    /// so the next draw call sees the edit in full. Returns the stored value.
    pub fn set(&mut self, group: Group, field: usize, value: f32) -> Result<f32, ParamError> {
        let stored = self.store.set(group, field, value)?;
        self.reproject_dirty();
        Ok(stored)
    }

    /// Write the elapsed-time input. Called once per tick by the render
    /// loop, before the draw that consumes it.
    pub fn set_time(&mut self, seconds: f32) {
        self.store.set_time(seconds);
        self.snapshot.time = seconds;
    }

    /// Write the resolution input. Called by the viewport monitor only.
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.store.set_resolution(width as f32, height as f32);
        self.snapshot.resolution = glam::Vec2::new(width as f32, height as f32);
    }

    /// The snapshot the next draw call will consume.
    pub fn uniforms(&self) -> &GeneratorUniforms {
        &self.snapshot
    }

    fn reproject_dirty(&mut self) {
        for group in self.store.take_dirty() {
            uniforms::project_group(&self.store, group, &mut self.snapshot);
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec4};

    #[test]
    fn edit_is_visible_in_snapshot_before_set_returns() {
        let mut ctx = RenderContext::new();
        let stored = ctx.set(Group::FractalBounds, 1, 1.0).unwrap();
        assert_eq!(stored, 1.0);
        assert_eq!(ctx.get(Group::FractalBounds, 1), 1.0);
        assert_eq!(
            ctx.uniforms().fractal_bounds,
            Vec4::new(-0.611, 1.0, 0.0, 0.3)
        );
    }

    #[test]
    fn rejected_edit_leaves_snapshot_untouched() {
        let mut ctx = RenderContext::new();
        let before = *ctx.uniforms();
        assert!(ctx.set(Group::Easings, 0, f32::NAN).is_err());
        assert_eq!(*ctx.uniforms(), before);
    }

    #[test]
    fn out_of_list_selector_snaps_and_projects_snapped_value() {
        let mut ctx = RenderContext::new();
        let stored = ctx.set(Group::Easings, 0, 9.0).unwrap();
        assert_eq!(stored, 7.0);
        assert_eq!(ctx.uniforms().easings.x, 7.0);
    }

    #[test]
    fn time_writes_are_monotonic_in_snapshot() {
        let mut ctx = RenderContext::new();
        let mut last = -1.0;
        for tick in 0..32 {
            let t = tick as f32 * 0.016;
            ctx.set_time(t);
            assert!(ctx.uniforms().time >= last);
            last = ctx.uniforms().time;
        }
    }

    #[test]
    fn resolution_write_bypasses_the_panel_path() {
        let mut ctx = RenderContext::new();
        ctx.set_resolution(1920, 1080);
        assert_eq!(ctx.uniforms().resolution, Vec2::new(1920.0, 1080.0));
    }
}
