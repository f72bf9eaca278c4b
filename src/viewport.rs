//! Viewport monitor: keeps the resolution uniform and the drawing surface
//! in step with the output surface size.

use crate::context::RenderContext;
use crate::error::GpuError;

/// The drawing surface as seen by the viewport monitor. Reconfiguring at a
/// new size must release the previous backing buffers before allocating
/// replacements (wgpu surfaces do this on `configure`).
pub trait DrawTarget {
    fn configure_viewport(&mut self, width: u32, height: u32) -> Result<(), GpuError>;
}

/// Tracks the last surface size and applies changes idempotently.
pub struct ViewportMonitor {
    current: Option<(u32, u32)>,
}

impl ViewportMonitor {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Record a size the target is already configured at, without touching
    /// it. Used once at startup, after the surface is created.
    pub fn adopt(&mut self, width: u32, height: u32) {
        self.current = Some((width, height));
    }

    /// Handle a size observation (initial size or a resize notification).
    ///
    /// The resolution field is written unconditionally; the target is only
    /// reconfigured when the size actually changed, so repeating the same
    /// size never re-allocates surface buffers. Zero-area sizes are rejected
    /// without touching the target and the last good size stays current.
    ///
    /// Returns whether the target was reconfigured.
    pub fn observe<T: DrawTarget>(
        &mut self,
        ctx: &mut RenderContext,
        target: &mut T,
        width: u32,
        height: u32,
    ) -> Result<bool, GpuError> {
        if width == 0 || height == 0 {
            return Err(GpuError::SurfaceAllocation { width, height });
        }
        ctx.set_resolution(width, height);
        if self.current == Some((width, height)) {
            return Ok(false);
        }
        target.configure_viewport(width, height)?;
        self.current = Some((width, height));
        tracing::debug!(width, height, "viewport reconfigured");
        Ok(true)
    }
}

impl Default for ViewportMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    /// Counts reconfigurations instead of touching a real surface.
    struct CountingTarget {
        configures: Vec<(u32, u32)>,
    }

    impl CountingTarget {
        fn new() -> Self {
            Self { configures: Vec::new() }
        }
    }

    impl DrawTarget for CountingTarget {
        fn configure_viewport(&mut self, width: u32, height: u32) -> Result<(), GpuError> {
            self.configures.push((width, height));
            Ok(())
        }
    }

    #[test]
    fn resize_updates_resolution_and_configures_once() {
        let mut ctx = RenderContext::new();
        let mut target = CountingTarget::new();
        let mut monitor = ViewportMonitor::new();

        monitor.observe(&mut ctx, &mut target, 800, 600).unwrap();
        monitor.observe(&mut ctx, &mut target, 1920, 1080).unwrap();

        assert_eq!(target.configures, vec![(800, 600), (1920, 1080)]);
        assert_eq!(ctx.uniforms().resolution, Vec2::new(1920.0, 1080.0));
    }

    #[test]
    fn repeated_size_is_idempotent() {
        let mut ctx = RenderContext::new();
        let mut target = CountingTarget::new();
        let mut monitor = ViewportMonitor::new();

        assert!(monitor.observe(&mut ctx, &mut target, 800, 600).unwrap());
        assert!(!monitor.observe(&mut ctx, &mut target, 800, 600).unwrap());
        assert!(!monitor.observe(&mut ctx, &mut target, 800, 600).unwrap());

        assert_eq!(target.configures.len(), 1);
        assert_eq!(ctx.uniforms().resolution, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn adopted_size_is_not_reconfigured() {
        let mut ctx = RenderContext::new();
        let mut target = CountingTarget::new();
        let mut monitor = ViewportMonitor::new();

        monitor.adopt(1280, 720);
        assert!(!monitor.observe(&mut ctx, &mut target, 1280, 720).unwrap());
        assert!(target.configures.is_empty());
        assert_eq!(ctx.uniforms().resolution, Vec2::new(1280.0, 720.0));
    }

    #[test]
    fn zero_area_size_is_rejected_without_configuring() {
        let mut ctx = RenderContext::new();
        let mut target = CountingTarget::new();
        let mut monitor = ViewportMonitor::new();

        monitor.observe(&mut ctx, &mut target, 800, 600).unwrap();
        let err = monitor.observe(&mut ctx, &mut target, 0, 600).unwrap_err();
        assert!(matches!(err, GpuError::SurfaceAllocation { width: 0, .. }));

        // One configure from the good size, none from the bad one, and the
        // resolution field still holds the last good value.
        assert_eq!(target.configures.len(), 1);
        assert_eq!(ctx.uniforms().resolution, Vec2::new(800.0, 600.0));

        // The bad size must not poison idempotence tracking.
        assert!(!monitor.observe(&mut ctx, &mut target, 800, 600).unwrap());
    }
}
