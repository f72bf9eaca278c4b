//! The render loop: winit application driving ticks at display refresh.
//!
//! Each `RedrawRequested` is one tick: advance the frame clock, write the
//! time uniform, run the panel pass (edits apply here, on this thread), then
//! issue one draw against the current snapshot. The next redraw is requested
//! only while the `running` flag is set, which makes the loop's termination
//! explicit instead of hiding it in unconditional self-rescheduling.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::clock::FrameClock;
use crate::context::RenderContext;
use crate::gpu::GpuState;
use crate::panel::ControlPanel;
use crate::viewport::ViewportMonitor;

pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    panel: Option<ControlPanel>,
    render_ctx: RenderContext,
    viewport: ViewportMonitor,
    clock: FrameClock,
    running: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            panel: None,
            render_ctx: RenderContext::new(),
            viewport: ViewportMonitor::new(),
            clock: FrameClock::new(),
            running: true,
        }
    }

    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu), Some(panel)) =
            (self.window.clone(), self.gpu.as_mut(), self.panel.as_mut())
        else {
            return;
        };

        // Time write happens before the draw that consumes it.
        let elapsed = self.clock.tick();
        self.render_ctx.set_time(elapsed);

        let panel_frame = panel.run(&window, &mut self.render_ctx);

        match gpu.render(self.render_ctx.uniforms(), panel, &panel_frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost, reconfiguring");
                gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("surface out of memory, exiting");
                self.running = false;
                event_loop.exit();
            }
            Err(e) => {
                // Skip this tick's draw, keep scheduling.
                tracing::warn!(error = ?e, "skipped frame");
            }
        }

        if self.running {
            window.request_redraw();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("fractune")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!(error = %e, "failed to create window");
                event_loop.exit();
                return;
            }
        };

        let gpu = match pollster::block_on(GpuState::new(
            window.clone(),
            self.render_ctx.uniforms(),
        )) {
            Ok(gpu) => gpu,
            Err(e) => {
                tracing::error!(error = %e, "GPU initialization failed");
                event_loop.exit();
                return;
            }
        };

        let panel = ControlPanel::new(gpu.device(), gpu.surface_format(), &window);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.panel = Some(panel);

        // The surface was already configured at this size during GPU setup;
        // record it and seed the resolution uniform.
        if let Some(gpu) = self.gpu.as_ref() {
            let (width, height) = gpu.surface_size();
            self.viewport.adopt(width, height);
            self.render_ctx.set_resolution(width, height);
        }

        self.clock.start();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(window), Some(panel)) = (self.window.as_ref(), self.panel.as_mut()) {
            if panel.on_window_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                // Clearing the flag stops further scheduling; an in-flight
                // draw still completes.
                self.running = false;
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    match self.viewport.observe(
                        &mut self.render_ctx,
                        gpu,
                        physical_size.width,
                        physical_size.height,
                    ) {
                        Ok(_) => {}
                        Err(e) => tracing::warn!(error = %e, "resize rejected"),
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.tick(event_loop);
            }
            _ => {}
        }
    }
}
