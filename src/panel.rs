//! Control panel: one egui window exposing every tunable field.
//!
//! Wraps egui context, winit state, and wgpu renderer, and builds the
//! controls from the parameter schema each frame. Edits run synchronously on
//! the event-loop thread: a changed widget writes through
//! [`RenderContext::set`], which re-projects the edited group before the
//! widget's frame ends. Widgets re-read the store every frame, so a clamped
//! or rejected edit visually reverts to the value the store accepted.

use std::sync::Arc;

use winit::window::Window;

use crate::context::RenderContext;
use crate::params::{Domain, SCHEMA};

pub struct ControlPanel {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// Output of one panel pass, consumed by the draw call.
pub struct PanelFrame {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl ControlPanel {
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        window: &Arc<Window>,
    ) -> Self {
        let ctx = egui::Context::default();

        let mut style = egui::Style::default();
        style.visuals = egui::Visuals::dark();
        style.visuals.window_shadow = egui::Shadow::NONE;
        style.visuals.popup_shadow = egui::Shadow::NONE;
        ctx.set_style(style);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let renderer = egui_wgpu::Renderer::new(
            device,
            output_format,
            None,  // depth format
            1,     // msaa samples
            false, // dithering
        );

        Self { ctx, state, renderer }
    }

    /// Process a winit event.
    ///
    /// Returns true if the panel consumed the event.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// Run one panel pass: gather input, build the controls (applying any
    /// edits to `render_ctx`), and tessellate the output for painting.
    pub fn run(&mut self, window: &Window, render_ctx: &mut RenderContext) -> PanelFrame {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_pass(raw_input);

        draw_controls(&self.ctx, render_ctx);

        let full_output = self.ctx.end_pass();
        self.state
            .handle_platform_output(window, full_output.platform_output);
        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        PanelFrame {
            paint_jobs,
            textures_delta: full_output.textures_delta,
            pixels_per_point: full_output.pixels_per_point,
        }
    }

    /// Upload textures and buffers. Call before the render pass.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        frame: &PanelFrame,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &frame.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &frame.paint_jobs,
            screen_descriptor,
        );
    }

    /// Paint the panel into an open render pass, after the generator draw.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        frame: &PanelFrame,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.renderer
            .render(render_pass, &frame.paint_jobs, screen_descriptor);
    }

    /// Free textures after the frame is done.
    pub fn cleanup(&mut self, frame: &PanelFrame) {
        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

/// One collapsible section per parameter group; control kind follows the
/// field's domain (range -> slider, discrete set -> selector).
fn draw_controls(ctx: &egui::Context, render_ctx: &mut RenderContext) {
    egui::Window::new("Parameters")
        .default_pos([10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            for group_spec in &SCHEMA {
                ui.collapsing(group_spec.label, |ui| {
                    for (field, field_spec) in group_spec.fields.iter().enumerate() {
                        match field_spec.domain {
                            Domain::Range { min, max, step } => {
                                let mut value = render_ctx.get(group_spec.group, field);
                                let mut slider =
                                    egui::Slider::new(&mut value, min..=max).text(field_spec.label);
                                if let Some(step) = step {
                                    slider = slider.step_by(step as f64);
                                }
                                if ui.add(slider).changed() {
                                    apply_edit(render_ctx, group_spec.group, field, value);
                                }
                            }
                            Domain::Discrete(members) => {
                                let current = render_ctx.get(group_spec.group, field);
                                egui::ComboBox::from_label(field_spec.label)
                                    .selected_text(format!("{}", current as i32))
                                    .show_ui(ui, |ui| {
                                        for &member in members {
                                            let selected = current == member;
                                            let label = format!("{}", member as i32);
                                            if ui.selectable_label(selected, label).clicked() {
                                                apply_edit(
                                                    render_ctx,
                                                    group_spec.group,
                                                    field,
                                                    member,
                                                );
                                            }
                                        }
                                    });
                            }
                        }
                    }
                });
            }
        });
}

fn apply_edit(render_ctx: &mut RenderContext, group: crate::params::Group, field: usize, value: f32) {
    // A rejected edit stays local: the widget re-reads the store next frame
    // and reverts. Nothing crosses into the render path.
    if let Err(err) = render_ctx.set(group, field, value) {
        tracing::warn!(%err, "parameter edit rejected");
    }
}
