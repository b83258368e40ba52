use egui::Widget;
use glam::Vec2;

/// Settings the overlay can change between frames
#[derive(Debug, Default)]
pub struct Controls {
    pub paused: bool,
    /// Run a single step while paused
    pub step: bool,
    /// Remove every blob before the next step
    pub clear: bool,
    pub framerate: u32,
}

/// Read-only numbers shown by the overlay
pub struct Stats {
    pub fps: f32,
    pub frames: u64,
    pub blobs: usize,
    pub largest_radius: Option<f32>,
    pub pointer: Vec2,
    pub pressed: bool,
    pub merges: u64,
}

pub fn overlay(ctx: &egui::Context, controls: &mut Controls, stats: &Stats) {
    egui::Window::new("Settings")
        .default_width(145.0)
        .show(ctx, |ui| {
            ui.checkbox(&mut controls.paused, "Paused [Space]");
            if ui.button("Step [N]").clicked() {
                controls.step = true;
            }
            egui::DragValue::new(&mut controls.framerate)
                .suffix(" Fixed FPS")
                .ui(ui);

            ui.label(format!("FPS {:.1}", stats.fps));
            ui.label(format!("Frame {}", stats.frames));
        });

    egui::Window::new("Blobs")
        .default_width(145.0)
        .show(ctx, |ui| {
            ui.label(format!("Alive {}", stats.blobs));
            ui.label(format!("Merges {}", stats.merges));
            match stats.largest_radius {
                Some(radius) => ui.label(format!("Largest radius {radius:.1}")),
                None => ui.label("Largest radius -"),
            };
            ui.add_space(5.0);
            ui.label(format!(
                "Pointer\nx: {:.0}\ny: {:.0}{}",
                stats.pointer.x,
                stats.pointer.y,
                if stats.pressed { "\npressed" } else { "" },
            ));

            ui.separator();
            if ui.button("Clear [C]").clicked() {
                controls.clear = true;
            }
        });
}

pub struct EguiIntegration {
    pub ctx: egui::Context,
    raw_input: egui::RawInput,
    modifiers: egui::Modifiers,

    renderer: egui_wgpu::Renderer,
    clipped_shapes: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
}

impl EguiIntegration {
    pub fn new(device: &wgpu::Device, swapchain_format: wgpu::TextureFormat) -> Self {
        let renderer = egui_wgpu::Renderer::new(device, swapchain_format, None, 1);

        Self {
            ctx: egui::Context::default(),
            raw_input: egui::RawInput::default(),
            modifiers: Default::default(),

            renderer,
            clipped_shapes: Vec::new(),
            textures_delta: egui::TexturesDelta::default(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.raw_input.screen_rect = Some(egui::Rect::from_min_size(
            Default::default(),
            egui::Vec2::new(width as f32, height as f32),
        ));
    }

    /// Whether the last frame had a window under the cursor, presses there
    /// belong to the overlay
    pub fn wants_pointer(&self) -> bool {
        self.ctx.is_pointer_over_area() || self.ctx.is_using_pointer()
    }

    /// Whether a text field has focus
    pub fn wants_keyboard(&self) -> bool {
        self.ctx.wants_keyboard_input()
    }

    pub fn run<F: FnOnce(&egui::Context)>(&mut self, run_ui: F) {
        let raw_input = std::mem::take(&mut self.raw_input);
        self.ctx.begin_frame(raw_input);
        run_ui(&self.ctx);

        let output = self.ctx.end_frame();
        self.clipped_shapes = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        self.textures_delta = output.textures_delta;
    }

    pub fn pre_render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        delta_time: f32,
    ) {
        self.raw_input.predicted_dt = delta_time;

        let screen_descriptor = self.screen_descriptor();
        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &self.clipped_shapes,
            &screen_descriptor,
        );

        for (id, delta) in &self.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }

        for id in &self.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }

    pub fn render<'a>(&'a mut self, rpass: &mut wgpu::RenderPass<'a>) {
        let screen_descriptor = self.screen_descriptor();
        self.renderer
            .render(rpass, &self.clipped_shapes, &screen_descriptor);
    }

    fn screen_descriptor(&self) -> egui_wgpu::ScreenDescriptor {
        let screen_rect = self.ctx.screen_rect();
        egui_wgpu::ScreenDescriptor {
            size_in_pixels: [screen_rect.width() as u32, screen_rect.height() as u32],
            pixels_per_point: self.ctx.pixels_per_point(),
        }
    }

    pub fn modifiers_event(&mut self, event: winit::event::Modifiers) {
        let state = event.state();
        self.modifiers.alt = state.alt_key();
        self.modifiers.ctrl = state.control_key();
        self.modifiers.shift = state.shift_key();
        self.modifiers.mac_cmd = state.super_key();
        self.modifiers.command = state.control_key() | state.super_key();
    }

    pub fn key_event(&mut self, event: &winit::event::KeyEvent) {
        let pressed = matches!(event.state, winit::event::ElementState::Pressed);

        if pressed {
            if let Some(text) = &event.text {
                if !text.chars().any(char::is_control) {
                    self.raw_input
                        .events
                        .push(egui::Event::Text(text.to_string()));
                }
            }
        }

        let winit::keyboard::PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(key) = egui_key(code) else {
            return;
        };

        self.raw_input.events.push(egui::Event::Key {
            key,
            physical_key: Some(key),
            pressed,
            repeat: event.repeat,
            modifiers: self.modifiers,
        });
    }

    pub fn mouse_event(
        &mut self,
        position: Vec2,
        state: winit::event::ElementState,
        button: winit::event::MouseButton,
    ) {
        let pressed = matches!(state, winit::event::ElementState::Pressed);
        let button = match button {
            winit::event::MouseButton::Left => egui::PointerButton::Primary,
            winit::event::MouseButton::Right => egui::PointerButton::Secondary,
            winit::event::MouseButton::Middle => egui::PointerButton::Middle,
            winit::event::MouseButton::Back => egui::PointerButton::Extra1,
            winit::event::MouseButton::Forward => egui::PointerButton::Extra2,
            winit::event::MouseButton::Other(_) => return,
        };

        self.raw_input.events.push(egui::Event::PointerButton {
            pos: egui::Pos2::new(position.x, position.y),
            button,
            pressed,
            modifiers: self.modifiers,
        });
    }

    pub fn mouse_motion(&mut self, position: Vec2) {
        self.raw_input
            .events
            .push(egui::Event::PointerMoved(egui::Pos2::new(
                position.x, position.y,
            )));
    }
}

/// Keys the overlay's number fields need for editing
fn egui_key(code: winit::keyboard::KeyCode) -> Option<egui::Key> {
    use winit::keyboard::KeyCode;
    Some(match code {
        KeyCode::Digit0 | KeyCode::Numpad0 => egui::Key::Num0,
        KeyCode::Digit1 | KeyCode::Numpad1 => egui::Key::Num1,
        KeyCode::Digit2 | KeyCode::Numpad2 => egui::Key::Num2,
        KeyCode::Digit3 | KeyCode::Numpad3 => egui::Key::Num3,
        KeyCode::Digit4 | KeyCode::Numpad4 => egui::Key::Num4,
        KeyCode::Digit5 | KeyCode::Numpad5 => egui::Key::Num5,
        KeyCode::Digit6 | KeyCode::Numpad6 => egui::Key::Num6,
        KeyCode::Digit7 | KeyCode::Numpad7 => egui::Key::Num7,
        KeyCode::Digit8 | KeyCode::Numpad8 => egui::Key::Num8,
        KeyCode::Digit9 | KeyCode::Numpad9 => egui::Key::Num9,
        KeyCode::Minus | KeyCode::NumpadSubtract => egui::Key::Minus,
        KeyCode::Period | KeyCode::NumpadDecimal => egui::Key::Period,
        KeyCode::KeyA => egui::Key::A,
        KeyCode::Backspace => egui::Key::Backspace,
        KeyCode::Delete => egui::Key::Delete,
        KeyCode::Enter | KeyCode::NumpadEnter => egui::Key::Enter,
        KeyCode::Tab => egui::Key::Tab,
        KeyCode::Escape => egui::Key::Escape,
        KeyCode::Home => egui::Key::Home,
        KeyCode::End => egui::Key::End,
        KeyCode::ArrowLeft => egui::Key::ArrowLeft,
        KeyCode::ArrowRight => egui::Key::ArrowRight,
        KeyCode::ArrowUp => egui::Key::ArrowUp,
        KeyCode::ArrowDown => egui::Key::ArrowDown,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use winit::keyboard::KeyCode;

    use super::*;

    #[test]
    fn maps_number_editing_keys() {
        assert_eq!(egui_key(KeyCode::Digit7), Some(egui::Key::Num7));
        assert_eq!(egui_key(KeyCode::Numpad3), Some(egui::Key::Num3));
        assert_eq!(egui_key(KeyCode::Backspace), Some(egui::Key::Backspace));
        assert_eq!(egui_key(KeyCode::Enter), Some(egui::Key::Enter));
        assert_eq!(egui_key(KeyCode::ArrowLeft), Some(egui::Key::ArrowLeft));
    }

    #[test]
    fn ignores_keys_fields_dont_use() {
        assert_eq!(egui_key(KeyCode::F11), None);
        assert_eq!(egui_key(KeyCode::ShiftLeft), None);
    }
}
