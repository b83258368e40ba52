mod blob;
mod canvas;
mod cli;
mod framepace;
mod gpu;
mod gui;
mod pointer;
mod population;
mod render;
mod simulation;
mod utils;

use std::sync::Arc;

use canvas::Canvas;
use clap::Parser;
use framepace::Framepacer;
use glam::Vec2;
use gpu::{frame_recovery, FrameRecovery, GpuContext};
use gui::{Controls, EguiIntegration, Stats};
use log::{error, info, warn};
use simulation::Simulation;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::render::RenderModule;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Collect Arguments
    let args = cli::Args::parse();
    info!("Starting with {args:?}");

    // Setup Winit
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    // State
    let mut app_state = AppState {
        tokio_rt: tokio::runtime::Runtime::new()?,
        gpu: None,
        gfx: None,
        simulation: None,
        seed: args.seed,
        framepace: Framepacer::new(),
        controls: Controls {
            paused: args.paused,
            framerate: args.framerate,
            ..Default::default()
        },
        mouse_position: Vec2::ZERO,
        merges: 0,
        error: None,
    };

    event_loop.run_app(&mut app_state)?;

    match app_state.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct GfxState {
    window: Arc<Window>,
    egui: EguiIntegration,

    render_module: RenderModule,
    canvas: Canvas,
}

struct AppState {
    tokio_rt: tokio::runtime::Runtime,
    gpu: Option<GpuContext>,
    gfx: Option<GfxState>,
    simulation: Option<Simulation>,
    seed: Option<u64>,
    framepace: Framepacer,

    controls: Controls,
    mouse_position: Vec2,
    merges: u64,

    /// Set when the event loop had to stop on a failure
    error: Option<anyhow::Error>,
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = Arc::new(
            event_loop.create_window(Window::default_attributes().with_title("Blob Simulation"))?,
        );
        let window_size = window.inner_size();

        let gpu = self.tokio_rt.block_on(GpuContext::new(window.clone()))?;

        let render_module = RenderModule::new(&gpu.device, gpu.format());
        render_module.update_size(&gpu.queue, window_size.width, window_size.height);

        let mut egui = EguiIntegration::new(&gpu.device, gpu.format());
        egui.resize(window_size.width, window_size.height);

        let canvas = Canvas::new(window_size.width, window_size.height);

        // The pointer starts in the middle until the cursor first moves
        let seed = self.seed;
        let center = canvas.size() / 2.0;
        self.simulation.get_or_insert_with(|| Simulation::new(center, seed));

        self.gfx = Some(GfxState {
            window,
            egui,

            render_module,
            canvas,
        });
        self.gpu = Some(gpu);

        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_some() {
            return;
        }

        if let Err(err) = self.init_graphics(event_loop) {
            error!("Failed to set up graphics: {err:#}");
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let (Some(gpu), Some(gfx), Some(simulation)) =
            (&mut self.gpu, &mut self.gfx, &mut self.simulation)
        else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                // Minimized, keep the last size so blobs stay where they are
                if new_size.width == 0 || new_size.height == 0 {
                    return;
                }

                info!("Resized to {}x{}", new_size.width, new_size.height);
                gpu.resize(new_size.width, new_size.height);

                gfx.render_module
                    .update_size(&gpu.queue, new_size.width, new_size.height);
                gfx.egui.resize(new_size.width, new_size.height);
                gfx.canvas.resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                // Shortcuts are off while a text field has focus
                let shortcut = event.state == ElementState::Pressed
                    && !event.repeat
                    && !gfx.egui.wants_keyboard();

                let handled = shortcut
                    && match event.physical_key {
                        PhysicalKey::Code(KeyCode::Space) => {
                            self.controls.paused = !self.controls.paused;
                            true
                        }
                        PhysicalKey::Code(KeyCode::F11) => {
                            if gfx.window.fullscreen().is_none() {
                                gfx.window.set_fullscreen(Some(
                                    winit::window::Fullscreen::Borderless(None),
                                ));
                            } else {
                                gfx.window.set_fullscreen(None);
                            }
                            true
                        }

                        PhysicalKey::Code(KeyCode::KeyN) => {
                            self.controls.step = true;
                            true
                        }

                        PhysicalKey::Code(KeyCode::KeyC) => {
                            self.controls.clear = true;
                            true
                        }

                        _ => false,
                    };

                if !handled {
                    gfx.egui.key_event(&event);
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                gfx.egui.modifiers_event(modifiers);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    match state {
                        ElementState::Pressed if !gfx.egui.wants_pointer() => {
                            simulation.press();
                        }
                        // Always let go, a press may have started outside the overlay
                        ElementState::Released => simulation.release(),
                        ElementState::Pressed => (),
                    }
                }

                gfx.egui.mouse_event(self.mouse_position, state, button);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);

                gfx.egui.mouse_motion(position);
                simulation.move_pointer(position);
                self.mouse_position = position;
            }

            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gpu), Some(gfx), Some(simulation)) =
            (&mut self.gpu, &mut self.gfx, &mut self.simulation)
        else {
            return;
        };

        self.framepace.begin_frame();

        let frame = match gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => {
                match frame_recovery(&err) {
                    FrameRecovery::Reconfigure => gpu.reconfigure_surface(),
                    FrameRecovery::Skip => warn!("Skipping frame: {err}"),
                    FrameRecovery::Fatal => {
                        error!("Can't acquire the next frame: {err}");
                        self.error =
                            Some(anyhow::Error::new(err).context("Can't acquire the next frame"));
                        event_loop.exit();
                    }
                }
                return;
            }
        };

        if self.controls.clear {
            simulation.clear();
            self.controls.clear = false;
        }

        gfx.canvas.clear();
        if !self.controls.paused || self.controls.step {
            let report = simulation.step(&mut gfx.canvas);
            if report.merge.is_some() {
                self.merges += 1;
            }
            self.controls.step = false;
        } else {
            simulation.paint(&mut gfx.canvas);
        }
        gfx.render_module.upload(&gpu.device, &gpu.queue, &gfx.canvas);

        let stats = Stats {
            fps: self.framepace.framerate(),
            frames: self.framepace.frames(),
            blobs: simulation.population().len(),
            largest_radius: simulation.population().largest_radius(),
            pointer: simulation.pointer().position,
            pressed: simulation.pointer().pressed,
            merges: self.merges,
        };
        let controls = &mut self.controls;
        gfx.egui.run(|ctx| gui::overlay(ctx, controls, &stats));

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        gfx.egui.pre_render(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            self.framepace.frametime(),
        );

        // Render
        {
            let view = frame
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());

            let mut rpass = gfx.render_module.begin_pass(&mut encoder, &view);
            gfx.egui.render(&mut rpass);
        }

        gpu.queue.submit(Some(encoder.finish()));
        frame.present();

        self.framepace.end_frame(self.controls.framerate);
    }
}
