use std::sync::Arc;

use anyhow::Context;
use log::info;
use winit::window::Window;

/// How to carry on when the next frame can't be acquired
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameRecovery {
    Reconfigure,
    Skip,
    Fatal,
}

pub fn frame_recovery(err: &wgpu::SurfaceError) -> FrameRecovery {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => FrameRecovery::Reconfigure,
        wgpu::SurfaceError::Timeout => FrameRecovery::Skip,
        _ => FrameRecovery::Fatal,
    }
}

pub struct GpuContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let window_size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .context("Failed to create a surface for the window")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .context("Failed to find an appropriate adapter")?;
        info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("Failed to create Device")?;

        let mut config = surface
            .get_default_config(
                &adapter,
                window_size.width.max(1),
                window_size.height.max(1),
            )
            .context("Surface isn't supported by the adapter")?;
        // Frames are paced by the display refresh
        config.present_mode = wgpu::PresentMode::Fifo;
        surface.configure(&device, &config);
        info!("Surface format {:?}", config.format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Reconfigures the surface, ignored while the window is minimized
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.reconfigure_surface();
    }

    pub fn reconfigure_surface(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_out_of_memory_is_fatal() {
        assert_eq!(
            frame_recovery(&wgpu::SurfaceError::Lost),
            FrameRecovery::Reconfigure
        );
        assert_eq!(
            frame_recovery(&wgpu::SurfaceError::Outdated),
            FrameRecovery::Reconfigure
        );
        assert_eq!(
            frame_recovery(&wgpu::SurfaceError::Timeout),
            FrameRecovery::Skip
        );
        assert_eq!(
            frame_recovery(&wgpu::SurfaceError::OutOfMemory),
            FrameRecovery::Fatal
        );
    }
}
