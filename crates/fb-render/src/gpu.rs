//! Offscreen GPU rasterization.
//!
//! One `GpuContext` (adapter, device, queue) is shared by all surfaces;
//! each surface owns a `GpuTarget`: its own Vello renderer and texture.

use fb_core::surface::SurfaceError;
use std::sync::Arc;
use vello::wgpu;
use vello::{AaConfig, AaSupport, RenderParams, Renderer, RendererOptions, Scene};

pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub adapter_name: String,
}

impl GpuContext {
    /// Pick the default adapter and open a device on it.
    pub async fn new() -> Result<Arc<Self>, SurfaceError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: None,
            })
            .await
            .ok_or_else(|| SurfaceError::Backend("no GPU adapter available".into()))?;
        let adapter_name = adapter.get_info().name;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("fill-bench"),
                    ..Default::default()
                },
                None,
            )
            .await
            .map_err(|e| SurfaceError::Backend(format!("request_device: {e}")))?;

        log::info!("using GPU adapter {adapter_name:?}");
        Ok(Arc::new(Self {
            device,
            queue,
            adapter_name,
        }))
    }
}

/// Offscreen only: no presentation surface, area antialiasing on the GPU.
fn renderer_options() -> RendererOptions {
    RendererOptions {
        surface_format: None,
        use_cpu: false,
        antialiasing_support: AaSupport::area_only(),
        num_init_threads: None,
    }
}

/// A renderer plus the texture it draws into.
pub struct GpuTarget {
    ctx: Arc<GpuContext>,
    renderer: Renderer,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl GpuTarget {
    pub fn new(ctx: Arc<GpuContext>, width: u32, height: u32) -> Result<Self, SurfaceError> {
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("fill-bench target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let renderer = Renderer::new(&ctx.device, renderer_options())
            .map_err(|e| SurfaceError::Backend(format!("vello renderer: {e}")))?;

        Ok(Self {
            ctx,
            renderer,
            view,
            width,
            height,
        })
    }

    /// Rasterize `scene` and block until the GPU has finished.
    pub fn render(&mut self, scene: &Scene, base_color: peniko::Color) -> Result<(), SurfaceError> {
        self.renderer
            .render_to_texture(
                &self.ctx.device,
                &self.ctx.queue,
                scene,
                &self.view,
                &RenderParams {
                    base_color,
                    width: self.width,
                    height: self.height,
                    antialiasing_method: AaConfig::Area,
                },
            )
            .map_err(|e| SurfaceError::Backend(format!("render_to_texture: {e}")))?;
        self.ctx.device.poll(wgpu::Maintain::Wait);
        Ok(())
    }
}
