use crate::constants::SCENE_CLEAR_RGBA;
use gallery_core::{Compositor, FrameOutput, RenderError, SceneGraph, SceneObject};
use glam::{Mat4, Vec3};
use web_sys as web;
use wgpu;

mod helpers;
mod planes;
mod post;
mod targets;

use planes::{PlaneBinding, PlaneResources};
use post::PostResources;
use targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PlaneUniforms {
    view_proj_model: [[f32; 4]; 4],
    tint: [f32; 4],
    highlight: [f32; 4],
    hover_uv: [f32; 2],
    time: f32,
    hover_state: f32,
    round_mask: f32,
    textured: f32,
    _pad: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    time: f32,
    scroll_speed: f32,
    mask_start: f32,
    mask_end: f32,
    blend_low: f32,
    blend_high: f32,
    noise_scale: f32,
    warp_strength: f32,
    enabled: f32,
    _pad: f32,
    flat_color: [f32; 4],
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    canvas: web::HtmlCanvasElement,
    images: Vec<web::HtmlImageElement>,

    planes: PlaneResources,
    bindings: Vec<PlaneBinding>,

    targets: RenderTargets,
    post: PostResources,
    post_sampler: wgpu::Sampler,
    bg_scene: wgpu::BindGroup,
}

impl GpuState {
    pub async fn new(
        canvas: web::HtmlCanvasElement,
        images: Vec<web::HtmlImageElement>,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // The canvas overlays the page, so keep its transparency.
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let plane_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("plane_shader"),
            source: wgpu::ShaderSource::Wgsl(gallery_core::PLANE_WGSL.into()),
        });
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("distortion_shader"),
            source: wgpu::ShaderSource::Wgsl(gallery_core::DISTORTION_WGSL.into()),
        });

        let targets = RenderTargets::new(&device, width, height);
        let planes = planes::create_plane_resources(&device, &queue, &plane_shader, targets::SCENE_FORMAT);
        let post = post::create_post_resources(&device, &post_shader, format);
        let post_sampler = helpers::linear_sampler(&device, "post_sampler");
        let bg_scene = post::scene_bind_group(&device, &post, &targets.scene_view, &post_sampler);

        log::info!("[gpu] ready {}x{} {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            canvas,
            images,
            planes,
            bindings: Vec::new(),
            targets,
            post,
            post_sampler,
            bg_scene,
        })
    }

    fn resize_if_needed(&mut self) {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
        if self.targets.size() != (width, height) {
            self.targets.recreate(&self.device, width, height);
            self.bg_scene =
                post::scene_bind_group(&self.device, &self.post, &self.targets.scene_view, &self.post_sampler);
        }
    }

    fn model_matrix(frame: &FrameOutput<'_>, object: &SceneObject) -> Mat4 {
        let world = frame.scene.world_transform(object);
        let size = object.shape.footprint().extend(1.0);
        if object.shape.is_planar() {
            world * Mat4::from_scale(size)
        } else {
            // Volumes draw as camera-facing quads at their world centre.
            let centre = world.transform_point3(Vec3::ZERO);
            Mat4::from_translation(centre) * frame.camera.billboard_rotation() * Mat4::from_scale(size)
        }
    }

    fn plane_uniforms(frame: &FrameOutput<'_>, object: &SceneObject) -> PlaneUniforms {
        let vp = frame.camera.view_projection();
        let (time, hover_uv, hover_state) = match frame.uniforms.object(object.id()) {
            Some(u) => (u.time, u.hover_uv.to_array(), u.hover_state),
            None => (0.0, [0.5, 0.5], 0.0),
        };
        PlaneUniforms {
            view_proj_model: (vp * Self::model_matrix(frame, object)).to_cols_array_2d(),
            tint: object.material.base_color,
            highlight: object.material.highlight_color,
            hover_uv,
            time,
            hover_state,
            round_mask: if object.shape.is_round() { 1.0 } else { 0.0 },
            textured: if object.material.texture.is_some() { 1.0 } else { 0.0 },
            _pad: [0.0; 2],
        }
    }
}

impl Compositor for GpuState {
    fn prepare(&mut self, scene: &SceneGraph) -> Result<(), RenderError> {
        let mut failed = 0usize;
        self.bindings.clear();
        for object in scene.iter() {
            let uploaded = object
                .material
                .texture
                .and_then(|key| self.images.get(key.0))
                .map(|img| planes::upload_image(&self.device, &self.queue, img));
            let view = match uploaded {
                Some(Ok(view)) => Some(view),
                Some(Err(e)) => {
                    log::warn!("[gpu] {}: {}; drawing blank", object.label, e);
                    failed += 1;
                    None
                }
                None => None,
            };
            let view = view.as_ref().unwrap_or(&self.planes.fallback_view);
            self.bindings
                .push(planes::bind_object(&self.device, &self.planes, object.id(), view));
        }
        log::info!("[gpu] prepared {} objects ({} without texture)", self.bindings.len(), failed);
        Ok(())
    }

    fn composite(&mut self, frame: &FrameOutput<'_>) -> Result<(), RenderError> {
        self.resize_if_needed();
        let surface_tex = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                if matches!(e, wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) {
                    self.surface.configure(&self.device, &self.config);
                }
                return Err(helpers::surface_error(e));
            }
        };
        let view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Back to front in view space.
        let view_m = frame.camera.view_matrix();
        let mut draws: Vec<(f32, usize)> = Vec::with_capacity(self.bindings.len());
        for (i, b) in self.bindings.iter().enumerate() {
            let Some(object) = frame.scene.get(b.object) else {
                continue;
            };
            let u = Self::plane_uniforms(frame, object);
            self.queue
                .write_buffer(&b.uniform_buffer, 0, bytemuck::bytes_of(&u));
            let centre = frame.scene.world_transform(object).transform_point3(Vec3::ZERO);
            draws.push((view_m.transform_point3(centre).z, i));
        }
        draws.sort_by(|a, b| a.0.total_cmp(&b.0));

        let d = frame.distortion;
        let post = PostUniforms {
            resolution: [self.config.width as f32, self.config.height as f32],
            time: frame.uniforms.distortion().time,
            scroll_speed: frame.uniforms.distortion().scroll_speed,
            mask_start: d.mask_start,
            mask_end: d.mask_end,
            blend_low: d.blend_low,
            blend_high: d.blend_high,
            noise_scale: d.noise_scale,
            warp_strength: d.warp_strength,
            enabled: if d.enabled { 1.0 } else { 0.0 },
            _pad: 0.0,
            flat_color: d.flat_color,
        };
        self.queue
            .write_buffer(&self.post.uniform_buffer, 0, bytemuck::bytes_of(&post));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let [r, g, b, a] = SCENE_CLEAR_RGBA;
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.scene_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.planes.pipeline);
            for (_, i) in &draws {
                rpass.set_bind_group(0, &self.bindings[*i].bind_group, &[]);
                rpass.draw(0..6, 0..1);
            }
        }

        post::blit(
            &mut encoder,
            "distortion_pass",
            &view,
            wgpu::Color::TRANSPARENT,
            &self.post.distortion_pipeline,
            &self.bg_scene,
        );

        self.queue.submit(Some(encoder.finish()));
        surface_tex.present();
        Ok(())
    }
}
