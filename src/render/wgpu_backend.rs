use std::sync::Arc;

use glam::{Mat4, Vec4};
use slotmap::SecondaryMap;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::config::{Background, BackdropConfig};
use crate::errors::{BackdropError, Result};
use crate::render::{FrameHandle, RenderBackend, SurfaceSize};
use crate::scene::camera::Camera;
use crate::scene::{LineVertex, Scene, StripKey};

/// Global per-frame uniforms (bind group 0). Layout mirrors `line.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobalUniforms {
    view_projection: Mat4,
    /// xyz = camera position, w = elapsed time
    camera: Vec4,
    /// rgb = fog color, w = fog near
    fog_color_near: Vec4,
    /// x = fog far, y = fog enabled
    fog_params: Vec4,
}

/// Per-strip uniforms (bind group 1).
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct StripUniforms {
    model: Mat4,
    /// rgb = color, a = opacity
    color: Vec4,
}

/// GPU-side resources for one line strip. The vertex buffer is written
/// once (vertices are cached for the context lifetime); the uniform buffer
/// is rewritten every frame.
struct GpuStrip {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Everything acquired by `attach` and released by `detach`.
struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,

    pipeline: wgpu::RenderPipeline,
    global_buffer: wgpu::Buffer,
    global_bind_group: wgpu::BindGroup,
    strip_layout: wgpu::BindGroupLayout,

    strips: SecondaryMap<StripKey, GpuStrip>,
}

/// Production [`RenderBackend`] over a winit window surface.
///
/// Owns its GPU context exclusively: one active renderer per drawing
/// surface. Frame scheduling maps to [`Window::request_redraw`]; winit
/// cannot revoke a redraw request, so `cancel_frame` is bookkeeping only
/// and loop safety comes from the lifecycle phase check at the head of
/// every frame callback.
pub struct WgpuBackend {
    window: Arc<Window>,
    gpu: Option<GpuContext>,

    clear_color: wgpu::Color,
    fog_color_near: Vec4,
    fog_params: Vec4,
    pixel_ratio: f64,

    next_frame_id: u64,
    input_registered: bool,
}

impl WgpuBackend {
    #[must_use]
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            gpu: None,
            clear_color: wgpu::Color::BLACK,
            fog_color_near: Vec4::ZERO,
            fog_params: Vec4::ZERO,
            pixel_ratio: 1.0,
            next_frame_id: 0,
            input_registered: false,
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
    ) -> (wgpu::RenderPipeline, wgpu::BindGroupLayout, wgpu::BindGroupLayout) {
        let shader = device.create_shader_module(wgpu::include_wgsl!("line.wgsl"));

        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let global_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Backdrop Global Layout"),
            entries: &[uniform_entry(0)],
        });
        let strip_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Backdrop Strip Layout"),
            entries: &[uniform_entry(0)],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Backdrop Pipeline Layout"),
            bind_group_layouts: &[Some(&global_layout), Some(&strip_layout)],
            immediate_size: 0,
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Backdrop Line Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        (pipeline, global_layout, strip_layout)
    }

    /// Lazily creates GPU resources for strips that do not have them yet.
    fn prepare_strips(gpu: &mut GpuContext, scene: &Scene) {
        for (key, strip) in &scene.strips {
            if gpu.strips.contains_key(key) {
                continue;
            }
            let vertex_buffer = gpu
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Backdrop Strip Vertices"),
                    contents: bytemuck::cast_slice(strip.vertices()),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            let uniform_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Backdrop Strip Uniforms"),
                size: std::mem::size_of::<StripUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Backdrop Strip BindGroup"),
                layout: &gpu.strip_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });
            gpu.strips.insert(
                key,
                GpuStrip {
                    vertex_buffer,
                    vertex_count: strip.vertex_count(),
                    uniform_buffer,
                    bind_group,
                },
            );
        }
    }
}

impl RenderBackend for WgpuBackend {
    fn attach(&mut self, size: SurfaceSize, config: &BackdropConfig) -> Result<()> {
        self.pixel_ratio = config.clamp_pixel_ratio(size.pixel_ratio);
        let sized = SurfaceSize::new(size.width, size.height, self.pixel_ratio);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(self.window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| BackdropError::AdapterRequestFailed(e.to_string()))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            ..Default::default()
        }))?;

        let mut surface_config = surface
            .get_default_config(&adapter, sized.physical_width(), sized.physical_height())
            .ok_or_else(|| {
                BackdropError::SurfaceConfigFailed("surface not supported by adapter".into())
            })?;

        match config.background {
            Background::Transparent => {
                let caps = surface.get_capabilities(&adapter);
                let wants = [
                    wgpu::CompositeAlphaMode::PreMultiplied,
                    wgpu::CompositeAlphaMode::PostMultiplied,
                ];
                if let Some(mode) = wants
                    .into_iter()
                    .find(|m| caps.alpha_modes.contains(m))
                {
                    surface_config.alpha_mode = mode;
                } else {
                    log::warn!("Surface does not support alpha compositing, background stays opaque");
                }
                self.clear_color = wgpu::Color::TRANSPARENT;
            }
            Background::Opaque(c) => {
                self.clear_color = wgpu::Color {
                    r: f64::from(c.x),
                    g: f64::from(c.y),
                    b: f64::from(c.z),
                    a: f64::from(c.w),
                };
            }
        }

        surface.configure(&device, &surface_config);

        self.fog_color_near = config.fog.color.extend(config.fog.near);
        self.fog_params = Vec4::new(
            config.fog.far,
            if config.fog.enabled { 1.0 } else { 0.0 },
            0.0,
            0.0,
        );

        let (pipeline, global_layout, strip_layout) =
            Self::create_pipeline(&device, surface_config.format);

        let global_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Backdrop Global Uniforms"),
            size: std::mem::size_of::<GlobalUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let global_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Backdrop Global BindGroup"),
            layout: &global_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: global_buffer.as_entire_binding(),
            }],
        });

        self.gpu = Some(GpuContext {
            device,
            queue,
            surface,
            config: surface_config,
            pipeline,
            global_buffer,
            global_bind_group,
            strip_layout,
            strips: SecondaryMap::new(),
        });

        Ok(())
    }

    fn register_input(&mut self) {
        // Winit delivers events unconditionally; the flag gates whether the
        // host forwards them into the lifecycle.
        self.input_registered = true;
    }

    fn unregister_input(&mut self) {
        self.input_registered = false;
    }

    fn schedule_frame(&mut self) -> FrameHandle {
        self.next_frame_id += 1;
        self.window.request_redraw();
        FrameHandle(self.next_frame_id)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        // A winit redraw request cannot be revoked; the lifecycle phase
        // check makes the stray callback a no-op.
        log::trace!("cancel_frame({handle:?}) noted");
    }

    fn resize(&mut self, size: SurfaceSize) {
        let Some(gpu) = &mut self.gpu else { return };
        let sized = SurfaceSize::new(size.width, size.height, self.pixel_ratio);
        let (w, h) = (sized.physical_width(), sized.physical_height());
        if w > 0 && h > 0 {
            gpu.config.width = w;
            gpu.config.height = h;
            gpu.surface.configure(&gpu.device, &gpu.config);
        }
    }

    fn draw(&mut self, scene: &Scene, camera: &Camera, time: f32) -> Result<()> {
        let Some(gpu) = &mut self.gpu else {
            return Ok(());
        };

        let output = match gpu.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output)
            | wgpu::CurrentSurfaceTexture::Suboptimal(output) => output,
            wgpu::CurrentSurfaceTexture::Lost | wgpu::CurrentSurfaceTexture::Outdated => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return Ok(());
            }
            wgpu::CurrentSurfaceTexture::Timeout => {
                log::warn!("Surface frame timeout, skipping frame");
                return Ok(());
            }
            e => return Err(BackdropError::DrawFailed(format!("{e:?}"))),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let globals = GlobalUniforms {
            view_projection: camera.view_projection_matrix(),
            camera: camera.position.extend(time),
            fog_color_near: self.fog_color_near,
            fog_params: self.fog_params,
        };
        gpu.queue
            .write_buffer(&gpu.global_buffer, 0, bytemuck::bytes_of(&globals));

        Self::prepare_strips(gpu, scene);

        for (key, model, strip) in scene.draw_items() {
            if let Some(gpu_strip) = gpu.strips.get(key) {
                let uniforms = StripUniforms {
                    model,
                    color: strip.color.extend(strip.opacity),
                };
                gpu.queue
                    .write_buffer(&gpu_strip.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
            }
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Backdrop Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(&gpu.pipeline);
            pass.set_bind_group(0, &gpu.global_bind_group, &[]);

            for (key, _, _) in scene.draw_items() {
                if let Some(gpu_strip) = gpu.strips.get(key) {
                    pass.set_bind_group(1, &gpu_strip.bind_group, &[]);
                    pass.set_vertex_buffer(0, gpu_strip.vertex_buffer.slice(..));
                    pass.draw(0..gpu_strip.vertex_count, 0..1);
                }
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn release(&mut self) {
        let Some(gpu) = &mut self.gpu else { return };
        for strip in gpu.strips.values() {
            strip.vertex_buffer.destroy();
            strip.uniform_buffer.destroy();
        }
        gpu.strips.clear();
        gpu.global_buffer.destroy();
    }

    fn detach(&mut self) {
        // Dropping the context releases surface, device and queue.
        self.gpu = None;
    }
}
