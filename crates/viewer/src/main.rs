//! Cloth Drape Viewer
//!
//! Renders the mass-spring sheet draping over the ball and forwards
//! keyboard input to the simulation driver.
//!
//! Controls: SPACE=pause, R=reseed, B=toggle bending stencil,
//! 1-5=select tunable, -/= adjust it, S=save settings, arrows=camera,
//! ESC=quit.
//!
//! Run with: cargo run -p viewer --release [settings.json]

mod ball;
mod camera;
mod settings;
mod vertex;

use bytemuck::{Pod, Zeroable};
use camera::OrbitCamera;
use cloth::constants::DEFAULT_DT;
use cloth::params::{
    DASHPOT_DAMPING_RANGE, DRAG_DAMPING_RANGE, FRICTION_RANGE, RESTITUTION_RANGE,
    SPRING_STIFFNESS_RANGE,
};
use cloth::{ClothSimulation, RenderBuffers, SpringTopology, StencilMode, Vec3};
use settings::ViewerSettings;
use std::path::Path;
use std::sync::Arc;
use vertex::ColoredVertex;
use wgpu::util::DeviceExt;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const BALL_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
const PARAM_NAMES: [&str; 5] = [
    "spring_stiffness",
    "dashpot_damping",
    "drag_damping",
    "friction",
    "restitution",
];
const PARAM_RANGES: [(f32, f32); 5] = [
    SPRING_STIFFNESS_RANGE,
    DASHPOT_DAMPING_RANGE,
    DRAG_DAMPING_RANGE,
    FRICTION_RANGE,
    RESTITUTION_RANGE,
];

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    sim: ClothSimulation,
    buffers: RenderBuffers,
    settings: ViewerSettings,
    camera: OrbitCamera,
    paused: bool,
    current_t: f32,
    selected_param: usize,
    frame: u64,
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    depth_view: wgpu::TextureView,
    cloth_vertex_buffer: wgpu::Buffer,
    cloth_index_buffer: wgpu::Buffer,
    cloth_index_count: u32,
    ball_vertex_buffer: wgpu::Buffer,
    ball_index_buffer: wgpu::Buffer,
    ball_index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl App {
    fn new() -> Self {
        let settings = match std::env::args().nth(1) {
            Some(path) => match ViewerSettings::load_json(Path::new(&path)) {
                Ok(s) => {
                    log::info!("loaded settings from {}", path);
                    s
                }
                Err(e) => {
                    log::warn!("failed to load {}: {}; using defaults", path, e);
                    ViewerSettings::default()
                }
            },
            None => ViewerSettings::default(),
        };

        let mode = if settings.bending {
            StencilMode::Bending
        } else {
            StencilMode::Structural
        };
        let mut sim = ClothSimulation::new(settings.resolution, mode);
        sim.params = settings.params;
        sim.gravity = Vec3::from_array(settings.gravity);
        sim.reset(&mut rand::thread_rng());

        let buffers = RenderBuffers::new(settings.resolution);

        log::info!(
            "sheet {}x{}, {} springs/point, dt={:.3e}, {} substeps/frame",
            settings.resolution,
            settings.resolution,
            sim.topology.len(),
            DEFAULT_DT,
            substeps_per_frame()
        );
        println!("Controls: SPACE=pause, R=reseed, B=bending, 1-5=select, -/= adjust, S=save, arrows=camera, ESC=quit");

        Self {
            window: None,
            gpu: None,
            sim,
            buffers,
            settings,
            camera: OrbitCamera::new(),
            paused: false,
            current_t: 0.0,
            selected_param: 0,
            frame: 0,
        }
    }

    fn reseed(&mut self) {
        self.sim.reset(&mut rand::thread_rng());
        self.current_t = 0.0;
        log::info!("reseeded sheet");
    }

    fn toggle_stencil(&mut self) {
        self.settings.bending = !self.settings.bending;
        let mode = if self.settings.bending {
            StencilMode::Bending
        } else {
            StencilMode::Structural
        };
        self.sim.topology = SpringTopology::build(mode, self.sim.grid.quad_size());
        log::info!("stencil mode: {:?}", mode);
    }

    fn save_settings(&mut self) {
        self.settings.params = self.sim.params;
        let path = Path::new("cloth_settings.json");
        match self.settings.save_json(path) {
            Ok(()) => log::info!("saved settings to {}", path.display()),
            Err(e) => log::error!("failed to save settings: {}", e),
        }
    }

    fn select_param(&mut self, index: usize) {
        self.selected_param = index;
        log::info!("selected {}", PARAM_NAMES[index]);
    }

    fn adjust_param(&mut self, sign: f32) {
        let (lo, hi) = PARAM_RANGES[self.selected_param];
        let step = (hi - lo) * 0.05 * sign;
        let p = &mut self.sim.params;
        let field = match self.selected_param {
            0 => &mut p.spring_stiffness,
            1 => &mut p.dashpot_damping,
            2 => &mut p.drag_damping,
            3 => &mut p.friction,
            _ => &mut p.restitution,
        };
        *field = (*field + step).clamp(lo, hi);
        log::info!("{} = {}", PARAM_NAMES[self.selected_param], *field);
    }

    async fn init_gpu(&mut self, window: Arc<Window>) {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone()).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default(), None)
            .await
            .unwrap();

        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let n = self.sim.grid.n();
        let cloth_vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Cloth Vertex Buffer"),
            size: (n * n * std::mem::size_of::<ColoredVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let cloth_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cloth Index Buffer"),
            contents: bytemuck::cast_slice(&self.buffers.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Ball drawn slightly shrunken so the draped sheet stays visible.
        let (ball_vertices, ball_indices) = ball::sphere_mesh(
            self.sim.collider.center,
            self.sim.collider.radius * 0.95,
            24,
            32,
            BALL_COLOR,
        );
        let ball_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Ball Vertex Buffer"),
            contents: bytemuck::cast_slice(&ball_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ball_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Ball Index Buffer"),
            contents: bytemuck::cast_slice(&ball_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform Buffer"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[ColoredVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Two-sided sheet: never cull.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let depth_view = create_depth_view(&device, &config);

        self.gpu = Some(GpuState {
            surface,
            device,
            queue,
            config,
            pipeline,
            depth_view,
            cloth_vertex_buffer,
            cloth_index_buffer,
            cloth_index_count: self.buffers.indices.len() as u32,
            ball_vertex_buffer,
            ball_index_buffer,
            ball_index_count: ball_indices.len() as u32,
            uniform_buffer,
            bind_group,
        });
    }

    fn step_simulation(&mut self) {
        if self.paused {
            return;
        }

        if self.current_t > self.settings.reset_interval {
            self.reseed();
        }

        for _ in 0..substeps_per_frame() {
            self.sim.substep(DEFAULT_DT);
            self.current_t += DEFAULT_DT;
        }
        self.buffers.update_vertices(&self.sim.grid);

        if self.frame % 120 == 0 {
            log::info!(
                "t={:.2}s mean_y={:+.3} max_speed={:.2} penetration={:.2e}",
                self.current_t,
                self.sim.mean_height(),
                self.sim.max_speed(),
                self.sim.max_penetration()
            );
        }
    }

    fn render(&mut self) {
        self.step_simulation();
        self.frame += 1;

        let Some(gpu) = &self.gpu else { return };
        let Some(window) = &self.window else { return };

        let size = window.inner_size();
        let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;
        let uniforms = Uniforms {
            view_proj: self.camera.view_proj(aspect).to_cols_array_2d(),
        };
        gpu.queue
            .write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let cloth_vertices: Vec<ColoredVertex> = self
            .buffers
            .vertices
            .iter()
            .zip(&self.buffers.colors)
            .map(|(position, color)| ColoredVertex {
                position: *position,
                color: *color,
            })
            .collect();
        gpu.queue.write_buffer(
            &gpu.cloth_vertex_buffer,
            0,
            bytemuck::cast_slice(&cloth_vertices),
        );

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(_) => return,
        };
        let view = output.texture.create_view(&Default::default());

        let mut encoder = gpu.device.create_command_encoder(&Default::default());
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.1,
                            b: 0.1,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &gpu.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&gpu.pipeline);
            pass.set_bind_group(0, &gpu.bind_group, &[]);

            pass.set_vertex_buffer(0, gpu.cloth_vertex_buffer.slice(..));
            pass.set_index_buffer(gpu.cloth_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..gpu.cloth_index_count, 0, 0..1);

            pass.set_vertex_buffer(0, gpu.ball_vertex_buffer.slice(..));
            pass.set_index_buffer(gpu.ball_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..gpu.ball_index_count, 0, 0..1);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attrs = Window::default_attributes()
            .with_title("Mass-Spring Cloth")
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 1024));

        let window = Arc::new(event_loop.create_window(attrs).unwrap());
        self.window = Some(window.clone());

        pollster::block_on(self.init_gpu(window));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Space) => self.paused = !self.paused,
                        PhysicalKey::Code(KeyCode::KeyR) => self.reseed(),
                        PhysicalKey::Code(KeyCode::KeyB) => self.toggle_stencil(),
                        PhysicalKey::Code(KeyCode::KeyS) => self.save_settings(),
                        PhysicalKey::Code(KeyCode::Digit1) => self.select_param(0),
                        PhysicalKey::Code(KeyCode::Digit2) => self.select_param(1),
                        PhysicalKey::Code(KeyCode::Digit3) => self.select_param(2),
                        PhysicalKey::Code(KeyCode::Digit4) => self.select_param(3),
                        PhysicalKey::Code(KeyCode::Digit5) => self.select_param(4),
                        PhysicalKey::Code(KeyCode::Minus) => self.adjust_param(-1.0),
                        PhysicalKey::Code(KeyCode::Equal) => self.adjust_param(1.0),
                        PhysicalKey::Code(KeyCode::ArrowLeft) => self.camera.orbit(-0.1, 0.0),
                        PhysicalKey::Code(KeyCode::ArrowRight) => self.camera.orbit(0.1, 0.0),
                        PhysicalKey::Code(KeyCode::ArrowUp) => self.camera.zoom(-0.2),
                        PhysicalKey::Code(KeyCode::ArrowDown) => self.camera.zoom(0.2),
                        PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
                        _ => {}
                    }
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = size.width.max(1);
                    gpu.config.height = size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                    gpu.depth_view = create_depth_view(&gpu.device, &gpu.config);
                }
            }
            WindowEvent::RedrawRequested => self.render(),
            _ => {}
        }
    }
}

/// Substeps per 60 Hz frame at the fixed substep size.
fn substeps_per_frame() -> usize {
    ((1.0 / 60.0) / DEFAULT_DT) as usize
}

fn create_depth_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

const SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
}

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) world_y: f32,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(in.position, 1.0);
    out.color = in.color;
    out.world_y = in.position.y;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // Cheap height-based shading; the mesh carries no normals.
    let shade = clamp(0.7 + 0.6 * in.world_y, 0.4, 1.1);
    return vec4<f32>(in.color.rgb * shade, in.color.a);
}
"#;

fn main() {
    env_logger::init();
    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App::new();
    event_loop.run_app(&mut app).unwrap();
}
