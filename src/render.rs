//! GPU renderer for field snapshots.
//!
//! The snapshot is tessellated on the CPU into a single triangle list each
//! frame (connection quads, trail discs, node discs, in that paint order)
//! and drawn with one alpha-blended pipeline. Discs are screen-aligned quads
//! carrying a unit-circle uv; the fragment shader discards outside the
//! circle and feathers the rim. Connections carry a zero uv, which the same
//! shader treats as solid.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use winit::window::Window;

use crate::error::GpuError;
use crate::snapshot::{ConnectionView, FrameSnapshot, NodeView, CONNECTION_OPACITY};
use crate::visuals::{Color, VisualConfig};

/// Trail discs shrink to this fraction of the node size at the oldest sample.
const TRAIL_MIN_SCALE: f32 = 0.1;

/// Peak trail alpha, at the newest sample.
const TRAIL_ALPHA: f32 = 0.3;

/// How strongly pointer proximity tints a node toward the glow color.
const NODE_GLOW_STRENGTH: f32 = 0.6;

const SHADER_SOURCE: &str = r#"
struct Globals {
    screen: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0) var<uniform> globals: Globals;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let ndc = vec2<f32>(
        in.position.x / globals.screen.x * 2.0 - 1.0,
        1.0 - in.position.y / globals.screen.y * 2.0,
    );
    out.clip = vec4<f32>(ndc, 0.0, 1.0);
    out.uv = in.uv;
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let d = length(in.uv);
    if (d > 1.0) {
        discard;
    }
    let edge = 1.0 - smoothstep(0.85, 1.0, d);
    return vec4<f32>(in.color.rgb, in.color.a * edge);
}
"#;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct Globals {
    screen: [f32; 2],
    _pad: [f32; 2],
}

/// One tessellated vertex: pixel position, unit-circle uv, premixed color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex {
    position: [f32; 2],
    uv: [f32; 2],
    color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x2,
        2 => Float32x4,
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    vertices: Vec<Vertex>,
    visuals: VisualConfig,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, visuals: VisualConfig) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let globals = Globals {
            screen: [config.width as f32, config.height as f32],
            _pad: [0.0; 2],
        };
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Globals Buffer"),
            size: std::mem::size_of::<Globals>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&globals_buffer, 0, bytemuck::cast_slice(&[globals]));

        let globals_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Globals Bind Group Layout"),
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

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &globals_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Field Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Field Pipeline Layout"),
            bind_group_layouts: &[&globals_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Field Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_capacity = 4096;
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Field Vertex Buffer"),
            size: (vertex_capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            globals_bind_group,
            vertex_buffer,
            vertex_capacity,
            vertices: Vec::new(),
            visuals,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        let globals = Globals {
            screen: [self.config.width as f32, self.config.height as f32],
            _pad: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::cast_slice(&[globals]));
    }

    /// Tessellate and draw one snapshot.
    pub fn render(
        &mut self,
        snapshot: &FrameSnapshot,
        pointer: Vec2,
        glow_radius: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        self.vertices.clear();
        tessellate(
            snapshot,
            pointer,
            glow_radius,
            &self.visuals,
            &mut self.vertices,
        );
        self.upload_vertices();

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Field Encoder"),
            });

        {
            let [r, g, b, a] = self.visuals.background;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Field Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.draw(0..self.vertices.len() as u32, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn upload_vertices(&mut self) {
        if self.vertices.len() > self.vertex_capacity {
            self.vertex_capacity = self.vertices.len().next_power_of_two();
            self.vertex_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Field Vertex Buffer"),
                size: (self.vertex_capacity * std::mem::size_of::<Vertex>())
                    as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
        if !self.vertices.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.vertices));
        }
    }
}

/// Build the frame's triangle list: connections under trails under nodes.
pub(crate) fn tessellate(
    snapshot: &FrameSnapshot,
    pointer: Vec2,
    glow_radius: f32,
    visuals: &VisualConfig,
    out: &mut Vec<Vertex>,
) {
    for connection in &snapshot.connections {
        push_connection(connection, visuals, out);
    }
    for node in &snapshot.nodes {
        push_trail(node, visuals, out);
    }
    for node in &snapshot.nodes {
        push_node(node, pointer, glow_radius, visuals, out);
    }
}

fn node_base_color(node: &NodeView, visuals: &VisualConfig) -> Color {
    match node.kind {
        crate::node::NodeKind::Primary => visuals.primary_color,
        crate::node::NodeKind::Accent => visuals.accent_color,
    }
}

fn mix(a: Color, b: Color, t: f32) -> Color {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// A connection as a solid quad expanded perpendicular to the segment.
fn push_connection(connection: &ConnectionView, visuals: &VisualConfig, out: &mut Vec<Vertex>) {
    let axis = connection.b - connection.a;
    if axis.length_squared() < f32::EPSILON {
        return;
    }
    let half = axis.normalize().perp() * (connection.width * 0.5);

    // Pointer-boosted edges take the glow color.
    let base = if connection.opacity > CONNECTION_OPACITY {
        visuals.glow_color
    } else {
        visuals.connection_color
    };
    let color = with_alpha(base, connection.opacity);

    push_quad(
        [
            connection.a - half,
            connection.a + half,
            connection.b + half,
            connection.b - half,
        ],
        [Vec2::ZERO; 4],
        color,
        out,
    );
}

/// Trail discs, oldest first, shrinking and fading toward the tail.
fn push_trail(node: &NodeView, visuals: &VisualConfig, out: &mut Vec<Vertex>) {
    let len = node.trail.len();
    if len == 0 {
        return;
    }
    let base = node_base_color(node, visuals);
    for (i, sample) in node.trail.iter().enumerate() {
        let progress = (i + 1) as f32 / len as f32;
        let radius = sample.size * 0.5 * (TRAIL_MIN_SCALE + (1.0 - TRAIL_MIN_SCALE) * progress);
        let alpha = TRAIL_ALPHA * progress * node.opacity;
        push_disc(sample.position, radius, with_alpha(base, alpha), out);
    }
}

/// The node disc, tinted toward the glow color near the pointer.
fn push_node(
    node: &NodeView,
    pointer: Vec2,
    glow_radius: f32,
    visuals: &VisualConfig,
    out: &mut Vec<Vertex>,
) {
    let mut color = node_base_color(node, visuals);
    let dist = node.position.distance(pointer);
    if dist < glow_radius {
        let t = (1.0 - dist / glow_radius) * NODE_GLOW_STRENGTH;
        color = mix(color, visuals.glow_color, t);
    }
    push_disc(node.position, node.size * 0.5, with_alpha(color, node.opacity), out);
}

fn push_disc(center: Vec2, radius: f32, color: Color, out: &mut Vec<Vertex>) {
    let corners = [
        center + Vec2::new(-radius, -radius),
        center + Vec2::new(radius, -radius),
        center + Vec2::new(radius, radius),
        center + Vec2::new(-radius, radius),
    ];
    let uvs = [
        Vec2::new(-1.0, -1.0),
        Vec2::new(1.0, -1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(-1.0, 1.0),
    ];
    push_quad(corners, uvs, color, out);
}

fn push_quad(corners: [Vec2; 4], uvs: [Vec2; 4], color: Color, out: &mut Vec<Vertex>) {
    let vertex = |i: usize| Vertex {
        position: corners[i].to_array(),
        uv: uvs[i].to_array(),
        color,
    };
    out.extend_from_slice(&[
        vertex(0),
        vertex(1),
        vertex(2),
        vertex(0),
        vertex(2),
        vertex(3),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeId, NodeKind, TrailPoint};
    use crate::snapshot::CONNECTION_OPACITY_GLOW;

    fn view(x: f32, y: f32, trail: usize) -> NodeView {
        NodeView {
            id: NodeId(0),
            position: Vec2::new(x, y),
            size: 20.0,
            kind: NodeKind::Primary,
            opacity: 1.0,
            trail: (0..trail)
                .map(|i| TrailPoint {
                    position: Vec2::new(x - i as f32, y),
                    size: 20.0,
                })
                .collect(),
        }
    }

    const FAR_POINTER: Vec2 = Vec2::new(-1000.0, -1000.0);

    #[test]
    fn test_vertex_counts() {
        let snapshot = FrameSnapshot {
            nodes: vec![view(100.0, 100.0, 3), view(200.0, 100.0, 0)],
            connections: vec![ConnectionView {
                a: Vec2::new(100.0, 100.0),
                b: Vec2::new(200.0, 100.0),
                width: 2.0,
                opacity: CONNECTION_OPACITY,
                kinds: (NodeKind::Primary, NodeKind::Primary),
            }],
        };
        let mut out = Vec::new();
        tessellate(&snapshot, FAR_POINTER, 120.0, &VisualConfig::default(), &mut out);
        // 1 connection quad + 3 trail discs + 2 node discs, 6 vertices each.
        assert_eq!(out.len(), 6 * 6);
    }

    #[test]
    fn test_trail_discs_fade_toward_tail() {
        let mut out = Vec::new();
        push_trail(&view(100.0, 100.0, 5), &VisualConfig::default(), &mut out);
        // Oldest sample is emitted first and carries the lowest alpha.
        let oldest_alpha = out[0].color[3];
        let newest_alpha = out[out.len() - 1].color[3];
        assert!(oldest_alpha < newest_alpha);
        assert!(newest_alpha <= TRAIL_ALPHA + 1e-6);
    }

    #[test]
    fn test_node_near_pointer_takes_glow_tint() {
        let visuals = VisualConfig::default();
        let node = view(100.0, 100.0, 0);

        let mut plain = Vec::new();
        push_node(&node, FAR_POINTER, 120.0, &visuals, &mut plain);
        let mut lit = Vec::new();
        push_node(&node, Vec2::new(110.0, 100.0), 120.0, &visuals, &mut lit);

        // Glow is pink; the red channel rises with pointer proximity.
        assert!(lit[0].color[0] > plain[0].color[0]);
    }

    #[test]
    fn test_boosted_connection_uses_glow_color() {
        let visuals = VisualConfig::default();
        let lit = ConnectionView {
            a: Vec2::ZERO,
            b: Vec2::new(100.0, 0.0),
            width: 2.0,
            opacity: CONNECTION_OPACITY_GLOW,
            kinds: (NodeKind::Primary, NodeKind::Accent),
        };
        let mut out = Vec::new();
        push_connection(&lit, &visuals, &mut out);
        assert_eq!(out[0].color[0], visuals.glow_color[0]);
        assert!((out[0].color[3] - CONNECTION_OPACITY_GLOW).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_connection_is_skipped() {
        let mut out = Vec::new();
        let degenerate = ConnectionView {
            a: Vec2::new(5.0, 5.0),
            b: Vec2::new(5.0, 5.0),
            width: 2.0,
            opacity: CONNECTION_OPACITY,
            kinds: (NodeKind::Primary, NodeKind::Primary),
        };
        push_connection(&degenerate, &VisualConfig::default(), &mut out);
        assert!(out.is_empty());
    }
}
