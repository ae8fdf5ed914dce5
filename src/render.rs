//! egui rendering backend.
//!
//! Ribbons are extruded on the CPU with [`Extrusion`] and drawn as plain
//! triangle meshes through the painter.

use egui::{Color32, Mesh, Painter, Pos2, Rect, Rgba, Shape};
use glam::{Vec2, Vec3};

use crate::bernstein::MAX_CONTROL_POINTS;
use crate::camera::Camera2D;
use crate::curve::{Curve, CurveGeometry};
use crate::extrude::Extrusion;
use crate::options::EditorOptions;
use crate::ribbon::{self, Ribbon};

/// Per-frame view state shared by every draw call.
#[derive(Clone, Debug)]
pub struct RenderingContext {
    pub rect: Rect,
    pub camera: Camera2D,
}

impl RenderingContext {
    pub fn new(rect: Rect, camera: &Camera2D) -> Self {
        Self {
            rect,
            camera: camera.clone(),
        }
    }

    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.rect.width(), self.rect.height().max(1.0))
    }

    pub fn aspect(&self) -> f32 {
        let size = self.viewport_size();
        size.x / size.y
    }

    pub fn to_ndc(&self, p: Vec3) -> Vec2 {
        let size = self.viewport_size();
        let screen = self.camera.world_to_screen(p.truncate(), size);
        Vec2::new(screen.x / size.x * 2.0 - 1.0, 1.0 - screen.y / size.y * 2.0)
    }

    pub fn ndc_to_screen(&self, ndc: Vec2) -> Pos2 {
        let size = self.viewport_size();
        self.rect.min + egui::vec2((ndc.x + 1.0) * 0.5 * size.x, (1.0 - ndc.y) * 0.5 * size.y)
    }
}

/// The three ribbons of a curve, drawn back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Polygon,
    Curve,
    Handles,
}

impl Pass {
    /// Extrusion parameters of this pass; only the control polygon is mitered.
    pub fn extrusion(self, curve: &Curve, aspect: f32) -> Extrusion {
        let (thickness, miter) = match self {
            Pass::Polygon => (curve.polygon_thickness, true),
            Pass::Curve => (curve.thickness, false),
            Pass::Handles => (curve.handle_thickness, false),
        };
        Extrusion {
            thickness,
            aspect,
            miter,
        }
    }
}

/// Full uniform set of one draw call, for backends that evaluate on the GPU.
/// The egui backend only needs [`Pass::extrusion`].
#[derive(Clone, Debug, PartialEq)]
pub struct CurveUniforms {
    pub num_control_points: u32,
    /// At most [`MAX_CONTROL_POINTS`] entries.
    pub control_points: Vec<[f32; 4]>,
    pub thickness: f32,
    pub aspect: f32,
    pub miter: bool,
}

impl CurveUniforms {
    pub fn new(curve: &Curve, pass: Pass, aspect: f32) -> Self {
        let control_points: Vec<[f32; 4]> = curve
            .control_points
            .iter()
            .take(MAX_CONTROL_POINTS)
            .map(|p| p.extend(1.0).to_array())
            .collect();
        let extrusion = pass.extrusion(curve, aspect);
        Self {
            num_control_points: control_points.len() as u32,
            control_points,
            thickness: extrusion.thickness,
            aspect: extrusion.aspect,
            miter: extrusion.miter,
        }
    }

    pub fn extrusion(&self) -> Extrusion {
        Extrusion {
            thickness: self.thickness,
            aspect: self.aspect,
            miter: self.miter,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveStyle {
    pub curve: Color32,
    pub polygon: Color32,
    pub handle: Color32,
    pub selected_handle: Color32,
}

fn color(rgba: [f32; 4]) -> Color32 {
    Rgba::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3]).into()
}

impl CurveStyle {
    pub fn from_options(options: &EditorOptions) -> Self {
        Self {
            curve: color(options.curve_color),
            polygon: color(options.polygon_color),
            handle: color(options.handle_color),
            selected_handle: color(options.selected_handle_color),
        }
    }
}

/// Extrudes a ribbon into a mesh. `color_of` picks the colour per vertex index.
pub fn ribbon_mesh(
    ctx: &RenderingContext,
    ribbon: &Ribbon,
    indices: &[u32],
    extrusion: Extrusion,
    color_of: impl Fn(usize) -> Color32,
) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.vertices.reserve(ribbon.len());
    for (i, v) in ribbon.vertices.iter().enumerate() {
        let current = ctx.to_ndc(v.position());
        let previous = ctx.to_ndc(v.previous());
        let next = ctx.to_ndc(v.next());
        let ndc = current + extrusion.offset(current, previous, next, v.side);
        mesh.colored_vertex(ctx.ndc_to_screen(ndc), color_of(i));
    }
    mesh.indices.extend_from_slice(indices);
    mesh
}

/// Draws the visible parts of one curve: polygon (mitered), curve and handles.
pub fn paint_curve(
    painter: &Painter,
    ctx: &RenderingContext,
    curve: &Curve,
    geometry: &CurveGeometry,
    style: &CurveStyle,
    selected_handle: Option<usize>,
) {
    let aspect = ctx.aspect();

    if curve.show_polygon && geometry.polygon.len() >= 4 {
        let extrusion = Pass::Polygon.extrusion(curve, aspect);
        let indices = geometry.polygon.strip_indices();
        let mesh = ribbon_mesh(ctx, &geometry.polygon, &indices, extrusion, |_| {
            style.polygon
        });
        painter.add(Shape::mesh(mesh));
    }

    if curve.show_curve && geometry.curve.len() >= 4 {
        let extrusion = Pass::Curve.extrusion(curve, aspect);
        let indices = geometry.curve.strip_indices();
        let mesh = ribbon_mesh(ctx, &geometry.curve, &indices, extrusion, |_| {
            style.curve
        });
        painter.add(Shape::mesh(mesh));
    }

    if curve.show_handles && !geometry.handle_indices.is_empty() {
        let extrusion = Pass::Handles.extrusion(curve, aspect);
        let ring_vertices = ribbon::ring_vertex_count(curve.handle_samples);
        let mesh = ribbon_mesh(
            ctx,
            &geometry.handles,
            &geometry.handle_indices,
            extrusion,
            |i| {
                if Some(i / ring_vertices) == selected_handle {
                    style.selected_handle
                } else {
                    style.handle
                }
            },
        );
        painter.add(Shape::mesh(mesh));
    }
}
