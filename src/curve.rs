use glam::{Vec2, Vec3};
use serde_derive::{Deserialize, Serialize};

use crate::bernstein::{self, MAX_CONTROL_POINTS};
use crate::error::EditError;
use crate::options::{EditorOptions, MIN_SAMPLES};
use crate::ribbon::{self, Ribbon};

/// Unit-square template placed by "new curve".
const TEMPLATE: [Vec2; 4] = [
    Vec2::new(0.0, 0.5),
    Vec2::new(0.25, 1.0),
    Vec2::new(0.75, 0.0),
    Vec2::new(1.0, 0.5),
];

/// One Bezier span through all of its control points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Index order is the curve order and the handle identity.
    pub control_points: Vec<Vec3>,
    pub num_samples: usize,
    pub thickness: f32,
    pub polygon_thickness: f32,
    pub handle_radius: f32,
    pub handle_thickness: f32,
    pub handle_samples: usize,
    pub show_curve: bool,
    pub show_polygon: bool,
    pub show_handles: bool,
}

/// Everything the rendering backend draws for one curve in one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurveGeometry {
    pub samples: Vec<Vec3>,
    pub curve: Ribbon,
    pub polygon: Ribbon,
    /// All handle rings back to back, one per control point.
    pub handles: Ribbon,
    pub handle_indices: Vec<u32>,
}

impl Curve {
    pub fn new(control_points: Vec<Vec3>, options: &EditorOptions) -> Self {
        Self {
            control_points,
            num_samples: options.sample_count(),
            thickness: options.curve_thickness,
            polygon_thickness: options.polygon_thickness,
            handle_radius: options.handle_radius,
            handle_thickness: options.handle_thickness,
            handle_samples: options.handle_samples,
            show_curve: true,
            show_polygon: true,
            show_handles: true,
        }
    }

    /// The four-point template, `size` wide, centred on `center` with y pointing down.
    pub fn with_default_shape(center: Vec2, size: f32, options: &EditorOptions) -> Self {
        let points = TEMPLATE
            .iter()
            .map(|p| {
                let offset = (*p - Vec2::splat(0.5)) * Vec2::new(size, -size);
                (center + offset).extend(0.0)
            })
            .collect();
        Self::new(points, options)
    }

    pub fn degree(&self) -> usize {
        self.control_points.len().saturating_sub(1)
    }

    pub fn set_num_samples(&mut self, num_samples: usize) {
        self.num_samples = num_samples.max(MIN_SAMPLES);
    }

    pub fn add_handle(&mut self, x: f32, y: f32) -> Result<usize, EditError> {
        if self.control_points.len() >= MAX_CONTROL_POINTS {
            return Err(EditError::CapacityExceeded {
                capacity: MAX_CONTROL_POINTS,
            });
        }
        self.control_points.push(Vec3::new(x, y, 0.0));
        log::debug!("handle {} added at ({x}, {y})", self.control_points.len() - 1);
        Ok(self.control_points.len() - 1)
    }

    pub fn move_handle(&mut self, index: usize, x: f32, y: f32) -> Result<(), EditError> {
        let len = self.control_points.len();
        let point = self
            .control_points
            .get_mut(index)
            .ok_or(EditError::OutOfRange { index, len })?;
        point.x = x;
        point.y = y;
        Ok(())
    }

    /// Removes a handle, refusing to leave the curve empty.
    pub fn remove_handle(&mut self, index: usize) -> Result<Vec3, EditError> {
        let len = self.control_points.len();
        if len <= 1 {
            return Err(EditError::InvalidOperation(
                "a curve keeps at least one control point",
            ));
        }
        if index >= len {
            return Err(EditError::OutOfRange { index, len });
        }
        log::debug!("handle {index} removed");
        Ok(self.control_points.remove(index))
    }

    /// First handle whose circle contains `(x, y)`; z is ignored.
    pub fn clicked_handle(&self, x: f32, y: f32) -> Option<usize> {
        let query = Vec2::new(x, y);
        let radius_sq = self.handle_radius * self.handle_radius;
        self.control_points
            .iter()
            .position(|p| p.truncate().distance_squared(query) < radius_sq)
    }

    pub fn regenerate_geometry(&self) -> CurveGeometry {
        let samples = bernstein::evaluate_curve(&self.control_points, self.num_samples);
        let curve = ribbon::build_ribbon(&samples);
        let polygon = ribbon::build_ribbon(&self.control_points);

        let ring_vertices = ribbon::ring_vertex_count(self.handle_samples);
        let mut handles = Ribbon {
            vertices: Vec::with_capacity(ring_vertices * self.control_points.len()),
        };
        let mut handle_indices = Vec::with_capacity(6 * self.handle_samples * self.control_points.len());
        for (i, &center) in self.control_points.iter().enumerate() {
            let base_vertex = (ring_vertices * i) as u32;
            let ring =
                ribbon::build_handle_ring(center, self.handle_radius, self.handle_samples, base_vertex);
            handles.append(&ring.ribbon);
            handle_indices.extend_from_slice(&ring.indices);
        }

        CurveGeometry {
            samples,
            curve,
            polygon,
            handles,
            handle_indices,
        }
    }
}
