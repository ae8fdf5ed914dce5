use glam::{Vec2, Vec3};
use serde_derive::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::error::EditError;
use crate::options::EditorOptions;

/// Position of one handle in the scene. Indices shift on removal, so a
/// `HandleRef` is only valid until the next structural edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleRef {
    pub curve: usize,
    pub handle: usize,
}

/// What a removal did to the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removed {
    Handle(HandleRef),
    /// The handle was the curve's last point, so the curve went with it.
    Curve(usize),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub curves: Vec<Curve>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Places the template curve at `center` and returns its index.
    pub fn new_curve(&mut self, center: Vec2, options: &EditorOptions) -> usize {
        self.curves
            .push(Curve::with_default_shape(center, options.new_curve_size, options));
        log::debug!("curve {} created", self.curves.len() - 1);
        self.curves.len() - 1
    }

    /// Starts a curve with a single control point.
    pub fn start_curve(&mut self, x: f32, y: f32, options: &EditorOptions) -> HandleRef {
        self.curves
            .push(Curve::new(vec![Vec3::new(x, y, 0.0)], options));
        HandleRef {
            curve: self.curves.len() - 1,
            handle: 0,
        }
    }

    /// Appends imported point lists as new curves. Empty lists are skipped.
    pub fn extend(&mut self, point_lists: Vec<Vec<Vec3>>, options: &EditorOptions) {
        for points in point_lists {
            if points.is_empty() {
                log::warn!("skipping a curve without control points");
                continue;
            }
            self.curves.push(Curve::new(points, options));
        }
    }

    /// Removes the last handle of the last curve, or the whole curve when
    /// only one point is left. `None` when the scene is empty.
    pub fn delete_last_handle(&mut self) -> Option<Removed> {
        let curve = self.curves.len().checked_sub(1)?;
        let handle = self.curves[curve].control_points.len().checked_sub(1)?;
        self.remove_handle(HandleRef { curve, handle }).ok()
    }

    /// Removes a handle; a curve about to lose its last point is dropped instead.
    pub fn remove_handle(&mut self, handle_ref: HandleRef) -> Result<Removed, EditError> {
        let len = self.curves.len();
        let curve = self.curves.get_mut(handle_ref.curve).ok_or(EditError::OutOfRange {
            index: handle_ref.curve,
            len,
        })?;
        match curve.remove_handle(handle_ref.handle) {
            Ok(_) => Ok(Removed::Handle(handle_ref)),
            Err(EditError::InvalidOperation(_)) if handle_ref.handle == 0 => {
                self.curves.remove(handle_ref.curve);
                log::debug!("curve {} removed with its last handle", handle_ref.curve);
                Ok(Removed::Curve(handle_ref.curve))
            }
            Err(err) => Err(err),
        }
    }

    pub fn move_handle(&mut self, handle_ref: HandleRef, x: f32, y: f32) -> Result<(), EditError> {
        let len = self.curves.len();
        self.curves
            .get_mut(handle_ref.curve)
            .ok_or(EditError::OutOfRange {
                index: handle_ref.curve,
                len,
            })?
            .move_handle(handle_ref.handle, x, y)
    }

    pub fn handle_position(&self, handle_ref: HandleRef) -> Option<Vec3> {
        self.curves
            .get(handle_ref.curve)?
            .control_points
            .get(handle_ref.handle)
            .copied()
    }

    /// First hit in curve order, then handle order. Hidden handles are not hit.
    pub fn clicked_handle(&self, x: f32, y: f32) -> Option<HandleRef> {
        self.curves
            .iter()
            .enumerate()
            .filter(|(_, curve)| curve.show_handles)
            .find_map(|(curve_idx, curve)| {
                curve.clicked_handle(x, y).map(|handle| HandleRef {
                    curve: curve_idx,
                    handle,
                })
            })
    }

    pub fn toggle_curves(&mut self) {
        let show = !self.curves.iter().all(|c| c.show_curve);
        self.curves.iter_mut().for_each(|c| c.show_curve = show);
    }

    pub fn toggle_polygons(&mut self) {
        let show = !self.curves.iter().all(|c| c.show_polygon);
        self.curves.iter_mut().for_each(|c| c.show_polygon = show);
    }

    pub fn toggle_handles(&mut self) {
        let show = !self.curves.iter().all(|c| c.show_handles);
        self.curves.iter_mut().for_each(|c| c.show_handles = show);
    }

    /// Pushes sample count, thickness and handle settings to every curve.
    pub fn apply_options(&mut self, options: &EditorOptions) {
        for curve in &mut self.curves {
            curve.set_num_samples(options.num_samples);
            curve.thickness = options.curve_thickness;
            curve.polygon_thickness = options.polygon_thickness;
            curve.handle_radius = options.handle_radius;
            curve.handle_thickness = options.handle_thickness;
            curve.handle_samples = options.handle_samples;
        }
    }
}
