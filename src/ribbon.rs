//! Doubled-vertex line strips for screen-space extrusion.
//!
//! A ribbon never knows its on-screen width. Every source point becomes two
//! vertices that share a position and carry their neighbours; the extrusion
//! stage pushes them apart along the screen-space normal.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Side tags of the two vertices emitted per source point.
pub const SIDES: [f32; 2] = [-1.0, 1.0];

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RibbonVertex {
    pub position: [f32; 3],
    pub previous: [f32; 3],
    pub next: [f32; 3],
    /// -1 or +1
    pub side: f32,
}

impl RibbonVertex {
    pub fn new(position: Vec3, previous: Vec3, next: Vec3, side: f32) -> Self {
        Self {
            position: position.to_array(),
            previous: previous.to_array(),
            next: next.to_array(),
            side,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn previous(&self) -> Vec3 {
        Vec3::from_array(self.previous)
    }

    pub fn next(&self) -> Vec3 {
        Vec3::from_array(self.next)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ribbon {
    pub vertices: Vec<RibbonVertex>,
}

impl Ribbon {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Appends another ribbon; its neighbours stay clamped to its own ends.
    pub fn append(&mut self, other: &Ribbon) {
        self.vertices.extend_from_slice(&other.vertices);
    }

    /// Flat float view for buffer uploads, 10 floats per vertex.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Triangle list equivalent of drawing the ribbon as a triangle strip.
    pub fn strip_indices(&self) -> Vec<u32> {
        let count = self.vertices.len() as u32;
        let mut indices = Vec::with_capacity(3 * self.vertices.len().saturating_sub(2));
        for i in 0..count.saturating_sub(2) {
            // keep a consistent winding on every other triangle
            if i % 2 == 0 {
                indices.extend_from_slice(&[i, i + 1, i + 2]);
            } else {
                indices.extend_from_slice(&[i + 1, i, i + 2]);
            }
        }
        indices
    }
}

pub fn build_ribbon(points: &[Vec3]) -> Ribbon {
    let mut vertices = Vec::with_capacity(2 * points.len());
    let last = points.len().saturating_sub(1);
    for (i, &p) in points.iter().enumerate() {
        let previous = points[i.saturating_sub(1)];
        let next = points[(i + 1).min(last)];
        for side in SIDES {
            vertices.push(RibbonVertex::new(p, previous, next, side));
        }
    }
    Ribbon { vertices }
}

/// Circular outline of one handle plus its triangle list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandleRing {
    pub ribbon: Ribbon,
    pub indices: Vec<u32>,
}

/// Number of ribbon vertices one ring of `samples` segments occupies.
pub fn ring_vertex_count(samples: usize) -> usize {
    2 * (samples + 1)
}

/// Samples `samples + 1` points over `[0, 2π]`, so the first and last point
/// coincide and close the ring. Indices are offset by `base_vertex`.
pub fn build_handle_ring(center: Vec3, radius: f32, samples: usize, base_vertex: u32) -> HandleRing {
    let ring: Vec<Vec3> = (0..=samples)
        .map(|j| {
            let angle = if samples == 0 {
                0.0
            } else {
                TAU * j as f32 / samples as f32
            };
            center + Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
        })
        .collect();

    let mut indices = Vec::with_capacity(6 * samples);
    for j in 0..samples as u32 {
        let a = base_vertex + 2 * j;
        indices.extend_from_slice(&[a, a + 2, a + 1, a + 2, a + 3, a + 1]);
    }

    HandleRing {
        ribbon: build_ribbon(&ring),
        indices,
    }
}
