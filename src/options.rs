//! Runtime configuration of the editor.
//!
//! `EditorOptions` holds every tunable value; the constants stay as defaults
//! and as the fallback for fields missing from persisted state.

use serde_derive::{Deserialize, Serialize};

// ── Curves ──────────────────────────────────────────────────────────

/// Samples evaluated along each curve.
pub const NUM_SAMPLES: usize = 100;
/// Smallest sample count the editor accepts.
pub const MIN_SAMPLES: usize = 2;
/// Curve line thickness in NDC units.
pub const CURVE_THICKNESS: f32 = 0.012;
/// Control polygon line thickness in NDC units.
pub const POLYGON_THICKNESS: f32 = 0.005;
/// Side length of the template shape placed by "new curve", in curve units.
pub const NEW_CURVE_SIZE: f32 = 300.0;

// ── Handles ─────────────────────────────────────────────────────────

/// Handle circle radius in curve units; also the hit-test radius.
pub const HANDLE_RADIUS: f32 = 10.0;
/// Handle outline thickness in NDC units.
pub const HANDLE_THICKNESS: f32 = 0.006;
/// Segments per handle circle.
pub const HANDLE_SAMPLES: usize = 24;

// ── Camera ──────────────────────────────────────────────────────────

/// Minimal zoom factor.
pub const ZOOM_MIN: f32 = 0.05;
/// Maximal zoom factor.
pub const ZOOM_MAX: f32 = 50.0;
/// Zoom step of the toolbar buttons.
pub const ZOOM_STEP: f32 = 1.2;

// ── Colours (RGBA) ─────────────────────────────────────────────────

pub const CURVE_COLOR: [f32; 4] = [0.2, 0.9, 0.3, 1.0];
pub const POLYGON_COLOR: [f32; 4] = [0.25, 0.45, 1.0, 1.0];
pub const HANDLE_COLOR: [f32; 4] = [0.95, 0.25, 0.2, 1.0];
pub const SELECTED_HANDLE_COLOR: [f32; 4] = [1.0, 0.85, 0.1, 1.0];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    pub num_samples: usize,
    pub curve_thickness: f32,
    pub polygon_thickness: f32,
    pub new_curve_size: f32,

    pub handle_radius: f32,
    pub handle_thickness: f32,
    pub handle_samples: usize,

    pub zoom_min: f32,
    pub zoom_max: f32,
    pub zoom_step: f32,

    pub curve_color: [f32; 4],
    pub polygon_color: [f32; 4],
    pub handle_color: [f32; 4],
    pub selected_handle_color: [f32; 4],
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            num_samples: NUM_SAMPLES,
            curve_thickness: CURVE_THICKNESS,
            polygon_thickness: POLYGON_THICKNESS,
            new_curve_size: NEW_CURVE_SIZE,
            handle_radius: HANDLE_RADIUS,
            handle_thickness: HANDLE_THICKNESS,
            handle_samples: HANDLE_SAMPLES,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,
            curve_color: CURVE_COLOR,
            polygon_color: POLYGON_COLOR,
            handle_color: HANDLE_COLOR,
            selected_handle_color: SELECTED_HANDLE_COLOR,
        }
    }
}

impl EditorOptions {
    /// Sample count clamped to the supported minimum.
    pub fn sample_count(&self) -> usize {
        self.num_samples.max(MIN_SAMPLES)
    }
}
