use glam::{DVec3, Vec3};

/// Largest number of control points that take part in an evaluation.
///
/// Matches the capacity of the control-point uniform array on the rendering
/// side; points past this index are ignored.
pub const MAX_CONTROL_POINTS: usize = 129;

/// Binomial coefficient as a running product, never through factorials.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    // fewer factors and identical results for k and n - k
    let k = k.min(n - k);
    let mut coefficient = 1.0;
    for i in 1..=k {
        coefficient *= (n - (k - i)) as f64 / i as f64;
    }
    coefficient
}

pub fn bernstein(n: usize, k: usize, t: f64) -> f64 {
    if k > n {
        return 0.0;
    }
    binomial(n, k) * t.powi(k as i32) * (1.0 - t).powi((n - k) as i32)
}

/// Curve parameter of sample `i`; the last sample lands exactly on `t = 1`.
pub fn sample_parameter(i: usize, num_samples: usize) -> f64 {
    if num_samples < 2 {
        return 0.0;
    }
    i as f64 / (num_samples - 1) as f64
}

pub fn evaluate_curve(control_points: &[Vec3], num_samples: usize) -> Vec<Vec3> {
    if control_points.is_empty() {
        return Vec::new();
    }
    let mut samples = Vec::with_capacity(num_samples);
    for i in 0..num_samples {
        let t = sample_parameter(i, num_samples);
        samples.push(position(t, control_points));
    }
    samples
}

/// Point on the curve at `t`, blended in double precision.
pub fn position(t: f64, control_points: &[Vec3]) -> Vec3 {
    let count = control_points.len().min(MAX_CONTROL_POINTS);
    if count == 0 {
        return Vec3::ZERO;
    }
    if t <= 0.0 {
        return control_points[0];
    }
    if t >= 1.0 {
        return control_points[count - 1];
    }

    let n = count - 1;
    let mut accum = DVec3::ZERO;
    for (k, p) in control_points.iter().enumerate() {
        if k >= MAX_CONTROL_POINTS {
            break;
        }
        accum += bernstein(n, k, t) * p.as_dvec3();
    }
    accum.as_vec3()
}
