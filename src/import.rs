//! Plain-text point lists.
//!
//! ```text
//! # comment
//! 2          number of curves
//! P3         point count of the first curve
//! 0 0
//! 1 1
//! 2 0
//! P1
//! 4.5 -2
//! ```
//!
//! File coordinates are y-up and small; curve space is y-down and in pixels,
//! so every point is scaled by [`IMPORT_SCALE`] and its y negated.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use glam::Vec3;

use crate::curve::Curve;
use crate::error::ImportError;

pub const IMPORT_SCALE: f32 = 50.0;

/// Non-empty lines with comments removed, paired with their 1-based line number.
fn content_lines(text: &str) -> Vec<(usize, &str)> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = match line.find('#') {
                Some(idx) => &line[..idx],
                None => line,
            };
            let line = line.trim();
            (!line.is_empty()).then_some((i + 1, line))
        })
        .collect()
}

fn parse_count(line: usize, token: &str, what: &str) -> Result<usize, ImportError> {
    token
        .parse::<usize>()
        .map_err(|_| ImportError::malformed(line, format!("expected {what}, found {token:?}")))
}

fn parse_coordinate(line: usize, token: &str) -> Result<f32, ImportError> {
    match token.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ImportError::malformed(
            line,
            format!("expected a coordinate, found {token:?}"),
        )),
    }
}

/// Parses a whole point list. Any defect rejects the entire input.
pub fn parse_point_list(text: &str) -> Result<Vec<Vec<Vec3>>, ImportError> {
    let lines = content_lines(text);
    let mut lines = lines.into_iter();
    let end_line = text.lines().count() + 1;

    let (line, token) = lines
        .next()
        .ok_or_else(|| ImportError::malformed(end_line, "missing curve count"))?;
    let num_curves = parse_count(line, token, "a curve count")?;

    // counts come from the file, so they never size an allocation
    let mut curves = Vec::new();
    for curve_idx in 0..num_curves {
        let (line, header) = lines.next().ok_or_else(|| {
            ImportError::malformed(end_line, format!("missing header of curve {}", curve_idx + 1))
        })?;
        let count = header
            .strip_prefix('P')
            .ok_or_else(|| ImportError::malformed(line, format!("expected P<count>, found {header:?}")))?;
        let num_points = parse_count(line, count.trim(), "a point count")?;
        if num_points == 0 {
            return Err(ImportError::malformed(line, "a curve needs at least one point"));
        }

        let mut points = Vec::new();
        for _ in 0..num_points {
            let (line, text) = lines.next().ok_or_else(|| {
                ImportError::malformed(
                    end_line,
                    format!("curve {} ends before its {num_points} points", curve_idx + 1),
                )
            })?;
            let tokens: Vec<&str> = text.split_whitespace().collect();
            let [x, y] = tokens[..] else {
                return Err(ImportError::malformed(
                    line,
                    format!("expected two coordinates, found {}", tokens.len()),
                ));
            };
            let x = parse_coordinate(line, x)?;
            let y = parse_coordinate(line, y)?;
            points.push(Vec3::new(x * IMPORT_SCALE, -y * IMPORT_SCALE, 0.0));
        }
        log::debug!("parsed curve {} with {num_points} points", curve_idx + 1);
        curves.push(points);
    }

    let trailing = lines.count();
    if trailing > 0 {
        log::warn!("ignoring {trailing} lines after the last curve");
    }
    Ok(curves)
}

/// Writes curves in the format [`parse_point_list`] reads.
pub fn write_point_list(curves: &[Curve]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# curve editor point list");
    let _ = writeln!(out, "{}", curves.len());
    for curve in curves {
        let _ = writeln!(out, "P{}", curve.control_points.len());
        for p in &curve.control_points {
            let _ = writeln!(out, "{} {}", p.x / IMPORT_SCALE, -p.y / IMPORT_SCALE);
        }
    }
    out
}

pub fn import_file(path: &Path) -> anyhow::Result<Vec<Vec<Vec3>>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let curves =
        parse_point_list(&text).with_context(|| format!("failed to import {}", path.display()))?;
    log::info!("imported {} curves from {}", curves.len(), path.display());
    Ok(curves)
}

pub fn export_file(path: &Path, curves: &[Curve]) -> anyhow::Result<()> {
    std::fs::write(path, write_point_list(curves))
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("exported {} curves to {}", curves.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EditorOptions;

    #[test]
    fn parses_single_curve() {
        let curves = parse_point_list("1\nP3\n0 0\n1 1\n2 0\n").unwrap();
        assert_eq!(
            curves,
            vec![vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(50.0, -50.0, 0.0),
                Vec3::new(100.0, 0.0, 0.0),
            ]]
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# header\n\n2 # two curves\nP1\n\t0.5   -1\n\n# second\nP 2\n1 0\n0 1 # tail\n";
        let curves = parse_point_list(text).unwrap();
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0], vec![Vec3::new(25.0, 50.0, 0.0)]);
        assert_eq!(curves[1][1], Vec3::new(0.0, -50.0, 0.0));
    }

    #[test]
    fn zero_curves_is_valid() {
        assert_eq!(parse_point_list("0\n").unwrap(), Vec::<Vec<Vec3>>::new());
    }

    #[test]
    fn rejects_wrong_token_count() {
        let err = parse_point_list("1\nP2\n0 0\n1 2 3\n").unwrap_err();
        assert!(matches!(err, ImportError::MalformedInput { line: 4, .. }));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert!(parse_point_list("one\n").is_err());
        assert!(parse_point_list("-1\n").is_err());
        assert!(parse_point_list("1\nPx\n").is_err());
        assert!(parse_point_list("1\nP1\n0 y\n").is_err());
        assert!(parse_point_list("1\nP1\n0 inf\n").is_err());
    }

    #[test]
    fn rejects_missing_header_prefix() {
        let err = parse_point_list("1\n3\n0 0\n").unwrap_err();
        assert!(matches!(err, ImportError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn rejects_truncated_input() {
        assert!(parse_point_list("").is_err());
        assert!(parse_point_list("2\nP1\n0 0\n").is_err());
        assert!(parse_point_list("1\nP3\n0 0\n1 1\n").is_err());
    }

    #[test]
    fn huge_counts_are_malformed_not_fatal() {
        let err = parse_point_list("18446744073709551615\nP1\n0 0\n").unwrap_err();
        assert!(matches!(err, ImportError::MalformedInput { line: 4, .. }));

        let err = parse_point_list("1\nP18446744073709551615\n0 0\n").unwrap_err();
        assert!(matches!(err, ImportError::MalformedInput { line: 4, .. }));

        let err = parse_point_list("1\nP1000000000\n0 0\n").unwrap_err();
        assert!(matches!(err, ImportError::MalformedInput { .. }));
    }

    #[test]
    fn rejects_empty_curve() {
        assert!(parse_point_list("1\nP0\n").is_err());
    }

    #[test]
    fn written_list_reads_back() {
        let options = EditorOptions::default();
        let curves = vec![
            Curve::new(vec![Vec3::new(50.0, -100.0, 0.0), Vec3::new(-25.0, 75.0, 0.0)], &options),
            Curve::new(vec![Vec3::new(0.0, 0.0, 0.0)], &options),
        ];
        let parsed = parse_point_list(&write_point_list(&curves)).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], curves[0].control_points);
        assert_eq!(parsed[1], curves[1].control_points);
    }
}
