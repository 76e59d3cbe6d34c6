use anyhow::{ensure, Result};

use crate::core::model::TextLine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthCategory {
    pub label: String,
    pub count: u64,
}

/// Boundary points must be non-empty and strictly ascending; anything else
/// is rejected, never re-sorted.
pub fn validate_boundary_points(boundary_points: &[u32]) -> Result<()> {
    ensure!(
        !boundary_points.is_empty(),
        "line width boundary points must not be empty"
    );
    ensure!(
        boundary_points.windows(2).all(|pair| pair[0] < pair[1]),
        "line width boundary points must be strictly ascending, got {boundary_points:?}"
    );
    Ok(())
}

/// Classify each line's width into one of n+1 categories for n boundary
/// points. Intervals are left-closed, right-open; a width equal to a
/// boundary belongs to the higher category. Every category is reported,
/// zero counts included, so the label set is stable across documents.
pub fn line_width_stats(lines: &[&TextLine], boundary_points: &[u32]) -> Result<Vec<WidthCategory>> {
    validate_boundary_points(boundary_points)?;

    let mut counts = vec![0u64; boundary_points.len() + 1];
    for line in lines {
        let width = line.width();
        ensure!(
            width.is_finite() && width >= 0.0,
            "line '{}' has invalid width {width}",
            line.id
        );
        let category = boundary_points.partition_point(|&point| (point as f32) <= width);
        counts[category] += 1;
    }

    Ok(category_labels(boundary_points)
        .into_iter()
        .zip(counts)
        .map(|(label, count)| WidthCategory { label, count })
        .collect())
}

fn category_labels(boundary_points: &[u32]) -> Vec<String> {
    let first = boundary_points[0];
    let last = boundary_points[boundary_points.len() - 1];
    let mut labels = vec![format!("lt_{first}")];
    labels.extend(
        boundary_points
            .windows(2)
            .map(|pair| format!("{}_{}", pair[0], pair[1])),
    );
    labels.push(format!("gte_{last}"));
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;

    fn line_of_width(id: &str, width: f32) -> TextLine {
        TextLine {
            id: id.to_string(),
            coords: BBox::new(0.0, 0.0, width, 20.0),
            text: Some("text".to_string()),
        }
    }

    fn counts(stats: &[WidthCategory]) -> Vec<u64> {
        stats.iter().map(|cat| cat.count).collect()
    }

    #[test]
    fn classifies_widths_into_categories() {
        let lines: Vec<TextLine> = [50.0, 150.0, 250.0, 200.0]
            .iter()
            .enumerate()
            .map(|(i, w)| line_of_width(&format!("l{i}"), *w))
            .collect();
        let refs: Vec<&TextLine> = lines.iter().collect();
        let stats = line_width_stats(&refs, &[100, 200]).unwrap();
        // 200 sits on the boundary and belongs to the higher category.
        assert_eq!(counts(&stats), vec![1, 1, 2]);
        let labels: Vec<&str> = stats.iter().map(|cat| cat.label.as_str()).collect();
        assert_eq!(labels, vec!["lt_100", "100_200", "gte_200"]);
    }

    #[test]
    fn empty_categories_are_reported_as_zero() {
        let lines = [line_of_width("l0", 500.0)];
        let refs: Vec<&TextLine> = lines.iter().collect();
        let stats = line_width_stats(&refs, &[100, 200, 300]).unwrap();
        assert_eq!(counts(&stats), vec![0, 0, 0, 1]);
    }

    #[test]
    fn no_lines_yields_all_zero_categories() {
        let stats = line_width_stats(&[], &[100]).unwrap();
        assert_eq!(counts(&stats), vec![0, 0]);
    }

    #[test]
    fn increasing_width_never_lowers_the_category() {
        let points = [100, 200, 300];
        let mut previous = 0;
        for width in [0.0, 99.0, 100.0, 150.0, 200.0, 299.0, 300.0, 1000.0] {
            let category = points.partition_point(|&point| (point as f32) <= width);
            assert!(category >= previous, "width {width} moved category backwards");
            previous = category;
        }
    }

    #[test]
    fn rejects_empty_boundary_points() {
        let err = line_width_stats(&[], &[]).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn rejects_unsorted_boundary_points() {
        let err = line_width_stats(&[], &[200, 100]).unwrap_err();
        assert!(err.to_string().contains("strictly ascending"));
    }

    #[test]
    fn rejects_duplicate_boundary_points() {
        assert!(line_width_stats(&[], &[100, 100]).is_err());
    }

    #[test]
    fn rejects_negative_line_width() {
        let mut bad = line_of_width("l0", 10.0);
        bad.coords = BBox::new(10.0, 0.0, 2.0, 20.0);
        let lines = [bad];
        let refs: Vec<&TextLine> = lines.iter().collect();
        let err = line_width_stats(&refs, &[100]).unwrap_err();
        assert!(err.to_string().contains("invalid width"));
    }
}
