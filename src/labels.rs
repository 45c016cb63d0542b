//! Map-label anchor points for country polygons.
//!
//! For every admin-0 feature, computes the pole of inaccessibility of its
//! polygon parts and emits one point feature per labelable part: always
//! the largest part, plus any secondary part that is either comparable in
//! size or far enough from the largest that a single label cannot cover
//! both. Output features carry the ranking properties the renderer sorts
//! labels by.

use anyhow::{Context, Result};
use geo::{Area, EuclideanDistance, Point, Polygon};
use geojson::{Feature, FeatureCollection, GeoJson, JsonObject};
use indicatif::{ProgressBar, ProgressStyle};
use polylabel::polylabel;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use crate::geometry::parse_feature_collection;

/// Parts below this fraction of the largest part's area are never labeled.
const MIN_PART_RATIO: f64 = 0.01;
/// Secondary parts above this fraction of the largest part's area always
/// get their own label.
const SECONDARY_PART_RATIO: f64 = 0.5;
/// Polylabel precision, in coordinate units (degrees).
const TOLERANCE: f64 = 1.0;

/// Input properties carried through to the output, with their output names.
const CARRIED_PROPERTIES: &[(&str, &str)] = &[
    ("scalerank", "scalerank"),
    ("LABELRANK", "labelrank"),
    ("MIN_LABEL", "minlabel"),
    ("MAX_LABEL", "maxlabel"),
];

#[derive(Debug, Default)]
pub struct LabelSummary {
    pub labeled: usize,
    pub points: usize,
    pub unlabeled: Vec<String>,
}

struct LabelCandidate {
    point: Point<f64>,
    part: Polygon<f64>,
    area: f64,
}

/// Labelable parts of a geometry, largest first, small fragments dropped.
fn part_candidates(geometry: &geo::Geometry<f64>) -> Vec<LabelCandidate> {
    let mut parts: Vec<Polygon<f64>> = match geometry {
        geo::Geometry::Polygon(polygon) => vec![polygon.clone()],
        geo::Geometry::MultiPolygon(multi) => multi.0.clone(),
        _ => Vec::new(),
    };

    parts.sort_by(|a, b| {
        b.unsigned_area()
            .partial_cmp(&a.unsigned_area())
            .unwrap_or(Ordering::Equal)
    });
    let largest_area = parts.first().map(|p| p.unsigned_area()).unwrap_or(0.0);

    parts
        .into_iter()
        .filter(|part| part.unsigned_area() >= MIN_PART_RATIO * largest_area)
        .filter_map(|part| {
            let area = part.unsigned_area();
            polylabel(&part, &TOLERANCE)
                .ok()
                .map(|point| LabelCandidate { point, part, area })
        })
        .collect()
}

/// Pick the label points to emit for one country's candidates.
fn select_points(candidates: &[LabelCandidate]) -> Vec<Point<f64>> {
    let Some(major) = candidates.first() else {
        return Vec::new();
    };

    let mut points = vec![major.point];
    for candidate in &candidates[1..] {
        if candidate.area > SECONDARY_PART_RATIO * major.area
            || candidate.point.euclidean_distance(&major.part) > major.area.sqrt()
        {
            points.push(candidate.point);
        }
    }
    points
}

/// Read the admin-0 countries file, compute label points, and write a
/// GeoJSON FeatureCollection sorted by (scalerank, labelrank, minlabel).
pub fn build_label_points(input: &Path, output: &Path) -> Result<LabelSummary> {
    let raw =
        fs::read_to_string(input).with_context(|| format!("Failed to read {:?}", input))?;
    let collection = parse_feature_collection(&raw)?;

    let pb = ProgressBar::new(collection.features.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} countries")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_message("Labeling");

    let mut summary = LabelSummary::default();
    let mut out_features: Vec<Feature> = Vec::new();

    for feature in &collection.features {
        pb.inc(1);

        let Some(properties) = &feature.properties else {
            continue;
        };
        let Some(iso3) = properties.get("ADM0_A3").and_then(|v| v.as_str()) else {
            continue;
        };

        let geometry = feature
            .geometry
            .clone()
            .and_then(|g| geo::Geometry::<f64>::try_from(g).ok());
        let Some(geometry) = geometry else {
            summary.unlabeled.push(iso3.to_string());
            continue;
        };

        let candidates = part_candidates(&geometry);
        let points = select_points(&candidates);
        if points.is_empty() {
            pb.println(format!("Could not label {}", iso3));
            summary.unlabeled.push(iso3.to_string());
            continue;
        }

        let mut out_properties = JsonObject::new();
        out_properties.insert("ADM0_A3".to_string(), iso3.into());
        for (input_key, output_key) in CARRIED_PROPERTIES {
            if let Some(value) = properties.get(*input_key) {
                out_properties.insert((*output_key).to_string(), value.clone());
            }
        }

        summary.labeled += 1;
        summary.points += points.len();

        for point in points {
            out_features.push(Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(&point))),
                id: None,
                properties: Some(out_properties.clone()),
                foreign_members: None,
            });
        }
    }

    pb.finish_with_message("Labeling complete");

    out_features.sort_by(|a, b| {
        rank_key(a)
            .partial_cmp(&rank_key(b))
            .unwrap_or(Ordering::Equal)
    });

    let result = GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features: out_features,
        foreign_members: None,
    });
    fs::write(output, result.to_string())
        .with_context(|| format!("Failed to write {:?}", output))?;

    Ok(summary)
}

fn rank_key(feature: &Feature) -> (f64, f64, f64) {
    let get = |key: &str| {
        feature
            .properties
            .as_ref()
            .and_then(|p| p.get(key))
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    };
    (get("scalerank"), get("labelrank"), get("minlabel"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, MultiPolygon};

    fn square(x: f64, y: f64, w: f64, h: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(x, y), (x + w, y), (x + w, y + h), (x, y + h), (x, y)]),
            vec![],
        )
    }

    #[test]
    fn test_single_polygon_yields_one_point() {
        let geometry = geo::Geometry::Polygon(square(0.0, 0.0, 10.0, 10.0));
        let candidates = part_candidates(&geometry);
        assert_eq!(candidates.len(), 1);
        assert_eq!(select_points(&candidates).len(), 1);
    }

    #[test]
    fn test_tiny_fragments_are_dropped() {
        let multi = MultiPolygon(vec![
            square(0.0, 0.0, 10.0, 10.0),
            // area 0.25, below 1% of 100
            square(50.0, 50.0, 0.5, 0.5),
        ]);
        let candidates = part_candidates(&geo::Geometry::MultiPolygon(multi));
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_secondary_part_selection() {
        let multi = MultiPolygon(vec![
            // major part, area 100
            square(0.0, 0.0, 10.0, 10.0),
            // area 60 > half the major: labeled
            square(20.0, 0.0, 6.0, 10.0),
            // small but ~90 units away, farther than sqrt(100): labeled
            square(100.0, 0.0, 2.0, 2.0),
            // small and adjacent to the major part: dropped
            square(11.0, 0.0, 2.0, 2.0),
        ]);
        let candidates = part_candidates(&geo::Geometry::MultiPolygon(multi));
        assert_eq!(candidates.len(), 4);

        let points = select_points(&candidates);
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn test_non_polygon_geometry_has_no_candidates() {
        let geometry = geo::Geometry::Point(Point::new(0.0, 0.0));
        assert!(part_candidates(&geometry).is_empty());
        assert!(select_points(&[]).is_empty());
    }
}
