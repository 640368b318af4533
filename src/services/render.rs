// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Presentation helpers: list entries, map popups and markers.
//!
//! Everything here reads workouts through their accessors only.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde::Serialize;

use crate::models::{Coords, Workout, WorkoutKind};

/// Default map zoom when centering on a workout.
pub const DEFAULT_ZOOM_LEVEL: u8 = 13;

/// Where the map should move when a list entry is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coords,
    pub zoom: u8,
}

/// Popup shown on a workout's map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    pub content: String,
    pub class_name: String,
}

pub fn map_view(workout: &Workout, zoom: u8) -> MapView {
    MapView {
        center: workout.coords(),
        zoom,
    }
}

pub fn popup(workout: &Workout) -> Popup {
    Popup {
        content: format!("{} {}", workout.kind().icon(), workout.label()),
        class_name: format!("{}-popup", workout.kind()),
    }
}

/// Render one list entry.
pub fn workout_html(workout: &Workout) -> String {
    let kind = workout.kind();
    let (metric_unit, variant_icon, variant_unit) = match kind {
        WorkoutKind::Running => ("min/km", "🦶🏼", "spm"),
        WorkoutKind::Cycling => ("km/h", "⛰", "m"),
    };

    let mut html = String::new();
    html.push_str(&format!(
        "<li class=\"workout {}\" data-id=\"{}\">\n",
        kind,
        escape_html(workout.id())
    ));
    html.push_str(&format!(
        "  <h2 class=\"workout__title\">{}</h2>\n",
        escape_html(workout.label())
    ));
    html.push_str(&detail_html(kind.icon(), &workout.distance().to_string(), "km"));
    html.push_str(&detail_html("⏱", &workout.duration().to_string(), "min"));
    html.push_str(&detail_html("⚡️", &format!("{:.1}", workout.metric()), metric_unit));
    html.push_str(&detail_html(
        variant_icon,
        &workout.variant_value().to_string(),
        variant_unit,
    ));
    html.push_str("</li>\n");
    html
}

/// Render list entries for all workouts, in collection order.
pub fn workout_list_html(workouts: &[Workout]) -> String {
    workouts.iter().map(workout_html).collect()
}

fn detail_html(icon: &str, value: &str, unit: &str) -> String {
    format!(
        "  <div class=\"workout__details\">\n    <span class=\"workout__icon\">{icon}</span>\n    <span class=\"workout__value\">{value}</span>\n    <span class=\"workout__unit\">{unit}</span>\n  </div>\n"
    )
}

/// Map markers as a GeoJSON feature collection of points.
pub fn markers(workouts: &[Workout]) -> FeatureCollection {
    let features = workouts
        .iter()
        .map(|workout| {
            let point: geo::Point<f64> = workout.coords().into();
            let popup = popup(workout);

            let mut properties = JsonObject::new();
            properties.insert("id".to_string(), workout.id().into());
            properties.insert("type".to_string(), workout.kind().as_str().into());
            properties.insert("label".to_string(), workout.label().into());
            properties.insert("popup".to_string(), popup.content.into());
            properties.insert("className".to_string(), popup.class_name.into());

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&point))),
                id: Some(geojson::feature::Id::String(workout.id().to_string())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewWorkout;
    use chrono::{TimeZone, Utc};

    fn workout(kind: WorkoutKind, distance: f64, duration: f64, metric: f64) -> Workout {
        let input = NewWorkout::new(kind, Coords::new(37.4, -122.1), distance, duration, metric)
            .validate()
            .unwrap();
        let created_at = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
        Workout::new("0123456789".to_string(), created_at, &input)
    }

    #[test]
    fn test_running_html() {
        let html = workout_html(&workout(WorkoutKind::Running, 5.0, 27.0, 180.0));

        assert!(html.starts_with("<li class=\"workout running\" data-id=\"0123456789\">"));
        assert!(html.contains("<h2 class=\"workout__title\">Running on March</h2>"));
        assert!(html.contains("<span class=\"workout__value\">5</span>"));
        assert!(html.contains("<span class=\"workout__value\">5.4</span>"));
        assert!(html.contains("min/km"));
        assert!(html.contains("<span class=\"workout__value\">180</span>"));
        assert!(html.contains("spm"));
    }

    #[test]
    fn test_cycling_html() {
        let html = workout_html(&workout(WorkoutKind::Cycling, 15.0, 45.0, 200.0));

        assert!(html.contains("workout cycling"));
        assert!(html.contains("<span class=\"workout__value\">20.0</span>"));
        assert!(html.contains("km/h"));
        assert!(html.contains("⛰"));
    }

    #[test]
    fn test_html_escapes_stored_text() {
        let json = r#"{"id":"\"><script>","date":"2024-01-02T03:04:05Z","coords":[1.0,2.0],
            "distance":1.0,"duration":1.0,"description":"<b>x</b>",
            "type":"running","cadence":1.0,"pace":1.0}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();

        let html = workout_html(&workout);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    }

    #[test]
    fn test_popup_and_view() {
        let w = workout(WorkoutKind::Cycling, 15.0, 45.0, 200.0);

        let p = popup(&w);
        assert_eq!(p.content, "🚴 Cycling on March");
        assert_eq!(p.class_name, "cycling-popup");

        let view = map_view(&w, DEFAULT_ZOOM_LEVEL);
        assert_eq!(view.center, Coords::new(37.4, -122.1));
        assert_eq!(view.zoom, 13);
    }

    #[test]
    fn test_markers_are_lng_lat_points() {
        let collection = markers(&[workout(WorkoutKind::Running, 5.0, 25.0, 180.0)]);
        assert_eq!(collection.features.len(), 1);

        let value = serde_json::to_value(&collection).unwrap();
        let feature = &value["features"][0];
        assert_eq!(feature["geometry"]["type"], "Point");
        assert_eq!(feature["geometry"]["coordinates"], serde_json::json!([-122.1, 37.4]));
        assert_eq!(feature["properties"]["className"], "running-popup");
        assert_eq!(feature["properties"]["label"], "Running on March");
    }
}
