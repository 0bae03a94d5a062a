//! Core domain types for the Waymark workout log.
//!
//! A workout is an immutable value record: map coordinates, user-entered
//! distance and duration, a kind-specific extra field, and two derived
//! attributes (metric and description) computed once at construction.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A latitude/longitude pair captured from a map click
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Workout variant with its kind-specific field
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkoutKind {
    Running { cadence_spm: f64 },
    /// Elevation gain is sign-unconstrained: net descent is legal
    Cycling { elevation_gain_m: f64 },
}

impl WorkoutKind {
    /// Capitalized kind name, used in descriptions and marker labels
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running { .. } => "Running",
            WorkoutKind::Cycling { .. } => "Cycling",
        }
    }
}

/// Primary fields of a workout, the shape persisted to disk.
///
/// Derived attributes (metric, description) are deliberately absent: they are
/// recomputed from these fields when the record is rebuilt, so a corrupt
/// derived value can never survive a reload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    #[serde(flatten)]
    pub kind: WorkoutKind,
}

/// A recorded exercise activity
///
/// Immutable after construction. `metric` is pace (min/km) for running or
/// speed (km/h) for cycling; `None` when the divisor is zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Workout {
    id: Uuid,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    kind: WorkoutKind,
    metric: Option<f64>,
    description: String,
}

impl Workout {
    /// Create a running workout. Inputs must already be validated
    /// (finite, non-negative).
    pub fn running(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Self {
        Self::from_parts(
            Uuid::new_v4(),
            Utc::now(),
            coordinates,
            distance_km,
            duration_min,
            WorkoutKind::Running { cadence_spm },
        )
    }

    /// Create a cycling workout. Distance and duration must already be
    /// validated; elevation gain may be negative.
    pub fn cycling(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        Self::from_parts(
            Uuid::new_v4(),
            Utc::now(),
            coordinates,
            distance_km,
            duration_min,
            WorkoutKind::Cycling { elevation_gain_m },
        )
    }

    /// Rebuild a workout from its persisted primary fields, recomputing
    /// derived attributes.
    pub fn from_record(record: WorkoutRecord) -> Self {
        Self::from_parts(
            record.id,
            record.created_at,
            record.coordinates,
            record.distance_km,
            record.duration_min,
            record.kind,
        )
    }

    /// Primary fields of this workout, for persistence
    pub fn to_record(&self) -> WorkoutRecord {
        WorkoutRecord {
            id: self.id,
            created_at: self.created_at,
            coordinates: self.coordinates,
            distance_km: self.distance_km,
            duration_min: self.duration_min,
            kind: self.kind.clone(),
        }
    }

    fn from_parts(
        id: Uuid,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        kind: WorkoutKind,
    ) -> Self {
        let metric = match kind {
            // min / km; undefined for a zero-distance entry
            WorkoutKind::Running { .. } => {
                (distance_km > 0.0).then(|| duration_min / distance_km)
            }
            // km / h; undefined for a zero-duration entry
            WorkoutKind::Cycling { .. } => {
                (duration_min > 0.0).then(|| distance_km / (duration_min / 60.0))
            }
        };

        let description = format!(
            "{} on {} {}",
            kind.label(),
            created_at.format("%B"),
            created_at.day()
        );

        Self {
            id,
            created_at,
            coordinates,
            distance_km,
            duration_min,
            kind,
            metric,
            description,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    /// Pace (min/km) for running, speed (km/h) for cycling.
    /// `None` when the defining divisor was zero.
    pub fn metric(&self) -> Option<f64> {
        self.metric
    }

    /// Human-readable label, e.g. "Running on August 28"
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metric = match self.metric {
            Some(value) => format!("{value:.1}"),
            None => "--".into(),
        };

        match self.kind {
            WorkoutKind::Running { cadence_spm } => write!(
                f,
                "{} | {} KM | {} MIN | {} MIN/KM | {} SPM",
                self.description, self.distance_km, self.duration_min, metric, cadence_spm
            ),
            WorkoutKind::Cycling { elevation_gain_m } => write!(
                f,
                "{} | {} KM | {} MIN | {} KM/H | {} M",
                self.description, self.distance_km, self.duration_min, metric, elevation_gain_m
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_pace_formula() {
        let workout = Workout::running(Coordinates::new(40.0, -73.0), 5.0, 25.0, 170.0);

        let pace = workout.metric().expect("pace should be defined");
        assert!((pace - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_cycling_speed_formula() {
        let workout = Workout::cycling(Coordinates::new(48.2, 16.4), 30.0, 90.0, 250.0);

        let speed = workout.metric().expect("speed should be defined");
        assert!((speed - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_distance_pace_is_undefined() {
        let workout = Workout::running(Coordinates::new(0.0, 0.0), 0.0, 25.0, 170.0);
        assert_eq!(workout.metric(), None);
    }

    #[test]
    fn test_zero_duration_speed_is_undefined() {
        let workout = Workout::cycling(Coordinates::new(0.0, 0.0), 10.0, 0.0, 50.0);
        assert_eq!(workout.metric(), None);
    }

    #[test]
    fn test_description_format() {
        let workout = Workout::running(Coordinates::new(40.0, -73.0), 5.0, 25.0, 170.0);

        let expected = format!(
            "Running on {} {}",
            workout.created_at().format("%B"),
            workout.created_at().day()
        );
        assert_eq!(workout.description(), expected);
    }

    #[test]
    fn test_cycling_description_capitalized() {
        let workout = Workout::cycling(Coordinates::new(40.0, -73.0), 30.0, 90.0, 250.0);
        assert!(workout.description().starts_with("Cycling on "));
    }

    #[test]
    fn test_negative_elevation_is_preserved() {
        let workout = Workout::cycling(Coordinates::new(46.5, 11.3), 42.0, 80.0, -320.0);

        match workout.kind() {
            WorkoutKind::Cycling { elevation_gain_m } => {
                assert!((elevation_gain_m + 320.0).abs() < 1e-9)
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_record_round_trip_recomputes_derived_fields() {
        let workout = Workout::running(Coordinates::new(40.0, -73.0), 5.0, 25.0, 170.0);

        let json = serde_json::to_string(&workout.to_record()).unwrap();
        let record: WorkoutRecord = serde_json::from_str(&json).unwrap();
        let restored = Workout::from_record(record);

        assert_eq!(restored, workout);
    }

    #[test]
    fn test_record_json_is_tagged_by_kind() {
        let workout = Workout::cycling(Coordinates::new(40.0, -73.0), 30.0, 90.0, 250.0);

        let json = serde_json::to_string(&workout.to_record()).unwrap();
        assert!(json.contains("\"type\":\"cycling\""));
        assert!(json.contains("elevation_gain_m"));
        // derived fields never hit the wire
        assert!(!json.contains("description"));
    }

    #[test]
    fn test_display_renders_metric_with_one_decimal() {
        let workout = Workout::running(Coordinates::new(40.0, -73.0), 4.0, 22.0, 168.0);
        let line = workout.to_string();

        assert!(line.contains("5.5 MIN/KM"), "got: {line}");
        assert!(line.contains("168 SPM"), "got: {line}");
    }

    #[test]
    fn test_display_renders_sentinel_for_undefined_metric() {
        let workout = Workout::running(Coordinates::new(0.0, 0.0), 0.0, 25.0, 170.0);
        assert!(workout.to_string().contains("-- MIN/KM"));
    }
}
