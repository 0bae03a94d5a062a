//! Session controller: interaction state, validation, and orchestration.
//!
//! The controller owns the workout store and the map adapter handle. One
//! creation cycle is click → form submit: a map click captures coordinates
//! and opens the form, a valid submission constructs the workout, renders its
//! marker, and persists the whole store. Validation failures keep the form
//! open and touch nothing.

use crate::workout::{Coordinates, Workout, WorkoutKind};
use crate::{Error, InvalidInput, MapAdapter, MarkerStyle, Result, WorkoutStore};
use std::path::PathBuf;
use uuid::Uuid;

/// Interaction state for one click/submit cycle
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionState {
    /// No pending click
    Idle,
    /// A map click captured coordinates; the form is open
    AwaitingSubmit { coordinates: Coordinates },
}

/// Workout kind as selected in the form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindField {
    Running,
    Cycling,
}

/// Raw form input: kind plus numeric text fields.
///
/// `cadence` is read only for running, `elevation` only for cycling.
#[derive(Clone, Debug)]
pub struct WorkoutForm {
    pub kind: KindField,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// Owns the store and the map adapter; drives the interaction state machine
pub struct SessionController<M: MapAdapter> {
    store: WorkoutStore,
    map: M,
    state: SessionState,
    workouts_path: PathBuf,
    zoom_level: u8,
    map_ready: bool,
}

impl<M: MapAdapter> SessionController<M> {
    /// Load persisted workouts (empty on missing or corrupt state) and start
    /// idle. Markers are not rendered yet: the map is not ready until
    /// [`map_ready`](Self::map_ready) is called.
    pub fn open(map: M, workouts_path: impl Into<PathBuf>, zoom_level: u8) -> Result<Self> {
        let workouts_path = workouts_path.into();
        let store = WorkoutStore::load(&workouts_path)?;

        Ok(Self {
            store,
            map,
            state: SessionState::Idle,
            workouts_path,
            zoom_level,
            map_ready: false,
        })
    }

    /// Mark the map initialized: center the view on the resolved position and
    /// place one marker per restored workout.
    pub fn map_ready(&mut self, center: Coordinates) {
        self.map_ready = true;
        self.map.center_view(center, self.zoom_level, false);

        for workout in self.store.all() {
            self.map.place_marker(
                workout.coordinates(),
                workout.description(),
                marker_style(workout.kind()),
            );
        }

        tracing::debug!("Map ready, rendered {} restored markers", self.store.len());
    }

    /// A map click: capture coordinates and open the form. A click while a
    /// submission is already pending overwrites the pending coordinates.
    pub fn handle_map_click(&mut self, coordinates: Coordinates) -> Result<()> {
        if !self.map_ready {
            return Err(Error::LocationUnavailable);
        }

        self.state = SessionState::AwaitingSubmit { coordinates };
        tracing::debug!("Map clicked at {}", coordinates);
        Ok(())
    }

    /// Submit the form for the pending click.
    ///
    /// Validation order: every required field must parse to a finite number,
    /// then distance, duration, and (running only) cadence must be
    /// non-negative. On failure the state stays `AwaitingSubmit` and neither
    /// the store nor the persisted blob is touched.
    pub fn submit(&mut self, form: &WorkoutForm) -> Result<Workout> {
        let coordinates = match self.state {
            SessionState::AwaitingSubmit { coordinates } => coordinates,
            SessionState::Idle => return Err(Error::NoPendingLocation),
        };

        let distance = parse_field("distance", &form.distance)?;
        let duration = parse_field("duration", &form.duration)?;

        let workout = match form.kind {
            KindField::Running => {
                let cadence = parse_field("cadence", &form.cadence)?;
                reject_negative("distance", distance)?;
                reject_negative("duration", duration)?;
                reject_negative("cadence", cadence)?;
                Workout::running(coordinates, distance, duration, cadence)
            }
            KindField::Cycling => {
                // elevation sign is never validated: net descent is legal
                let elevation = parse_field("elevation", &form.elevation)?;
                reject_negative("distance", distance)?;
                reject_negative("duration", duration)?;
                Workout::cycling(coordinates, distance, duration, elevation)
            }
        };

        self.store.add(workout.clone());
        if self.map_ready {
            self.map.place_marker(
                workout.coordinates(),
                workout.description(),
                marker_style(workout.kind()),
            );
        }
        self.store.save(&self.workouts_path)?;
        self.state = SessionState::Idle;

        tracing::info!("Recorded workout {} ({})", workout.id(), workout.description());
        Ok(workout)
    }

    /// Recenter the view on a stored workout, animated. A lookup miss or a
    /// not-yet-ready map is a no-op; returns whether the view moved.
    pub fn focus_workout(&mut self, id: &Uuid) -> bool {
        if !self.map_ready {
            return false;
        }

        match self.store.find_by_id(id) {
            Some(workout) => {
                self.map
                    .center_view(workout.coordinates(), self.zoom_level, true);
                true
            }
            None => {
                tracing::warn!("No workout with id {}", id);
                false
            }
        }
    }

    /// Empty the store and erase the persisted blob
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear(&self.workouts_path)?;
        self.state = SessionState::Idle;
        tracing::info!("Cleared all workouts");
        Ok(())
    }

    pub fn workouts(&self) -> &[Workout] {
        self.store.all()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn map(&self) -> &M {
        &self.map
    }
}

fn marker_style(kind: &WorkoutKind) -> MarkerStyle {
    match kind {
        WorkoutKind::Running { .. } => MarkerStyle::Running,
        WorkoutKind::Cycling { .. } => MarkerStyle::Cycling,
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InvalidInput::NonNumeric { field }.into()),
    }
}

fn reject_negative(field: &'static str, value: f64) -> Result<()> {
    if value < 0.0 {
        return Err(InvalidInput::Negative { field }.into());
    }
    Ok(())
}
