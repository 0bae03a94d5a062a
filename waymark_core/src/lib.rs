#![forbid(unsafe_code)]

//! Core domain model and interaction logic for the Waymark workout log.
//!
//! This crate provides:
//! - Domain types (workouts, coordinates, derived metrics)
//! - The ordered workout store and its persistence round-trip
//! - The map adapter boundary
//! - The session controller (click → form → workout state machine)

pub mod config;
pub mod error;
pub mod logging;
pub mod map;
pub mod session;
pub mod store;
pub mod workout;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, InvalidInput, Result};
pub use map::{ConsoleMap, MapAdapter, MarkerStyle, PlacedMarker, RecordingMap, ViewChange};
pub use session::{KindField, SessionController, SessionState, WorkoutForm};
pub use store::WorkoutStore;
pub use workout::{Coordinates, Workout, WorkoutKind, WorkoutRecord};
