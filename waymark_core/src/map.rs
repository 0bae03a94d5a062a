//! Map adapter boundary.
//!
//! The session controller never inspects the map: it only places markers and
//! recenters the view through this trait. Console and recording
//! implementations are provided; real widget bindings live outside the core.

use crate::Coordinates;

/// Visual style for a workout marker, one per kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerStyle {
    Running,
    Cycling,
}

/// Capability surface the core requires from a mapping widget
pub trait MapAdapter {
    /// Render a marker; fire and forget
    fn place_marker(&mut self, coordinates: Coordinates, label: &str, style: MarkerStyle);

    /// Recenter the view on the given coordinates
    fn center_view(&mut self, coordinates: Coordinates, zoom: u8, animate: bool);
}

/// Map adapter that renders marker and view actions to stdout
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleMap;

impl MapAdapter for ConsoleMap {
    fn place_marker(&mut self, coordinates: Coordinates, label: &str, style: MarkerStyle) {
        let icon = match style {
            MarkerStyle::Running => "🏃",
            MarkerStyle::Cycling => "🚴",
        };
        println!("  {icon} {label} at {coordinates}");
    }

    fn center_view(&mut self, coordinates: Coordinates, zoom: u8, animate: bool) {
        if animate {
            println!("  → panning to {coordinates} (zoom {zoom})");
        } else {
            println!("  → view centered on {coordinates} (zoom {zoom})");
        }
    }
}

/// One recorded `place_marker` call
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedMarker {
    pub coordinates: Coordinates,
    pub label: String,
    pub style: MarkerStyle,
}

/// One recorded `center_view` call
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewChange {
    pub coordinates: Coordinates,
    pub zoom: u8,
    pub animate: bool,
}

/// Map adapter that records every call, for asserting on controller
/// side effects in tests
#[derive(Clone, Debug, Default)]
pub struct RecordingMap {
    pub markers: Vec<PlacedMarker>,
    pub view_changes: Vec<ViewChange>,
}

impl RecordingMap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapAdapter for RecordingMap {
    fn place_marker(&mut self, coordinates: Coordinates, label: &str, style: MarkerStyle) {
        self.markers.push(PlacedMarker {
            coordinates,
            label: label.to_string(),
            style,
        });
    }

    fn center_view(&mut self, coordinates: Coordinates, zoom: u8, animate: bool) {
        self.view_changes.push(ViewChange {
            coordinates,
            zoom,
            animate,
        });
    }
}
