//! Presentation of station records: the values shown for a selected station
//! and the selection state of a station picker.

use crate::{StationRecord, Stations};
use serde::Serialize;
use std::fmt;

/// The values displayed for one station, all as feed text except the status.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StationView {
    pub name: String,

    pub station_id: String,

    pub status: &'static str,

    pub bike_stands: String,

    pub available_bikes: String,

    pub position: String,

    pub last_update: String,
}

impl StationView {
    pub fn of(record: &StationRecord) -> StationView {
        StationView {
            name: record.name.clone(),
            station_id: record.station_id.clone(),
            status: record.is_open.label(),
            bike_stands: record.bike_stands.clone(),
            available_bikes: record.available_bikes.clone(),
            position: format!("{} - {}", record.latitude, record.longitude),
            last_update: record.last_update.clone(),
        }
    }
}

impl fmt::Display for StationView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "StationId: {}", self.station_id)?;
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "Number of bike stands: {}", self.bike_stands)?;
        writeln!(f, "Available bikes: {}", self.available_bikes)?;
        writeln!(f, "Latitude - Longitude: {}", self.position)?;
        write!(f, "Last updated: {}", self.last_update)
    }
}

/// What to display when `name` is selected. Duplicate names show the first
/// station carrying the name.
pub fn view_for(stations: &Stations, name: &str) -> Option<StationView> {
    stations.get(name).map(StationView::of)
}

/// A station picker over one feed. Starts on the first station.
pub struct Selector<'a> {
    stations: &'a Stations,
    selected: Option<usize>,
}

impl<'a> Selector<'a> {
    pub fn new(stations: &'a Stations) -> Selector<'a> {
        let selected = if stations.is_empty() { None } else { Some(0) };
        Selector { stations, selected }
    }

    /// Entries of the picker, in feed order.
    pub fn names(&self) -> Vec<&'a str> {
        self.stations.names()
    }

    /// Moves the selection to the first station named `name`. An unknown name
    /// leaves the selection unchanged and returns false.
    pub fn select(&mut self, name: &str) -> bool {
        match self.stations.position(name) {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }

    /// Moves the selection to the station at `index` in feed order.
    pub fn select_index(&mut self, index: usize) -> bool {
        if index < self.stations.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&'a StationRecord> {
        self.selected.map(|i| &self.stations.as_slice()[i])
    }

    pub fn view(&self) -> Option<StationView> {
        self.current().map(StationView::of)
    }
}
