use crate::{parse_stations, Error, StationRecord};
use serde::Serialize;
use std::str::FromStr;

/// All stations of one feed, in feed order.
///
/// Names are not unique in the feed. Lookups by name resolve to the first
/// station carrying that name; later stations with the same name are only
/// reachable by position.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Stations {
    records: Vec<StationRecord>,
}

impl Stations {
    pub fn new(records: Vec<StationRecord>) -> Stations {
        Stations { records }
    }

    pub fn parse(xml: &str) -> Result<Stations, Error> {
        Ok(Stations::new(parse_stations(xml)?))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StationRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[StationRecord] {
        &self.records
    }

    pub fn into_inner(self) -> Vec<StationRecord> {
        self.records
    }

    pub fn first(&self) -> Option<&StationRecord> {
        self.records.first()
    }

    /// Station names in feed order, duplicates and placeholders included.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    /// Index of the first station named exactly `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name == name)
    }

    /// The first station named exactly `name`.
    pub fn get(&self, name: &str) -> Option<&StationRecord> {
        self.position(name).map(|i| &self.records[i])
    }
}

impl FromStr for Stations {
    type Err = Error;

    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        Stations::parse(xml)
    }
}

impl<'a> IntoIterator for &'a Stations {
    type Item = &'a StationRecord;
    type IntoIter = std::slice::Iter<'a, StationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
