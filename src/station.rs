use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Text stored in any field the feed did not provide for a station.
pub const PLACEHOLDER: &str = "NA";

/// Whether a station is accepting bikes. The feed may omit the status.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenStatus {
    #[default]
    #[serde(rename = "NA")]
    Unknown,

    #[serde(rename = "true")]
    Open,

    #[serde(rename = "false")]
    Closed,
}

impl OpenStatus {
    /// Interprets the raw `IsOpen` text of the feed. Anything present that is
    /// not "true" counts as closed.
    pub fn from_raw(text: &str) -> OpenStatus {
        if StationRecord::is_placeholder(text) {
            OpenStatus::Unknown
        } else if text.eq_ignore_ascii_case("true") {
            OpenStatus::Open
        } else {
            OpenStatus::Closed
        }
    }

    pub fn as_raw(&self) -> &'static str {
        match self {
            OpenStatus::Unknown => PLACEHOLDER,
            OpenStatus::Open => "true",
            OpenStatus::Closed => "false",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OpenStatus::Unknown => PLACEHOLDER,
            OpenStatus::Open => "OPEN",
            OpenStatus::Closed => "CLOSED",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    pub name: String,

    pub station_id: String,

    pub latitude: String,

    pub longitude: String,

    pub is_open: OpenStatus,

    pub bike_stands: String,

    pub available_bikes: String,

    pub last_update: String,
}

impl Default for StationRecord {
    fn default() -> Self {
        StationRecord {
            name: PLACEHOLDER.to_string(),
            station_id: PLACEHOLDER.to_string(),
            latitude: PLACEHOLDER.to_string(),
            longitude: PLACEHOLDER.to_string(),
            is_open: OpenStatus::Unknown,
            bike_stands: PLACEHOLDER.to_string(),
            available_bikes: PLACEHOLDER.to_string(),
            last_update: PLACEHOLDER.to_string(),
        }
    }
}

impl StationRecord {
    /// True if `text` is the placeholder for a value the feed did not provide.
    pub fn is_placeholder(text: &str) -> bool {
        text == PLACEHOLDER
    }

    /// Latitude and longitude in degrees, if both parse as numbers.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let latitude = self.latitude.trim().parse::<f64>().ok()?;
        let longitude = self.longitude.trim().parse::<f64>().ok()?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        Some((latitude, longitude))
    }

    /// The `LastUpdate` timestamp. The feed sends local time without an
    /// offset, sometimes with fractional seconds.
    pub fn last_updated(&self) -> Option<NaiveDateTime> {
        let text = self.last_update.trim();
        if let Ok(date) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|date| date.naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn default_is_all_placeholders() {
        let record = StationRecord::default();
        assert_eq!(record.name, "NA");
        assert_eq!(record.station_id, "NA");
        assert_eq!(record.latitude, "NA");
        assert_eq!(record.longitude, "NA");
        assert_eq!(record.is_open, OpenStatus::Unknown);
        assert_eq!(record.bike_stands, "NA");
        assert_eq!(record.available_bikes, "NA");
        assert_eq!(record.last_update, "NA");
    }

    #[test]
    fn open_status_from_raw() {
        assert_eq!(OpenStatus::from_raw("NA"), OpenStatus::Unknown);
        assert_eq!(OpenStatus::from_raw("true"), OpenStatus::Open);
        assert_eq!(OpenStatus::from_raw("True"), OpenStatus::Open);
        assert_eq!(OpenStatus::from_raw("false"), OpenStatus::Closed);
        assert_eq!(OpenStatus::from_raw("maybe"), OpenStatus::Closed);
        assert_eq!(OpenStatus::from_raw(" true "), OpenStatus::Closed);
    }

    #[test]
    fn placeholder_check() {
        let record = StationRecord::default();
        assert!(StationRecord::is_placeholder(&record.name));
        assert!(StationRecord::is_placeholder(record.is_open.as_raw()));
        assert!(!StationRecord::is_placeholder("Central"));
        assert!(!StationRecord::is_placeholder("na"));
    }

    #[test]
    fn open_status_labels() {
        assert_eq!(OpenStatus::Unknown.label(), "NA");
        assert_eq!(OpenStatus::Open.label(), "OPEN");
        assert_eq!(OpenStatus::Closed.label(), "CLOSED");
        assert_eq!(OpenStatus::Closed.as_raw(), "false");
    }

    #[test]
    fn serializes_with_feed_field_names() {
        let record = StationRecord {
            name: "Central".into(),
            is_open: OpenStatus::Open,
            ..StationRecord::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "Central");
        assert_eq!(json["stationId"], "NA");
        assert_eq!(json["isOpen"], "true");
        assert_eq!(json["availableBikes"], "NA");
        assert_eq!(json["lastUpdate"], "NA");
    }

    #[test]
    fn coordinates_need_both_numbers() {
        let mut record = StationRecord {
            latitude: "57.7".into(),
            longitude: "11.9".into(),
            ..StationRecord::default()
        };
        assert_eq!(record.coordinates(), Some((57.7, 11.9)));

        record.longitude = "NA".into();
        assert_eq!(record.coordinates(), None);
    }

    #[test]
    fn last_updated_formats() {
        let mut record = StationRecord {
            last_update: "2024-01-01T10:00:00".into(),
            ..StationRecord::default()
        };
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(record.last_updated(), Some(expected));

        record.last_update = "2016-03-21T10:18:54.557".into();
        let date = record.last_updated().unwrap();
        assert_eq!(date.second(), 54);
        assert_eq!(date.nanosecond(), 557_000_000);

        record.last_update = "2024-01-01T10:00:00+01:00".into();
        assert_eq!(record.last_updated(), Some(expected));

        record.last_update = "NA".into();
        assert_eq!(record.last_updated(), None);
    }
}
