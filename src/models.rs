//! Application-level records produced from a forecast product

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ForecastError;

/// A named forecast zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub aac: String,
    pub description: String,
    #[serde(rename = "type")]
    pub area_type: String,
    /// Code of the enclosing area, only present when the document declares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_aac: Option<String>,
}

/// One forecast time window for an area
///
/// Values from the period's `text` and `element` entries are flattened into
/// the record next to the period attributes, keyed by each entry's declared
/// type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    pub index: String,
    pub start_time_local: String,
    pub end_time_local: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, String>,
}

impl ForecastPeriod {
    #[must_use]
    pub fn new(index: String, start_time_local: String, end_time_local: String) -> Self {
        Self {
            index,
            start_time_local,
            end_time_local,
            values: BTreeMap::new(),
        }
    }

    /// Set a value, replacing whatever was stored under the same key.
    ///
    /// Keys naming one of the period attributes overwrite that attribute so
    /// the flattened record never carries duplicate keys.
    pub fn insert(&mut self, key: &str, value: String) {
        match key {
            "index" => self.index = value,
            "start_time_local" => self.start_time_local = value,
            "end_time_local" => self.end_time_local = value,
            _ => {
                self.values.insert(key.to_string(), value);
            }
        }
    }

    /// Look up a value by its declared type
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "index" => Some(self.index.as_str()),
            "start_time_local" => Some(self.start_time_local.as_str()),
            "end_time_local" => Some(self.end_time_local.as_str()),
            _ => self.values.get(key).map(String::as_str),
        }
    }

    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.start_time_local).ok()
    }

    #[must_use]
    pub fn end_time(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.end_time_local).ok()
    }
}

/// How a request ended. Lets callers tell "nothing matched" apart from a
/// failed stage, since both leave the data collection empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Completed,
    TransferFailed {
        message: String,
    },
    ParseFailed {
        message: String,
    },
}

impl RequestStatus {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, RequestStatus::Completed)
    }
}

impl From<&ForecastError> for RequestStatus {
    fn from(err: &ForecastError) -> Self {
        match err {
            ForecastError::Parse { .. } => RequestStatus::ParseFailed {
                message: err.to_string(),
            },
            // everything else happens while the document is being fetched
            _ => RequestStatus::TransferFailed {
                message: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub xml_file_name: String,
    pub place_name: String,
    pub forecast: Vec<ForecastPeriod>,
    pub status: RequestStatus,
}

impl ForecastResult {
    #[must_use]
    pub fn new(xml_file_name: &str, place_name: &str) -> Self {
        Self {
            xml_file_name: xml_file_name.to_string(),
            place_name: place_name.to_string(),
            forecast: Vec::new(),
            status: RequestStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceListResult {
    pub xml_file_name: String,
    pub places: Vec<Area>,
    pub status: RequestStatus,
}

impl PlaceListResult {
    #[must_use]
    pub fn new(xml_file_name: &str) -> Self {
        Self {
            xml_file_name: xml_file_name.to_string(),
            places: Vec::new(),
            status: RequestStatus::Completed,
        }
    }
}
