//! Forecast product document parsing
//!
//! Deserialises the product XML into a tree shaped like the published
//! schema. Child collections default to empty and attributes are optional, so
//! a document missing parts of the tree still parses; deciding what is usable
//! is left to [`crate::extract`].

use quick_xml::de::from_str;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::{ForecastError, Result};

/// Root `<product>` element
#[derive(Debug, Default, Deserialize)]
pub struct ProductDocument {
    #[serde(default)]
    pub forecast: Vec<ForecastNode>,
}

/// `<forecast>` block holding the areas
#[derive(Debug, Default, Deserialize)]
pub struct ForecastNode {
    #[serde(default)]
    pub area: Vec<AreaNode>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AreaNode {
    #[serde(rename = "@aac")]
    pub aac: Option<String>,
    #[serde(rename = "@description")]
    pub description: Option<String>,
    #[serde(rename = "@type")]
    pub area_type: Option<String>,
    #[serde(rename = "@parent-aac")]
    pub parent_aac: Option<String>,
    #[serde(rename = "forecast-period", default)]
    pub periods: Vec<PeriodNode>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PeriodNode {
    #[serde(rename = "@index")]
    pub index: Option<String>,
    #[serde(rename = "@start-time-local")]
    pub start_time_local: Option<String>,
    #[serde(rename = "@end-time-local")]
    pub end_time_local: Option<String>,
    #[serde(rename = "@start-time-utc")]
    pub start_time_utc: Option<String>,
    #[serde(rename = "@end-time-utc")]
    pub end_time_utc: Option<String>,
    #[serde(default)]
    pub text: Vec<EntryNode>,
    #[serde(default)]
    pub element: Vec<EntryNode>,
}

/// A `<text>` or `<element>` value inside a forecast period
#[derive(Debug, Default, Deserialize)]
pub struct EntryNode {
    #[serde(rename = "@type")]
    pub entry_type: Option<String>,
    #[serde(rename = "@units")]
    pub units: Option<String>,
    #[serde(rename = "$text", default)]
    pub value: String,
}

impl ProductDocument {
    /// Areas of the first forecast block; later blocks are never examined
    #[must_use]
    pub fn areas(&self) -> &[AreaNode] {
        self.forecast
            .first()
            .map(|block| block.area.as_slice())
            .unwrap_or_default()
    }
}

/// Parse product XML content
pub fn parse_document(xml_content: &str) -> Result<ProductDocument> {
    debug!("Parsing forecast product XML ({} bytes)", xml_content.len());

    let document: ProductDocument = from_str(xml_content)
        .map_err(|e| ForecastError::parse(format!("Failed to parse forecast XML: {e}")))?;

    debug!(
        "Parsed {} forecast block(s), {} area(s) in the first",
        document.forecast.len(),
        document.areas().len()
    );
    Ok(document)
}

/// Read a downloaded document as UTF-8 and parse it
pub async fn load_document<P: AsRef<Path>>(xml_path: P) -> Result<ProductDocument> {
    let xml_path = xml_path.as_ref();
    info!("Loading forecast document from: {:?}", xml_path);

    let xml_content = tokio::fs::read_to_string(xml_path).await.map_err(|e| {
        ForecastError::parse(format!(
            "Failed to read forecast document {}: {e}",
            xml_path.display()
        ))
    })?;

    parse_document(&xml_content)
}
