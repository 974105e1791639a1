//! Re-shape a parsed product into forecast periods and the place directory

use tracing::debug;

use crate::document::{AreaNode, EntryNode, PeriodNode, ProductDocument};
use crate::models::{Area, ForecastPeriod};

/// Forecast periods for every area whose description equals `place_name`.
///
/// Matching is exact and case-sensitive. Periods of several matching areas
/// are concatenated in document order; no match yields an empty list.
#[must_use]
pub fn extract_forecast(document: &ProductDocument, place_name: &str) -> Vec<ForecastPeriod> {
    let forecast: Vec<ForecastPeriod> = document
        .areas()
        .iter()
        .filter(|area| area.description.as_deref() == Some(place_name))
        .flat_map(|area| area.periods.iter().map(period_record))
        .collect();

    debug!(
        "Extracted {} forecast period(s) for '{}'",
        forecast.len(),
        place_name
    );
    forecast
}

/// Every area of the first forecast block, in document order
#[must_use]
pub fn extract_places(document: &ProductDocument) -> Vec<Area> {
    let places: Vec<Area> = document.areas().iter().map(area_record).collect();
    debug!("Extracted {} place(s)", places.len());
    places
}

fn period_record(period: &PeriodNode) -> ForecastPeriod {
    let mut record = ForecastPeriod::new(
        period.index.clone().unwrap_or_default(),
        period.start_time_local.clone().unwrap_or_default(),
        period.end_time_local.clone().unwrap_or_default(),
    );

    // elements go last so they win over text entries of the same type
    merge_entries(&mut record, &period.text);
    merge_entries(&mut record, &period.element);
    record
}

fn merge_entries(record: &mut ForecastPeriod, entries: &[EntryNode]) {
    for entry in entries {
        if let Some(entry_type) = entry.entry_type.as_deref() {
            record.insert(entry_type, entry.value.clone());
        }
    }
}

fn area_record(area: &AreaNode) -> Area {
    Area {
        aac: area.aac.clone().unwrap_or_default(),
        description: area.description.clone().unwrap_or_default(),
        area_type: area.area_type.clone().unwrap_or_default(),
        parent_aac: area.parent_aac.clone().filter(|code| !code.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;
    use rstest::rstest;

    const PRODUCT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<product version="1.7">
    <forecast>
        <area aac="NSW_FA001" description="New South Wales" type="region">
            <forecast-period start-time-local="2024-05-01T05:00:00+10:00" end-time-local="2024-05-02T00:00:00+10:00" index="0">
                <text type="synoptic_situation">A high is moving east.</text>
            </forecast-period>
        </area>
        <area aac="NSW_PT131" description="Sydney" type="location" parent-aac="NSW_ME001">
            <forecast-period start-time-local="2024-05-01T05:00:00+10:00" end-time-local="2024-05-02T00:00:00+10:00" index="0">
                <element type="forecast_icon_code">3</element>
                <element type="air_temperature_maximum" units="Celsius">23</element>
                <text type="precis">Partly cloudy.</text>
                <text type="probability_of_precipitation">20%</text>
            </forecast-period>
            <forecast-period start-time-local="2024-05-02T00:00:00+10:00" end-time-local="2024-05-03T00:00:00+10:00" index="1">
                <element type="air_temperature_minimum" units="Celsius">12</element>
                <text type="precis">Shower or two.</text>
            </forecast-period>
        </area>
        <area aac="NSW_PT999" description="Empty Place" type="location" parent-aac=""/>
    </forecast>
    <forecast>
        <area aac="NSW_PT500" description="Second Block" type="location">
            <forecast-period index="0" start-time-local="x" end-time-local="y"/>
        </area>
    </forecast>
</product>"#;

    fn product() -> ProductDocument {
        parse_document(PRODUCT).unwrap()
    }

    #[test]
    fn test_forecast_for_matching_place() {
        let periods = extract_forecast(&product(), "Sydney");
        assert_eq!(periods.len(), 2);

        let first = &periods[0];
        assert_eq!(first.index, "0");
        assert_eq!(first.start_time_local, "2024-05-01T05:00:00+10:00");
        assert_eq!(first.get("precis"), Some("Partly cloudy."));
        assert_eq!(first.get("probability_of_precipitation"), Some("20%"));
        assert_eq!(first.get("forecast_icon_code"), Some("3"));
        assert_eq!(first.get("air_temperature_maximum"), Some("23"));

        let second = &periods[1];
        assert_eq!(second.index, "1");
        assert_eq!(second.get("air_temperature_minimum"), Some("12"));
    }

    #[rstest]
    #[case("Melbourne")]
    #[case("sydney")]
    #[case("Sydney ")]
    #[case("Empty Place")]
    #[case("Second Block")]
    fn test_forecast_without_periods_is_empty(#[case] place: &str) {
        assert!(extract_forecast(&product(), place).is_empty());
    }

    #[test]
    fn test_element_overwrites_text_of_same_type() {
        let document = parse_document(
            r#"<product><forecast>
                <area aac="A" description="Here" type="location">
                    <forecast-period index="0" start-time-local="s" end-time-local="e">
                        <element type="precis">From element</element>
                        <text type="precis">From text</text>
                    </forecast-period>
                </area>
            </forecast></product>"#,
        )
        .unwrap();

        let periods = extract_forecast(&document, "Here");
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].get("precis"), Some("From element"));
    }

    #[test]
    fn test_later_entry_of_same_type_wins() {
        let document = parse_document(
            r#"<product><forecast>
                <area aac="A" description="Here" type="location">
                    <forecast-period index="0">
                        <text type="precis">first</text>
                        <text type="precis">second</text>
                        <text>untyped</text>
                    </forecast-period>
                </area>
            </forecast></product>"#,
        )
        .unwrap();

        let periods = extract_forecast(&document, "Here");
        assert_eq!(periods[0].get("precis"), Some("second"));
        assert_eq!(periods[0].values.len(), 1);
        assert_eq!(periods[0].start_time_local, "");
    }

    #[test]
    fn test_duplicate_descriptions_concatenate() {
        let document = parse_document(
            r#"<product><forecast>
                <area aac="A1" description="Twin" type="location">
                    <forecast-period index="0"/>
                </area>
                <area aac="B" description="Other" type="location">
                    <forecast-period index="5"/>
                </area>
                <area aac="A2" description="Twin" type="location">
                    <forecast-period index="1"/>
                    <forecast-period index="2"/>
                </area>
            </forecast></product>"#,
        )
        .unwrap();

        let indexes: Vec<String> = extract_forecast(&document, "Twin")
            .into_iter()
            .map(|period| period.index)
            .collect();
        assert_eq!(indexes, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_places_in_document_order() {
        let places = extract_places(&product());
        let codes: Vec<&str> = places.iter().map(|place| place.aac.as_str()).collect();
        assert_eq!(codes, vec!["NSW_FA001", "NSW_PT131", "NSW_PT999"]);

        assert_eq!(places[0].area_type, "region");
        assert!(places[0].parent_aac.is_none());
        assert_eq!(places[1].parent_aac.as_deref(), Some("NSW_ME001"));
        assert!(places[2].parent_aac.is_none());
    }

    #[test]
    fn test_empty_document_yields_nothing() {
        let document = ProductDocument::default();
        assert!(extract_places(&document).is_empty());
        assert!(extract_forecast(&document, "Sydney").is_empty());
    }
}
