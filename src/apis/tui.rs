use crate::config::SourceConfig;
use crate::constants::TUI_API;
use crate::error::{Result, ScraperError};
use crate::schedule::{DaySchedule, WeekSchedule};
use crate::types::{NormalizedRecord, SourceRequest, StoreApi};
use serde::Deserialize;
use tracing::{info, instrument};

/// Travel agency office list API.
pub struct TuiCrawler {
    source: SourceConfig,
}

impl TuiCrawler {
    pub fn new(source: SourceConfig) -> Self {
        Self { source }
    }
}

/// Raw response from the office list endpoint.
#[derive(Debug, Deserialize)]
pub struct OfficeList {
    pub offices: Vec<Office>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Office {
    pub address: String,
    pub latitude: Coordinate,
    pub longitude: Coordinate,
    pub name: String,
    pub phones: Vec<OfficePhone>,
    pub hours_of_operation: HoursOfOperation,
}

/// The API has shipped coordinates both as numbers and as strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub struct OfficePhone {
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct HoursOfOperation {
    pub workdays: OfficeDay,
    #[serde(default)]
    pub saturday: Option<OfficeDay>,
    #[serde(default)]
    pub sunday: Option<OfficeDay>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeDay {
    #[serde(default)]
    pub start_str: Option<String>,
    #[serde(default)]
    pub end_str: Option<String>,
    #[serde(default)]
    pub is_day_off: Option<bool>,
}

impl Coordinate {
    fn value(&self, field: &str) -> Result<f64> {
        let value = match self {
            Coordinate::Number(n) => *n,
            Coordinate::Text(s) => s
                .trim()
                .parse()
                .map_err(|e| ScraperError::Parse(format!("Failed to parse {field} '{s}': {e}")))?,
        };
        // "NaN" and "inf" parse fine but would be written out as null
        if !value.is_finite() {
            return Err(ScraperError::Parse(format!("{field} is not a finite number: {value}")));
        }
        Ok(value)
    }
}

impl From<OfficeDay> for DaySchedule {
    fn from(day: OfficeDay) -> Self {
        DaySchedule {
            start_time: day.start_str,
            end_time: day.end_str,
            is_day_off: day.is_day_off.unwrap_or(false),
        }
    }
}

impl From<HoursOfOperation> for WeekSchedule {
    fn from(hours: HoursOfOperation) -> Self {
        WeekSchedule {
            workdays: hours.workdays.into(),
            saturday: hours.saturday.map(Into::into),
            sunday: hours.sunday.map(Into::into),
        }
    }
}

impl Office {
    pub fn into_record(self) -> Result<NormalizedRecord> {
        let coordinates = (
            self.latitude.value("latitude")?,
            self.longitude.value("longitude")?,
        );
        let phones = self
            .phones
            .into_iter()
            .map(|p| p.phone.trim().to_string())
            .collect();
        let working_hours = WeekSchedule::from(self.hours_of_operation).working_hours();

        Ok(NormalizedRecord {
            address: self.address,
            coordinates,
            name: self.name,
            phones,
            working_hours,
        })
    }
}

impl StoreApi for TuiCrawler {
    fn api_name(&self) -> &'static str {
        TUI_API
    }

    fn request(&self) -> SourceRequest {
        SourceRequest {
            url: self.source.url.clone(),
            query: self.source.query.clone(),
            headers: Vec::new(),
        }
    }

    #[instrument(skip(self, payload), fields(bytes = payload.len()))]
    fn normalize(&self, payload: &[u8]) -> Result<Vec<NormalizedRecord>> {
        let list: OfficeList = serde_json::from_slice(payload)?;
        let records = list
            .offices
            .into_iter()
            .map(Office::into_record)
            .collect::<Result<Vec<_>>>()?;

        info!("Normalized {} offices from {}", records.len(), TUI_API);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn crawler() -> TuiCrawler {
        TuiCrawler::new(SourceConfig {
            url: "http://localhost/api/office/list".into(),
            query: vec![("cityId".into(), "1".into())],
        })
    }

    fn sample_office() -> serde_json::Value {
        json!({
            "address": "Москва, ул. Тверская, д. 7",
            "latitude": 55.7586,
            "longitude": 37.6124,
            "name": "TUI на Тверской",
            "phones": [
                { "phone": " +7 (495) 111-22-33 " },
                { "phone": "\t8 800 100-00-00\n" }
            ],
            "hoursOfOperation": {
                "workdays": { "startStr": "09:00", "endStr": "21:00", "isDayOff": false },
                "saturday": { "startStr": "10:00", "endStr": "20:00", "isDayOff": false },
                "sunday": { "startStr": "10:00", "endStr": "20:00", "isDayOff": false }
            }
        })
    }

    fn normalize(payload: serde_json::Value) -> Result<Vec<NormalizedRecord>> {
        crawler().normalize(&serde_json::to_vec(&payload).unwrap())
    }

    #[test]
    fn test_tui_api_name_and_request() {
        let crawler = crawler();
        assert_eq!(crawler.api_name(), "tui");
        let request = crawler.request();
        assert_eq!(request.url, "http://localhost/api/office/list");
        assert_eq!(request.query, vec![("cityId".to_string(), "1".to_string())]);
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_normalize_sample_office() {
        let records = normalize(json!({ "offices": [sample_office()] })).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.address, "Москва, ул. Тверская, д. 7");
        assert_eq!(record.coordinates, (55.7586, 37.6124));
        assert_eq!(record.name, "TUI на Тверской");
        assert_eq!(record.phones, vec!["+7 (495) 111-22-33", "8 800 100-00-00"]);
        assert_eq!(
            record.working_hours,
            vec!["пн - пт с 09:00 до 21:00", "сб - вс с 10:00 до 20:00"]
        );
    }

    #[test]
    fn test_missing_weekend_groups_are_closed() {
        let mut office = sample_office();
        let hours = office["hoursOfOperation"].as_object_mut().unwrap();
        hours.remove("saturday");
        hours.insert("sunday".into(), serde_json::Value::Null);

        let records = normalize(json!({ "offices": [office] })).unwrap();
        assert_eq!(records[0].working_hours, vec!["пн - пт с 09:00 до 21:00"]);
    }

    #[test]
    fn test_null_times_degrade_to_closed() {
        let mut office = sample_office();
        office["hoursOfOperation"]["workdays"] =
            json!({ "startStr": null, "endStr": null, "isDayOff": null });

        let records = normalize(json!({ "offices": [office] })).unwrap();
        assert_eq!(records[0].working_hours, vec!["сб - вс с 10:00 до 20:00"]);
    }

    #[test]
    fn test_string_coordinates_accepted() {
        let mut office = sample_office();
        office["latitude"] = json!("55.7586");
        office["longitude"] = json!(" 37.6124");

        let records = normalize(json!({ "offices": [office] })).unwrap();
        assert_eq!(records[0].coordinates, (55.7586, 37.6124));
    }

    #[test]
    fn test_garbage_coordinate_fails() {
        let mut office = sample_office();
        office["longitude"] = json!("east");
        let err = normalize(json!({ "offices": [office] })).unwrap_err();
        assert!(matches!(err, ScraperError::Parse(_)));
    }

    #[test]
    fn test_non_finite_coordinate_fails() {
        for (lat, lon) in [("NaN", "37.6"), ("55.7", "inf"), ("-Infinity", "37.6")] {
            let mut office = sample_office();
            office["latitude"] = json!(lat);
            office["longitude"] = json!(lon);
            let err = normalize(json!({ "offices": [office] })).unwrap_err();
            assert!(matches!(err, ScraperError::Parse(_)), "{lat}, {lon}");
        }

        let office = Office {
            address: String::new(),
            latitude: Coordinate::Number(f64::NAN),
            longitude: Coordinate::Number(37.6),
            name: String::new(),
            phones: Vec::new(),
            hours_of_operation: HoursOfOperation {
                workdays: OfficeDay::default(),
                saturday: None,
                sunday: None,
            },
        };
        assert!(matches!(office.into_record().unwrap_err(), ScraperError::Parse(_)));
    }

    #[test]
    fn test_missing_required_field_fails() {
        for field in ["address", "latitude", "name", "phones", "hoursOfOperation"] {
            let mut office = sample_office();
            office.as_object_mut().unwrap().remove(field);
            let err = normalize(json!({ "offices": [office] })).unwrap_err();
            assert!(matches!(err, ScraperError::Json(_)), "field {field}");
        }

        let mut office = sample_office();
        office["hoursOfOperation"]
            .as_object_mut()
            .unwrap()
            .remove("workdays");
        assert!(normalize(json!({ "offices": [office] })).is_err());
    }

    #[test]
    fn test_missing_offices_key_fails() {
        assert!(matches!(
            normalize(json!({ "items": [] })).unwrap_err(),
            ScraperError::Json(_)
        ));
    }

    #[test]
    fn test_empty_office_list() {
        assert!(normalize(json!({ "offices": [] })).unwrap().is_empty());
    }
}
