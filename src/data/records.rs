//! Typed records normalized from raw payload sections
//!
//! Each record type reads its raw fields through [`RawRecord`]. Malformed
//! values never fail here: floats become NaN, integers become `None`, and
//! missing nested arrays read as empty.

use crate::{
    core::{config::CoercionPolicy, geo::LatLng},
    data::{
        coerce::{parse_float, parse_int, to_text},
        payload::elements,
    },
    MapError, Result,
};
use serde_json::{Map, Value};

/// Field view over one raw record. Records that are not JSON objects behave
/// as if every field were missing.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> RawRecord<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            fields: value.as_object(),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.and_then(|fields| fields.get(key))
    }

    pub fn float(&self, key: &str) -> f64 {
        parse_float(self.get(key))
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        parse_int(self.get(key))
    }

    pub fn text(&self, key: &str) -> String {
        to_text(self.get(key))
    }

}

/// A record type that can be read from a raw payload element
pub trait FromRaw: Sized {
    fn from_raw(raw: RawRecord<'_>) -> Self;

    fn position(&self) -> LatLng;

    /// Numeric fields the map needs finite, by raw name
    fn non_finite_fields(&self) -> Vec<&'static str> {
        let position = self.position();
        coordinate_fields(position.lat, position.lng)
    }
}

/// A dead-zone point, or one point of an itinerary segment or polyline
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePoint {
    pub lat: f64,
    pub lon: f64,
    pub dept: Option<i64>,
    pub id: Option<i64>,
}

impl FromRaw for RoutePoint {
    fn from_raw(raw: RawRecord<'_>) -> Self {
        Self {
            lat: raw.float("lat"),
            lon: raw.float("lon"),
            dept: raw.int("dept"),
            id: raw.int("id"),
        }
    }

    fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }
}

/// A cell antenna with its coverage radii (meters)
#[derive(Debug, Clone, PartialEq)]
pub struct Antenna {
    pub lat: f64,
    pub lon: f64,
    pub dept: Option<i64>,
    pub id: Option<i64>,
    pub r_moy_min: f64,
    pub r_moy_max: f64,
    /// Radius of the drawn coverage circle
    pub r_utilise: f64,
    pub operateur: String,
}

impl FromRaw for Antenna {
    fn from_raw(raw: RawRecord<'_>) -> Self {
        Self {
            lat: raw.float("lat"),
            lon: raw.float("lon"),
            dept: raw.int("dept"),
            id: raw.int("id"),
            r_moy_min: raw.float("rayon_moy_min"),
            r_moy_max: raw.float("rayon_moy_max"),
            r_utilise: raw.float("rayon_utilise"),
            operateur: raw.text("operateur"),
        }
    }

    fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }

    fn non_finite_fields(&self) -> Vec<&'static str> {
        let mut fields = coordinate_fields(self.lat, self.lon);
        if !self.r_utilise.is_finite() {
            fields.push("rayon_utilise");
        }
        fields
    }
}

/// A Wi-Fi relay point with its coverage radius (meters)
#[derive(Debug, Clone, PartialEq)]
pub struct UbrPoint {
    pub lat: f64,
    pub lon: f64,
    pub r_utilise: f64,
    pub etat: String,
}

impl FromRaw for UbrPoint {
    fn from_raw(raw: RawRecord<'_>) -> Self {
        Self {
            lat: raw.float("lat"),
            lon: raw.float("lon"),
            r_utilise: raw.float("rayon"),
            etat: raw.text("etat"),
        }
    }

    fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }

    fn non_finite_fields(&self) -> Vec<&'static str> {
        let mut fields = coordinate_fields(self.lat, self.lon);
        if !self.r_utilise.is_finite() {
            fields.push("rayon");
        }
        fields
    }
}

/// One entry of a flat antenna file
#[derive(Debug, Clone, PartialEq)]
pub struct AntennaFileRecord {
    pub lat: f64,
    pub lon: f64,
    pub dept: Option<i64>,
    pub sup_id: Option<i64>,
    pub operateur: String,
}

impl FromRaw for AntennaFileRecord {
    fn from_raw(raw: RawRecord<'_>) -> Self {
        Self {
            lat: raw.float("lat"),
            lon: raw.float("lon"),
            dept: raw.int("dept"),
            sup_id: raw.int("sup_id"),
            operateur: raw.text("operateur"),
        }
    }

    fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }
}

fn coordinate_fields(lat: f64, lon: f64) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if !lat.is_finite() {
        fields.push("lat");
    }
    if !lon.is_finite() {
        fields.push("lon");
    }
    fields
}

/// Normalizes every element of a flat section.
pub fn normalize_all<T: FromRaw>(section: Option<&Value>) -> Vec<T> {
    elements(section)
        .iter()
        .map(|value| T::from_raw(RawRecord::new(value)))
        .collect()
}

/// Normalizes a section made of nested arrays (segments of points).
pub fn normalize_nested<T: FromRaw>(section: Option<&Value>) -> Vec<Vec<T>> {
    elements(section)
        .iter()
        .map(|inner| normalize_all(Some(inner)))
        .collect()
}

/// Applies the coercion policy to normalized records of `section`.
///
/// Lenient mode only reports non-finite fields to the log; strict mode turns
/// the first one into an error.
pub fn enforce<T: FromRaw>(records: &[T], policy: CoercionPolicy, section: &str) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        let fields = record.non_finite_fields();
        if fields.is_empty() {
            continue;
        }
        match policy {
            CoercionPolicy::Lenient => {
                log::warn!(
                    "{section}[{index}]: non-numeric {} rendered as NaN",
                    fields.join(", ")
                );
            }
            CoercionPolicy::Strict => {
                return Err(MapError::InvalidCoordinates(format!(
                    "{section}[{index}]: non-numeric {}",
                    fields.join(", ")
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_antenna_from_strings() {
        let raw = json!({
            "lat": "48.1", "lon": "2.3", "id": "7", "dept": "51",
            "rayon_moy_min": "100", "rayon_moy_max": "900",
            "rayon_utilise": "500", "operateur": "X"
        });
        let antenna = Antenna::from_raw(RawRecord::new(&raw));

        assert_eq!(antenna.lat, 48.1);
        assert_eq!(antenna.lon, 2.3);
        assert_eq!(antenna.id, Some(7));
        assert_eq!(antenna.dept, Some(51));
        assert_eq!(antenna.r_moy_min, 100.0);
        assert_eq!(antenna.r_moy_max, 900.0);
        assert_eq!(antenna.r_utilise, 500.0);
        assert_eq!(antenna.operateur, "X");
        assert!(antenna.non_finite_fields().is_empty());
    }

    #[test]
    fn test_malformed_fields_propagate_nan() {
        let raw = json!({"lat": "n/a", "lon": 2.3, "rayon": "wide"});
        let ubr = UbrPoint::from_raw(RawRecord::new(&raw));

        assert!(ubr.lat.is_nan());
        assert_eq!(ubr.lon, 2.3);
        assert_eq!(ubr.etat, "undefined");
        assert_eq!(ubr.non_finite_fields(), vec!["lat", "rayon"]);
    }

    #[test]
    fn test_non_object_records() {
        let point = RoutePoint::from_raw(RawRecord::new(&json!(null)));
        assert!(point.lat.is_nan());
        assert!(point.lon.is_nan());
        assert_eq!(point.id, None);
    }

    #[test]
    fn test_raw_field_accessors() {
        let raw = json!({"lat": "1.5x", "dept": "08", "operateur": null});
        let record = RawRecord::new(&raw);

        assert_eq!(record.float("lat"), 1.5);
        assert_eq!(record.int("dept"), Some(8));
        assert_eq!(record.text("operateur"), "null");
        assert!(record.float("lon").is_nan());
    }

    #[test]
    fn test_nested_sections_tolerate_missing_arrays() {
        let section = json!([
            [{"lat": 1, "lon": 2}, {"lat": 3, "lon": 4}],
            null,
            "junk",
            []
        ]);
        let segments: Vec<Vec<RoutePoint>> = normalize_nested(Some(&section));

        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].len(), 2);
        assert!(segments[1].is_empty());
        assert!(segments[2].is_empty());
        assert!(segments[3].is_empty());

        assert!(normalize_nested::<RoutePoint>(None).is_empty());
        assert!(normalize_all::<RoutePoint>(Some(&json!(42))).is_empty());
    }

    #[test]
    fn test_enforce_policy() {
        let records = vec![
            RoutePoint { lat: 1.0, lon: 2.0, dept: None, id: None },
            RoutePoint { lat: f64::NAN, lon: 2.0, dept: None, id: None },
        ];

        assert!(enforce(&records, CoercionPolicy::Lenient, "dead_zone").is_ok());
        let err = enforce(&records, CoercionPolicy::Strict, "dead_zone").unwrap_err();
        assert!(matches!(err, MapError::InvalidCoordinates(msg) if msg == "dead_zone[1]: non-numeric lat"));
    }
}
