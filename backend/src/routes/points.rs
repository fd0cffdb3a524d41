use serde::{Deserialize, Serialize};

/// A geo-tagged row: valid coordinates plus the join key parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub entity_key: String,
    pub year: String,
}

/// A geo point that found a positive yield under the same composite key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedPoint {
    pub lat: f64,
    pub lon: f64,
    pub entity_key: String,
    pub year: String,
    #[serde(rename = "yield")]
    pub yield_value: f64,
}

impl JoinedPoint {
    pub fn from_geo(point: GeoPoint, yield_value: f64) -> Self {
        Self {
            lat: point.lat,
            lon: point.lon,
            entity_key: point.entity_key,
            year: point.year,
            yield_value,
        }
    }
}

/// Joined points endpoint path.
pub const GET_POINTS: &str = "/points";
/// Unjoined markers endpoint path.
pub const GET_MARKERS: &str = "/markers";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_point_serializes_yield_key() {
        let point = JoinedPoint {
            lat: 55.0,
            lon: 37.0,
            entity_key: "Агро".to_string(),
            year: "2023".to_string(),
            yield_value: 41.5,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["yield"], 41.5);
        assert_eq!(json["entity_key"], "Агро");
    }

    #[test]
    fn test_from_geo_keeps_key() {
        let geo = GeoPoint {
            lat: 1.0,
            lon: 2.0,
            entity_key: "A".to_string(),
            year: "2024".to_string(),
        };
        let joined = JoinedPoint::from_geo(geo, 30.0);
        assert_eq!(joined.entity_key, "A");
        assert_eq!(joined.year, "2024");
        assert_eq!(joined.yield_value, 30.0);
    }
}
