use serde_json::Value;

use crate::error::PredictionError;
use crate::hazard::Coordinate;
use crate::normalize::RawPrediction;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Accept a click position only if both axes are finite and in range (bounds inclusive).
pub fn validate_coordinate(latitude: f64, longitude: f64) -> Result<Coordinate, PredictionError> {
    let lat_ok = latitude.is_finite() && (MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude);
    let lng_ok = longitude.is_finite() && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude);
    if !lat_ok || !lng_ok {
        return Err(PredictionError::InvalidCoordinate {
            latitude,
            longitude,
        });
    }
    Ok(Coordinate::new_unchecked(latitude, longitude))
}

/// Require a JSON object and classify it by the type of its `earthquake` field.
pub fn validate_response_shape(payload: Value) -> Result<RawPrediction, PredictionError> {
    let Value::Object(map) = payload else {
        return Err(PredictionError::MalformedResponse(format!(
            "expected object, got {}",
            json_type_name(&payload)
        )));
    };

    if matches!(map.get("earthquake"), Some(Value::Object(_))) {
        Ok(RawPrediction::Rich(map))
    } else {
        Ok(RawPrediction::Legacy(map))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rejects_out_of_range_and_nan() {
        assert!(validate_coordinate(91.0, 0.0).is_err());
        assert!(validate_coordinate(0.0, 181.0).is_err());
        assert!(validate_coordinate(f64::NAN, 0.0).is_err());
        assert!(validate_coordinate(0.0, f64::INFINITY).is_err());
        assert!(validate_coordinate(-90.5, 0.0).is_err());
    }

    #[test]
    fn accepts_bounds_inclusive() {
        assert!(validate_coordinate(90.0, 180.0).is_ok());
        assert!(validate_coordinate(-90.0, -180.0).is_ok());
    }

    #[test]
    fn formats_to_four_decimals() {
        let coord = validate_coordinate(20.5937, 78.9629).unwrap();
        assert_eq!(coord.display(), "20.5937, 78.9629");

        let coord = validate_coordinate(12.34, -5.0).unwrap();
        assert_eq!(coord.display(), "12.3400, -5.0000");
    }

    #[test]
    fn invalid_coordinate_error_carries_input() {
        let err = validate_coordinate(91.0, 2.0).unwrap_err();
        assert_eq!(
            err,
            PredictionError::InvalidCoordinate {
                latitude: 91.0,
                longitude: 2.0
            }
        );
    }

    #[test]
    fn non_object_payloads_are_malformed() {
        for payload in [json!(null), json!([1, 2, 3]), json!("ok"), json!(42)] {
            let err = validate_response_shape(payload).unwrap_err();
            assert!(matches!(err, PredictionError::MalformedResponse(_)));
        }
    }

    #[test]
    fn classifies_by_earthquake_field() {
        let rich = validate_response_shape(json!({"earthquake": {"probability": 1}})).unwrap();
        assert!(matches!(rich, RawPrediction::Rich(_)));

        let legacy = validate_response_shape(json!({"earthquake": 1})).unwrap();
        assert!(matches!(legacy, RawPrediction::Legacy(_)));

        let missing = validate_response_shape(json!({})).unwrap();
        assert!(matches!(missing, RawPrediction::Legacy(_)));
    }
}
