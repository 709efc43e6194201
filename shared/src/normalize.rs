use serde_json::{Map, Value};

use crate::error::PredictionError;
use crate::hazard::{Hazard, LocationInfo, OverallRisk, PredictionResult, RiskAssessment};
use crate::validate::validate_response_shape;

/// A prediction payload whose top level is known to be an object, tagged by shape.
///
/// Servers that predate risk levels send bare numbers per hazard (`Legacy`);
/// newer ones send an object per hazard plus `overall`/`location` (`Rich`).
#[derive(Debug, Clone, PartialEq)]
pub enum RawPrediction {
    Legacy(Map<String, Value>),
    Rich(Map<String, Value>),
}

/// Validate and normalize an untyped response body in one step.
pub fn normalize_payload(payload: Value) -> Result<PredictionResult, PredictionError> {
    normalize(validate_response_shape(payload)?)
}

/// Reconcile either payload shape into one `PredictionResult`.
///
/// Fails if any of the three probabilities does not coerce to a finite number;
/// the error names every offending hazard.
pub fn normalize(raw: RawPrediction) -> Result<PredictionResult, PredictionError> {
    let (map, rich) = match raw {
        RawPrediction::Legacy(map) => (map, false),
        RawPrediction::Rich(map) => (map, true),
    };

    let mut probabilities = [0.0; 3];
    let mut invalid = Vec::new();
    for hazard in Hazard::ALL {
        let field = map.get(hazard.wire_key());
        let raw_probability = if rich {
            field
                .and_then(Value::as_object)
                .and_then(|obj| obj.get("probability"))
        } else {
            field
        };
        match coerce_probability(raw_probability) {
            Some(p) if p.is_finite() => probabilities[hazard.index()] = p,
            _ => invalid.push(hazard),
        }
    }
    if !invalid.is_empty() {
        return Err(PredictionError::InvalidProbability { hazards: invalid });
    }

    let counts = map.get("counts").and_then(Value::as_object);
    let assessment = |hazard: Hazard| {
        let detail = if rich {
            map.get(hazard.wire_key()).and_then(Value::as_object)
        } else {
            None
        };
        RiskAssessment {
            probability: probabilities[hazard.index()],
            level: detail.and_then(|obj| text_field(obj, "level")),
            message: detail.and_then(|obj| text_field(obj, "message")),
            nearby_count: counts.and_then(|obj| count_field(obj, hazard.wire_key())),
        }
    };

    let (overall, location, timestamp) = if rich {
        (
            map.get("overall")
                .and_then(Value::as_object)
                .map(parse_overall),
            map.get("location")
                .and_then(Value::as_object)
                .and_then(parse_location),
            map.get("timestamp")
                .and_then(Value::as_str)
                .map(str::to_string),
        )
    } else {
        (None, None, None)
    };

    Ok(PredictionResult {
        earthquake: assessment(Hazard::Earthquake),
        flood: assessment(Hazard::Flood),
        wildfire: assessment(Hazard::Wildfire),
        overall,
        location,
        timestamp,
    })
}

/// Numeric coercion with `parseFloat` semantics: numbers pass through, strings
/// yield their leading decimal literal, everything else is not a number.
pub fn coerce_probability(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// Parse the longest decimal literal at the start of `raw` (after leading whitespace).
/// `"73.2%"` gives 73.2, `"n/a"` gives `None`, `"-Infinity"` gives negative infinity.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let digits_from = |mut i: usize| {
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_end = digits_from(end);
    let mut digit_count = int_end - end;
    end = int_end;
    if end < len && bytes[end] == b'.' {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - (end + 1);
        if digit_count > 0 || frac_digits > 0 {
            digit_count += frac_digits;
            end = frac_end;
        }
    }
    if digit_count == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_start = end + 1;
        if exp_start < len && matches!(bytes[exp_start], b'+' | b'-') {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn number_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_f64))
        .filter(|v| v.is_finite())
}

fn count_field(obj: &Map<String, Value>, key: &str) -> Option<u64> {
    let value = obj.get(key)?;
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    (f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}

fn parse_overall(obj: &Map<String, Value>) -> OverallRisk {
    OverallRisk {
        risk_level: text_field(obj, "risk_level"),
        max_probability: number_field(obj, &["max_probability"]),
        message: text_field(obj, "message"),
    }
}

fn parse_location(obj: &Map<String, Value>) -> Option<LocationInfo> {
    let latitude = number_field(obj, &["lat", "latitude"]);
    let longitude = number_field(obj, &["lng", "longitude"]);
    let coordinates = match text_field(obj, "coordinates") {
        Some(text) => text,
        None if latitude.is_none() && longitude.is_none() => return None,
        None => format!("{}, {}", fixed4(latitude), fixed4(longitude)),
    };
    Some(LocationInfo {
        coordinates,
        latitude,
        longitude,
    })
}

fn fixed4(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.4}"))
}
