//! Validation of decoded JSON into a [`TelemetryReport`].
//!
//! Presence of the three required fields is checked first, in a fixed
//! order, so the error names the first missing one. The whole value is then
//! decoded in a single serde step. Nothing is defaulted or coerced: a
//! report that fails any check is rejected as a whole.

use serde_json::{Map, Value};

use super::report::TelemetryReport;
use crate::error::ValidationError;

/// Required top-level fields in check order, with accepted alternate spellings.
const REQUIRED_FIELDS: [(&str, &[&str]); 3] = [
    ("device_info", &["deviceInfo"]),
    ("l1_usage", &["memoryUsage", "l1Usage"]),
    ("op_timeline", &["operationTimeline", "opTimeline"]),
];

/// Validate an already-decoded JSON value.
pub fn validate(raw: Value) -> Result<TelemetryReport, ValidationError> {
    let Some(object) = raw.as_object() else {
        return Err(ValidationError::NotAnObject);
    };

    for (name, aliases) in REQUIRED_FIELDS {
        if !is_present(object, name, aliases) {
            return Err(ValidationError::MissingField(name));
        }
    }

    let report: TelemetryReport =
        serde_json::from_value(raw).map_err(|e| ValidationError::InvalidShape(e.to_string()))?;

    if report.timeline.is_empty() {
        return Err(ValidationError::EmptyTimeline);
    }
    if report.memory.total_bytes == 0 {
        return Err(ValidationError::ZeroTotalBytes);
    }

    Ok(report)
}

fn is_present(object: &Map<String, Value>, name: &str, aliases: &[&str]) -> bool {
    std::iter::once(name)
        .chain(aliases.iter().copied())
        .any(|key| object.get(key).is_some_and(|v| !v.is_null()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "report_name": "resnet-block",
            "timestamp": "2025-01-12T10:00:00Z",
            "device_info": { "chip": "wormhole_b0", "temp": 58.5, "power": 96.5 },
            "l1_usage": { "used_bytes": 750000, "total_bytes": 1000000 },
            "op_timeline": [
                { "op_id": 1, "name": "conv", "cores": [[0, 0], [1, 1]], "duration_us": 40 },
                { "op_id": 2, "name": "relu", "cores": [[2, 2]] }
            ],
            "perf_summary": { "total_ops": 2, "avg_utilization": 0.64, "total_duration_us": 55 }
        })
    }

    #[test]
    fn test_empty_object_names_device_info() {
        let err = validate(json!({})).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("device_info"));
        assert!(err.to_string().contains("device_info"));
    }

    #[test]
    fn test_checks_short_circuit_in_order() {
        let err = validate(json!({ "device_info": { "chip": "x", "temp": 1, "power": 1 } }))
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("l1_usage"));

        let err = validate(json!({
            "device_info": { "chip": "x", "temp": 1, "power": 1 },
            "l1_usage": { "used_bytes": 1, "total_bytes": 2 }
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("op_timeline"));

        // op_timeline present but l1_usage missing still reports l1_usage
        let err = validate(json!({ "device_info": {}, "op_timeline": [] })).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("l1_usage"));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let mut value = sample();
        value["l1_usage"] = Value::Null;
        assert_eq!(validate(value).unwrap_err(), ValidationError::MissingField("l1_usage"));
    }

    #[test]
    fn test_valid_report_round_trips() {
        let input = sample();
        let report = validate(input.clone()).unwrap();
        assert_eq!(report.timeline.len(), 2);
        assert_eq!(serde_json::to_value(&report).unwrap(), input);
    }

    #[test]
    fn test_minimal_report_round_trips() {
        let input = json!({
            "device_info": { "chip": "blackhole", "temp": 44.5, "power": 70.25 },
            "l1_usage": { "used_bytes": 10, "total_bytes": 20 },
            "op_timeline": [ { "op_id": 1, "name": "noop", "cores": [] } ]
        });
        let report = validate(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&report).unwrap(), input);
    }

    #[test]
    fn test_camel_case_fields_are_present() {
        let input = json!({
            "deviceInfo": { "chip": "wormhole", "temp": 50.0, "power": 80.0 },
            "memoryUsage": { "usedBytes": 1, "totalBytes": 2 },
            "operationTimeline": [ { "op_id": 1, "name": "a", "cores": [[2, 2]] } ]
        });
        assert!(validate(input).is_ok());
    }

    #[test]
    fn test_wrong_types_are_invalid_shape() {
        let mut value = sample();
        value["device_info"]["temp"] = json!("hot");
        assert!(matches!(validate(value), Err(ValidationError::InvalidShape(_))));

        let mut value = sample();
        value["op_timeline"] = json!({ "op_id": 1 });
        assert!(matches!(validate(value), Err(ValidationError::InvalidShape(_))));
    }

    #[test]
    fn test_empty_timeline_rejected() {
        let mut value = sample();
        value["op_timeline"] = json!([]);
        assert_eq!(validate(value).unwrap_err(), ValidationError::EmptyTimeline);
    }

    #[test]
    fn test_zero_total_bytes_rejected() {
        let mut value = sample();
        value["l1_usage"]["total_bytes"] = json!(0);
        assert_eq!(validate(value).unwrap_err(), ValidationError::ZeroTotalBytes);
    }

    #[test]
    fn test_used_above_total_is_accepted() {
        let mut value = sample();
        value["l1_usage"]["used_bytes"] = json!(2000000);
        let report = validate(value).unwrap();
        assert_eq!(report.memory.percent(), Some(200));
    }

    #[test]
    fn test_non_object_rejected() {
        assert_eq!(validate(json!([1, 2, 3])).unwrap_err(), ValidationError::NotAnObject);
        assert_eq!(validate(Value::Null).unwrap_err(), ValidationError::NotAnObject);
    }
}
