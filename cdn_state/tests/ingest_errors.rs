//! Ingestion failures surface as typed errors naming the offending field.

use cdn_state::{Map, MarshalError, Record, ScalarKind, Value, ingest};
use rstest::rstest;

#[derive(Debug, Default, PartialEq, Record)]
struct Sampling {
    #[record(key = "enabled")]
    enabled: bool,
    #[record(key = "ratio")]
    ratio: f64,
    #[record(key = "limit")]
    limit: Option<i32>,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Telemetry {
    #[record(group = "delivery", block = "sampling")]
    sampling: Option<Sampling>,
}

fn telemetry_map(entries: Map) -> Map {
    Map::from([(
        "delivery".to_owned(),
        Value::Record(Map::from([(
            "sampling".to_owned(),
            Value::set_of_one(Value::Record(entries)),
        )])),
    )])
}

#[rstest]
#[case::float_destination(
    Map::from([("ratio".to_owned(), Value::Float(0.5))]),
    MarshalError::UnsupportedKind { field: "sampling.ratio".to_owned(), kind: ScalarKind::Float },
)]
#[case::string_for_bool(
    Map::from([("enabled".to_owned(), Value::from("true"))]),
    MarshalError::TypeMismatch {
        field: "sampling.enabled".to_owned(),
        expected: "bool",
        found: "string",
    },
)]
#[case::record_for_int(
    Map::from([("limit".to_owned(), Value::Record(Map::new()))]),
    MarshalError::TypeMismatch {
        field: "sampling.limit".to_owned(),
        expected: "int",
        found: "record",
    },
)]
#[case::overflow(
    Map::from([("limit".to_owned(), Value::Int(i64::MAX))]),
    MarshalError::Overflow {
        field: "sampling.limit".to_owned(),
        value: i64::MAX,
        target: "i32",
    },
)]
fn reports_scalar_failures(#[case] entries: Map, #[case] expected: MarshalError) {
    let mut telemetry = Telemetry::default();
    assert_eq!(ingest(&mut telemetry, &telemetry_map(entries)), Err(expected));
    assert_eq!(telemetry, Telemetry::default());
}

#[rstest]
fn absent_float_keys_are_not_an_error() {
    let mut telemetry = Telemetry::default();
    let map = telemetry_map(Map::from([("limit".to_owned(), Value::Int(5))]));
    assert_eq!(ingest(&mut telemetry, &map), Ok(()));
    assert_eq!(
        telemetry.sampling.and_then(|sampling| sampling.limit),
        Some(5)
    );
}

#[rstest]
fn errors_render_the_field_path() {
    let error = MarshalError::TypeMismatch {
        field: "sampling.enabled".to_owned(),
        expected: "bool",
        found: "string",
    };
    assert_eq!(
        error.to_string(),
        "field 'sampling.enabled' expected bool but found string"
    );
}
