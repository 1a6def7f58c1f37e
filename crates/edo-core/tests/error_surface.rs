use edo_core::errors::{EdoError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("row", 3)
        .with_context("column", "region")
}

#[test]
fn schema_error_surface() {
    let err = EdoError::Schema(sample_info("missing-column", "column absent"));
    assert_eq!(err.info().code, "missing-column");
    assert_eq!(err.info().context["row"], "3");
    assert!(err.to_string().starts_with("schema error: column absent"));
}

#[test]
fn partition_error_is_distinct_from_schema() {
    let err = EdoError::partition("single-class-train", "one outcome class");
    assert!(matches!(err, EdoError::Partition(_)));
    assert_ne!(err, EdoError::schema("single-class-train", "one outcome class"));
}

#[test]
fn hint_renders_in_display() {
    let err = EdoError::Config(ErrorInfo::new("bad-fraction", "out of range").with_hint("use 0.2"));
    assert!(err.to_string().contains("hint: use 0.2"));
}

#[test]
fn errors_round_trip_json() {
    let err = EdoError::Model(sample_info("singular-hessian", "cannot invert"));
    let json = serde_json::to_string(&err).expect("serialize");
    let decoded: EdoError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
