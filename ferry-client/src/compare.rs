//! Output classification for test runs
//!
//! Pass/fail is decided by looking for success markers in the serialized job
//! output, not by comparing against the expected output.
// TODO: classify by structural comparison against `expectedOutput` once test
// plans carry machine-readable expectations.

use serde_json::Value;

/// Substrings whose presence in a job's output counts as success
pub const SUCCESS_MARKERS: [&str; 2] = ["OK", "processedCount"];

pub fn looks_successful(actual_output: &str) -> bool {
    SUCCESS_MARKERS
        .iter()
        .any(|marker| actual_output.contains(marker))
}

/// Human-readable explanation of a failed case
///
/// When both sides are JSON the structural differences are listed too.
pub fn describe_mismatch(expected: &str, actual: &str) -> String {
    let mut detail = format!(
        "output mismatch:\n  expected: {}\n  actual: {}",
        expected, actual
    );

    if let (Ok(expected), Ok(actual)) = (
        serde_json::from_str::<Value>(expected),
        serde_json::from_str::<Value>(actual),
    ) {
        for difference in json_differences(&expected, &actual) {
            detail.push_str("\n  - ");
            detail.push_str(&difference);
        }
    }

    detail
}

/// Path-addressed differences between two JSON documents
pub fn json_differences(expected: &Value, actual: &Value) -> Vec<String> {
    let mut differences = Vec::new();
    walk("$", expected, actual, &mut differences);
    differences
}

fn walk(path: &str, expected: &Value, actual: &Value, out: &mut Vec<String>) {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            let mut keys: Vec<&String> = expected.keys().chain(actual.keys()).collect();
            keys.sort();
            keys.dedup();
            for key in keys {
                let child = format!("{}.{}", path, key);
                match (expected.get(key), actual.get(key)) {
                    (Some(e), Some(a)) => walk(&child, e, a, out),
                    (Some(_), None) => out.push(format!("{}: missing", child)),
                    (None, Some(_)) => out.push(format!("{}: unexpected key", child)),
                    (None, None) => {}
                }
            }
        }
        (Value::Array(expected), Value::Array(actual)) => {
            if expected.len() != actual.len() {
                out.push(format!(
                    "{}: array length differs (expected {}, actual {})",
                    path,
                    expected.len(),
                    actual.len()
                ));
            }
            for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
                walk(&format!("{}[{}]", path, i), e, a, out);
            }
        }
        (e, a) if type_name(e) != type_name(a) => out.push(format!(
            "{}: type differs (expected {}, actual {})",
            path,
            type_name(e),
            type_name(a)
        )),
        (e, a) if e != a => out.push(format!("{}: expected {}, actual {}", path, e, a)),
        _ => {}
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
