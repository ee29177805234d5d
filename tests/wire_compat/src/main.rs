fn main() {
    println!("Run `cargo test -p wire-compat` to execute history format compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;

    use clipsend_protocol::{Outcome, TransferOption, TransferResult};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Normalizes JSON values so that integer-valued floats compare equal.
    ///
    /// Existing history files may hold `0` where we write `0.0`.
    fn normalize_value(v: &serde_json::Value) -> serde_json::Value {
        match v {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => serde_json::json!(f),
                None => v.clone(),
            },
            serde_json::Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), normalize_value(v)))
                    .collect(),
            ),
            serde_json::Value::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(normalize_value).collect())
            }
            _ => v.clone(),
        }
    }

    /// Deserializes a fixture, re-serializes it, and compares the JSON values
    /// (order-independent, float-normalized comparison).
    fn roundtrip_test<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            normalize_value(&fixture),
            normalize_value(&reserialized),
            "roundtrip mismatch for {name}:\n  file: {fixture}\n  ours: {reserialized}"
        );
        parsed
    }

    #[test]
    fn fixture_success_record() {
        let result: TransferResult = roundtrip_test("result_success.json");
        assert!(result.success());
        assert_eq!(result.elapsed, Duration::from_millis(1250));
        assert_eq!(result.transfer_option(), Some(TransferOption::Compress));
    }

    #[test]
    fn fixture_error_record() {
        let result: TransferResult = roundtrip_test("result_error.json");
        assert_eq!(
            result.outcome,
            Outcome::error("Failed to send file to receiver. Status code: 500")
        );
        assert_eq!(result.elapsed, Duration::from_millis(500));
    }

    #[test]
    fn fixture_invalid_option_record() {
        let result: TransferResult = roundtrip_test("result_invalid_option.json");
        assert_eq!(result.outcome, Outcome::error("Invalid option"));
        assert_eq!(result.option, "frame_difference");
        assert_eq!(result.transfer_option(), None);
        assert!(result.elapsed.is_zero());
    }

    #[test]
    fn fixture_history_array() {
        let history: Vec<TransferResult> = roundtrip_test("history.json");
        assert_eq!(history.len(), 3);

        let successes: Vec<bool> = history.iter().map(TransferResult::success).collect();
        assert_eq!(successes, vec![true, false, true]);
        assert_eq!(history[2].filename, "short.mp4");
    }

    #[test]
    fn fixture_record_with_both_fields_is_rejected() {
        let fixture = load_fixture("result_both_fields.json");
        assert!(serde_json::from_value::<TransferResult>(fixture).is_err());
    }

    #[test]
    fn written_record_has_exactly_one_outcome_key() {
        let result = TransferResult::new(
            Outcome::message("File sent to receiver successfully using send method"),
            Duration::from_millis(250),
            "clip.mp4",
            "send",
        );
        let value = serde_json::to_value(&result).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["filename", "message", "option", "time"]);
        assert_eq!(value["time"], serde_json::json!(0.25));
    }
}
