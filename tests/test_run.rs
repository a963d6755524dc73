use std::path::PathBuf;

use anyhow::Result;
use interval_map_cli::cmd::{Demo, Fuzz, Run};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn script_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/scripts").join(name)
}

fn run_script(name: &str, json: bool) -> Result<String> {
    let run = Run { script_path: script_path(name), base: "A".to_string(), json };
    let mut output = Vec::new();
    run.write(&mut output)?;
    Ok(String::from_utf8(output)?)
}

#[test]
fn test_demo() -> Result<()> {
    init_logger();

    let mut output = Vec::new();
    Demo { base: 'A' }.write(&mut output)?;
    let output = String::from_utf8(output)?;

    let expected = [
        "Value at key 1: B",
        "Value at key 2: B",
        "Value at key 3: B",
        "Value at key 4: B",
        "Value at key 5: A",
        "Value at key 3: D",
        "Value at key 4: D",
        "Value at key 5: D",
        "Value at key 6: D",
    ];
    assert_eq!(output.lines().collect::<Vec<_>>(), expected);
    Ok(())
}

#[test]
fn test_run_overlap() -> Result<()> {
    init_logger();

    let output = run_script("overlap.txt", false)?;
    let expected = ["0: A", "1: B", "2: B", "3: D", "4: D", "5: D", "6: D", "7: A"];
    assert_eq!(output.lines().collect::<Vec<_>>(), expected);
    Ok(())
}

#[test]
fn test_run_merge_json() -> Result<()> {
    init_logger();

    let output = run_script("merge.txt", true)?;
    let (lookups, json) = output.split_at(output.find('{').unwrap());
    assert_eq!(lookups.lines().collect::<Vec<_>>(), ["0: A", "3: B", "5: A"]);

    let dump: serde_json::Value = serde_json::from_str(json)?;
    assert_eq!(dump["base_value"], "A");
    assert_eq!(dump["change_points"], serde_json::json!({ "1": "B", "5": "A" }));
    Ok(())
}

#[test]
fn test_run_invalid_script() {
    init_logger();

    let error = run_script("invalid.txt", false).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("invalid.txt:2"), "{message}");
    assert!(message.contains("failed to parse end 'five'"), "{message}");
}

#[test]
fn test_run_missing_script() {
    init_logger();

    let error = run_script("does_not_exist.txt", false).unwrap_err();
    assert!(error.to_string().contains("was not found"));
}

#[test]
fn test_fuzz() -> Result<()> {
    init_logger();

    let fuzz = Fuzz { seed: 1234, iterations: 100, operations: 32, min: -20, max: 20, alphabet: "ABC".to_string() };
    fuzz.run()
}

#[test]
fn test_fuzz_rejects_empty_alphabet() {
    init_logger();

    let fuzz = Fuzz { seed: 0, iterations: 1, operations: 1, min: 0, max: 1, alphabet: String::new() };
    assert!(fuzz.run().is_err());
}
