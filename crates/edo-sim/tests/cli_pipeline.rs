use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn edo_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_edo-sim"))
        .args(args)
        .env("EDO_LOG", "warn")
        .output()
        .expect("spawn edo-sim")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "edo-sim failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).expect("read json")).expect("parse json")
}

fn csv_rows(path: &Path) -> usize {
    fs::read_to_string(path).expect("read csv").lines().count() - 1
}

fn write_config(dir: &Path, body: &str) -> String {
    let path = dir.join("config.yaml");
    fs::write(&path, body).expect("write config");
    path.to_string_lossy().into_owned()
}

#[test]
fn single_region_generate_then_clean() {
    let dir = tempdir().expect("tempdir");
    let config = write_config(dir.path(), "seed: 5\nregions: [Oyo]\nper_stratum: 50\n");
    let raw = dir.path().join("raw");
    let cleaned = dir.path().join("clean");

    assert_success(&edo_sim(&["generate", "--config", &config, "--out", raw.to_str().unwrap()]));
    assert_eq!(csv_rows(&raw.join("individuals.csv")), 200);
    assert_eq!(csv_rows(&raw.join("strata.csv")), 4);

    let individuals = raw.join("individuals.csv");
    assert_success(&edo_sim(&[
        "clean",
        "--config",
        &config,
        "--in",
        individuals.to_str().unwrap(),
        "--out",
        cleaned.to_str().unwrap(),
    ]));
    assert_eq!(csv_rows(&cleaned.join("cleaned.csv")), 200);
    assert_eq!(csv_rows(&cleaned.join("state_summary.csv")), 4);
    let report = read_json(&cleaned.join("cleaning_report.json"));
    assert_eq!(report["output_rows"], 200);
    assert_eq!(report["duplicates_removed"], 0);
    let provenance = read_json(&cleaned.join("provenance.json"));
    assert_eq!(provenance["seed"], 5);
    assert!(provenance["table_hashes"]["cleaned.csv"].is_string());
}

#[test]
fn full_run_writes_every_artifact() {
    let dir = tempdir().expect("tempdir");
    let config = write_config(
        dir.path(),
        "regions: [Lagos, Kano]\nper_stratum: 150\nmodel:\n  test_fraction: 0.25\n",
    );
    let out = dir.path().join("run");
    assert_success(&edo_sim(&["run", "--config", &config, "--seed", "17", "--out", out.to_str().unwrap()]));

    for file in ["raw/individuals.csv", "raw/strata.csv", "raw/state_summary.csv"] {
        assert!(out.join(file).exists(), "missing {file}");
    }
    assert_eq!(csv_rows(&out.join("clean/cleaned.csv")), 1200);
    assert_eq!(csv_rows(&out.join("model/odds_ratios_table.csv")), 11);

    let metrics = read_json(&out.join("model/metrics_summary.json"));
    assert_eq!(metrics["model_type"], "Logistic Regression");
    let train = metrics["train_size"].as_u64().expect("train size");
    let test = metrics["test_size"].as_u64().expect("test size");
    assert_eq!(train + test, 1200);
    assert_eq!(metrics["features"].as_array().map(Vec::len), Some(10));

    let provenance = read_json(&out.join("provenance.json"));
    assert_eq!(provenance["seed"], 17);
    let hashes = provenance["table_hashes"].as_object().expect("hashes");
    assert!(hashes.contains_key("raw/state_summary.csv"));
    assert!(hashes.contains_key("clean/state_summary.csv"));
    assert!(hashes.contains_key("model/metrics_summary.json"));
}

#[test]
fn generation_is_reproducible_from_the_seed() {
    let dir = tempdir().expect("tempdir");
    let config = write_config(dir.path(), "regions: [Edo, Kogi]\nper_stratum: 25\n");
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    let c = dir.path().join("c");
    for (out, seed) in [(&a, "3"), (&b, "3"), (&c, "4")] {
        assert_success(&edo_sim(&[
            "generate",
            "--config",
            &config,
            "--seed",
            seed,
            "--out",
            out.to_str().unwrap(),
        ]));
    }
    let read = |dir: &Path| fs::read(dir.join("individuals.csv")).expect("individuals");
    assert_eq!(read(&a), read(&b));
    assert_ne!(read(&a), read(&c));
    let hash = |dir: &Path| read_json(&dir.join("provenance.json"))["table_hashes"]["individuals.csv"].clone();
    assert_eq!(hash(&a), hash(&b));
}

#[test]
fn model_rejects_uncleaned_input() {
    let dir = tempdir().expect("tempdir");
    let config = write_config(dir.path(), "regions: [Oyo]\nper_stratum: 10\n");
    let raw = dir.path().join("raw");
    assert_success(&edo_sim(&["generate", "--config", &config, "--out", raw.to_str().unwrap()]));

    let individuals = raw.join("individuals.csv");
    let mut text = fs::read_to_string(&individuals).expect("read");
    let duplicate = text.lines().nth(1).expect("first row").to_string();
    text.push_str(&duplicate);
    text.push('\n');
    fs::write(&individuals, text).expect("write");

    let output = edo_sim(&[
        "model",
        "--in",
        individuals.to_str().unwrap(),
        "--out",
        dir.path().join("model").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not-cleaned"));
}

#[test]
fn malformed_config_fails() {
    let dir = tempdir().expect("tempdir");
    let config = write_config(dir.path(), "regions: [Atlantis]\n");
    let output = edo_sim(&["generate", "--config", &config, "--out", dir.path().join("x").to_str().unwrap()]);
    assert!(!output.status.success());
}
