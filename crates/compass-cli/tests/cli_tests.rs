use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

/// Helper function to create an isolated environment for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color and no ambient
/// credentials or config
fn compass_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("compass").expect("Failed to find compass binary");
    cmd.env("XDG_CONFIG_HOME", temp_dir.path())
        .env("HOME", temp_dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("COMPASS_MODEL")
        .env("RUST_LOG", "off")
        .arg("--no-color");
    cmd
}

fn plan_json() -> serde_json::Value {
    let days: Vec<_> = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        .iter()
        .map(|day| json!({"day": day, "focus": "Foundations", "keyTask": format!("{day} key task")}))
        .collect();
    json!({
        "morningRoutine": [{"time": "6:00 AM", "activity": "Meditate", "description": "Ten minutes", "focus": "Mind"}],
        "afternoonRoutine": [{"time": "2:00 PM", "activity": "Deep work", "description": "No phone", "focus": "Career"}],
        "eveningRoutine": [{"time": "10:00 PM", "activity": "Read", "description": "Fiction only", "focus": "Spirit"}],
        "habits": [],
        "weeklyGoals": ["Finish outline", "Write chapter one"],
        "growthMindsetTip": "Consistency beats intensity.",
        "weeklySchedule": days,
    })
}

fn write_plan(temp_dir: &TempDir, plan: &serde_json::Value) -> PathBuf {
    let path = temp_dir.path().join("plan.json");
    fs::write(&path, plan.to_string()).expect("Failed to write plan file");
    path
}

#[test]
fn test_cli_render_plan_file() {
    let temp_dir = create_cli_test_environment();
    let path = write_plan(&temp_dir, &plan_json());

    let output = compass_cmd(&temp_dir)
        .args(["render", path.to_str().unwrap(), "--check", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## AM Foundations"))
        .stdout(predicate::str::contains("### 6:00 AM - Meditate `mind`"))
        .stdout(predicate::str::contains("No habits suggested."))
        .stdout(predicate::str::contains("> \"Consistency beats intensity.\""))
        .stdout(predicate::str::contains("- [ ] Finish outline"))
        .stdout(predicate::str::contains("- [x] Write chapter one"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let day_cards = stdout
        .lines()
        .filter(|line| line.starts_with("### ") && line.contains(": Foundations"))
        .count();
    assert_eq!(day_cards, 7);
    assert!(stdout.find("### Monday").unwrap() < stdout.find("### Sunday").unwrap());
}

#[test]
fn test_cli_render_rejects_bad_goal_number() {
    let temp_dir = create_cli_test_environment();
    let path = write_plan(&temp_dir, &plan_json());

    compass_cmd(&temp_dir)
        .args(["render", path.to_str().unwrap(), "--check", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No weekly goal at position 2"));
}

#[test]
fn test_cli_render_strict_rejects_partial_plan() {
    let temp_dir = create_cli_test_environment();
    let path = write_plan(&temp_dir, &json!({"weeklyGoals": ["Only goals"]}));

    compass_cmd(&temp_dir)
        .args(["render", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks in this routine."));

    compass_cmd(&temp_dir)
        .args(["render", path.to_str().unwrap(), "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required fields"));
}

#[test]
fn test_cli_render_invalid_json() {
    let temp_dir = create_cli_test_environment();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    compass_cmd(&temp_dir)
        .args(["render", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid plan file"));
}

#[test]
fn test_cli_prompt_embeds_preferences() {
    let temp_dir = create_cli_test_environment();

    compass_cmd(&temp_dir)
        .args([
            "prompt",
            "--name",
            "Grace",
            "--goal",
            "Run a marathon",
            "--struggle",
            "Knee pain",
            "--energy",
            "low",
            "--schema",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Create a detailed, hyper-personalized premium life plan for Grace."))
        .stdout(predicate::str::contains("Main Goal: Run a marathon."))
        .stdout(predicate::str::contains("Knee pain"))
        .stdout(predicate::str::contains("low"))
        .stdout(predicate::str::contains("## Response Schema"))
        .stdout(predicate::str::contains("weeklySchedule"));
}

#[test]
fn test_cli_prompt_model_flag() {
    let temp_dir = create_cli_test_environment();

    compass_cmd(&temp_dir)
        .args(["--model", "gemini-flash", "prompt", "-n", "Grace", "-g", "Run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Model: gemini-flash"));
}

#[test]
fn test_cli_prompt_missing_goal() {
    let temp_dir = create_cli_test_environment();

    compass_cmd(&temp_dir)
        .args(["prompt", "--name", "Grace", "--goal", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mainGoal"));
}

#[test]
fn test_cli_generate_without_key_fails() {
    let temp_dir = create_cli_test_environment();

    compass_cmd(&temp_dir)
        .args(["generate", "--name", "Grace", "--goal", "Run a marathon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key configured"));
}

#[test]
fn test_cli_half_budget_in_config_fails() {
    let temp_dir = create_cli_test_environment();
    let config = temp_dir.path().join("config.json");
    fs::write(&config, r#"{"api_key": "k", "thinking_budget": 1000}"#).unwrap();

    compass_cmd(&temp_dir)
        .args(["--config", config.to_str().unwrap()])
        .args(["generate", "-n", "Grace", "-g", "Run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to initialize plan generator"));
}

fn candidate_body(plan: &serde_json::Value) -> String {
    json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": plan.to_string()}]}}]
    })
    .to_string()
}

fn mock_config(temp_dir: &TempDir, server: &mockito::Server) -> PathBuf {
    let config = temp_dir.path().join("config.json");
    let settings = json!({"api_key": "test-key", "model": "gemini-test", "base_url": server.url()});
    fs::write(&config, settings.to_string()).unwrap();
    config
}

#[test]
fn test_cli_generate_renders_and_exports() {
    let temp_dir = create_cli_test_environment();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/models/gemini-test:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_body(candidate_body(&plan_json()))
        .expect(1)
        .create();
    let config = mock_config(&temp_dir, &server);
    let export = temp_dir.path().join("plan.md");

    compass_cmd(&temp_dir)
        .args(["--config", config.to_str().unwrap()])
        .args(["generate", "-n", "Grace", "-g", "Write a novel", "--output"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Your Life Plan"))
        .stdout(predicate::str::contains("### Sunday: Foundations"))
        .stdout(predicate::str::contains("Plan exported to"));

    mock.assert();
    let exported = fs::read_to_string(&export).unwrap();
    assert!(exported.contains("## 7-Day Blueprint"));
    assert!(exported.contains("- [ ] Finish outline"));
}

#[test]
fn test_cli_generate_json_output() {
    let temp_dir = create_cli_test_environment();
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/models/gemini-test:generateContent")
        .with_status(200)
        .with_body(candidate_body(&plan_json()))
        .create();
    let config = mock_config(&temp_dir, &server);

    let output = compass_cmd(&temp_dir)
        .args(["--config", config.to_str().unwrap()])
        .args(["generate", "-n", "Grace", "-g", "Write a novel", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let plan: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(plan["weeklySchedule"].as_array().unwrap().len(), 7);
    assert_eq!(plan["morningRoutine"][0]["focus"], "mind");
}

#[test]
fn test_cli_generate_service_failure_shows_fixed_message() {
    let temp_dir = create_cli_test_environment();
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/models/gemini-test:generateContent")
        .with_status(500)
        .with_body("internal error")
        .create();
    let config = mock_config(&temp_dir, &server);

    compass_cmd(&temp_dir)
        .args(["--config", config.to_str().unwrap()])
        .args(["generate", "-n", "Grace", "-g", "Write a novel"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Blueprint").not())
        .stderr("**Error**: Could not generate plan. Please try again.\n");
}

#[test]
fn test_cli_error_chain_prints_on_one_line() {
    let temp_dir = create_cli_test_environment();
    let config = temp_dir.path().join("config.json");
    fs::write(&config, r#"{"api_key": "k", "thinking_budget": 1000}"#).unwrap();

    let output = compass_cmd(&temp_dir)
        .args(["--config", config.to_str().unwrap()])
        .args(["generate", "-n", "Grace", "-g", "Run"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();

    let stderr = String::from_utf8(output).unwrap();
    assert_eq!(stderr.lines().count(), 1, "unexpected stderr: {stderr}");
    assert!(stderr.starts_with("**Error**: Failed to initialize plan generator: "));
}
