use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn demos_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("demos")
}

fn demo_vars(name: &str) -> Vec<&'static str> {
    match name {
        "greeting" => vec!["name=Sam", "part_of_day=morning"],
        "colors" => vec!["first=red", "second=green", "third=blue"],
        "blog_outline" => vec!["topic=tide pools", "audience=kids"],
        other => panic!("no vars registered for demo {}", other),
    }
}

#[test]
fn run_executes_every_demo_with_echo_provider() {
    let bin = env!("CARGO_BIN_EXE_heroml");

    let mut scripts = fs::read_dir(demos_root())
        .expect("demos root must exist")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "heroml"))
        .collect::<Vec<_>>();
    scripts.sort();
    assert!(!scripts.is_empty(), "expected demo scripts");

    for script in scripts {
        let stem = script
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let output_dir = std::env::temp_dir().join(format!("heroml-rs-smoke-{}", stem));

        let mut command = Command::new(bin);
        command
            .arg("run")
            .arg(&script)
            .arg("--provider")
            .arg("echo")
            .arg("--no-prompt")
            .arg("-o")
            .arg(&output_dir)
            .arg("-f")
            .arg("result.json");
        for var in demo_vars(&stem) {
            command.arg("--var").arg(var);
        }
        let output = command.output().expect("cli should execute");

        if !output.status.success() {
            panic!(
                "demo {} failed\nstdout:\n{}\nstderr:\n{}",
                script.display(),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("RESULT:OK"), "stdout missing RESULT:OK for {}", stem);
        assert!(stdout.contains("OUTPUT:"), "stdout missing OUTPUT for {}", stem);

        let raw = fs::read_to_string(output_dir.join("result.json")).expect("result written");
        let environment: serde_json::Value = serde_json::from_str(&raw).expect("result is json");
        assert!(
            environment.get("step_1").is_some(),
            "demo {} produced no step_1",
            stem
        );
    }
}

#[test]
fn check_reports_status_per_file() {
    let bin = env!("CARGO_BIN_EXE_heroml");
    let output = Command::new(bin)
        .arg("check")
        .arg(demos_root())
        .output()
        .expect("cli should execute");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "check failed:\n{}", stdout);
    assert_eq!(stdout.matches(":valid").count(), 3);
    assert!(stdout.contains("RESULT:OK"));
}

#[test]
fn errors_are_reported_on_stdout() {
    let bin = env!("CARGO_BIN_EXE_heroml");
    let missing = demos_root().join("does_not_exist.heroml");
    let output = Command::new(bin)
        .arg("run")
        .arg(&missing)
        .arg("--provider")
        .arg("echo")
        .arg("--no-prompt")
        .output()
        .expect("cli should execute");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RESULT:ERROR"));
    assert!(stdout.contains("ERROR_CODE:CLI_SOURCE_NOT_FOUND"));
    assert!(stdout.contains("ERROR_MSG_JSON:"));
}
