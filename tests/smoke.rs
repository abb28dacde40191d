use assert_cmd::Command;

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("ev-aspects").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn extract_help_lists_flags() {
    let mut cmd = Command::cargo_bin("ev-aspects").expect("binary exists");
    let output = cmd.args(["extract", "--help"]).output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("--reprocess"));
    assert!(text.contains("--limit"));
}

#[test]
fn analyze_without_logs_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let charts = dir.path().join("charts");
    Command::cargo_bin("ev-aspects")
        .unwrap()
        .arg("analyze")
        .env("DATA_DIR", dir.path())
        .env("CHARTS_DIR", &charts)
        .assert()
        .success();
    assert!(!charts.join("top_positive_aspects.csv").exists());
}

#[test]
fn extract_with_unreachable_model_records_no_aspects() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("comentarios.csv");
    std::fs::write(&input, "id,content\n1,bateria boa\n2,bateria boa\n3,\n4,motor fraco\n").unwrap();

    let output = Command::cargo_bin("ev-aspects")
        .unwrap()
        .args(["extract", "--input"])
        .arg(&input)
        .env("DATA_DIR", dir.path())
        .env("CHARTS_DIR", dir.path().join("charts"))
        .env("OLLAMA_URL", "http://127.0.0.1:9/api/generate")
        .output()
        .unwrap();
    assert!(output.status.success());

    let log = std::fs::read_to_string(
        dir.path().join("final_llama32_comentarios_sem_aspectos.csv"),
    )
    .unwrap();
    assert_eq!(
        log.lines().collect::<Vec<_>>(),
        vec![
            "comentario,positivo,negativo",
            "bateria boa,nenhum,nenhum",
            "motor fraco,nenhum,nenhum",
        ]
    );
}
