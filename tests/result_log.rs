use ev_aspects::{
    config::{ASPECTS_FILE, OFFENSIVE_FILE},
    data::results::{ResultLog, ResultLogs, ASPECT_HEADER},
    nlp::parser::ClassificationResult,
};
use tempfile::tempdir;

#[test]
fn header_is_written_once_across_reopens() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.csv");

    let mut log = ResultLog::open(&path, ASPECT_HEADER).unwrap();
    assert!(log.header_pending());
    log.append(&["a", "b", "c"]).unwrap();
    assert!(!log.header_pending());
    log.append(&["d", "e", "f"]).unwrap();

    let mut reopened = ResultLog::open(&path, ASPECT_HEADER).unwrap();
    assert!(!reopened.header_pending());
    reopened.append(&["g", "h", "i"]).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let headers = text
        .lines()
        .filter(|l| *l == "comentario,positivo,negativo")
        .count();
    assert_eq!(headers, 1);
    assert_eq!(reopened.row_count().unwrap(), 3);
}

#[test]
fn empty_existing_file_still_gets_a_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "").unwrap();
    let log = ResultLog::open(&path, ASPECT_HEADER).unwrap();
    assert!(log.header_pending());
}

#[test]
fn quoted_comments_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.csv");
    let mut log = ResultLog::open(&path, ASPECT_HEADER).unwrap();
    let comment = "carro bom, mas \"caro\"\nsegunda linha";
    log.append(&[comment, "nenhum", "custo alto"]).unwrap();
    let seen = log.recorded_comments().unwrap();
    assert!(seen.contains(comment));
}

#[test]
fn routing_targets_exactly_one_log() {
    let dir = tempdir().unwrap();
    let mut logs = ResultLogs::open(dir.path()).unwrap();

    logs.route("ofensivo", &ClassificationResult::Offensive).unwrap();
    logs.route("vazio", &ClassificationResult::NoAspects).unwrap();
    logs.route(
        "bom",
        &ClassificationResult::Aspects {
            positive: Some("autonomia".into()),
            negative: None,
        },
    )
    .unwrap();

    let offensive = std::fs::read_to_string(dir.path().join(OFFENSIVE_FILE)).unwrap();
    assert_eq!(
        offensive.lines().collect::<Vec<_>>(),
        vec!["comentario,resposta", "ofensivo,linguagem ofensiva"]
    );
    let aspects = std::fs::read_to_string(dir.path().join(ASPECTS_FILE)).unwrap();
    assert!(aspects.lines().any(|l| l == "bom,autonomia,nenhum"));
    assert_eq!(logs.no_aspects.row_count().unwrap(), 1);

    let all = logs.recorded_comments().unwrap();
    assert_eq!(all.len(), 3);
}
