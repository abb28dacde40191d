use std::collections::HashMap;

use ev_aspects::{
    data::results::ResultLogs,
    nlp::{
        classifier::{Classifier, FALLBACK_RESPONSE},
        normalize::Normalizer,
        run_batch, BatchOptions, BatchSummary,
    },
};
use futures::future::BoxFuture;
use indexmap::IndexSet;
use tempfile::tempdir;

/// Answers from a fixed table, falling back like the HTTP client does.
struct Scripted {
    answers: HashMap<&'static str, &'static str>,
}

impl Classifier for Scripted {
    fn classify<'a>(&'a self, comment: &'a str) -> BoxFuture<'a, String> {
        let answer = self
            .answers
            .get(comment)
            .copied()
            .unwrap_or(FALLBACK_RESPONSE)
            .to_string();
        Box::pin(async move { answer })
    }
}

fn scripted() -> Scripted {
    Scripted {
        answers: HashMap::from([
            ("carro ótimo na estrada", "positivos: autonomia\nnegativos: preço alto"),
            ("que lixo de gente", "linguagem ofensiva"),
            ("vi ontem na rua", "nenhum"),
        ]),
    }
}

fn corpus() -> IndexSet<String> {
    [
        "carro ótimo na estrada",
        "que lixo de gente",
        "vi ontem na rua",
        "comentário sem resposta",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[tokio::test]
async fn every_comment_lands_in_exactly_one_log() {
    let dir = tempdir().unwrap();
    let mut logs = ResultLogs::open(dir.path()).unwrap();
    let normalizer = Normalizer::portuguese().unwrap();

    let summary = run_batch(
        &corpus(),
        &scripted(),
        &normalizer,
        &mut logs,
        &BatchOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(
        summary,
        BatchSummary {
            aspects: 1,
            no_aspects: 2,
            offensive: 1,
            skipped: 0,
        }
    );
    assert_eq!(logs.aspects.row_count().unwrap(), 1);
    assert_eq!(logs.no_aspects.row_count().unwrap(), 2);
    assert_eq!(logs.offensive.row_count().unwrap(), 1);

    let aspects = std::fs::read_to_string(logs.aspects.path()).unwrap();
    assert!(aspects.contains("carro ótimo na estrada,autonomia,custo alto"));
}

#[tokio::test]
async fn rerun_skips_recorded_comments_unless_reprocessing() {
    let dir = tempdir().unwrap();
    let normalizer = Normalizer::portuguese().unwrap();
    let comments = corpus();

    let mut logs = ResultLogs::open(dir.path()).unwrap();
    run_batch(&comments, &scripted(), &normalizer, &mut logs, &BatchOptions::default())
        .await
        .unwrap();

    let mut logs = ResultLogs::open(dir.path()).unwrap();
    let second = run_batch(&comments, &scripted(), &normalizer, &mut logs, &BatchOptions::default())
        .await
        .unwrap();
    assert_eq!(second.processed(), 0);
    assert_eq!(second.skipped, 4);

    let redo = BatchOptions {
        reprocess: true,
        limit: None,
    };
    let third = run_batch(&comments, &scripted(), &normalizer, &mut logs, &redo)
        .await
        .unwrap();
    assert_eq!(third.processed(), 4);
    assert_eq!(logs.no_aspects.row_count().unwrap(), 4);
}

#[tokio::test]
async fn limit_caps_pending_work() {
    let dir = tempdir().unwrap();
    let normalizer = Normalizer::portuguese().unwrap();
    let comments = corpus();
    let mut logs = ResultLogs::open(dir.path()).unwrap();

    let capped = BatchOptions {
        reprocess: false,
        limit: Some(2),
    };
    let first = run_batch(&comments, &scripted(), &normalizer, &mut logs, &capped)
        .await
        .unwrap();
    assert_eq!(first.processed(), 2);

    let rest = run_batch(&comments, &scripted(), &normalizer, &mut logs, &capped)
        .await
        .unwrap();
    assert_eq!(rest.skipped, 2);
    assert_eq!(rest.processed(), 2);
    assert_eq!(logs.recorded_comments().unwrap().len(), 4);
}
