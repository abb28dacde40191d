//! Second-pass substitutions over already-normalized aspect fields.

use std::{fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use tracing::info;

use crate::data::{csv_reader, results::AspectRow};

/// Literal replacements merging duplicate phrasings left in persisted logs.
pub const CORRECTIONS: &[(&str, &str)] = &[
    ("custo altos", "custo alto"),
    ("alto custo", "custo alto"),
    ("limitações autonomia", "autonomia limitada"),
    ("limitada autonomia", "autonomia limitada"),
    ("autonomia longa", "autonomia prolongada"),
    ("carregamento carregamento lento", "carregamento lento"),
    ("falta infraestrutura carga", "falta infraestrutura carregamento"),
    ("falta infraestrutura recarga", "falta infraestrutura carregamento"),
    ("limitações carga", "carga limitada"),
    ("capacidade carga limitada", "carga limitada"),
];

/// Apply every `(target, replacement)` pair in order.
pub fn apply_corrections(text: &str, table: &[(&str, &str)]) -> String {
    table
        .iter()
        .fold(text.to_string(), |acc, (target, replacement)| {
            acc.replace(target, replacement)
        })
}

/// Rewrite the aspects log into `dst` with both polarity columns corrected.
///
/// The copy is UTF-8 with a BOM so spreadsheet tools pick up the accents.
pub fn correct_aspects_file(
    src: &Path,
    dst: &Path,
    table: &[(&str, &str)],
) -> Result<Vec<AspectRow>> {
    let mut reader = csv_reader(src)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: AspectRow = record.with_context(|| format!("decode row of {src:?}"))?;
        rows.push(AspectRow {
            positivo: apply_corrections(&row.positivo, table),
            negativo: apply_corrections(&row.negativo, table),
            comentario: row.comentario,
        });
    }

    let mut file = File::create(dst).with_context(|| format!("create {dst:?}"))?;
    file.write_all(b"\xEF\xBB\xBF")?;
    let mut writer = csv::Writer::from_writer(file);
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(path = %dst.display(), rows = rows.len(), "wrote corrected aspects");
    Ok(rows)
}
