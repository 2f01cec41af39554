use std::path::Path;

use anyhow::{Context, Result};

use lecylindre_stats::Session;

/// Découpe un champ en étiquettes : `;` et les espaces séparent aussi les valeurs.
fn split_field(field: &str) -> impl Iterator<Item = &str> {
    field
        .split(|c: char| c == ';' || c.is_whitespace())
        .filter(|s| !s.is_empty())
}

/// Lit un journal de tirages (CSV, une ou plusieurs valeurs par ligne, `#` pour les commentaires).
pub fn read_spin_log(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let mut labels = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Erreur lecture ligne {}", line + 1))?;
        for field in record.iter() {
            labels.extend(split_field(field).map(str::to_string));
        }
    }
    Ok(labels)
}

pub struct ReplayResult {
    pub total_values: u32,
    pub recorded: u32,
    pub rejected: u32,
}

/// Enregistre chaque étiquette dans la session ; les valeurs invalides sont comptées et ignorées.
pub fn replay_labels(session: &mut Session, labels: &[String]) -> ReplayResult {
    let mut result = ReplayResult {
        total_values: 0,
        recorded: 0,
        rejected: 0,
    };

    for label in labels {
        result.total_values += 1;
        match session.record_label(label) {
            Ok(_) => result.recorded += 1,
            Err(e) => {
                log::warn!("Valeur {} ignorée : {}", result.total_values, e);
                result.rejected += 1;
            }
        }
    }
    result
}
