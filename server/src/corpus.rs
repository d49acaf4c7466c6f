use anyhow::{Context, Result};
use plotmatch_core::Movie;
use serde::Deserialize;
use std::path::Path;

/// One row of the corpus CSV. Extra columns are ignored; the three fields we
/// keep are optional here so incomplete rows can be dropped instead of
/// failing the whole load.
#[derive(Debug, Deserialize)]
struct CorpusRow {
    #[serde(rename = "Series_Title")]
    title: Option<String>,
    #[serde(rename = "Overview")]
    overview: Option<String>,
    #[serde(rename = "Poster_Link")]
    poster_link: Option<String>,
}

/// Load the movie corpus from a CSV file.
///
/// Rows missing a title, overview, or poster link are skipped, as are rows
/// the CSV parser rejects outright.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<Movie>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open corpus csv {}", path.display()))?;

    let mut movies = Vec::new();
    let mut skipped = 0usize;
    for row in reader.deserialize::<CorpusRow>() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!(%err, "skipping malformed corpus row");
                skipped += 1;
                continue;
            }
        };
        match (
            non_empty(row.title),
            non_empty(row.overview),
            non_empty(row.poster_link),
        ) {
            (Some(title), Some(overview), Some(poster_url)) => movies.push(Movie {
                title,
                overview,
                poster_url,
            }),
            _ => skipped += 1,
        }
    }

    tracing::info!(path = %path.display(), loaded = movies.len(), skipped, "corpus loaded");
    Ok(movies)
}

fn non_empty(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
