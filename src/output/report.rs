// Transcript export: CSV file and JSON string of a results list.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::similarity::engine::SimilarityResult;

/// One CSV row per matched document.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    generated_at: &'a str,
    query: &'a str,
    language: &'a str,
    score: String,
    dissimilarity_percent: String,
    result: &'static str,
    document: &'a str,
}

/// Write a results transcript to `path` as CSV.
///
/// `query` names the checked document (usually its file path). An empty result
/// list still produces a file with just the header row.
pub fn write_csv_report(path: &Path, query: &str, results: &[SimilarityResult]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV report at {}", path.display()))?;

    let generated_at = Utc::now().to_rfc3339();

    if results.is_empty() {
        writer.write_record([
            "generated_at",
            "query",
            "language",
            "score",
            "dissimilarity_percent",
            "result",
            "document",
        ])?;
    }

    for result in results {
        writer
            .serialize(ReportRow {
                generated_at: &generated_at,
                query,
                language: &result.language,
                score: format!("{:.4}", result.score),
                dissimilarity_percent: format!("{:.2}", result.dissimilarity_percent),
                result: result.band.label(),
                document: &result.document_text,
            })
            .context("Failed to write CSV record")?;
    }

    writer.flush().context("Failed to flush CSV report")?;
    Ok(())
}

/// Serialize a results list as pretty-printed JSON.
pub fn results_json(results: &[SimilarityResult]) -> Result<String> {
    serde_json::to_string_pretty(results).context("Failed to serialize results")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::band::SeverityBand;

    #[test]
    fn test_json_uses_band_names() {
        let results = vec![SimilarityResult {
            language: "en".to_string(),
            document_text: "text".to_string(),
            score: 0.9,
            dissimilarity_percent: 10.0,
            band: SeverityBand::Plagiarism,
        }];
        let json = results_json(&results).unwrap();
        assert!(json.contains("\"band\": \"PLAGIARISM\""));
        assert!(json.contains("\"language\": \"en\""));
    }

    #[test]
    fn test_json_empty() {
        assert_eq!(results_json(&[]).unwrap(), "[]");
    }
}
