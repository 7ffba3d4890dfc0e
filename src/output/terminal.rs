// Colored terminal output for check results and the band table.

use colored::Colorize;

use crate::similarity::band::{SeverityBand, BAND_TABLE, FALLBACK_BAND};
use crate::similarity::engine::SimilarityResult;

/// Width of the matched-text preview column.
const PREVIEW_CHARS: usize = 60;

/// Display the results of one check in the terminal.
pub fn display_results(results: &[SimilarityResult], threshold: f64) {
    if results.is_empty() {
        println!("No similar documents found (threshold {threshold:.2}).");
        return;
    }

    println!(
        "\n{}",
        format!("=== Similar Documents ({} above {threshold:.2}) ===", results.len()).bold()
    );
    println!();

    println!(
        "  {:>4}  {:<10} {:>6}  {:>14}  {:<12}  {}",
        "#".dimmed(),
        "Language".dimmed(),
        "Score".dimmed(),
        "Dissimilarity".dimmed(),
        "Result".dimmed(),
        "Document".dimmed(),
    );
    println!("  {}", "-".repeat(100).dimmed());

    for (i, result) in results.iter().enumerate() {
        let preview = super::truncate_chars(&super::single_line(&result.document_text), PREVIEW_CHARS);
        println!(
            "  {:>4}. {:<10} {:>6.3}  {:>13.2}%  {:<12}  {}",
            i + 1,
            result.language,
            result.score,
            result.dissimilarity_percent,
            colorize_band(result.band),
            preview.dimmed(),
        );
    }

    println!();

    let worst = results.iter().map(|r| r.band).max().unwrap_or(FALLBACK_BAND);
    if worst == SeverityBand::Plagiarism {
        let count = results
            .iter()
            .filter(|r| r.band == SeverityBand::Plagiarism)
            .count();
        println!("  {} {} likely plagiarized source(s)", "!!".red().bold(), count);
    }
}

/// Print the dissimilarity ranges for every severity band.
pub fn display_band_table() {
    println!("\n{}", "=== Severity Bands ===".bold());
    println!();
    println!("  {:<16} {}", "Dissimilarity".dimmed(), "Result".dimmed());

    let mut lower: Option<f64> = None;
    for &(upper, band) in BAND_TABLE {
        let range = match lower {
            None => format!("0 - {upper}%"),
            Some(lower) => format!("{lower} < d <= {upper}%"),
        };
        println!("  {:<16} {}", range, colorize_band(band));
        lower = Some(upper);
    }
    let (last, _) = FALLBACK_BAND.dissimilarity_range();
    println!("  {:<16} {}", format!("> {last}%"), colorize_band(FALLBACK_BAND));
    println!();
}

/// Colorize a band label by severity.
fn colorize_band(band: SeverityBand) -> colored::ColoredString {
    let label = band.label();
    match band {
        SeverityBand::Plagiarism => label.red().bold(),
        SeverityBand::Suspected => label.bright_red(),
        SeverityBand::Maybe => label.yellow(),
        SeverityBand::NoProblem => label.green(),
    }
}
