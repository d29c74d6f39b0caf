//! Compare command: run a comparison through a server and print it.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use console::style;

use crate::client::ComparisonClient;
use crate::extract::{TextExtractor, UploadedFile};
use crate::highlight::{highlight, render_terminal};
use crate::models::{ComparisonResult, DifferenceKind, Side};

/// Compare two files.
pub async fn cmd_compare(
    original: &Path,
    modified: &Path,
    server: &str,
    json: bool,
) -> anyhow::Result<()> {
    let extractor = TextExtractor::new();
    let original_text = read_document(&extractor, original).await?;
    let modified_text = read_document(&extractor, modified).await?;

    let client = ComparisonClient::new(server);
    if !json {
        println!(
            "{} Comparing {} and {} via {}",
            style("→").cyan(),
            original.display(),
            modified.display(),
            client.endpoint()
        );
    }

    let result = client
        .compare(&original_text, &modified_text)
        .await
        .context("Comparison failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_report(&result, &original_text, &modified_text));
    }
    Ok(())
}

async fn read_document(extractor: &TextExtractor, path: &Path) -> anyhow::Result<String> {
    let file = UploadedFile::from_path(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let text = extractor
        .extract(&file)
        .with_context(|| format!("Cannot compare {}", path.display()))?;
    Ok(text)
}

/// Terminal report: both highlighted documents, then the analysis.
pub(crate) fn render_report(result: &ComparisonResult, original: &str, modified: &str) -> String {
    let mut out = String::new();

    for (side, title, text) in [
        (Side::Original, "Documento 1", original),
        (Side::Modified, "Documento 2", modified),
    ] {
        let segments = highlight(text, &result.differences, side);
        let _ = writeln!(out, "\n{}", style(title).bold().underlined());
        let _ = writeln!(out, "{}", render_terminal(&segments));
    }

    let _ = writeln!(out, "\n{}", style("Resumen").bold());
    let _ = writeln!(out, "{}", result.summary);

    if !result.impact_analysis.is_empty() {
        let _ = writeln!(out, "\n{}", style("Análisis de Impacto").bold());
        let _ = writeln!(out, "{}", result.impact_analysis);
    }

    let _ = writeln!(out, "\n{}", style("Diferencias Detalladas").bold());
    for (i, diff) in result.differences.iter().enumerate() {
        let label = match diff.kind {
            DifferenceKind::Addition => style(diff.kind.label()).green(),
            DifferenceKind::Deletion => style(diff.kind.label()).red(),
            DifferenceKind::Modification => style(diff.kind.label()).yellow(),
        };
        let _ = writeln!(out, "{:>3}. {}", i + 1, label);
        let _ = writeln!(out, "     Contenido: \"{}\"", diff.content);
        let _ = writeln!(out, "     Ubicación: {}", diff.location);
        let _ = writeln!(out, "     Importancia: {}", diff.significance);
    }

    out
}
