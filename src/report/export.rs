//! Writing rendered reports to disk

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::document::ReportDocument;
use super::render::{render_document, TextRenderer};

/// Render the document as plain text and write it to `output_path`
pub fn write_text_report(doc: &ReportDocument, output_path: &Path) -> Result<()> {
    let bytes = render_document(doc, TextRenderer::new());
    std::fs::write(output_path, bytes)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;
    Ok(())
}

/// Export the document model as pretty-printed JSON
pub fn export_report_json(doc: &ReportDocument, output_path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(doc).context("Failed to serialize report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    Ok(())
}

/// JSON path next to a text report (`report.txt` -> `report.json`)
pub fn json_path_for(report_path: &Path) -> PathBuf {
    report_path.with_extension("json")
}

/// Zip path next to a text report (`report.txt` -> `report.zip`)
pub fn bundle_path_for(report_path: &Path) -> PathBuf {
    report_path.with_extension("zip")
}

/// Package report files into a zip archive
///
/// The individual files are removed once the archive is written.
pub fn package_report_bundle(files: &[&Path], zip_path: &Path) -> Result<()> {
    use std::io::{Read, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let zip_file = std::fs::File::create(zip_path)
        .with_context(|| format!("Failed to create zip file: {}", zip_path.display()))?;

    let mut zip = ZipWriter::new(zip_file);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for path in files {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Invalid file name: {}", path.display()))?;
        zip.start_file(filename, options)
            .with_context(|| format!("Failed to add {} to zip", filename))?;
        let mut content = Vec::new();
        std::fs::File::open(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?
            .read_to_end(&mut content)?;
        zip.write_all(&content)?;
    }

    zip.finish().context("Failed to finalize zip file")?;

    for path in files {
        std::fs::remove_file(path).ok();
    }

    Ok(())
}
