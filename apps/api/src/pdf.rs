use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
#[error("Failed to extract text from PDF: {0}")]
pub struct PdfError(String);

/// Extracts visible text page by page and joins it, each page followed by a
/// single space. Image-only pages contribute an empty string; a document with
/// no pages yields `""`.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, PdfError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| PdfError(e.to_string()))?;
    debug!(pages = pages.len(), "Extracted PDF text");
    Ok(join_pages(&pages))
}

fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref());
        text.push(' ');
    }
    text
}
