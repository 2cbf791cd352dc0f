//! Axum route handlers for the upload form and prediction.

use askama::Template;
use axum::{
    extract::{Multipart, State},
    response::Html,
};
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::pdf::extract_pdf_text;
use crate::personality::views::{IndexPage, ResultPage};
use crate::state::AppState;

pub const NO_FILE_UPLOADED: &str = "No file uploaded";
pub const NO_FILE_SELECTED: &str = "No file selected";

/// GET /
pub async fn handle_index() -> Result<Html<String>, AppError> {
    Ok(Html(IndexPage.render()?))
}

/// POST /predict
///
/// Expects a multipart `file` field holding a PDF. Renders the sampled
/// description and improvement tip for the predicted trait.
pub async fn handle_predict(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let (file_name, data) = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| AppError::Validation(NO_FILE_UPLOADED.to_string()))?;

    if file_name.is_empty() {
        return Err(AppError::Validation(NO_FILE_SELECTED.to_string()));
    }

    info!(file_name = %file_name, bytes = data.len(), "Received resume upload");

    // PDF parsing is CPU-bound; keep it off the async executor.
    let cv_text = tokio::task::spawn_blocking(move || extract_pdf_text(&data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}")))??;

    let prediction = state.model.predict(&cv_text, &mut rand::thread_rng())?;
    info!(
        category = %prediction.category,
        text_len = cv_text.len(),
        "Classified resume"
    );

    let page = ResultPage {
        personality: &prediction.description,
        improvement: prediction.tip,
    };
    Ok(Html(page.render()?))
}

/// Returns the first `file` field as (filename, bytes). A field sent without
/// a filename yields an empty name.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<(String, Bytes)>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?;
        return Ok(Some((file_name, data)));
    }
    Ok(None)
}
