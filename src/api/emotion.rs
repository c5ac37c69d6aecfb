//! Emotion analysis endpoint

use bytes::Bytes;

use super::{ApiClient, ApiError, FormPayload};
use crate::models::AnalysisResponse;

/// Submit one image for emotion analysis
pub async fn analyze(
    client: &ApiClient,
    filename: &str,
    mime: &str,
    data: Bytes,
) -> Result<AnalysisResponse, ApiError> {
    let form = FormPayload::new().file("image", filename, mime, data);
    client.post_multipart("/api/analyze-emotion", &form).await
}
