//! Voice HTTP Handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::CreateMixedVoice;
use crate::infrastructure::http::dto::{CreateVoiceRequest, CreateVoiceResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 混合音色并注册为新音色
///
/// 请求体无法解析时同样返回 `{ "error" }`，而不是 axum 默认的纯文本
pub async fn create_voice(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateVoiceRequest>, JsonRejection>,
) -> Result<Json<CreateVoiceResponse>, ApiError> {
    let Json(req) = payload?;

    let command = CreateMixedVoice::from(req);
    let result = state.create_mixed_voice_handler.handle(command).await?;

    Ok(Json(CreateVoiceResponse {
        voice_id: result.voice_id,
    }))
}
