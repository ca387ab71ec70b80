//! Case endpoints.
//!
//! - `POST /api/cases/tips`: full pipeline, always a TipResult
//! - `POST /api/cases/summary`: summary only
//! - `POST /api/cases/summarize`: summary, then stored as a case
//! - `POST /api/cases`: store an already generated summary

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, CaseTextRequest, SummarizeResponse};
use crate::models::CaseRecord;
use crate::pipeline::{StructuredSummary, TipResult};

pub async fn tips(
    State(ctx): State<ApiContext>,
    Json(req): Json<CaseTextRequest>,
) -> Result<Json<TipResult>, ApiError> {
    let text = req.into_text()?;
    let result = ctx.run_blocking(move |p| p.process_case(&text)).await?;
    Ok(Json(result))
}

pub async fn summary(
    State(ctx): State<ApiContext>,
    Json(req): Json<CaseTextRequest>,
) -> Result<Json<StructuredSummary>, ApiError> {
    let text = req.into_text()?;
    let summary = ctx.run_blocking(move |p| p.summarize_only(&text)).await??;
    Ok(Json(summary))
}

pub async fn summarize(
    State(ctx): State<ApiContext>,
    Json(req): Json<CaseTextRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let text = req.into_text()?;
    let (summary, case) = ctx
        .run_blocking(move |p| p.summarize_and_save(&text))
        .await??;
    Ok(Json(SummarizeResponse { summary, case }))
}

pub async fn save(
    State(ctx): State<ApiContext>,
    Json(req): Json<CaseTextRequest>,
) -> Result<Json<CaseRecord>, ApiError> {
    let text = req.into_text()?;
    let case = ctx.run_blocking(move |p| p.save_summary(&text)).await??;
    Ok(Json(case))
}
