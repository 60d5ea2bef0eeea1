//! Handlers for the `/validation` resource.
//!
//! Exposes the loaded schemas and evaluates submitted records against them.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use keel_core::validation::definition::RULE_TYPES;
use keel_core::validation::schema::ValidationReport;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Rules attached to one field, as descriptions.
#[derive(Debug, Serialize)]
pub struct FieldSummary {
    pub field: String,
    pub rules: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SchemaSummary {
    pub entity_type: String,
    pub fields: Vec<FieldSummary>,
}

/// GET /api/v1/validation/schemas
///
/// List every loaded schema with the rules applied to each field.
pub async fn list_schemas(State(state): State<AppState>) -> Json<DataResponse<Vec<SchemaSummary>>> {
    let data = state
        .schemas
        .iter()
        .map(|(entity_type, schema)| SchemaSummary {
            entity_type: entity_type.to_string(),
            fields: schema
                .fields()
                .map(|(field, ruleset)| FieldSummary {
                    field: field.to_string(),
                    rules: ruleset.rules().iter().map(|rule| rule.describe()).collect(),
                })
                .collect(),
        })
        .collect();
    Json(DataResponse { data })
}

/// GET /api/v1/validation/rule-types
///
/// Rule type names accepted in schema documents.
pub async fn list_rule_types() -> Json<DataResponse<&'static [&'static str]>> {
    Json(DataResponse { data: RULE_TYPES })
}

// ── Batch validation ─────────────────────────────────────────────────

/// Request body for the batch validation endpoint.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub entity_type: String,
    pub records: Vec<Map<String, Value>>,
}

#[derive(Debug, Serialize)]
pub struct RecordResult {
    pub record_index: usize,
    pub report: ValidationReport,
}

#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub total_records: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub results: Vec<RecordResult>,
}

/// POST /api/v1/validation/validate
///
/// Evaluate the entity type's schema against every supplied record. Invalid
/// records are reported, not rejected: the response is 200 either way.
pub async fn validate(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<BatchReport>>> {
    let Json(body) = payload?;
    if body.records.is_empty() {
        return Err(AppError::BadRequest(
            "records array must not be empty".to_string(),
        ));
    }

    let schema = state.schemas.get(&body.entity_type)?;

    let mut results = Vec::with_capacity(body.records.len());
    for (record_index, record) in body.records.iter().enumerate() {
        let report = schema.validate_record(record)?;
        results.push(RecordResult {
            record_index,
            report,
        });
    }

    let valid_count = results.iter().filter(|r| r.report.is_valid).count();
    let total_records = results.len();
    tracing::info!(
        entity_type = %body.entity_type,
        total_records,
        valid_count,
        "Validated record batch"
    );

    Ok(Json(DataResponse {
        data: BatchReport {
            total_records,
            valid_count,
            invalid_count: total_records - valid_count,
            results,
        },
    }))
}

// ── Single-record check ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub entity_type: String,
    pub record: Map<String, Value>,
}

/// POST /api/v1/validation/check
///
/// Validate one record. Echoes the record back when valid; responds 422 with
/// the violations otherwise.
pub async fn check(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<Map<String, Value>>>> {
    let Json(body) = payload?;
    let schema = state.schemas.get(&body.entity_type)?;
    let report = schema.validate_record(&body.record)?;

    if !report.is_valid {
        tracing::debug!(
            entity_type = %body.entity_type,
            violations = report.violations.len(),
            "Record rejected"
        );
        return Err(AppError::Unprocessable(report));
    }

    Ok(Json(DataResponse { data: body.record }))
}
