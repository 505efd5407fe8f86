// src/handlers/payments.rs

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{PaymentAdmins, RequireRole},
    },
    models::{filter::AssignmentFilter, report::PaymentOverview},
    services::payment_service::export_filename,
};

// GET /api/payments
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "Payments",
    params(AssignmentFilter),
    responses(
        (status = 200, description = "Pagamentos filtrados e totais", body = PaymentOverview),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_overview(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<PaymentAdmins>,
    Query(filter): Query<AssignmentFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let overview = app_state
        .payment_service
        .overview(&filter, Utc::now())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(overview)))
}

// GET /api/payments/export
#[utoipa::path(
    get,
    path = "/api/payments/export",
    tag = "Payments",
    params(AssignmentFilter),
    responses(
        (status = 200, description = "CSV dos pagamentos filtrados", content_type = "text/csv", body = String),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_csv(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<PaymentAdmins>,
    Query(filter): Query<AssignmentFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let now = Utc::now();
    let csv = app_state
        .payment_service
        .export_csv(&filter, now)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_filename(now)
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}
