// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    config::AppState,
    middleware::rbac::{PaymentAdmins, RequireRole},
    models::dashboard::DashboardSummary,
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Contadores gerais do estúdio (0 quando a fonte falha)", body = DashboardSummary),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Apenas administradores")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    _guard: RequireRole<PaymentAdmins>,
) -> impl IntoResponse {
    let summary = app_state.dashboard_service.get_summary().await;
    (StatusCode::OK, Json(summary))
}
