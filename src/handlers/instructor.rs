// src/handlers/instructor.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{RequireRole, Teaching},
    },
    models::{filter::AssignmentFilter, report::InstructorOverview},
};

// GET /api/instructor/assignments
#[utoipa::path(
    get,
    path = "/api/instructor/assignments",
    tag = "Instructor",
    params(AssignmentFilter),
    responses(
        (status = 200, description = "Minhas aulas e meus ganhos", body = InstructorOverview),
        (status = 403, description = "Apenas instrutores e yoga acharyas")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_assignments(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<Teaching>,
    Query(filter): Query<AssignmentFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let overview = app_state
        .assignment_service
        .instructor_overview(guard.session().user_id, &filter, Utc::now())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(overview)))
}
