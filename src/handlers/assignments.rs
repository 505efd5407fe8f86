// src/handlers/assignments.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{AssignmentManagers, RequireRole},
    },
    models::{
        assignment::{AssignmentDetail, ClassAssignment, CreateAssignmentPayload, UpdatePaymentStatusPayload},
        auth::{Role, UserWithRoles},
        filter::AssignmentFilter,
        schedule::ScheduledClassDetail,
    },
};

// =============================================================================
//  1. CRIAÇÃO
// =============================================================================

// POST /api/assignments
#[utoipa::path(
    post,
    path = "/api/assignments",
    tag = "Assignments",
    request_body = CreateAssignmentPayload,
    responses(
        (status = 201, description = "Aula atribuída (pagamento pendente)", body = ClassAssignment),
        (status = 400, description = "Formulário inválido (detalhes por campo)"),
        (status = 403, description = "Sem papel de gestão")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_assignment(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<AssignmentManagers>,
    Json(payload): Json<CreateAssignmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let assignment = app_state
        .assignment_service
        .assign_class(guard.session(), payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(assignment)))
}

// =============================================================================
//  2. STATUS DO PAGAMENTO
// =============================================================================

// PATCH /api/assignments/{id}/payment-status
#[utoipa::path(
    patch,
    path = "/api/assignments/{assignment_id}/payment-status",
    tag = "Assignments",
    request_body = UpdatePaymentStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = ClassAssignment),
        (status = 404, description = "Atribuição não encontrada"),
        (status = 409, description = "Transição não permitida (cancelado é final)")
    ),
    params(
        ("assignment_id" = Uuid, Path, description = "ID da Atribuição")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_payment_status(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AssignmentManagers>,
    Path(assignment_id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = app_state
        .assignment_service
        .update_payment_status(assignment_id, payload.payment_status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// =============================================================================
//  3. LEITURAS
// =============================================================================

// GET /api/assignments
#[utoipa::path(
    get,
    path = "/api/assignments",
    tag = "Assignments",
    params(AssignmentFilter),
    responses(
        (status = 200, description = "Atribuições filtradas, mais recentes primeiro", body = Vec<AssignmentDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_assignments(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AssignmentManagers>,
    Query(filter): Query<AssignmentFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let assignments = app_state
        .assignment_service
        .list_assignments(&filter, Utc::now())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(assignments)))
}

// GET /api/assignments/classes
#[utoipa::path(
    get,
    path = "/api/assignments/classes",
    tag = "Assignments",
    responses(
        (status = 200, description = "Aulas agendadas ou em andamento", body = Vec<ScheduledClassDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_assignable_classes(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AssignmentManagers>,
) -> Result<impl IntoResponse, ApiError> {
    let classes = app_state
        .assignment_service
        .list_assignable_classes()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(classes)))
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AssigneeQuery {
    /// instructor | yoga_acharya
    pub role: Option<Role>,
}

// GET /api/assignments/assignees
#[utoipa::path(
    get,
    path = "/api/assignments/assignees",
    tag = "Assignments",
    params(AssigneeQuery),
    responses(
        (status = 200, description = "Instrutores e yoga acharyas", body = Vec<UserWithRoles>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_assignees(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AssignmentManagers>,
    Query(query): Query<AssigneeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state
        .user_service
        .list_assignees(query.role)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(users)))
}
