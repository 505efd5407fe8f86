// src/handlers/schedule.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{
        booking::{BookSlotPayload, Booking},
        schedule::ScheduleDay,
    },
};

// GET /api/schedule (público)
#[utoipa::path(
    get,
    path = "/api/schedule",
    tag = "Schedule",
    responses(
        (status = 200, description = "Grade semanal agrupada por dia, com a próxima data de cada slot", body = Vec<ScheduleDay>)
    )
)]
pub async fn get_weekly_schedule(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let days = app_state
        .booking_service
        .weekly_schedule(Local::now().date_naive())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(days)))
}

// POST /api/schedule/{slot_id}/book
#[utoipa::path(
    post,
    path = "/api/schedule/{slot_id}/book",
    tag = "Bookings",
    request_body = BookSlotPayload,
    responses(
        (status = 201, description = "Reserva confirmada para a próxima ocorrência", body = Booking),
        (status = 404, description = "Slot não encontrado"),
        (status = 409, description = "Já existe reserva para esta aula nesta data")
    ),
    params(
        ("slot_id" = Uuid, Path, description = "ID do slot semanal")
    ),
    security(("api_jwt" = []))
)]
pub async fn book_slot(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(slot_id): Path<Uuid>,
    Json(payload): Json<BookSlotPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = app_state
        .booking_service
        .book_slot(&user.0, slot_id, payload, Local::now().date_naive())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings/me
#[utoipa::path(
    get,
    path = "/api/bookings/me",
    tag = "Bookings",
    responses(
        (status = 200, description = "Minhas reservas, data mais recente primeiro", body = Vec<Booking>)
    ),
    security(("api_jwt" = []))
)]
pub async fn my_bookings(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let bookings = app_state
        .booking_service
        .my_bookings(user.0.user_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(bookings)))
}
