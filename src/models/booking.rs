// src/models/booking.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Attended,
    NoShow,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "Hatha Yoga")]
    pub class_name: String,
    #[schema(example = "Ananda Rao")]
    pub instructor: String,

    #[schema(value_type = String, format = Date, example = "2026-10-21")]
    pub class_date: NaiveDate,
    #[schema(value_type = String, format = "time", example = "07:30:00")]
    pub class_time: NaiveTime,

    // Contato
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[schema(example = "beginner")]
    pub experience_level: String,
    pub special_requests: String,
    pub emergency_contact: String,
    pub emergency_phone: String,

    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

// A chave da regra "uma reserva por ocorrência"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingKey {
    pub user_id: Uuid,
    pub class_date: NaiveDate,
    pub class_time: NaiveTime,
    pub class_name: String,
}

// Reserva pronta para inserir (a data já foi resolvida)
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub class_name: String,
    pub instructor: String,
    pub class_date: NaiveDate,
    pub class_time: NaiveTime,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub experience_level: String,
    pub special_requests: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub status: BookingStatus,
}

impl NewBooking {
    pub fn key(&self) -> BookingKey {
        BookingKey {
            user_id: self.user_id,
            class_date: self.class_date,
            class_time: self.class_time,
            class_name: self.class_name.clone(),
        }
    }
}

// Tudo opcional: o que não vier é preenchido a partir da sessão
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookSlotPayload {
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "aluno@email.com")]
    pub email: Option<String>,

    #[validate(length(max = 32, message = "too_long"))]
    #[schema(example = "+55 11 99999-8888")]
    pub phone: Option<String>,

    #[schema(example = "beginner")]
    pub experience_level: Option<String>,

    #[validate(length(max = 500, message = "too_long"))]
    pub special_requests: Option<String>,

    pub emergency_contact: Option<String>,
    #[validate(length(max = 32, message = "too_long"))]
    pub emergency_phone: Option<String>,
}
