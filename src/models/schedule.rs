// src/models/schedule.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

// Ciclo de vida de uma aula agendada (ocorrência concreta)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "class_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ClassStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

// --- Ocorrências (scheduled_classes) ---

// Aula agendada com tipo e instrutor padrão, para o formulário de atribuição
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledClassDetail {
    pub id: Uuid,
    pub class_type_id: Uuid,
    pub instructor_id: Option<Uuid>,

    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    #[schema(example = 20)]
    pub max_participants: i32,
    #[schema(example = 12)]
    pub current_participants: i32,

    pub status: ClassStatus,

    #[schema(example = "Vinyasa Flow")]
    pub class_name: String,
    #[schema(example = "intermediate")]
    pub difficulty_level: String,
    #[schema(example = "25.00")]
    pub price: Decimal,

    pub instructor_name: Option<String>,
    pub instructor_email: Option<String>,
}

// --- Grade semanal (weekly_schedules) ---

// Modelo recorrente: não é reservável em si, só a próxima ocorrência.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySlot {
    pub id: Uuid,

    // 0 = domingo ... 6 = sábado
    #[schema(example = 3)]
    pub day_of_week: i16,

    #[schema(value_type = String, format = "time", example = "07:30:00")]
    pub start_time: NaiveTime,

    #[schema(example = 60)]
    pub duration_minutes: i32,

    #[schema(example = 15)]
    pub max_participants: i32,

    pub class_type_id: Uuid,
    #[schema(example = "Hatha Yoga")]
    pub class_name: String,
    #[schema(example = "beginner")]
    pub difficulty_level: String,

    pub instructor_id: Option<Uuid>,
    #[schema(example = "Ananda Rao")]
    pub instructor_name: Option<String>,
}

// Um slot com a data da próxima ocorrência já resolvida
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlotView {
    #[serde(flatten)]
    pub slot: WeeklySlot,

    #[schema(value_type = String, format = Date, example = "2026-10-21")]
    pub next_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    #[schema(example = 0)]
    pub day_of_week: i16,
    #[schema(example = "Sunday")]
    pub day_name: String,
    pub slots: Vec<ScheduleSlotView>,
}
