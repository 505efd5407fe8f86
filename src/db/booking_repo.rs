// src/db/booking_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        booking::{Booking, NewBooking},
        schedule::WeeklySlot,
    },
};

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Slots ativos, ordenados por dia e horário.
    async fn list_slots(&self) -> Result<Vec<WeeklySlot>, AppError>;

    async fn find_slot(&self, slot_id: Uuid) -> Result<Option<WeeklySlot>, AppError>;

    /// Deve devolver `AppError::DuplicateBooking` se a chave
    /// (usuário, data, horário, aula) já existir.
    async fn insert_booking(&self, new: &NewBooking) -> Result<Booking, AppError>;

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, AppError>;
}

const SLOT_SELECT: &str = r#"
    SELECT
        ws.id, ws.day_of_week, ws.start_time, ws.duration_minutes, ws.max_participants,
        ws.class_type_id,
        ct.name AS class_name,
        ct.difficulty_level,
        ws.instructor_id,
        u.full_name AS instructor_name
    FROM weekly_schedules ws
    JOIN class_types ct ON ct.id = ws.class_type_id
    LEFT JOIN users u   ON u.id = ws.instructor_id
"#;

pub(crate) const BOOKING_COLUMNS: &str = r#"
    id, user_id, class_name, instructor, class_date, class_time,
    first_name, last_name, email, phone, experience_level,
    special_requests, emergency_contact, emergency_phone,
    status, created_at
"#;

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn list_slots(&self) -> Result<Vec<WeeklySlot>, AppError> {
        let sql = format!("{SLOT_SELECT} WHERE ws.is_active = true ORDER BY ws.day_of_week, ws.start_time");

        let slots = sqlx::query_as::<_, WeeklySlot>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(slots)
    }

    async fn find_slot(&self, slot_id: Uuid) -> Result<Option<WeeklySlot>, AppError> {
        let sql = format!("{SLOT_SELECT} WHERE ws.id = $1 AND ws.is_active = true");

        let slot = sqlx::query_as::<_, WeeklySlot>(&sql)
            .bind(slot_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(slot)
    }

    async fn insert_booking(&self, new: &NewBooking) -> Result<Booking, AppError> {
        let sql = format!(
            r#"
            INSERT INTO bookings (
                user_id, class_name, instructor, class_date, class_time,
                first_name, last_name, email, phone, experience_level,
                special_requests, emergency_contact, emergency_phone, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {BOOKING_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, Booking>(&sql)
            .bind(new.user_id)
            .bind(&new.class_name)
            .bind(&new.instructor)
            .bind(new.class_date)
            .bind(new.class_time)
            .bind(&new.first_name)
            .bind(&new.last_name)
            .bind(&new.email)
            .bind(&new.phone)
            .bind(&new.experience_level)
            .bind(&new.special_requests)
            .bind(&new.emergency_contact)
            .bind(&new.emergency_phone)
            .bind(new.status)
            .fetch_one(&self.pool)
            .await;

        // O índice único é quem garante a regra; aqui só traduzimos o erro
        match result {
            Ok(booking) => Ok(booking),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::info!("Reserva duplicada recusada: {:?}", new.key());
                Err(AppError::DuplicateBooking)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, AppError> {
        let sql = format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE user_id = $1
            ORDER BY class_date DESC, class_time DESC
            "#
        );

        let bookings = sqlx::query_as::<_, Booking>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }
}
