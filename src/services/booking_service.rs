// src/services/booking_service.rs

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::BookingStore,
    models::{
        auth::Session,
        booking::{BookSlotPayload, Booking, BookingStatus, NewBooking},
        schedule::{ScheduleDay, WeeklySlot},
    },
    services::occurrence::{group_by_day, next_occurrence},
};

const DEFAULT_EXPERIENCE_LEVEL: &str = "beginner";

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    pub async fn weekly_schedule(&self, today: NaiveDate) -> Result<Vec<ScheduleDay>, AppError> {
        let slots = self.store.list_slots().await?;
        group_by_day(slots, today)
    }

    /// Reserva a próxima ocorrência do slot para o usuário da sessão.
    pub async fn book_slot(
        &self,
        session: &Session,
        slot_id: Uuid,
        contact: BookSlotPayload,
        today: NaiveDate,
    ) -> Result<Booking, AppError> {
        contact.validate()?;

        // 1. Slot precisa existir e estar ativo
        let slot = self
            .store
            .find_slot(slot_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("schedule slot {slot_id}")))?;

        // 2. Resolve a data concreta
        let class_date = next_occurrence(slot.day_of_week, today)?;

        // 3. Insere. A duplicidade é barrada pelo armazenamento.
        let new = build_booking(session, &slot, class_date, contact);
        let booking = self.store.insert_booking(&new).await?;

        tracing::info!(
            "🧘 Reserva confirmada: {} em {} às {} ({})",
            booking.class_name,
            booking.class_date,
            booking.class_time,
            session.email
        );

        Ok(booking)
    }

    pub async fn my_bookings(&self, user_id: Uuid) -> Result<Vec<Booking>, AppError> {
        self.store.list_for_user(user_id).await
    }
}

// Campos não informados vêm da sessão ou ficam vazios
fn build_booking(
    session: &Session,
    slot: &WeeklySlot,
    class_date: NaiveDate,
    contact: BookSlotPayload,
) -> NewBooking {
    let (first_name, last_name) = session.split_name();

    NewBooking {
        user_id: session.user_id,
        class_name: slot.class_name.clone(),
        instructor: slot.instructor_name.clone().unwrap_or_default(),
        class_date,
        class_time: slot.start_time,
        first_name,
        last_name,
        email: contact.email.unwrap_or_else(|| session.email.clone()),
        phone: contact
            .phone
            .or_else(|| session.phone.clone())
            .unwrap_or_default(),
        experience_level: contact
            .experience_level
            .unwrap_or_else(|| DEFAULT_EXPERIENCE_LEVEL.to_string()),
        special_requests: contact.special_requests.unwrap_or_default(),
        emergency_contact: contact.emergency_contact.unwrap_or_default(),
        emergency_phone: contact.emergency_phone.unwrap_or_default(),
        status: BookingStatus::Confirmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{auth::Role, booking::BookingKey};
    use async_trait::async_trait;
    use chrono::{NaiveTime, Utc};
    use std::{collections::HashSet, sync::Mutex};

    // Simula o índice único de `bookings`
    #[derive(Default)]
    struct MemoryBookings {
        slots: Vec<WeeklySlot>,
        keys: Mutex<HashSet<BookingKey>>,
        rows: Mutex<Vec<Booking>>,
    }

    #[async_trait]
    impl BookingStore for MemoryBookings {
        async fn list_slots(&self) -> Result<Vec<WeeklySlot>, AppError> {
            Ok(self.slots.clone())
        }

        async fn find_slot(&self, slot_id: Uuid) -> Result<Option<WeeklySlot>, AppError> {
            Ok(self.slots.iter().find(|s| s.id == slot_id).cloned())
        }

        async fn insert_booking(&self, new: &NewBooking) -> Result<Booking, AppError> {
            if !self.keys.lock().unwrap().insert(new.key()) {
                return Err(AppError::DuplicateBooking);
            }
            let booking = Booking {
                id: Uuid::new_v4(),
                user_id: new.user_id,
                class_name: new.class_name.clone(),
                instructor: new.instructor.clone(),
                class_date: new.class_date,
                class_time: new.class_time,
                first_name: new.first_name.clone(),
                last_name: new.last_name.clone(),
                email: new.email.clone(),
                phone: new.phone.clone(),
                experience_level: new.experience_level.clone(),
                special_requests: new.special_requests.clone(),
                emergency_contact: new.emergency_contact.clone(),
                emergency_phone: new.emergency_phone.clone(),
                status: new.status,
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(booking.clone());
            Ok(booking)
        }

        async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, AppError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|b| b.user_id == user_id)
                .cloned()
                .collect())
        }
    }

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn friday_hatha() -> WeeklySlot {
        WeeklySlot {
            id: Uuid::new_v4(),
            day_of_week: 5,
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            duration_minutes: 75,
            max_participants: 12,
            class_type_id: Uuid::new_v4(),
            class_name: "Hatha Yoga".into(),
            difficulty_level: "beginner".into(),
            instructor_id: None,
            instructor_name: Some("Ananda Rao".into()),
        }
    }

    fn student() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "maria@email.com".into(),
            full_name: Some("Maria da Silva".into()),
            phone: Some("+55 11 90000-0000".into()),
            roles: vec![Role::User],
        }
    }

    fn setup() -> (BookingService, Arc<MemoryBookings>, WeeklySlot) {
        let slot = friday_hatha();
        let store = Arc::new(MemoryBookings {
            slots: vec![slot.clone()],
            ..Default::default()
        });
        (BookingService::new(store.clone()), store, slot)
    }

    #[tokio::test]
    async fn booking_fills_defaults_from_session() {
        let (service, _, slot) = setup();

        let booking = service
            .book_slot(&student(), slot.id, BookSlotPayload::default(), wednesday())
            .await
            .unwrap();

        assert_eq!(booking.class_date, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        assert_eq!(booking.class_time, slot.start_time);
        assert_eq!(booking.first_name, "Maria");
        assert_eq!(booking.last_name, "da Silva");
        assert_eq!(booking.email, "maria@email.com");
        assert_eq!(booking.instructor, "Ananda Rao");
        assert_eq!(booking.experience_level, "beginner");
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn second_identical_booking_is_rejected() {
        let (service, store, slot) = setup();
        let session = student();

        service
            .book_slot(&session, slot.id, BookSlotPayload::default(), wednesday())
            .await
            .unwrap();
        let err = service
            .book_slot(&session, slot.id, BookSlotPayload::default(), wednesday())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateBooking));
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn other_students_can_book_the_same_occurrence() {
        let (service, store, slot) = setup();

        service
            .book_slot(&student(), slot.id, BookSlotPayload::default(), wednesday())
            .await
            .unwrap();
        service
            .book_slot(&student(), slot.id, BookSlotPayload::default(), wednesday())
            .await
            .unwrap();

        assert_eq!(store.rows.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_slot_is_not_found() {
        let (service, _, _) = setup();

        let err = service
            .book_slot(&student(), Uuid::new_v4(), BookSlotPayload::default(), wednesday())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResourceNotFound(_)));
    }

    #[tokio::test]
    async fn invalid_contact_email_is_a_validation_error() {
        let (service, store, slot) = setup();
        let contact = BookSlotPayload {
            email: Some("not-an-email".into()),
            ..Default::default()
        };

        let err = service
            .book_slot(&student(), slot.id, contact, wednesday())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(store.rows.lock().unwrap().is_empty());
    }
}
