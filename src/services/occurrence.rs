// src/services/occurrence.rs

use chrono::{Datelike, Duration, NaiveDate};

use crate::{
    common::error::AppError,
    models::schedule::{ScheduleDay, ScheduleSlotView, WeeklySlot},
};

pub const DAY_NAMES: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

/// Dias até a próxima ocorrência de `target_day` (0 = domingo).
/// Sempre entre 1 e 7: o mesmo dia da semana de hoje cai na semana seguinte.
pub fn days_until(target_day: i16, today: NaiveDate) -> Result<i64, AppError> {
    if !(0..=6).contains(&target_day) {
        return Err(AppError::InvalidDayOfWeek(target_day));
    }

    let current = i64::from(today.weekday().num_days_from_sunday());
    let diff = (i64::from(target_day) - current + 7) % 7;

    Ok(if diff == 0 { 7 } else { diff })
}

pub fn next_occurrence(target_day: i16, today: NaiveDate) -> Result<NaiveDate, AppError> {
    Ok(today + Duration::days(days_until(target_day, today)?))
}

// Agrupa os slots por dia (0..6), mantendo a ordem recebida dentro de cada dia
pub fn group_by_day(slots: Vec<WeeklySlot>, today: NaiveDate) -> Result<Vec<ScheduleDay>, AppError> {
    let mut days: Vec<ScheduleDay> = DAY_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| ScheduleDay {
            day_of_week: i as i16,
            day_name: name.to_string(),
            slots: Vec::new(),
        })
        .collect();

    for slot in slots {
        let next_date = next_occurrence(slot.day_of_week, today)?;
        days[slot.day_of_week as usize]
            .slots
            .push(ScheduleSlotView { slot, next_date });
    }

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};
    use uuid::Uuid;

    // 14/10/2026 é uma quarta-feira
    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn slot(day: i16, class_name: &str) -> WeeklySlot {
        WeeklySlot {
            id: Uuid::new_v4(),
            day_of_week: day,
            start_time: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
            duration_minutes: 60,
            max_participants: 15,
            class_type_id: Uuid::new_v4(),
            class_name: class_name.to_string(),
            difficulty_level: "beginner".into(),
            instructor_id: None,
            instructor_name: None,
        }
    }

    #[test]
    fn same_weekday_goes_to_next_week() {
        assert_eq!(wednesday().weekday(), Weekday::Wed);
        assert_eq!(days_until(3, wednesday()).unwrap(), 7);
        assert_eq!(
            next_occurrence(3, wednesday()).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 21).unwrap()
        );
    }

    #[test]
    fn later_this_week() {
        assert_eq!(days_until(5, wednesday()).unwrap(), 2);
        assert_eq!(
            next_occurrence(5, wednesday()).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
        );
    }

    #[test]
    fn earlier_weekday_wraps_around() {
        // segunda -> 5 dias, domingo -> 4 dias
        assert_eq!(days_until(1, wednesday()).unwrap(), 5);
        assert_eq!(days_until(0, wednesday()).unwrap(), 4);
    }

    #[test]
    fn always_strictly_in_the_future() {
        for offset in 0..7 {
            let today = wednesday() + Duration::days(offset);
            for day in 0..7 {
                let n = days_until(day, today).unwrap();
                assert!((1..=7).contains(&n), "day {day} from {today}: {n}");
            }
        }
    }

    #[test]
    fn day_out_of_range_is_rejected() {
        assert!(matches!(days_until(7, wednesday()), Err(AppError::InvalidDayOfWeek(7))));
        assert!(matches!(next_occurrence(-1, wednesday()), Err(AppError::InvalidDayOfWeek(-1))));
    }

    #[test]
    fn grouping_covers_all_days() {
        let days = group_by_day(vec![slot(3, "Hatha"), slot(5, "Yin"), slot(3, "Flow")], wednesday()).unwrap();

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].day_name, "Sunday");
        assert!(days[1].slots.is_empty());

        let wed: Vec<_> = days[3].slots.iter().map(|s| s.slot.class_name.as_str()).collect();
        assert_eq!(wed, vec!["Hatha", "Flow"]);
        assert_eq!(days[3].slots[0].next_date, NaiveDate::from_ymd_opt(2026, 10, 21).unwrap());
        assert_eq!(days[5].slots[0].next_date, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
    }
}
