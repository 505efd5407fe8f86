// src/models/report.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::assignment::{AssignmentDetail, PaymentStatus};

// Cards da tela de pagamentos (recalculados a cada requisição)
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    // Soma de todos os status, inclusive cancelados
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub pending_amount: Decimal,
    pub cancelled_amount: Decimal,
    pub total_count: usize,
    pub paid_count: usize,
    pub pending_count: usize,
}

impl PaymentStats {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = (&'a Decimal, PaymentStatus)>,
    {
        let mut stats = Self::default();
        for (amount, status) in records {
            stats.total_amount += *amount;
            stats.total_count += 1;
            match status {
                PaymentStatus::Paid => {
                    stats.paid_amount += *amount;
                    stats.paid_count += 1;
                }
                PaymentStatus::Pending => {
                    stats.pending_amount += *amount;
                    stats.pending_count += 1;
                }
                PaymentStatus::Cancelled => stats.cancelled_amount += *amount,
            }
        }
        stats
    }

    pub fn from_details(records: &[AssignmentDetail]) -> Self {
        Self::from_records(
            records
                .iter()
                .map(|r| (&r.assignment.payment_amount, r.assignment.payment_status)),
        )
    }
}

// Cards do painel do instrutor
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorStats {
    pub total: usize,
    pub upcoming: usize,
    pub completed: usize,
    // Quantidade com pagamento pendente
    pub unpaid: usize,
    pub total_earnings: Decimal,
    pub pending_earnings: Decimal,
}

impl InstructorStats {
    pub fn from_records(records: &[AssignmentDetail], now: DateTime<Utc>) -> Self {
        let mut stats = Self::default();
        for r in records {
            stats.total += 1;
            if r.is_upcoming(now) {
                stats.upcoming += 1;
            }
            if r.is_completed(now) {
                stats.completed += 1;
            }
            match r.assignment.payment_status {
                PaymentStatus::Paid => stats.total_earnings += r.assignment.payment_amount,
                PaymentStatus::Pending => {
                    stats.unpaid += 1;
                    stats.pending_earnings += r.assignment.payment_amount;
                }
                PaymentStatus::Cancelled => {}
            }
        }
        stats
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOverview {
    pub payments: Vec<AssignmentDetail>,
    pub stats: PaymentStats,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorOverview {
    pub assignments: Vec<AssignmentDetail>,
    pub stats: InstructorStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{assignment::ClassAssignment, schedule::ClassStatus};
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap()
    }

    fn detail(amount: i64, status: PaymentStatus, starts_in_hours: i64) -> AssignmentDetail {
        let start = now() + Duration::hours(starts_in_hours);
        AssignmentDetail {
            assignment: ClassAssignment {
                id: Uuid::new_v4(),
                scheduled_class_id: Uuid::new_v4(),
                instructor_id: Uuid::new_v4(),
                assigned_by: Uuid::new_v4(),
                payment_amount: Decimal::from(amount),
                payment_status: status,
                notes: String::new(),
                assigned_at: now(),
            },
            class_name: Some("Hatha".into()),
            difficulty_level: None,
            class_start_time: Some(start),
            class_end_time: Some(start + Duration::hours(1)),
            class_status: Some(ClassStatus::Scheduled),
            instructor_name: None,
            instructor_email: None,
            assigned_by_email: None,
        }
    }

    #[test]
    fn payment_totals_by_status() {
        let records = vec![
            detail(50, PaymentStatus::Paid, 1),
            detail(30, PaymentStatus::Pending, 1),
            detail(20, PaymentStatus::Cancelled, 1),
        ];

        let stats = PaymentStats::from_details(&records);

        assert_eq!(stats.total_amount, Decimal::from(100));
        assert_eq!(stats.paid_amount, Decimal::from(50));
        assert_eq!(stats.pending_amount, Decimal::from(30));
        assert_eq!(stats.cancelled_amount, Decimal::from(20));
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.paid_count, 1);
        assert_eq!(stats.pending_count, 1);
    }

    #[test]
    fn empty_list_gives_zeroes() {
        assert_eq!(PaymentStats::from_details(&[]), PaymentStats::default());
        assert_eq!(InstructorStats::from_records(&[], now()), InstructorStats::default());
    }

    #[test]
    fn instructor_counters() {
        let records = vec![
            detail(40, PaymentStatus::Paid, -5),   // já terminou
            detail(25, PaymentStatus::Pending, 24), // futura
            detail(25, PaymentStatus::Pending, 48), // futura
            detail(10, PaymentStatus::Cancelled, -48),
        ];

        let stats = InstructorStats::from_records(&records, now());

        assert_eq!(stats.total, 4);
        assert_eq!(stats.upcoming, 2);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.unpaid, 2);
        assert_eq!(stats.total_earnings, Decimal::from(40));
        assert_eq!(stats.pending_earnings, Decimal::from(50));
    }
}
