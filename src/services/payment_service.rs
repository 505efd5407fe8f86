// src/services/payment_service.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    common::error::AppError,
    db::AssignmentStore,
    models::{
        assignment::AssignmentDetail,
        filter::AssignmentFilter,
        report::{PaymentOverview, PaymentStats},
    },
};

const CSV_HEADER: &str = "Instructor,Class,Date,Amount,Status,Notes";
// "Oct 16, 2026, 06:00 PM"
const CSV_DATE_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

#[derive(Clone)]
pub struct PaymentService {
    store: Arc<dyn AssignmentStore>,
}

impl PaymentService {
    pub fn new(store: Arc<dyn AssignmentStore>) -> Self {
        Self { store }
    }

    async fn filtered(
        &self,
        filter: &AssignmentFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<AssignmentDetail>, AppError> {
        let all = self.store.list_details(None).await?;
        Ok(filter.apply(all, now))
    }

    // Lista + cards, ambos sobre a lista já filtrada
    pub async fn overview(
        &self,
        filter: &AssignmentFilter,
        now: DateTime<Utc>,
    ) -> Result<PaymentOverview, AppError> {
        let payments = self.filtered(filter, now).await?;
        let stats = PaymentStats::from_details(&payments);

        Ok(PaymentOverview { payments, stats })
    }

    pub async fn export_csv(
        &self,
        filter: &AssignmentFilter,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let payments = self.filtered(filter, now).await?;
        tracing::info!("📤 Exportando {} pagamentos para CSV", payments.len());
        Ok(payments_csv(&payments))
    }
}

/// Data em UTC, a mesma base das datas dentro do CSV.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("payments-{}.csv", now.date_naive().format("%Y-%m-%d"))
}

/// Linhas separadas por '\n', campos por ','.
/// Nenhum campo é escapado: vírgulas nas notas quebram a coluna.
pub fn payments_csv(records: &[AssignmentDetail]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(records.iter().map(csv_row));
    lines.join("\n")
}

fn csv_row(record: &AssignmentDetail) -> String {
    let date = record
        .class_start_time
        .map(|start| start.format(CSV_DATE_FORMAT).to_string())
        .unwrap_or_default();

    [
        record.instructor_display_name().to_string(),
        record.class_name.clone().unwrap_or_else(|| "Unknown".to_string()),
        date,
        record.assignment.payment_amount.normalize().to_string(),
        record.assignment.payment_status.to_string(),
        record.assignment.notes.clone(),
    ]
    .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{
            assignment::{ClassAssignment, PaymentStatus},
            schedule::ClassStatus,
        },
        services::assignment_service::tests::MemoryAssignments,
    };
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn record(
        instructor_name: Option<&str>,
        instructor_email: Option<&str>,
        amount: Decimal,
        status: PaymentStatus,
        notes: &str,
    ) -> AssignmentDetail {
        let start = Utc.with_ymd_and_hms(2026, 10, 16, 18, 0, 0).unwrap();
        AssignmentDetail {
            assignment: ClassAssignment {
                id: Uuid::new_v4(),
                scheduled_class_id: Uuid::new_v4(),
                instructor_id: Uuid::new_v4(),
                assigned_by: Uuid::new_v4(),
                payment_amount: amount,
                payment_status: status,
                notes: notes.to_string(),
                assigned_at: start,
            },
            class_name: Some("Hatha Yoga".into()),
            difficulty_level: None,
            class_start_time: Some(start),
            class_end_time: None,
            class_status: Some(ClassStatus::Scheduled),
            instructor_name: instructor_name.map(str::to_string),
            instructor_email: instructor_email.map(str::to_string),
            assigned_by_email: None,
        }
    }

    #[test]
    fn csv_header_and_row_layout() {
        let csv = payments_csv(&[record(
            Some("Ananda Rao"),
            None,
            Decimal::new(5000, 2),
            PaymentStatus::Paid,
            "",
        )]);

        let lines: Vec<_> = csv.split('\n').collect();
        assert_eq!(lines[0], "Instructor,Class,Date,Amount,Status,Notes");
        assert_eq!(lines[1], "Ananda Rao,Hatha Yoga,Oct 16, 2026, 06:00 PM,50,paid,");
    }

    #[test]
    fn comma_in_notes_is_written_unescaped() {
        let csv = payments_csv(&[record(
            None,
            Some("ananda@studio.com"),
            Decimal::new(1250, 2),
            PaymentStatus::Pending,
            "morning, substitute",
        )]);

        let row = csv.lines().nth(1).unwrap();
        assert!(row.ends_with(",12.5,pending,morning, substitute"));
        assert!(!row.contains('"'));
        assert!(row.starts_with("ananda@studio.com,"));
    }

    #[test]
    fn missing_names_fall_back_to_unknown() {
        let mut r = record(None, None, Decimal::ZERO, PaymentStatus::Cancelled, "");
        r.class_name = None;
        r.class_start_time = None;

        let csv = payments_csv(&[r]);
        assert_eq!(csv.lines().nth(1).unwrap(), "Unknown,Unknown,,0,cancelled,");
    }

    #[test]
    fn empty_export_is_only_the_header() {
        assert_eq!(payments_csv(&[]), CSV_HEADER);
    }

    #[test]
    fn filename_carries_the_utc_date() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
        assert_eq!(export_filename(now), "payments-2026-10-16.csv");

        // 23:30 em São Paulo já é o dia seguinte em UTC
        let late = Utc.with_ymd_and_hms(2026, 10, 17, 2, 30, 0).unwrap();
        assert_eq!(export_filename(late), "payments-2026-10-17.csv");
    }

    #[tokio::test]
    async fn overview_stats_follow_the_filter() {
        let store = Arc::new(MemoryAssignments::default());
        store.details.lock().unwrap().extend([
            record(Some("A"), None, Decimal::from(50), PaymentStatus::Paid, ""),
            record(Some("B"), None, Decimal::from(30), PaymentStatus::Pending, ""),
            record(Some("C"), None, Decimal::from(20), PaymentStatus::Cancelled, ""),
        ]);
        let service = PaymentService::new(store);
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap();

        let all = service.overview(&AssignmentFilter::default(), now).await.unwrap();
        assert_eq!(all.stats.total_amount, Decimal::from(100));
        assert_eq!(all.stats.paid_amount, Decimal::from(50));
        assert_eq!(all.stats.pending_amount, Decimal::from(30));

        let only_paid = AssignmentFilter {
            payment_status: Some(PaymentStatus::Paid),
            ..Default::default()
        };
        let paid = service.overview(&only_paid, now).await.unwrap();
        assert_eq!(paid.payments.len(), 1);
        assert_eq!(paid.stats.total_amount, Decimal::from(50));
    }
}
