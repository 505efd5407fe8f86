// src/models/filter.rs

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::models::{
    assignment::{AssignmentDetail, PaymentStatus},
    schedule::ClassStatus,
};

// Filtro por situação da aula. "upcoming" e "completed" são derivados do horário.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClassStatusFilter {
    Upcoming,
    Completed,
    Scheduled,
    InProgress,
    Cancelled,
}

// Janela sobre a data da atribuição
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    Today,
    Week,
    Month,
}

/// Parâmetros de listagem. Campo ausente = "todos".
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AssignmentFilter {
    /// Busca em nome/e-mail do instrutor e nome da aula
    pub search: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub class_status: Option<ClassStatusFilter>,
    pub date_range: Option<DateRange>,
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

impl AssignmentFilter {
    pub fn matches(&self, record: &AssignmentDetail, now: DateTime<Utc>) -> bool {
        self.matches_search(record)
            && self.matches_payment(record)
            && self.matches_class_status(record, now)
            && self.matches_date(record, now)
    }

    /// Uma passada só, preservando a ordem.
    pub fn apply(&self, records: Vec<AssignmentDetail>, now: DateTime<Utc>) -> Vec<AssignmentDetail> {
        records.into_iter().filter(|r| self.matches(r, now)).collect()
    }

    fn matches_search(&self, record: &AssignmentDetail) -> bool {
        let term = match self.search.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return true,
        };

        contains_ci(record.instructor_name.as_deref(), &term)
            || contains_ci(record.instructor_email.as_deref(), &term)
            || contains_ci(record.class_name.as_deref(), &term)
    }

    fn matches_payment(&self, record: &AssignmentDetail) -> bool {
        self.payment_status
            .is_none_or(|status| record.assignment.payment_status == status)
    }

    fn matches_class_status(&self, record: &AssignmentDetail, now: DateTime<Utc>) -> bool {
        match self.class_status {
            None => true,
            Some(ClassStatusFilter::Upcoming) => record.is_upcoming(now),
            Some(ClassStatusFilter::Completed) => record.is_completed(now),
            Some(ClassStatusFilter::Scheduled) => record.class_status == Some(ClassStatus::Scheduled),
            Some(ClassStatusFilter::InProgress) => record.class_status == Some(ClassStatus::InProgress),
            Some(ClassStatusFilter::Cancelled) => record.class_status == Some(ClassStatus::Cancelled),
        }
    }

    fn matches_date(&self, record: &AssignmentDetail, now: DateTime<Utc>) -> bool {
        let assigned_at = record.assignment.assigned_at;
        match self.date_range {
            None => true,
            Some(DateRange::Today) => assigned_at.date_naive() == now.date_naive(),
            Some(DateRange::Week) => assigned_at >= now - Duration::days(7),
            Some(DateRange::Month) => assigned_at >= now - Duration::days(30),
        }
    }
}
