// src/models/dashboard.rs

use serde::Serialize;
use rust_decimal::Decimal;
use utoipa::ToSchema;

use crate::models::booking::Booking;

// Cards do painel administrativo. Cada contador é buscado separadamente
// e vale 0 quando a consulta falha.
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_bookings: i64,
    pub total_queries: i64,      // yoga_queries
    pub pending_queries: i64,
    pub total_contacts: i64,     // contact_messages
    pub new_contacts: i64,
    pub total_articles: i64,
    pub published_articles: i64,
    pub total_views: i64,
    pub total_users: i64,
    pub total_instructors: i64,
    pub total_class_types: i64,
    pub active_subscriptions: i64,
    // Transações concluídas desde o dia 1º do mês corrente
    #[schema(example = "1250.00")]
    pub monthly_revenue: Decimal,
    pub recent_bookings: Vec<Booking>,
}
