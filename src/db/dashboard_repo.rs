// src/db/dashboard_repo.rs

use sqlx::PgPool;
use rust_decimal::Decimal;

use crate::{
    db::booking_repo::BOOKING_COLUMNS,
    models::{booking::Booking, dashboard::DashboardSummary},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Contador isolado: se a tabela não existir ou a consulta falhar, vale 0
    async fn count_or_zero(&self, label: &str, sql: &str) -> i64 {
        match sqlx::query_scalar::<_, i64>(sql).fetch_one(&self.pool).await {
            Ok(total) => total,
            Err(e) => {
                tracing::warn!("⚠️ Contador '{}' indisponível: {}", label, e);
                0
            }
        }
    }

    async fn monthly_revenue(&self) -> Decimal {
        let result = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM transactions
            WHERE status = 'completed'
              AND created_at >= date_trunc('month', now())
            "#,
        )
        .fetch_one(&self.pool)
        .await;

        result.unwrap_or_else(|e| {
            tracing::warn!("⚠️ Receita mensal indisponível: {}", e);
            Decimal::ZERO
        })
    }

    async fn recent_bookings(&self) -> Vec<Booking> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC LIMIT 5");

        sqlx::query_as::<_, Booking>(&sql)
            .fetch_all(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("⚠️ Reservas recentes indisponíveis: {}", e);
                Vec::new()
            })
    }

    // Resumo geral. Nunca falha como um todo.
    pub async fn get_summary(&self) -> DashboardSummary {
        let (
            total_bookings,
            total_queries,
            pending_queries,
            total_contacts,
            new_contacts,
            total_articles,
            published_articles,
            total_views,
            total_users,
            total_instructors,
            total_class_types,
            active_subscriptions,
            monthly_revenue,
            recent_bookings,
        ) = tokio::join!(
            self.count_or_zero("bookings", "SELECT COUNT(*) FROM bookings"),
            self.count_or_zero("yoga_queries", "SELECT COUNT(*) FROM yoga_queries"),
            self.count_or_zero(
                "pending_queries",
                "SELECT COUNT(*) FROM yoga_queries WHERE status = 'pending'"
            ),
            self.count_or_zero("contact_messages", "SELECT COUNT(*) FROM contact_messages"),
            self.count_or_zero(
                "new_contacts",
                "SELECT COUNT(*) FROM contact_messages WHERE status = 'new'"
            ),
            self.count_or_zero("articles", "SELECT COUNT(*) FROM articles"),
            self.count_or_zero(
                "published_articles",
                "SELECT COUNT(*) FROM articles WHERE status = 'published'"
            ),
            self.count_or_zero("article_views", "SELECT COUNT(*) FROM article_views"),
            self.count_or_zero("users", "SELECT COUNT(*) FROM users"),
            self.count_or_zero("instructors", "SELECT COUNT(*) FROM instructors"),
            self.count_or_zero("class_types", "SELECT COUNT(*) FROM class_types"),
            self.count_or_zero(
                "active_subscriptions",
                "SELECT COUNT(*) FROM user_subscriptions WHERE status = 'active'"
            ),
            self.monthly_revenue(),
            self.recent_bookings(),
        );

        DashboardSummary {
            total_bookings,
            total_queries,
            pending_queries,
            total_contacts,
            new_contacts,
            total_articles,
            published_articles,
            total_views,
            total_users,
            total_instructors,
            total_class_types,
            active_subscriptions,
            monthly_revenue,
            recent_bookings,
        }
    }
}
