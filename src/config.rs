// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{AssignmentRepository, BookingRepository, DashboardRepository, UserRepository, UserStore},
    services::{
        assignment_service::AssignmentService, auth::AuthService, booking_service::BookingService,
        dashboard_service::DashboardService, payment_service::PaymentService,
        user_service::UserService,
    },
};

// Tudo que vem do ambiente (.env em desenvolvimento)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_audience: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let db_max_connections = var_or("DB_MAX_CONNECTIONS", "5")
            .parse()
            .context("DB_MAX_CONNECTIONS deve ser um número")?;
        let acquire_secs: u64 = var_or("DB_ACQUIRE_TIMEOUT_SECS", "3")
            .parse()
            .context("DB_ACQUIRE_TIMEOUT_SECS deve ser um número")?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_audience: var_or("JWT_AUDIENCE", "authenticated"),
            bind_addr: var_or("BIND_ADDR", "0.0.0.0:3000"),
            db_max_connections,
            db_acquire_timeout: Duration::from_secs(acquire_secs),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub i18n_store: Arc<I18nStore>,

    pub auth_service: AuthService,
    pub user_service: UserService,
    pub assignment_service: AssignmentService,
    pub payment_service: PaymentService,
    pub booking_service: BookingService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar no banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        sqlx::migrate!()
            .run(&db_pool)
            .await
            .context("Falha ao rodar as migrações do banco de dados")?;

        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        Ok(Self::from_pool(db_pool, config))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, config: &Config) -> Self {
        let user_repo: Arc<dyn UserStore> = Arc::new(UserRepository::new(db_pool.clone()));
        let assignment_repo = Arc::new(AssignmentRepository::new(db_pool.clone()));
        let booking_repo = Arc::new(BookingRepository::new(db_pool.clone()));
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        Self {
            auth_service: AuthService::new(
                user_repo.clone(),
                config.jwt_secret.clone(),
                config.jwt_audience.clone(),
            ),
            user_service: UserService::new(user_repo),
            assignment_service: AssignmentService::new(assignment_repo.clone()),
            payment_service: PaymentService::new(assignment_repo),
            booking_service: BookingService::new(booking_repo),
            dashboard_service: DashboardService::new(dashboard_repo),
            i18n_store: Arc::new(I18nStore::default()),
        }
    }
}
