//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Config};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger (RUST_LOG, padrão "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let app_state = AppState::new(&config).await?;

    // Grade semanal: leitura pública, reserva exige login
    let schedule_routes = Router::new()
        .route("/", get(handlers::schedule::get_weekly_schedule))
        .merge(
            Router::new()
                .route("/{slot_id}/book", post(handlers::schedule::book_slot))
                .route_layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    auth_guard,
                )),
        );

    let booking_routes = Router::new()
        .route("/me", get(handlers::schedule::my_bookings))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let assignment_routes = Router::new()
        .route(
            "/",
            post(handlers::assignments::create_assignment).get(handlers::assignments::list_assignments),
        )
        .route("/classes", get(handlers::assignments::list_assignable_classes))
        .route("/assignees", get(handlers::assignments::list_assignees))
        .route(
            "/{assignment_id}/payment-status",
            patch(handlers::assignments::update_payment_status),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let payment_routes = Router::new()
        .route("/", get(handlers::payments::get_overview))
        .route("/export", get(handlers::payments::export_csv))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let instructor_routes = Router::new()
        .route("/assignments", get(handlers::instructor::my_assignments))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/schedule", schedule_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/assignments", assignment_routes)
        .nest("/api/payments", payment_routes)
        .nest("/api/instructor", instructor_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
