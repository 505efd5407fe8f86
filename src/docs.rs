// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Schedule / Bookings ---
        handlers::schedule::get_weekly_schedule,
        handlers::schedule::book_slot,
        handlers::schedule::my_bookings,

        // --- Assignments ---
        handlers::assignments::create_assignment,
        handlers::assignments::update_payment_status,
        handlers::assignments::list_assignments,
        handlers::assignments::list_assignable_classes,
        handlers::assignments::list_assignees,

        // --- Payments ---
        handlers::payments::get_overview,
        handlers::payments::export_csv,

        // --- Instructor ---
        handlers::instructor::my_assignments,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            // --- Assignments ---
            models::assignment::PaymentStatus,
            models::assignment::ClassAssignment,
            models::assignment::AssignmentDetail,
            models::assignment::CreateAssignmentPayload,
            models::assignment::UpdatePaymentStatusPayload,

            // --- Filtros e relatórios ---
            models::filter::AssignmentFilter,
            models::filter::ClassStatusFilter,
            models::filter::DateRange,
            models::report::PaymentStats,
            models::report::InstructorStats,
            models::report::PaymentOverview,
            models::report::InstructorOverview,

            // --- Schedule ---
            models::schedule::ClassStatus,
            models::schedule::ScheduledClassDetail,
            models::schedule::WeeklySlot,
            models::schedule::ScheduleSlotView,
            models::schedule::ScheduleDay,

            // --- Bookings ---
            models::booking::BookingStatus,
            models::booking::Booking,
            models::booking::BookSlotPayload,

            // --- Users ---
            models::auth::Role,
            models::auth::UserWithRoles,
            handlers::assignments::AssigneeQuery,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
        )
    ),
    tags(
        (name = "Schedule", description = "Grade semanal pública"),
        (name = "Bookings", description = "Reservas dos alunos"),
        (name = "Assignments", description = "Atribuição de aulas a instrutores"),
        (name = "Payments", description = "Pagamentos de instrutores e exportação CSV"),
        (name = "Instructor", description = "Painel do instrutor"),
        (name = "Dashboard", description = "Indicadores gerais do estúdio")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
