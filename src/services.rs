pub mod assignment_service;
pub mod auth;
pub mod booking_service;
pub mod dashboard_service;
pub mod occurrence;
pub mod payment_service;
pub mod user_service;
