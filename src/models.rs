pub mod assignment;
pub mod auth;
pub mod booking;
pub mod dashboard;
pub mod filter;
pub mod report;
pub mod schedule;
