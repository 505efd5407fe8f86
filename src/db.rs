pub mod user_repo;
pub use user_repo::{UserRepository, UserStore};
pub mod assignment_repo;
pub use assignment_repo::{AssignmentRepository, AssignmentStore};
pub mod booking_repo;
pub use booking_repo::{BookingRepository, BookingStore};
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
