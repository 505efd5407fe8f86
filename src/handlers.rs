pub mod assignments;
pub mod dashboard;
pub mod instructor;
pub mod payments;
pub mod schedule;
