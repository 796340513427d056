pub mod admissions;
pub mod auth;
pub mod mock;
pub mod staff;
