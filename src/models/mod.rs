pub mod dashboard;
pub mod location;
