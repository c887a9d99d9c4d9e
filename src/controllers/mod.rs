pub mod dataset_controller;
pub mod location_controller;
