pub mod config;
pub mod domain;
pub mod repository;
pub mod services;
pub mod ui;

// Make test_helpers available for integration tests
pub mod test_helpers;
