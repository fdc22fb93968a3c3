pub mod constants;
pub mod fake_service;
