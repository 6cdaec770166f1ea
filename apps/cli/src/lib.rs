pub mod application;
pub mod infra;
