pub mod config;
pub mod hero;
pub mod types;
