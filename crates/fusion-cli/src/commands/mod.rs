pub mod config;
pub mod register;
