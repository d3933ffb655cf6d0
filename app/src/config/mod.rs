pub mod config;
pub mod floors;
