pub mod config;
pub mod core;
pub mod database;
mod handlers;
mod middlewares;
pub mod models;
mod repos;
pub mod routes;
pub mod services;
pub mod utils;
