pub mod bootstrap;
pub mod config;
pub mod error;
pub mod function;
pub mod message;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
