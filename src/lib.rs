pub mod app;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod email;
pub mod telemetry;
