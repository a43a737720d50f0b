//! HTTP API: routing, request/response mapping, and service wiring for the
//! task item store.

pub mod app;
pub mod config;
