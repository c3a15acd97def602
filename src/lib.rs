//! TVETMIS Dashboard - administrative statistics service
//!
//! Serves the TVET management information dashboards as a JSON API with an
//! embedded frontend, built on Actix Web.
//!
//! # Layout
//! - `cache`: cached table loads (Moka)
//! - `config`: configuration management
//! - `errors`: unified error handling
//! - `models`: API and in-memory data models
//! - `pipeline`: filter cascade, aggregation and chart descriptions
//! - `routes`: API routes
//! - `runtime`: startup and shutdown
//! - `services`: report, navigation and system services
//! - `storage`: read-only table access (SeaORM)
//! - `utils`: request error handlers and identifier validation

pub mod cache;
pub mod config;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
