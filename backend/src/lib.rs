//! Diet Assistant Backend Library
//!
//! This library exposes the backend modules for use in tests and the
//! seeding binary.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
