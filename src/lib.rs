//! Contact Intake API Library
//!
//! Server side of the marketing website's contact form: validates a submission
//! and stores it as a lead row in Supabase through its REST interface.
//!
//! # Modules
//!
//! - `app`: Router assembly and API docs routes.
//! - `config`: Configuration management.
//! - `errors`: Error taxonomy and HTTP mapping.
//! - `handlers`: HTTP request handlers and shared state.
//! - `models`: Inbound payload, validated submission and lead row.
//! - `supabase_client`: Supabase row-insertion client.
//! - `validation`: Normalization and field rules.

pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod supabase_client;
pub mod validation;
