//! # twilio-core
//!
//! Core types and utilities for working with the Twilio REST API.
//!
//! This crate provides the error taxonomy, credentials, configuration and
//! request-encoding helpers shared by Twilio client crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status classification
//! - [`credentials`] - Account SID and auth token pair
//! - [`config`] - Configuration loading and validation
//! - [`client`] - API addressing constants and HTTP client settings
//! - [`context`] - Execution context passed to the transport layer
//! - [`form`] - Form-encoded parameter sets

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod context;
pub mod credentials;
pub mod error;
pub mod form;

// Re-export commonly used types
pub use client::{account_root, ClientConfig, API_VERSION, TWILIO_API_BASE};
pub use config::TwilioConfig;
pub use context::RequestContext;
pub use credentials::Credentials;
pub use error::{ApiError, Error, Result};
pub use form::{FormValues, FORM_CONTENT_TYPE};
