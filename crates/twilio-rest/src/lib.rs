//! Twilio REST transport client.
//!
//! This crate turns form parameters and a resource path into an authenticated
//! request against the Twilio REST API and classifies the response into the
//! raw body or a [`twilio_core::Error`].

#![deny(missing_docs)]

pub mod client;
pub mod transport;

pub use client::{RestClient, TwilioClient, TwilioClientBuilder};
pub use transport::{DefaultTransportProvider, TransportProvider};
pub use twilio_core::{ApiError, Error, FormValues, RequestContext};

/// Convenient result alias matching the shared Twilio error type.
pub type Result<T> = twilio_core::Result<T>;
