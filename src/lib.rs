//! Adcraft: guided conversational builder for ad campaigns.
//!
//! Collects a campaign one validated field at a time, resolves music through
//! the ad service, and submits the assembled payload. A form-style entry
//! point runs the same rules in a single call.
//!
//! See `DESIGN.md` for the module map and design decisions.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod credentials;
pub mod logging;

pub mod campaign;
pub mod rules;
pub mod service;

pub mod collector;
pub mod form;
pub mod session;
pub mod submission;

pub mod adapters;
