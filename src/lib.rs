//! Webmfix - WebM duration repair
//!
//! This library crate exposes the command implementations for integration testing.

pub mod config;
pub mod fix;
pub mod inspect;
