//! Core use-case services.
//!
//! # Responsibility
//! - Run one user action to completion: store mutation, then notices.
//! - Keep the CLI decoupled from storage and transport details.

pub mod bill_service;
