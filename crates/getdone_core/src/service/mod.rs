//! Core use-case services.
//!
//! # Responsibility
//! - Validate caller input and orchestrate store calls into use-case APIs.
//! - Keep front ends decoupled from storage details.

pub mod todo_service;
