//! Core use-case services.
//!
//! # Responsibility
//! - Expose the list/create/edit/remove/toggle surface consumed by UI layers.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_service;
