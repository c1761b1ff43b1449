//! Flutter bridge crate for the tasklist desktop app.
//!
//! All business rules live in `tasklist_core`; this crate only adapts them to
//! FFI-friendly envelopes.

pub mod api;
