//! Lumen signage domain core.
//!
//! Holds the strict domain types, the error taxonomy, the playlist editing
//! engine and the traits through which the engine reaches the hosted
//! backend. Nothing in this crate performs I/O on its own.

pub mod dashboard;
pub mod editor;
pub mod error;
pub mod media;
pub mod playlist;
pub mod profile;
pub mod retry;
pub mod roles;
pub mod screen;
pub mod store;
pub mod types;
pub mod validation;
