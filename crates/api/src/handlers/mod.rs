//! Request handlers.
//!
//! Handlers resolve the caller, ask [`Backend`](lumen_core::store::Backend)
//! for accessors scoped to that caller and map errors via
//! [`AppError`](crate::error::AppError).

pub mod account;
pub mod clients;
pub mod dashboard;
pub mod editor;
pub mod media;
pub mod playlists;
pub mod screens;
