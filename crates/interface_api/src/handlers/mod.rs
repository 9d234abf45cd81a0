//! Request handlers

pub mod entry;
pub mod health;
pub mod submit;
