//! Request and response bodies

pub mod entry;
pub mod submit;
