//! Resource rules

pub mod source;
