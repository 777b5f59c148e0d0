//! Async tasks

pub mod panel;
