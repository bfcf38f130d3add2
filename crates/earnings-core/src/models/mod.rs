//! Data models for extracted figures, their display shape, and configuration.

pub mod config;
pub mod display;
pub mod earnings;
