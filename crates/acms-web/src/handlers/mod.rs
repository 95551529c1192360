//! HTTP handlers for all web routes.

pub mod demo;
pub mod parameters;
pub mod predict;
pub mod viz;
pub mod alerts;
pub mod admin;
