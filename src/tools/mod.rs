//! PawPal Tools module
//!
//! MCP tool implementations for PawPal.

pub mod advice;
pub mod dashboard;
pub mod foods;
pub mod meals;
pub mod profile;
pub mod status;
