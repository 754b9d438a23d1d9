//! PawPal Library
//!
//! Dog meal parsing, calorie estimation and toxic food screening.

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
