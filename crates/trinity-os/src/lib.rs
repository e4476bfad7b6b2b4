//! Wellness aggregation, Trinity scoring, and nutrition lookup for TrinityOS.
//!
//! The [`wellness`] module reduces logged sleep, exercise, and mood records into
//! summary statistics and composes them into the 0-100 Trinity score. The
//! [`nutrition`] module proxies FoodData Central searches and totals logged food.

pub mod config;
pub mod error;
pub mod nutrition;
pub mod telemetry;
pub mod wellness;
