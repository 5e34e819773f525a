//! Concrete implementations of the port traits.

pub mod file_config_adapter;
pub mod csv_adapter;
pub mod demo_adapter;
pub mod html_report_adapter;

#[cfg(feature = "web")]
pub mod web;
