//! Core modules shared by every command group: dispatch, configuration,
//! logging, errors and output rendering.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod output;
