//! tyg CLI - generated types for schema-described page data.
//!
//! Library surface of the `tyg` binary: argument parsing, configuration
//! loading, the development server and the command implementations.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dev;
pub mod error;
pub mod logger;
pub mod ui;
