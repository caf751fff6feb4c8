//! CLI module - Command-line interface for Streamcat
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Streamcat - Streaming Titles API
/// A catalog service for shows and movies across streaming platforms
#[derive(Parser)]
#[command(name = "streamcat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (default)
    #[command(alias = "daemon")]
    Serve,

    /// Create default config file
    Init,

    /// Load and validate configuration, then print a summary
    #[command(alias = "check")]
    CheckConfig,
}

pub use commands::*;
