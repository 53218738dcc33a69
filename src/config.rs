//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::state::ConfigForm;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "simple-countdown")]
#[command(about = "A countdown display with play/pause control over HTTP and the terminal")]
#[command(version)]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Open a countdown at startup: SS, MM:SS or HH:MM:SS
    #[arg(short, long)]
    pub time: Option<String>,

    /// Show Hours/Minutes/Seconds labels under the digits
    #[arg(long)]
    pub show_labels: bool,

    /// Play the alert when the countdown reaches zero
    #[arg(long)]
    pub sound: bool,

    /// Start playing the startup countdown immediately
    #[arg(long, requires = "time")]
    pub autoplay: bool,

    /// Tick period in milliseconds
    #[arg(long, default_value = "50", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Alert sound asset (needs the `audio` feature, otherwise the terminal bell rings)
    #[arg(long)]
    pub sound_file: Option<PathBuf>,

    /// Do not read Play/Pause keys from stdin
    #[arg(long)]
    pub no_keyboard: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// The startup countdown as a form submission, if one was requested
    pub fn startup_form(&self) -> Option<ConfigForm> {
        self.time.as_ref().map(|total_time| ConfigForm {
            total_time: total_time.clone(),
            show_labels: self.show_labels,
            sound_enabled: self.sound,
        })
    }
}
