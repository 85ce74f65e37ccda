//! Configuration and CLI argument handling

use clap::Parser;
use thiserror::Error;

use crate::timer::{
    phase::{DEFAULT_BREAK_SECONDS, DEFAULT_WORK_SECONDS},
    Phase, PhaseDurations,
};

/// Invalid configuration detected at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} duration must be at least one second")]
    ZeroDuration(Phase),
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "phase-timer")]
#[command(about = "A work/break countdown timer with a local HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Work phase duration in seconds
    #[arg(long = "work", default_value_t = DEFAULT_WORK_SECONDS)]
    pub work_seconds: u64,

    /// Break phase duration in seconds
    #[arg(long = "break", default_value_t = DEFAULT_BREAK_SECONDS)]
    pub break_seconds: u64,

    /// Start counting down immediately
    #[arg(long)]
    pub autostart: bool,

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

    /// Validated phase durations. Work is checked first, so when both are
    /// zero only the work error is reported.
    pub fn durations(&self) -> Result<PhaseDurations, ConfigError> {
        if self.work_seconds == 0 {
            return Err(ConfigError::ZeroDuration(Phase::Work));
        }
        PhaseDurations::from_secs(self.work_seconds, self.break_seconds)
            .ok_or(ConfigError::ZeroDuration(Phase::Break))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_durations() {
        let config = Config::try_parse_from(["phase-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert!(!config.autostart);

        let durations = config.durations().unwrap();
        assert_eq!(durations.work(), 1500);
        assert_eq!(durations.rest(), 300);
    }

    #[test]
    fn custom_durations_and_flags() {
        let config = Config::try_parse_from([
            "phase-timer", "--work", "3000", "--break", "600", "--autostart", "-v", "-p", "9000",
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level(), "debug");
        assert!(config.autostart);
        assert_eq!(config.durations().unwrap(), PhaseDurations::from_secs(3000, 600).unwrap());
    }

    #[test]
    fn zero_durations_are_config_errors() {
        let config = Config::try_parse_from(["phase-timer", "--work", "0"]).unwrap();
        assert_eq!(config.durations(), Err(ConfigError::ZeroDuration(Phase::Work)));

        let config = Config::try_parse_from(["phase-timer", "--work", "0", "--break", "0"]).unwrap();
        assert_eq!(config.durations(), Err(ConfigError::ZeroDuration(Phase::Work)));

        let config = Config::try_parse_from(["phase-timer", "--break", "0"]).unwrap();
        let err = config.durations().unwrap_err();
        assert_eq!(err.to_string(), "break duration must be at least one second");
    }
}
