//! Command-line interface for the Switchboard server

use clap::Parser;

use crate::api::chat::ResponseStyle;
use crate::server::ServerConfig;

/// Switchboard chat service CLI
#[derive(Parser, Debug)]
#[command(name = "switchboard")]
#[command(about = "Chat service with LLM-based model routing")]
#[command(version)]
pub struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "SWITCHBOARD_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8787, env = "SWITCHBOARD_PORT")]
    pub port: u16,

    /// Emit the legacy single-string response shape instead of the
    /// structured one
    #[arg(long, env = "SWITCHBOARD_LEGACY_RESPONSES")]
    pub legacy_responses: bool,
}

impl Cli {
    /// Turn parsed arguments into the server configuration
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            response_style: if self.legacy_responses {
                ResponseStyle::Legacy
            } else {
                ResponseStyle::Structured
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["switchboard"]);
        let config = cli.into_config();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8787);
        assert_eq!(config.response_style, ResponseStyle::Structured);
    }

    #[test]
    fn test_legacy_flag() {
        let cli = Cli::parse_from(["switchboard", "--legacy-responses"]);
        assert_eq!(cli.into_config().response_style, ResponseStyle::Legacy);
    }
}
