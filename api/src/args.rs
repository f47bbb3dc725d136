use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use dietcoach_core::domain::common::{DietCoachConfig, WebhookConfig};
use tracing::error;
use url::Url;

#[derive(Debug, Clone, Parser)]
#[command(name = "dietcoach", version, about = "DietCoach meal analysis relay")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub webhook: WebhookArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix prepended to every route, e.g. `/dietcoach`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "server-allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct WebhookArgs {
    /// Left unset, the server still starts and relays answer 500.
    #[arg(long = "webhook-url", env = "N8N_WEBHOOK_URL")]
    pub url: Option<String>,

    #[arg(long = "webhook-timeout-secs", env = "WEBHOOK_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl WebhookArgs {
    fn parsed_url(&self) -> Option<Url> {
        let raw = self.url.as_deref().map(str::trim).filter(|url| !url.is_empty())?;

        match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                error!(webhook_url = %raw, "Ignoring invalid webhook URL: {}", e);
                None
            }
        }
    }
}

impl From<Args> for DietCoachConfig {
    fn from(args: Args) -> Self {
        DietCoachConfig {
            webhook: WebhookConfig {
                url: args.webhook.parsed_url(),
                timeout: args.webhook.timeout_secs.map(Duration::from_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["dietcoach"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_webhook_url_and_timeout_flow_into_config() {
        let args = parse(&[
            "--webhook-url",
            "https://n8n.example.com/webhook/meal",
            "--webhook-timeout-secs",
            "30",
        ]);

        let config = DietCoachConfig::from(args);

        assert_eq!(
            config.webhook.url.map(String::from),
            Some("https://n8n.example.com/webhook/meal".to_string())
        );
        assert_eq!(config.webhook.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_blank_or_invalid_webhook_url_is_treated_as_unset() {
        let config = DietCoachConfig::from(parse(&["--webhook-url", "  "]));
        assert!(config.webhook.url.is_none());

        let config = DietCoachConfig::from(parse(&["--webhook-url", "not a url"]));
        assert!(config.webhook.url.is_none());
    }

    #[test]
    fn test_allowed_origins_are_comma_separated() {
        let args = parse(&[
            "--server-allowed-origins",
            "http://localhost:3000,https://coach.example.com",
        ]);

        assert_eq!(
            args.server.allowed_origins,
            vec!["http://localhost:3000", "https://coach.example.com"]
        );
    }
}
