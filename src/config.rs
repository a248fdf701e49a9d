use std::{path::PathBuf, str::FromStr, time::Duration};

use reqwest::Url;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_API_URL: &str = "https://api.mercadopago.com";
const DEFAULT_TIMEOUT_MS: u64 = 5000;
const DEFAULT_PAYER_EMAIL: &str = "comprador@exemplo.com";
const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),
    #[error("environment variable {name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Settings the gateway client needs to reach Mercado Pago.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub access_token: String,
    pub api_url: Url,
    pub create_timeout: Duration,
    pub lookup_timeout: Duration,
}

/// Settings consumed by the request handlers.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub payer_email: String,
    pub notification_url: Option<String>,
    pub debug_errors: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub public_dir: PathBuf,
    pub gateway: GatewaySettings,
    pub checkout: CheckoutSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let access_token =
            var("MERCADO_PAGO_ACCESS_TOKEN").ok_or(ConfigError::Missing("MERCADO_PAGO_ACCESS_TOKEN"))?;

        Ok(Self {
            port: parse_or(var("PORT"), "PORT", DEFAULT_PORT)?,
            public_dir: var("PUBLIC_DIR")
                .unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string())
                .into(),
            gateway: GatewaySettings {
                access_token,
                api_url: parse_base_url(var("MERCADO_PAGO_API_URL"))?,
                create_timeout: Duration::from_millis(parse_or(
                    var("MERCADO_PAGO_CREATE_TIMEOUT_MS"),
                    "MERCADO_PAGO_CREATE_TIMEOUT_MS",
                    DEFAULT_TIMEOUT_MS,
                )?),
                lookup_timeout: Duration::from_millis(parse_or(
                    var("MERCADO_PAGO_LOOKUP_TIMEOUT_MS"),
                    "MERCADO_PAGO_LOOKUP_TIMEOUT_MS",
                    DEFAULT_TIMEOUT_MS,
                )?),
            },
            checkout: CheckoutSettings {
                payer_email: var("PAYER_EMAIL").unwrap_or_else(|| DEFAULT_PAYER_EMAIL.to_string()),
                notification_url: var("MERCADO_PAGO_NOTIFICATION_URL"),
                debug_errors: parse_flag(var("DEBUG_ERRORS"), "DEBUG_ERRORS")?,
            },
        })
    }
}

fn parse_or<T: FromStr>(
    value: Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

fn parse_base_url(value: Option<String>) -> Result<Url, ConfigError> {
    let value = value.unwrap_or_else(|| DEFAULT_API_URL.to_string());
    match Url::parse(value.trim()) {
        Ok(url) if !url.cannot_be_a_base() => Ok(url),
        _ => Err(ConfigError::Invalid {
            name: "MERCADO_PAGO_API_URL",
            value,
        }),
    }
}

fn parse_flag(value: Option<String>, name: &'static str) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { name, value }),
    }
}
