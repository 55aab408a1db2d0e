use std::path::PathBuf;
use std::str::FromStr;

use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::{DEFAULT_LEDGER_PATH, DEFAULT_PRICES_PATH};
use crate::errors::{Error, Result};
use crate::portfolio::holdings::AveragePriceMethod;

pub const ENV_LEDGER_PATH: &str = "CARTEIRA_LEDGER_PATH";
pub const ENV_PRICES_PATH: &str = "CARTEIRA_PRICES_PATH";
pub const ENV_AVG_PRICE_METHOD: &str = "CARTEIRA_AVG_PRICE_METHOD";
pub const ENV_DEFAULT_INVESTMENT: &str = "CARTEIRA_DEFAULT_INVESTMENT";

/// Runtime settings shared by the storage layer and the analytics.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    pub ledger_path: PathBuf,
    pub prices_path: PathBuf,
    pub avg_price_method: AveragePriceMethod,
    /// Notional amount used by the period return summary.
    pub default_investment: Decimal,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            prices_path: PathBuf::from(DEFAULT_PRICES_PATH),
            avg_price_method: AveragePriceMethod::default(),
            default_investment: dec!(1000),
        }
    }
}

impl CoreConfig {
    /// Loads `.env` if present and reads the environment. A value that does
    /// not parse is logged and replaced by its default; the other keys keep
    /// what was set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup_lenient(|key| std::env::var(key).ok())
    }

    /// Like [`CoreConfig::from_env`] but rejects invalid values.
    pub fn try_from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            ledger_path: path_or(lookup(ENV_LEDGER_PATH), defaults.ledger_path),
            prices_path: path_or(lookup(ENV_PRICES_PATH), defaults.prices_path),
            avg_price_method: match lookup(ENV_AVG_PRICE_METHOD) {
                Some(raw) => AveragePriceMethod::from_str(&raw)?,
                None => defaults.avg_price_method,
            },
            default_investment: match lookup(ENV_DEFAULT_INVESTMENT) {
                Some(raw) => parse_investment(&raw)?,
                None => defaults.default_investment,
            },
        })
    }

    /// Like [`CoreConfig::from_lookup`], but an invalid value only resets
    /// its own key to the default.
    fn from_lookup_lenient<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            ledger_path: path_or(lookup(ENV_LEDGER_PATH), defaults.ledger_path),
            prices_path: path_or(lookup(ENV_PRICES_PATH), defaults.prices_path),
            avg_price_method: match lookup(ENV_AVG_PRICE_METHOD) {
                Some(raw) => or_default(
                    ENV_AVG_PRICE_METHOD,
                    AveragePriceMethod::from_str(&raw),
                    defaults.avg_price_method,
                ),
                None => defaults.avg_price_method,
            },
            default_investment: match lookup(ENV_DEFAULT_INVESTMENT) {
                Some(raw) => or_default(
                    ENV_DEFAULT_INVESTMENT,
                    parse_investment(&raw),
                    defaults.default_investment,
                ),
                None => defaults.default_investment,
            },
        }
    }

    pub fn with_ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }

    pub fn with_prices_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.prices_path = path.into();
        self
    }

    pub fn with_avg_price_method(mut self, method: AveragePriceMethod) -> Self {
        self.avg_price_method = method;
        self
    }

    pub fn with_default_investment(mut self, amount: Decimal) -> Self {
        self.default_investment = amount;
        self
    }
}

fn path_or(raw: Option<String>, default: PathBuf) -> PathBuf {
    raw.filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or(default)
}

fn or_default<T: std::fmt::Display>(key: &str, parsed: Result<T>, default: T) -> T {
    parsed.unwrap_or_else(|e| {
        warn!("Ignoring invalid {}, using default {}: {}", key, default, e);
        default
    })
}

fn parse_investment(raw: &str) -> Result<Decimal> {
    let amount = Decimal::from_str(raw.trim()).map_err(|e| {
        Error::InvalidConfigValue(format!("{}='{}': {}", ENV_DEFAULT_INVESTMENT, raw, e))
    })?;
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidConfigValue(format!(
            "{} must be positive, got {}",
            ENV_DEFAULT_INVESTMENT, raw
        )));
    }
    Ok(amount)
}
