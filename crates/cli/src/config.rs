//! Command-line and environment configuration.
//!
//! Every option can also come from the environment (`ORDERFLOW_*`), which is how the
//! binary is usually configured when it runs as part of a larger setup.

use core::str::FromStr;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use orderflow_core::{DomainError, OrderId, PickupCode};
use orderflow_observability::LogFormat;
use orderflow_orders::{Order, OrderStatus};

pub const DEFAULT_SEED: &str = "o1:PENDING:pc-1,o2:ACCEPTED";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("malformed seed entry `{0}` (expected ID:STATUS[:PICKUP_CODE])")]
    MalformedEntry(String),

    #[error("seed entry `{entry}`: {reason}")]
    UnknownStatus { entry: String, reason: String },

    #[error("seed entry `{entry}`: {source}")]
    InvalidId {
        entry: String,
        #[source]
        source: DomainError,
    },

    #[error("nothing to accept: pass --order-id or --pickup-code")]
    NoTargets,
}

#[derive(Debug, Parser)]
#[command(name = "orderflow", version, about = "Accept pending orders against an in-memory store")]
pub struct Cli {
    /// Log output format (`pretty` or `json`). Filtering follows RUST_LOG.
    #[arg(long, global = true, env = "ORDERFLOW_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// Orders to load into the store, as ID:STATUS[:PICKUP_CODE] entries separated by commas.
    #[arg(long, global = true, env = "ORDERFLOW_SEED", default_value = DEFAULT_SEED)]
    pub seed: Seed,

    /// Use canned collaborators: every id is a pending order, every pickup code is `orderId`.
    #[arg(long, global = true, env = "ORDERFLOW_STUB")]
    pub stub: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Accept one or more pending orders, in the order given.
    Accept(AcceptArgs),
}

#[derive(Debug, Clone, Args)]
pub struct AcceptArgs {
    /// Order ids to accept (comma separated or repeated).
    #[arg(long = "order-id", value_delimiter = ',')]
    pub order_ids: Vec<OrderId>,

    /// Pickup codes to resolve and accept (comma separated or repeated).
    #[arg(long = "pickup-code", value_delimiter = ',')]
    pub pickup_codes: Vec<PickupCode>,
}

/// What a single acceptance is keyed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    OrderId(OrderId),
    PickupCode(PickupCode),
}

impl AcceptArgs {
    /// Order ids first, then pickup codes.
    pub fn targets(&self) -> Result<Vec<Target>, ConfigError> {
        let targets: Vec<Target> = self
            .order_ids
            .iter()
            .cloned()
            .map(Target::OrderId)
            .chain(self.pickup_codes.iter().cloned().map(Target::PickupCode))
            .collect();

        if targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        Ok(targets)
    }
}

/// Initial contents of the in-memory order store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seed(Vec<Order>);

impl Seed {
    pub fn orders(&self) -> &[Order] {
        &self.0
    }
}

impl FromStr for Seed {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(parse_entry)
            .collect::<Result<Vec<_>, _>>()
            .map(Seed)
    }
}

fn parse_entry(entry: &str) -> Result<Order, ConfigError> {
    let parts: Vec<&str> = entry.split(':').collect();
    let (id, status, pickup) = match parts.as_slice() {
        [id, status] => (*id, *status, None),
        [id, status, pickup] => (*id, *status, Some(*pickup)),
        _ => return Err(ConfigError::MalformedEntry(entry.to_string())),
    };

    let invalid_id = |source: DomainError| ConfigError::InvalidId {
        entry: entry.to_string(),
        source,
    };

    let id = OrderId::new(id).map_err(invalid_id)?;
    let status = OrderStatus::from_str(status).map_err(|reason| ConfigError::UnknownStatus {
        entry: entry.to_string(),
        reason,
    })?;

    let order = Order::new(id, status);
    match pickup {
        Some(code) => Ok(order.with_pickup_code(PickupCode::new(code).map_err(invalid_id)?)),
        None => Ok(order),
    }
}
