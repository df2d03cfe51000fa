//! Spot trading wire types
//!
//! Records mirror the v3 JSON schema field for field. Amounts stay strings as
//! sent by the exchange (absent values arrive as `""`); the `*_amount`
//! accessors parse them into [`Fixed`].

use crate::errors::{ExchangeError, Result};
use okspot_core::prelude::*;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("buy"),
            Side::Sell => f.write_str("sell"),
        }
    }
}

/// `type` field: how the order is priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Limit,
    Market,
}

/// `order_type` field: execution constraint on limit orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionType {
    #[serde(rename = "0")]
    Normal,
    #[serde(rename = "1")]
    PostOnly,
    #[serde(rename = "2")]
    FillOrKill,
    #[serde(rename = "3")]
    ImmediateOrCancel,
    #[serde(other, skip_serializing)]
    Unknown,
}

/// `state` field of an order record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderState {
    #[serde(rename = "-2")]
    Failed,
    #[serde(rename = "-1")]
    Cancelled,
    #[serde(rename = "0")]
    Open,
    #[serde(rename = "1")]
    PartiallyFilled,
    #[serde(rename = "2")]
    Filled,
    #[serde(rename = "3")]
    Submitting,
    #[serde(rename = "4")]
    Cancelling,
    #[serde(other)]
    Unknown,
}

impl OrderState {
    /// No further fills can happen
    pub fn is_final(&self) -> bool {
        matches!(self, OrderState::Failed | OrderState::Cancelled | OrderState::Filled)
    }
}

/// Status filter for order history, also the legacy `status` field of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    All,
    Open,
    PartFilled,
    Canceling,
    Filled,
    Cancelled,
    Ordering,
    Failure,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::All => "all",
            OrderStatus::Open => "open",
            OrderStatus::PartFilled => "part_filled",
            OrderStatus::Canceling => "canceling",
            OrderStatus::Filled => "filled",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Ordering => "ordering",
            OrderStatus::Failure => "failure",
            OrderStatus::Unknown => "unknown",
        }
    }

    /// `open|part_filled` style filter value
    pub fn join(statuses: &[OrderStatus]) -> String {
        statuses
            .iter()
            .map(OrderStatus::as_str)
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fill liquidity: `T` taker, `M` maker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Liquidity {
    #[serde(rename = "T")]
    Taker,
    #[serde(rename = "M")]
    Maker,
    #[serde(other)]
    Unknown,
}

/// Cursor pagination window.
///
/// `from` asks for records newer than the given id, `to` for records older
/// than it. With ids 1..5, `from 4` yields 5 and `to 4` yields 1, 2, 3.
/// A zero limit means "server default" (100).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<u32>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records newer than `id` (sent as `from`)
    pub fn newer_than(mut self, id: impl Into<String>) -> Self {
        self.from = Some(id.into());
        self
    }

    /// Records older than `id` (sent as `to`)
    pub fn older_than(mut self, id: impl Into<String>) -> Self {
        self.to = Some(id.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Limit to send, if any; zero is treated as unset
    pub fn effective_limit(&self) -> Option<u32> {
        self.limit.filter(|limit| *limit != 0)
    }
}

/// New order parameters (`POST /api/spot/v3/orders`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_oid: Option<String>,
    #[serde(rename = "type")]
    pub kind: OrderKind,
    pub side: Side,
    pub instrument_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<ExecutionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Quote amount to spend on a market buy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notional: Option<String>,
}

impl OrderRequest {
    /// Limit order for `size` at `price`
    pub fn limit(instrument_id: impl Into<String>, side: Side, price: Fixed, size: Fixed) -> Self {
        Self {
            client_oid: None,
            kind: OrderKind::Limit,
            side,
            instrument_id: instrument_id.into(),
            order_type: None,
            price: Some(price.to_string()),
            size: Some(size.to_string()),
            notional: None,
        }
    }

    /// Market buy spending `notional` of the quote currency
    pub fn market_buy(instrument_id: impl Into<String>, notional: Fixed) -> Self {
        Self {
            client_oid: None,
            kind: OrderKind::Market,
            side: Side::Buy,
            instrument_id: instrument_id.into(),
            order_type: None,
            price: None,
            size: None,
            notional: Some(notional.to_string()),
        }
    }

    /// Market sell of `size` base currency
    pub fn market_sell(instrument_id: impl Into<String>, size: Fixed) -> Self {
        Self {
            client_oid: None,
            kind: OrderKind::Market,
            side: Side::Sell,
            instrument_id: instrument_id.into(),
            order_type: None,
            price: None,
            size: Some(size.to_string()),
            notional: None,
        }
    }

    pub fn with_client_oid(mut self, client_oid: ClientOid) -> Self {
        self.client_oid = Some(client_oid.into_string());
        self
    }

    pub fn with_execution(mut self, execution: ExecutionType) -> Self {
        self.order_type = Some(execution);
        self
    }
}

/// Result of placing or cancelling one order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub client_oid: String,
    #[serde(default)]
    pub result: bool,
    #[serde(default, deserialize_with = "string_or_number")]
    pub error_code: String,
    #[serde(default)]
    pub error_message: String,
}

impl OrderResponse {
    /// Accepted by the exchange with no per-order error
    pub fn is_success(&self) -> bool {
        self.result && (self.error_code.is_empty() || self.error_code == "0")
    }
}

/// Order record (history, pending, detail)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    #[serde(default)]
    pub client_oid: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub notional: String,
    pub instrument_id: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub kind: OrderKind,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub filled_size: String,
    #[serde(default)]
    pub filled_notional: String,
    #[serde(default)]
    pub price_avg: String,
    #[serde(default)]
    pub order_type: Option<ExecutionType>,
    pub state: OrderState,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

impl Order {
    pub fn price_amount(&self) -> Result<Option<Fixed>> {
        parse_amount(&self.price, "price")
    }

    pub fn size_amount(&self) -> Result<Option<Fixed>> {
        parse_amount(&self.size, "size")
    }

    pub fn notional_amount(&self) -> Result<Option<Fixed>> {
        parse_amount(&self.notional, "notional")
    }

    pub fn filled_size_amount(&self) -> Result<Option<Fixed>> {
        parse_amount(&self.filled_size, "filled_size")
    }

    pub fn filled_notional_amount(&self) -> Result<Option<Fixed>> {
        parse_amount(&self.filled_notional, "filled_notional")
    }

    pub fn price_avg_amount(&self) -> Result<Option<Fixed>> {
        parse_amount(&self.price_avg, "price_avg")
    }

    /// Order time, from `timestamp` or the older `created_at`
    pub fn time(&self) -> Option<DateTime<Utc>> {
        parse_time(&self.timestamp).or_else(|| parse_time(&self.created_at))
    }
}

/// Fill (transaction) record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub ledger_id: String,
    #[serde(default)]
    pub trade_id: String,
    pub instrument_id: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub size: String,
    pub order_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub exec_type: Option<Liquidity>,
    #[serde(default)]
    pub fee: String,
    pub side: Side,
    #[serde(default)]
    pub currency: String,
}

impl Fill {
    pub fn price_amount(&self) -> Result<Option<Fixed>> {
        parse_amount(&self.price, "price")
    }

    pub fn size_amount(&self) -> Result<Option<Fixed>> {
        parse_amount(&self.size, "size")
    }

    pub fn fee_amount(&self) -> Result<Option<Fixed>> {
        parse_amount(&self.fee, "fee")
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        parse_time(&self.timestamp)
    }
}

/// One instrument's worth of a batch cancel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCancelOrderRequest {
    pub instrument_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub client_oids: Vec<String>,
}

impl BatchCancelOrderRequest {
    pub fn by_order_ids<I, S>(instrument_id: impl Into<String>, order_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            instrument_id: instrument_id.into(),
            order_ids: order_ids.into_iter().map(Into::into).collect(),
            client_oids: Vec::new(),
        }
    }

    pub fn by_client_oids<I, S>(instrument_id: impl Into<String>, client_oids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            instrument_id: instrument_id.into(),
            order_ids: Vec::new(),
            client_oids: client_oids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Per-instrument batch cancel outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCancelOrderResponse {
    #[serde(default)]
    pub result: bool,
    #[serde(default)]
    pub client_oid: String,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub order_id: Vec<String>,
}

/// `GET /api/general/v3/time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerTime {
    pub iso: String,
    pub epoch: String,
}

impl ServerTime {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        parse_time(&self.iso)
    }
}

fn parse_amount(value: &str, field: &str) -> Result<Option<Fixed>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    Fixed::from_str_exact(value)
        .map(Some)
        .map_err(|e| ExchangeError::FixedPointError(format!("{field} {value:?}: {e}")))
}

fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}

fn string_or_seq<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::One(s) if s.is_empty() => Vec::new(),
        Raw::One(s) => vec![s],
        Raw::Many(v) => v,
        Raw::Null(()) => Vec::new(),
    })
}
