//! Spot order endpoints
//!
//! Every call is a single signed round trip through a [`Transport`]. Errors
//! the exchange reports come back as [`ExchangeError::Api`] untouched; any
//! other failure is wrapped with the operation name, suffixed `request` when
//! the round trip failed and `response body` when decoding failed.

use crate::errors::{ExchangeError, Result};
use crate::okex::rest::RestTransport;
use crate::okex::types::*;
use crate::traits::{Method, QueryParams, Transport};
use okspot_core::log_order;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Error context pair for one endpoint
#[derive(Debug, Clone, Copy)]
struct Operation {
    request: &'static str,
    response: &'static str,
}

macro_rules! operation {
    ($name:literal) => {
        Operation {
            request: concat!($name, " request"),
            response: concat!($name, " response body"),
        }
    };
}

const NEW_ORDER: Operation = operation!("new order");
const BATCH_NEW_ORDER: Operation = operation!("batch new order");
const CANCEL_ORDER: Operation = operation!("cancel order");
const BATCH_CANCEL_ORDER: Operation = operation!("batch cancel order");
const ORDER_HISTORY: Operation = operation!("order history");
const ORDER_PENDING: Operation = operation!("order pending");
const ORDER_DETAIL: Operation = operation!("order detail");
const FILLS: Operation = operation!("filled order detail");
const SERVER_TIME: Operation = operation!("server time");

pub const ORDERS_PATH: &str = "/api/spot/v3/orders";
pub const BATCH_ORDERS_PATH: &str = "/api/spot/v3/batch_orders";
pub const CANCEL_ORDERS_PATH: &str = "/api/spot/v3/cancel_orders";
pub const CANCEL_BATCH_ORDERS_PATH: &str = "/api/spot/v3/cancel_batch_orders";
pub const ORDERS_PENDING_PATH: &str = "/api/spot/v3/orders_pending";
pub const FILLS_PATH: &str = "/api/spot/v3/fills";
pub const SERVER_TIME_PATH: &str = "/api/general/v3/time";

/// Batch placement results keyed by instrument id
pub type BatchOrderResults = HashMap<String, Vec<OrderResponse>>;
/// Batch cancellation results keyed by instrument id
pub type BatchCancelResults = HashMap<String, BatchCancelOrderResponse>;

/// OKEx spot trading client
pub struct SpotRestClient<T: Transport = RestTransport> {
    transport: T,
}

impl<T: Transport> SpotRestClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Place one limit or market order.
    ///
    /// `POST /api/spot/v3/orders`. Funds are put on hold once accepted.
    pub async fn new_order(&self, req: &OrderRequest) -> Result<OrderResponse> {
        let body = to_body(req, NEW_ORDER)?;
        let res: OrderResponse = self
            .execute(NEW_ORDER, Method::Post, ORDERS_PATH, None, Some(&body))
            .await?;

        log_ack("PLACED", &res, &res.order_id, &req.instrument_id);
        Ok(res)
    }

    /// Place several orders at once, grouped by instrument in the reply.
    ///
    /// `POST /api/spot/v3/batch_orders`; the exchange accepts up to four
    /// instruments with four orders each.
    pub async fn batch_new_order(&self, reqs: &[OrderRequest]) -> Result<BatchOrderResults> {
        let body = to_body(reqs, BATCH_NEW_ORDER)?;
        let res: BatchOrderResults = self
            .execute(BATCH_NEW_ORDER, Method::Post, BATCH_ORDERS_PATH, None, Some(&body))
            .await?;

        debug!(
            "Batch placed {} orders over {} instruments",
            res.values().map(Vec::len).sum::<usize>(),
            res.len()
        );
        Ok(res)
    }

    /// Cancel an unfilled order.
    ///
    /// `POST /api/spot/v3/cancel_orders/<order_id>`. `order_id` may also be
    /// the `client_oid` the order was placed with.
    pub async fn cancel_order(
        &self,
        instrument_id: &str,
        client_oid: &str,
        order_id: &str,
    ) -> Result<OrderResponse> {
        let path = format!("{CANCEL_ORDERS_PATH}/{order_id}");

        let mut fields = Map::new();
        fields.insert("instrument_id".to_string(), json!(instrument_id));
        if !client_oid.is_empty() {
            fields.insert("client_oid".to_string(), json!(client_oid));
        }
        let body = Value::Object(fields);

        let res: OrderResponse = self
            .execute(CANCEL_ORDER, Method::Post, &path, None, Some(&body))
            .await?;

        log_ack("CANCELLED", &res, order_id, instrument_id);
        Ok(res)
    }

    /// Cancel open orders over one or more instruments, best effort.
    ///
    /// `POST /api/spot/v3/cancel_batch_orders`
    pub async fn batch_cancel_order(
        &self,
        reqs: &[BatchCancelOrderRequest],
    ) -> Result<BatchCancelResults> {
        let body = to_body(reqs, BATCH_CANCEL_ORDER)?;
        self.execute(
            BATCH_CANCEL_ORDER,
            Method::Post,
            CANCEL_BATCH_ORDERS_PATH,
            None,
            Some(&body),
        )
        .await
    }

    /// List orders of one instrument filtered by status, newest first.
    ///
    /// `GET /api/spot/v3/orders`
    pub async fn order_history(
        &self,
        instrument_id: &str,
        cursor: &Cursor,
        status: &[OrderStatus],
    ) -> Result<Vec<Order>> {
        let mut query = QueryParams::new();
        query.push_opt("instrument_id", Some(instrument_id));
        push_cursor(&mut query, cursor);
        query.push_opt("status", Some(OrderStatus::join(status).as_str()));

        self.execute(ORDER_HISTORY, Method::Get, ORDERS_PATH, Some(&query), None)
            .await
    }

    /// List open orders, for every instrument when `instrument_id` is empty.
    ///
    /// `GET /api/spot/v3/orders_pending`
    pub async fn order_pending(&self, instrument_id: &str, cursor: &Cursor) -> Result<Vec<Order>> {
        let mut query = QueryParams::new();
        query.push_opt("instrument_id", Some(instrument_id));
        push_cursor(&mut query, cursor);

        self.execute(ORDER_PENDING, Method::Get, ORDERS_PENDING_PATH, Some(&query), None)
            .await
    }

    /// `GET /api/spot/v3/orders/<order_id>`
    pub async fn order_detail(&self, instrument_id: &str, order_id: &str) -> Result<Order> {
        let path = format!("{ORDERS_PATH}/{order_id}");
        let mut query = QueryParams::new();
        query.push_opt("instrument_id", Some(instrument_id));

        self.execute(ORDER_DETAIL, Method::Get, &path, Some(&query), None)
            .await
    }

    /// Fills of one order, newest first.
    ///
    /// `GET /api/spot/v3/fills`
    pub async fn fills(&self, instrument_id: &str, order_id: &str, cursor: &Cursor) -> Result<Vec<Fill>> {
        let mut query = QueryParams::new();
        query
            .push_opt("instrument_id", Some(instrument_id))
            .push_opt("order_id", Some(order_id));
        push_cursor(&mut query, cursor);

        self.execute(FILLS, Method::Get, FILLS_PATH, Some(&query), None)
            .await
    }

    /// Exchange clock, unsigned
    pub async fn server_time(&self) -> Result<ServerTime> {
        let content = self
            .transport
            .request(Method::Get, SERVER_TIME_PATH, None, None, false)
            .await
            .map_err(|e| e.wrap(SERVER_TIME.request))?;

        decode(&content, SERVER_TIME)
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        op: Operation,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<&Value>,
    ) -> Result<R> {
        let content = self
            .transport
            .request(method, path, query, body, true)
            .await
            .map_err(|e| e.wrap(op.request))?;

        decode(&content, op)
    }
}

/// Log an accepted order, or the per-order rejection the exchange returned
fn log_ack(action: &str, res: &OrderResponse, order_id: &str, instrument_id: &str) {
    if res.is_success() {
        log_order!(action, order_id, instrument_id);
    } else {
        warn!(
            "⚠️ ORDER {} rejected: {} ({}) error {} {}",
            action, order_id, instrument_id, res.error_code, res.error_message
        );
    }
}

fn push_cursor(query: &mut QueryParams, cursor: &Cursor) {
    query
        .push_opt("from", cursor.from.as_deref())
        .push_opt("to", cursor.to.as_deref());
    if let Some(limit) = cursor.effective_limit() {
        query.push("limit", limit.to_string());
    }
}

fn to_body<B: serde::Serialize + ?Sized>(value: &B, op: Operation) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| ExchangeError::from(e).wrap(op.request))
}

fn decode<R: DeserializeOwned>(content: &[u8], op: Operation) -> Result<R> {
    serde_json::from_slice(content).map_err(|e| ExchangeError::from(e).wrap(op.response))
}
