//! Order service client.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{Span, info};
use voltcart::{
    orders::{NewOrder, Order, OrderId, OrderPatch},
    users::UserId,
};

use crate::domain::orders::errors::OrdersApiError;

#[automock]
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// Create an order. Only called after a payment succeeds.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersApiError>;

    /// List orders, filtered to one buyer when `user` is set.
    async fn list_orders(&self, user: Option<UserId>) -> Result<Vec<Order>, OrdersApiError>;

    /// Apply a partial update and return the stored order.
    async fn update_order(
        &self,
        id: OrderId,
        patch: OrderPatch,
    ) -> Result<Order, OrdersApiError>;
}

/// HTTP client for the `/api/orders` endpoints.
#[derive(Debug, Clone)]
pub struct HttpOrdersApi {
    endpoint: Url,
    http: Client,
}

impl HttpOrdersApi {
    /// Create a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client can't be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, OrdersApiError> {
        let base = Url::parse(base_url).map_err(|error| OrdersApiError::Url(error.to_string()))?;

        let endpoint = base
            .join("api/orders")
            .map_err(|error| OrdersApiError::Url(error.to_string()))?;

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { endpoint, http })
    }

    fn order_url(&self, id: &OrderId) -> Result<Url, OrdersApiError> {
        let mut url = self.endpoint.clone();

        url.path_segments_mut()
            .map_err(|()| OrdersApiError::Url(self.endpoint.to_string()))?
            .push(id.as_str());

        Ok(url)
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, OrdersApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(OrdersApiError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl OrdersApi for HttpOrdersApi {
    #[tracing::instrument(
        name = "orders.api.create_order",
        skip(self, order),
        fields(quantity = order.quantity, order_id = tracing::field::Empty),
        err
    )]
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersApiError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&order)
            .send()
            .await?;

        let created = check(response).await?.json::<OrderEnvelope>().await?.into_order();

        Span::current().record("order_id", tracing::field::display(&created.id));

        info!("created order");

        Ok(created)
    }

    #[tracing::instrument(
        name = "orders.api.list_orders",
        skip(self),
        fields(user_id = user.as_ref().map(UserId::as_str), count = tracing::field::Empty),
        err
    )]
    async fn list_orders(&self, user: Option<UserId>) -> Result<Vec<Order>, OrdersApiError> {
        let mut request = self.http.get(self.endpoint.clone());

        if let Some(user) = &user {
            request = request.query(&[("userId", user.as_str())]);
        }

        let orders = check(request.send().await?)
            .await?
            .json::<OrdersEnvelope>()
            .await?
            .into_orders();

        Span::current().record("count", orders.len());

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.api.update_order",
        skip(self, patch),
        fields(order_id = %id, status = ?patch.status),
        err
    )]
    async fn update_order(
        &self,
        id: OrderId,
        patch: OrderPatch,
    ) -> Result<Order, OrdersApiError> {
        let response = self
            .http
            .patch(self.order_url(&id)?)
            .json(&patch)
            .send()
            .await?;

        let updated = check(response).await?.json::<OrderEnvelope>().await?.into_order();

        info!("updated order");

        Ok(updated)
    }
}

/// Single orders arrive either bare or wrapped as `{ "order": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OrderEnvelope {
    Wrapped { order: Order },
    Bare(Order),
}

impl OrderEnvelope {
    fn into_order(self) -> Order {
        match self {
            Self::Wrapped { order } | Self::Bare(order) => order,
        }
    }
}

/// Order lists arrive either bare or wrapped as `{ "orders": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OrdersEnvelope {
    Wrapped { orders: Vec<Order> },
    Bare(Vec<Order>),
}

impl OrdersEnvelope {
    fn into_orders(self) -> Vec<Order> {
        match self {
            Self::Wrapped { orders } | Self::Bare(orders) => orders,
        }
    }
}
