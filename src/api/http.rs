//! [`MenuApi`] over HTTP with `reqwest`.
//!
//! The client keeps a cookie store, which is where the session established by
//! `login` lives. The application never reads the cookie.

use super::{paths, ApiError, MenuApi};
use crate::config::Config;
use crate::model::{
    Category, CurrentUser, LoginRequest, MenuItem, Order, OrderEvent, OrderNumber,
    PlaceOrderRequest,
};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

pub struct HttpMenuApi {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpMenuApi {
    /// `timeout` of `None` keeps reqwest's default (no overall timeout).
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(config.api_url.clone(), config.http_timeout)
    }

    /// `base_url` with `segments` appended, each percent-encoded on its own.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn order_url(&self, number: &OrderNumber) -> Result<Url, ApiError> {
        let mut segments = paths::ORDERS.to_vec();
        segments.push(number.as_str());
        self.endpoint(segments)
    }

    /// Turns a non-2xx response into `ApiError::Server`.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(resp)
    }

    /// Parse an API response, mapping HTTP errors to `ApiError`.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        Self::check(resp)
            .await?
            .json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }

    async fn get<R: DeserializeOwned>(&self, url: Url) -> Result<R, ApiError> {
        debug!(%url, "GET");
        let resp = self.http.get(url).send().await?;
        Self::parse(resp).await
    }
}

/// Pulls a message out of an error body: `{"error": ..}`, `{"message": ..}`,
/// `{"detail": ..}`, or the raw text.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(alias = "message", alias = "detail")]
        error: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl MenuApi for HttpMenuApi {
    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get(self.endpoint(paths::CATEGORIES)?).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn menu_items(&self, category_id: Option<u32>) -> Result<Vec<MenuItem>, ApiError> {
        let mut url = self.endpoint(paths::MENU_ITEMS)?;
        if let Some(id) = category_id {
            url.query_pairs_mut()
                .append_pair(paths::CATEGORY_ID, &id.to_string());
        }
        self.get(url).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<Order, ApiError> {
        let resp = self
            .http
            .post(self.endpoint(paths::ORDERS)?)
            .json(request)
            .send()
            .await?;
        Self::parse(resp).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn order(&self, number: &OrderNumber) -> Result<Order, ApiError> {
        self.get(self.order_url(number)?).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn order_events(&self, number: &OrderNumber) -> Result<Vec<OrderEvent>, ApiError> {
        let mut url = self.order_url(number)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(self.base_url.to_string()))?
            .push(paths::EVENTS);
        let events: Option<Vec<OrderEvent>> = self.get(url).await?;
        Ok(events.unwrap_or_default())
    }

    #[instrument(level = "debug", skip(self))]
    async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.endpoint(paths::LOGIN)?)
            .json(request)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn logout(&self) -> Result<(), ApiError> {
        let resp = self.http.post(self.endpoint(paths::LOGOUT)?).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn current_user(&self) -> Result<Option<CurrentUser>, ApiError> {
        let resp = self.http.get(self.endpoint(paths::ME)?).send().await?;
        if matches!(resp.status(), StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND) {
            debug!(status = %resp.status(), "No session");
            return Ok(None);
        }
        Self::parse(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpMenuApi {
        HttpMenuApi::new(Url::parse(base).unwrap(), None).unwrap()
    }

    #[test]
    fn endpoints_append_to_base_path() {
        let api = api("http://localhost:3001");
        assert_eq!(
            api.endpoint(paths::MENU_ITEMS).unwrap().as_str(),
            "http://localhost:3001/api/menu-items"
        );

        let api = self::api("https://eats.example.com/v2/");
        assert_eq!(
            api.endpoint(paths::ME).unwrap().as_str(),
            "https://eats.example.com/v2/api/auth/me"
        );
    }

    #[test]
    fn order_numbers_are_encoded_as_one_segment() {
        let api = api("http://localhost:3001");
        let number = OrderNumber::new("A/7 B").unwrap();
        assert_eq!(
            api.order_url(&number).unwrap().as_str(),
            "http://localhost:3001/api/orders/A%2F7%20B"
        );
    }

    #[test]
    fn error_message_reads_json_or_text() {
        assert_eq!(error_message(r#"{"error": "Order not found"}"#), "Order not found");
        assert_eq!(error_message(r#"{"detail": "Bad credentials"}"#), "Bad credentials");
        assert_eq!(error_message("Service Unavailable\n"), "Service Unavailable");
        assert_eq!(error_message(""), "");
    }
}
