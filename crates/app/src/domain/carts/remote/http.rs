//! HTTP client for the cart server.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boxcart::{
    items::{CartLineItem, DEFAULT_UNIT_WEIGHT_KG, LineId, ServerLineUuid},
    products::{Dimensions, ProductUuid},
};

use crate::session::UserUuid;

use super::{NewServerLine, RemoteCartApi, RemoteCartError};

/// Configuration for connecting to the cart server.
#[derive(Debug, Clone)]
pub struct HttpCartApiConfig {
    /// Base URL, e.g. `"https://shop.example.com/api"`.
    pub base_url: String,

    /// Bearer token for the signed-in user.
    pub token: Option<String>,
}

/// HTTP client for the cart server.
#[derive(Debug, Clone)]
pub struct HttpCartApi {
    config: HttpCartApiConfig,
    http: Client,
}

impl HttpCartApi {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: HttpCartApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn user_items_url(&self, user: UserUuid) -> String {
        format!(
            "{}/users/{user}/cart/items",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn item_url(&self, line: ServerLineUuid) -> String {
        format!(
            "{}/cart/items/{line}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<Response, RemoteCartError> {
        let response = self.authorize(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(RemoteCartError::UnexpectedResponse(format!(
                "{action} request failed with status {status}: {text}"
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl RemoteCartApi for HttpCartApi {
    async fn list(&self, user: UserUuid) -> Result<Vec<CartLineItem>, RemoteCartError> {
        let request = self.http.get(self.user_items_url(user));

        let lines: Vec<ServerLineBody> = self.send(request, "list").await?.json().await?;

        Ok(lines.into_iter().map(CartLineItem::from).collect())
    }

    async fn create(
        &self,
        user: UserUuid,
        line: NewServerLine,
    ) -> Result<CartLineItem, RemoteCartError> {
        let request = self.http.post(self.user_items_url(user)).json(&line);

        let created: ServerLineBody = self.send(request, "create").await?.json().await?;

        Ok(created.into())
    }

    async fn update(&self, line: ServerLineUuid, quantity: u32) -> Result<(), RemoteCartError> {
        let request = self
            .http
            .patch(self.item_url(line))
            .json(&QuantityBody { quantity });

        self.send(request, "update").await?;

        Ok(())
    }

    async fn delete(&self, line: ServerLineUuid) -> Result<(), RemoteCartError> {
        let request = self.http.delete(self.item_url(line));

        self.send(request, "delete").await?;

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct QuantityBody {
    quantity: u32,
}

#[derive(Debug, Deserialize)]
struct ServerLineBody {
    id: ServerLineUuid,
    product: ProductUuid,
    name: String,
    code: String,
    unit_price: Decimal,
    quantity: u32,
    #[serde(default)]
    unit_weight_kg: Option<Decimal>,
    dimensions: Dimensions,
}

impl From<ServerLineBody> for CartLineItem {
    fn from(body: ServerLineBody) -> Self {
        CartLineItem {
            id: LineId::Server(body.id),
            product: body.product,
            name: body.name,
            code: body.code,
            unit_price: body.unit_price,
            quantity: body.quantity,
            unit_weight_kg: body.unit_weight_kg.unwrap_or(DEFAULT_UNIT_WEIGHT_KG),
            dimensions: body.dimensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    fn api(base_url: &str) -> HttpCartApi {
        HttpCartApi::new(HttpCartApiConfig {
            base_url: base_url.to_string(),
            token: None,
        })
    }

    #[test]
    fn urls_ignore_trailing_slash() {
        let user = UserUuid::from_uuid(Uuid::nil());
        let line = ServerLineUuid::from_uuid(Uuid::nil());

        let api = api("https://shop.example.com/api/");

        assert_eq!(
            api.user_items_url(user),
            format!("https://shop.example.com/api/users/{user}/cart/items")
        );
        assert_eq!(
            api.item_url(line),
            format!("https://shop.example.com/api/cart/items/{line}")
        );
    }

    #[test]
    fn server_body_becomes_server_line() -> TestResult {
        let id = Uuid::now_v7();
        let product = Uuid::now_v7();

        let body: ServerLineBody = serde_json::from_value(serde_json::json!({
            "id": id,
            "product": product,
            "name": "Toggle clamp",
            "code": "CLM-M8",
            "unit_price": "12.40",
            "quantity": 2,
            "dimensions": { "length_mm": 120, "width_mm": 40, "height_mm": 60 }
        }))?;

        let line = CartLineItem::from(body);

        assert_eq!(line.id, LineId::Server(ServerLineUuid::from_uuid(id)));
        assert_eq!(line.product, ProductUuid::from_uuid(product));
        assert_eq!(line.unit_weight_kg, dec!(0.5));
        assert_eq!(line.quantity, 2);

        Ok(())
    }
}
