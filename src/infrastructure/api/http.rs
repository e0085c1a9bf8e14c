use crate::domain::entities::chat::ChatMessage;
use crate::domain::entities::opportunity::{ExpiredDomain, Product};
use crate::domain::entities::plan::{DomainSalePitch, MarketingPlan};
use crate::domain::error::DomainError;
use crate::domain::ports::content_generator::{AdviceStream, ContentGenerator};
use crate::infrastructure::api::stream::decode_utf8_chunks;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

pub const UNKNOWN_API_ERROR: &str = "An unknown API error occurred.";

/// Content generator backed by the `/api/*` endpoints of the generation backend.
pub struct HttpContentGenerator {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ProductsResponse {
    products: Vec<Product>,
}

#[derive(Deserialize)]
struct DomainsResponse {
    domains: Vec<ExpiredDomain>,
}

#[derive(Serialize)]
struct PlanRequest<'a> {
    product: &'a Product,
}

#[derive(Serialize)]
struct PitchRequest<'a> {
    domain: &'a ExpiredDomain,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdviceRequest<'a> {
    history: &'a [ChatMessage],
    new_message: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl HttpContentGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::builder()
                .user_agent("autoflip/0.1")
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DomainError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "GET");
        let resp = self.client.get(&url).send().await.map_err(|e| transport(path, e))?;
        decode_json(path, ensure_success(path, resp).await?).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, DomainError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "POST");
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| transport(path, e))?;
        decode_json(path, ensure_success(path, resp).await?).await
    }
}

fn transport(path: &str, e: reqwest::Error) -> DomainError {
    error!(%path, error = %e, "request to generation backend failed");
    DomainError::RemoteGeneration(format!("request to {path} failed: {e}"))
}

async fn ensure_success(path: &str, resp: Response) -> Result<Response, DomainError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    error!(%path, %status, %message, "generation backend returned an error");
    Err(DomainError::RemoteGeneration(message))
}

async fn decode_json<T: DeserializeOwned>(path: &str, resp: Response) -> Result<T, DomainError> {
    resp.json().await.map_err(|e| {
        error!(%path, error = %e, "malformed response from generation backend");
        DomainError::RemoteGeneration(format!("malformed response from {path}: {e}"))
    })
}

/// User-facing message for a failed response: the body's `message` when present.
pub fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { message: Some(m) }) if !m.trim().is_empty() => m,
        Ok(_) => format!("API request failed with status {status}"),
        Err(_) => UNKNOWN_API_ERROR.to_string(),
    }
}

#[async_trait]
impl ContentGenerator for HttpContentGenerator {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, DomainError> {
        let data: ProductsResponse = self.get_json("/api/products").await?;
        Ok(data.products)
    }

    async fn fetch_domains(&self) -> Result<Vec<ExpiredDomain>, DomainError> {
        let data: DomainsResponse = self.get_json("/api/domains").await?;
        Ok(data.domains)
    }

    async fn marketing_plan(&self, product: &Product) -> Result<MarketingPlan, DomainError> {
        self.post_json("/api/marketing-plan", &PlanRequest { product }).await
    }

    async fn domain_pitch(&self, domain: &ExpiredDomain) -> Result<DomainSalePitch, DomainError> {
        self.post_json("/api/domain-pitch", &PitchRequest { domain }).await
    }

    async fn stream_advice(
        &self,
        history: &[ChatMessage],
        new_message: &str,
    ) -> Result<AdviceStream, DomainError> {
        let path = "/api/expert-advice";
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(&AdviceRequest {
                history,
                new_message,
            })
            .send()
            .await
            .map_err(|e| transport(path, e))?;
        let resp = ensure_success(path, resp).await?;
        Ok(decode_utf8_chunks(resp.bytes_stream()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_body_message() {
        let msg = error_message(StatusCode::BAD_GATEWAY, r#"{"message":"Model overloaded"}"#);
        assert_eq!(msg, "Model overloaded");
    }

    #[test]
    fn error_message_without_message_field_reports_status() {
        let msg = error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#);
        assert!(msg.contains("500"));
    }

    #[test]
    fn error_message_falls_back_on_unparseable_body() {
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "<html>"), UNKNOWN_API_ERROR);
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), UNKNOWN_API_ERROR);
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let gen = HttpContentGenerator::new("http://localhost:3000/");
        assert_eq!(gen.base_url(), "http://localhost:3000");
    }
}
