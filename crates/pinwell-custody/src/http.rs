//! HTTP-backed content-custody provider.
//!
//! Maps the [`ContentCustody`] capability set onto the provider's JSON API:
//!
//! - `POST   /auth/login`
//! - `GET    /accounts/{id}/spaces`
//! - `POST   /accounts/{id}/spaces`
//! - `DELETE /accounts/{id}/spaces/{sid}`
//! - `GET    /accounts/{id}/spaces/{sid}/contents`
//! - `POST   /accounts/{id}/spaces/{sid}/contents`
//! - `DELETE /accounts/{id}/spaces/{sid}/contents/{cid}`
//!
//! Non-success responses are mapped to [`CustodyError::Rejected`], extracting
//! the provider's error message when the body carries one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use pinwell_shared::{Account, AccountId, Content, ContentId, Space, SpaceId, UploadRequest};

use crate::config::CustodyConfig;
use crate::error::{CustodyError, Result};
use crate::ContentCustody;

/// Production provider client.
#[derive(Debug, Clone)]
pub struct HttpCustody {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpCustody {
    /// Build a client from the given configuration.
    pub fn new(config: CustodyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
            auth_token: config.auth_token,
        })
    }

    /// Build a client from environment configuration.
    pub fn from_env() -> Result<Self> {
        Self::new(CustodyConfig::from_env())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Check the response status, turning non-success into `Rejected`.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(CustodyError::Rejected {
            status: status.as_u16(),
            message: extract_error_message(status, &body),
        })
    }
}

/// Pull a human-readable message out of an error body, falling back to a
/// generic one when the provider sent nothing usable.
fn extract_error_message(status: StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
        message: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(msg) = parsed.error.or(parsed.message) {
            if !msg.is_empty() {
                return msg;
            }
        }
    }

    format!(
        "provider request failed with status {}",
        status.as_u16()
    )
}

// -- wire DTOs --------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountDto {
    id: String,
    email: String,
}

impl From<AccountDto> for Account {
    fn from(dto: AccountDto) -> Self {
        Account {
            id: AccountId::new(dto.id),
            email: dto.email,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSpaceRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpaceDto {
    id: String,
    name: String,
}

impl From<SpaceDto> for Space {
    fn from(dto: SpaceDto) -> Self {
        Space {
            id: SpaceId::new(dto.id),
            name: dto.name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentDto {
    id: String,
    name: String,
    cid: Option<String>,
    size: Option<u64>,
    media_type: Option<String>,
}

impl From<ContentDto> for Content {
    fn from(dto: ContentDto) -> Self {
        Content {
            id: ContentId::new(dto.id),
            name: dto.name,
            cid: dto.cid,
            size: dto.size,
            media_type: dto.media_type,
        }
    }
}

#[async_trait]
impl ContentCustody for HttpCustody {
    async fn authenticate(&self, email: &str) -> Result<Account> {
        debug!(email = %email, "authenticating with custody provider");

        let resp = self
            .request(Method::POST, "/auth/login")
            .json(&LoginRequest { email })
            .send()
            .await?;
        let resp = Self::check(resp).await?;

        let dto: AccountDto = resp
            .json()
            .await
            .map_err(|e| CustodyError::InvalidResponse(e.to_string()))?;
        Ok(dto.into())
    }

    async fn list_spaces(&self, account: &Account) -> Result<Vec<Space>> {
        let path = format!("/accounts/{}/spaces", account.id);
        let resp = self.request(Method::GET, &path).send().await?;
        let resp = Self::check(resp).await?;

        let dtos: Vec<SpaceDto> = resp
            .json()
            .await
            .map_err(|e| CustodyError::InvalidResponse(e.to_string()))?;
        Ok(dtos.into_iter().map(Space::from).collect())
    }

    async fn create_space(&self, account: &Account, name: &str) -> Result<Space> {
        let path = format!("/accounts/{}/spaces", account.id);
        let resp = self
            .request(Method::POST, &path)
            .json(&CreateSpaceRequest { name })
            .send()
            .await?;
        let resp = Self::check(resp).await?;

        let dto: SpaceDto = resp
            .json()
            .await
            .map_err(|e| CustodyError::InvalidResponse(e.to_string()))?;
        Ok(dto.into())
    }

    async fn delete_space(&self, account: &Account, space_id: &SpaceId) -> Result<()> {
        let path = format!("/accounts/{}/spaces/{}", account.id, space_id);
        let resp = self.request(Method::DELETE, &path).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn list_contents(&self, account: &Account, space_id: &SpaceId) -> Result<Vec<Content>> {
        let path = format!("/accounts/{}/spaces/{}/contents", account.id, space_id);
        let resp = self.request(Method::GET, &path).send().await?;
        let resp = Self::check(resp).await?;

        let dtos: Vec<ContentDto> = resp
            .json()
            .await
            .map_err(|e| CustodyError::InvalidResponse(e.to_string()))?;
        Ok(dtos.into_iter().map(Content::from).collect())
    }

    async fn upload_content(
        &self,
        account: &Account,
        space_id: &SpaceId,
        upload: UploadRequest,
    ) -> Result<Content> {
        let path = format!("/accounts/{}/spaces/{}/contents", account.id, space_id);

        debug!(
            space_id = %space_id,
            name = %upload.name,
            size = upload.size(),
            "uploading content"
        );

        let mut builder = self
            .request(Method::POST, &path)
            .query(&[("name", upload.name.as_str())]);
        if let Some(ref media_type) = upload.media_type {
            builder = builder.header(reqwest::header::CONTENT_TYPE, media_type);
        }

        let resp = builder.body(upload.data).send().await?;
        let resp = Self::check(resp).await?;

        let dto: ContentDto = resp
            .json()
            .await
            .map_err(|e| CustodyError::InvalidResponse(e.to_string()))?;
        Ok(dto.into())
    }

    async fn delete_content(
        &self,
        account: &Account,
        space_id: &SpaceId,
        content_id: &ContentId,
    ) -> Result<()> {
        let path = format!(
            "/accounts/{}/spaces/{}/contents/{}",
            account.id, space_id, content_id
        );
        let resp = self.request(Method::DELETE, &path).send().await?;
        Self::check(resp).await?;
        Ok(())
    }
}
