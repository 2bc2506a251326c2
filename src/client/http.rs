use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use url::Url;

use super::{ApiOperation, UserApi};
use crate::{
    config::ApiConfig,
    error::{Error, Result},
    models::users::{ListUsersResponse, NewUser, User, UserId},
};

/// reqwest-backed [`UserApi`] addressed at a configurable base endpoint.
#[derive(Clone)]
pub struct HttpUserApi {
    client: Client,
    base_url: Url,
}

impl fmt::Debug for HttpUserApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpUserApi")
            .field("base_url", &self.base_url.as_str())
            .field("client", &"<reqwest Client>")
            .finish()
    }
}

impl HttpUserApi {
    /// Build a client from configuration (base URL, timeout, certificate policy).
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent("userform/0.1")
            .build()?;

        Self::with_client(client, &config.base_url)
    }

    /// Use an existing reqwest client against `base_url`.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        tracing::info!(base_url = %base_url, "User API client configured");

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{id}` with `id` percent-encoded as a single path segment.
    fn user_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `with_client`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url
    }

    async fn send(
        &self,
        operation: ApiOperation,
        request: reqwest::RequestBuilder,
    ) -> Result<Response> {
        let response = request.send().await.inspect_err(|e| {
            tracing::debug!(operation = %operation, error = %e, "Request failed to complete");
        })?;

        tracing::debug!(
            operation = %operation,
            status = %response.status(),
            "Response received",
        );

        Ok(response)
    }
}

fn expect_status(operation: ApiOperation, response: &Response, expected: StatusCode) -> Result<()> {
    let actual = response.status();
    if actual != expected {
        return Err(Error::UnexpectedStatus {
            operation,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Reads the whole body and decodes it with serde_json, so a malformed body
/// surfaces as `Error::Decode` rather than a transport error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list_users(&self) -> Result<Vec<User>> {
        let operation = ApiOperation::ListUsers;
        let response = self
            .send(operation, self.client.get(self.base_url.clone()))
            .await?;
        expect_status(operation, &response, StatusCode::OK)?;

        let envelope: ListUsersResponse = decode(response).await?;
        Ok(envelope.data)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let operation = ApiOperation::GetUser;
        let response = self
            .send(operation, self.client.get(self.user_url(id)))
            .await?;

        match response.status() {
            StatusCode::OK => Ok(Some(decode(response).await?)),
            // 204 is the contract's "no such user"; 404 carries the same meaning
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => Ok(None),
            actual => Err(Error::UnexpectedStatus {
                operation,
                expected: StatusCode::OK,
                actual,
            }),
        }
    }

    async fn create_user(&self, user: &NewUser) -> Result<()> {
        let operation = ApiOperation::CreateUser;
        let response = self
            .send(operation, self.client.post(self.base_url.clone()).json(user))
            .await?;
        expect_status(operation, &response, StatusCode::CREATED)
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let operation = ApiOperation::UpdateUser;
        let url = self.user_url(&user.id.to_string());
        let response = self
            .send(operation, self.client.put(url).json(user))
            .await?;
        expect_status(operation, &response, StatusCode::OK)
    }

    async fn delete_user(&self, id: &UserId) -> Result<()> {
        let operation = ApiOperation::DeleteUser;
        let url = self.user_url(&id.to_string());
        let response = self.send(operation, self.client.delete(url)).await?;
        expect_status(operation, &response, StatusCode::OK)
    }
}
