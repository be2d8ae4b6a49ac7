//! HTTP infrastructure: implements `WorldApi` with `reqwest`.

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::application::ports::WorldApi;
use crate::domain::error::ApiError;
use crate::domain::world::{
    ComputerIdsResponse, ConnectResponse, EndpointId, MessageResponse, RunProgramRequest,
    ServerInfo, WorldRequest,
};

/// Production `WorldApi` talking JSON over HTTP(S).
///
/// No retries and no request timeout: each call is one attempt that ends in a
/// response or a transport failure.
#[derive(Clone)]
pub struct HttpWorldApi {
    base_url: String,
    client: Client,
}

impl HttpWorldApi {
    /// Create a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ccdeploy/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("cannot build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await.map_err(transport)?;
        decode(response).await
    }

    async fn post<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }
}

impl WorldApi for HttpWorldApi {
    async fn list_computer_ids(&self) -> Result<Vec<EndpointId>, ApiError> {
        let body: ComputerIdsResponse = self.get("/api/get_computer_ids").await?;
        Ok(body.computer_ids)
    }

    async fn connect(&self, request: &WorldRequest) -> Result<ConnectResponse, ApiError> {
        self.post("/api/connect", request).await
    }

    async fn create_computercraft(
        &self,
        request: &WorldRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.post("/api/create_computercraft", request).await
    }

    async fn run_program(
        &self,
        request: &RunProgramRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.post("/api/run_program", request).await
    }

    async fn server_info(&self) -> Result<ServerInfo, ApiError> {
        self.get("/api/os_info").await
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    debug!(error = %err, "request failed");
    ApiError::Transport(err.to_string())
}

/// Decode a success body as `T`, or turn a failure status into
/// [`ApiError::Rejected`] with the body's `message` when it has one.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport)?;
    debug!(status = status.as_u16(), bytes = body.len(), "response");

    if status.is_success() {
        return serde_json::from_slice(&body).map_err(|err| {
            warn!(error = %err, "malformed response body");
            ApiError::Transport(format!("malformed response: {err}"))
        });
    }

    let message = serde_json::from_slice::<MessageResponse>(&body)
        .ok()
        .map(|body| body.message)
        .filter(|message| !message.trim().is_empty());
    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}
