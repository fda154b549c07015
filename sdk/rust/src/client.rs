use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::SdkError;
use crate::types::{
    file_name_from_disposition, Download, ExtensionistFilter, LoginRequest, StateChange, SurveyKind,
    TokenEnvelope,
};

/// Mount prefix the gateway answers on by default.
pub const DEFAULT_PREFIX: &str = "/proxy";

/// Label the gateway puts on its relay failure envelope.
const PROXY_ERROR_LABEL: &str = "Proxy error";

#[derive(Deserialize)]
struct Envelope {
    error: String,
    message: String,
}

/// Dashboard API client. Every call goes through the gateway.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    gateway_url: String,
    prefix: String,
    token: Option<String>,
}

impl DashboardClient {
    pub fn new(gateway_url: &str) -> Self {
        Self::with_prefix(gateway_url, DEFAULT_PREFIX)
    }

    pub fn with_prefix(gateway_url: &str, prefix: &str) -> Self {
        Self::with_client(Client::new(), gateway_url, prefix)
    }

    /// Bring a preconfigured `reqwest::Client` (proxies, timeouts, TLS roots).
    pub fn with_client(client: Client, gateway_url: &str, prefix: &str) -> Self {
        Self {
            client,
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
            prefix: prefix.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Use an access token obtained elsewhere (e.g. from the session).
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// `gateway_url + prefix + path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.gateway_url, self.prefix, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Log in and keep the issued token for later calls.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<TokenEnvelope, SdkError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = self
            .client
            .post(self.url("/admin/login"))
            .json(&body)
            .send()
            .await?;

        let envelope: TokenEnvelope = decode(resp).await?;
        self.token = Some(envelope.access_token.clone());
        tracing::debug!(token_type = %envelope.token_type, "Logged in");
        Ok(envelope)
    }

    pub async fn list_extensionists(&self, filter: &ExtensionistFilter) -> Result<Value, SdkError> {
        let resp = self
            .authorized(self.client.get(self.url("/admin/extensionists")))
            .query(filter)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn extensionist_summary(&self, id: u64) -> Result<Value, SdkError> {
        self.get_json(&format!("/admin/extensionists/{}/summary", id)).await
    }

    /// Download the spreadsheet export for one extensionist.
    pub async fn export_extensionist_excel(&self, id: u64) -> Result<Download, SdkError> {
        let resp = self
            .authorized(
                self.client
                    .get(self.url(&format!("/admin/extensionists/{}/export-excel", id))),
            )
            .send()
            .await?;
        let resp = check(resp).await?;

        let content_type = header_string(&resp, header::CONTENT_TYPE);
        let file_name = file_name_from_disposition(&header_string(&resp, header::CONTENT_DISPOSITION));
        let bytes = resp.bytes().await?.to_vec();

        Ok(Download {
            content_type,
            file_name,
            bytes,
        })
    }

    /// Move a survey to `change.state`.
    pub async fn set_survey_state(
        &self,
        kind: SurveyKind,
        survey_id: u64,
        perfil: &str,
        change: &StateChange,
    ) -> Result<Value, SdkError> {
        let path = format!("/admin/surveys/{}/{}/state", kind.number(), survey_id);
        let resp = self
            .authorized(self.client.post(self.url(&path)))
            .query(&[("perfil", perfil)])
            .json(change)
            .send()
            .await?;
        decode(resp).await
    }

    /// GET any JSON endpoint below the prefix.
    pub async fn get_json(&self, path: &str) -> Result<Value, SdkError> {
        let resp = self.authorized(self.client.get(self.url(path))).send().await?;
        decode(resp).await
    }
}

fn header_string(resp: &Response, name: header::HeaderName) -> String {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Turn gateway envelopes and API errors into [`SdkError`].
async fn check(resp: Response) -> Result<Response, SdkError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await?;
    if status == StatusCode::BAD_GATEWAY {
        if let Ok(envelope) = serde_json::from_str::<Envelope>(&body) {
            if envelope.error == PROXY_ERROR_LABEL {
                return Err(SdkError::Gateway {
                    message: envelope.message,
                });
            }
        }
    }
    Err(SdkError::Status { status, body })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, SdkError> {
    let text = check(resp).await?.text().await?;
    Ok(serde_json::from_str(&text)?)
}
