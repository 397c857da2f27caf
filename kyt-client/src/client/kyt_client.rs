//! This module interacts with the KYT API to screen blockchain addresses.
//!
//! It provides functionality to:
//! - Sign and issue requests against the KYT API.
//! - Check if a given address is flagged as malicious.
//! - Check if a given address is under sanctions.
//!
//! The scoring and detail endpoints have no known contract yet and return
//! [`Error::Unimplemented`].

use crate::client::signature::{timestamp_millis, QueryParams, RequestEnvelope};
use crate::common::error::Error;
use crate::common::{AddrDetail, AddrScore, MaliceRecord, SanctionRecord, TxDetail, TxScore};
use crate::config::KytConfig;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::error::Error as StdError;
use std::fmt;
use tracing::{debug, info, Span};
use tracing_attributes::instrument;

const MALICE_PATH: &str = "/api/v1/kyt/address/malice";
const SANCTION_PATH: &str = "/api/v1/kyt/address/sanction";

/// The application credentials issued by the KYT provider
#[derive(Clone)]
pub struct Credentials {
    app_id: String,
    app_secret: String,
    app_root: String,
}

impl Credentials {
    /// Create credentials, failing if any of them is empty
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        app_root: impl Into<String>,
    ) -> Result<Self, Error> {
        let credentials = Credentials {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            app_root: app_root.into(),
        };

        if credentials.app_id.is_empty() {
            return Err(Error::Configuration("app_id"));
        }
        if credentials.app_secret.is_empty() {
            return Err(Error::Configuration("app_secret"));
        }
        if credentials.app_root.is_empty() {
            return Err(Error::Configuration("app_root"));
        }

        Ok(credentials)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("app_root", &self.app_root)
            .finish()
    }
}

impl TryFrom<&KytConfig> for Credentials {
    type Error = Error;

    fn try_from(config: &KytConfig) -> Result<Self, Self::Error> {
        Credentials::new(&config.app_id, &config.app_secret, &config.app_root)
    }
}

/// A client for the KYT API.
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct KytClient {
    client: Client,
    credentials: Credentials,
    span: Span,
}

impl KytClient {
    /// Construct a new [`KytClient`].
    ///
    /// Request spans are recorded under a `kyt_client` span created here.
    /// Spans are only enabled if a subscriber is installed when they are
    /// created, so install one (see [`crate::logging::setup_logging`])
    /// before constructing the client, or attach a span of your own with
    /// [`KytClient::with_span`].
    pub fn new(credentials: Credentials) -> Self {
        Self::with_client(Client::new(), credentials)
    }

    /// Construct a new [`KytClient`] on top of an existing HTTP client.
    /// The same subscriber ordering as [`KytClient::new`] applies.
    pub fn with_client(client: Client, credentials: Credentials) -> Self {
        let span = tracing::info_span!("kyt_client", app_id = %credentials.app_id);
        KytClient {
            client,
            credentials,
            span,
        }
    }

    /// Construct a new [`KytClient`] from the `[kyt]` settings
    pub fn from_config(config: &KytConfig) -> Result<Self, Error> {
        Credentials::try_from(config).map(Self::new)
    }

    /// Record request spans under `span` instead of the `kyt_client` span
    /// created at construction
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Sign and send a request, returning the response body as a JSON object.
    ///
    /// Neither the HTTP status nor the `code` field of the body is checked;
    /// both are left to the caller.
    #[instrument(
        parent = &self.span,
        skip_all,
        fields(method = %method, url = url, platform = query.platform(), address = query.address())
    )]
    pub async fn issue_request(
        &self,
        url: &str,
        method: Method,
        query: &QueryParams,
    ) -> Result<Map<String, Value>, Error> {
        let timestamp = timestamp_millis();
        let envelope = RequestEnvelope {
            app_id: &self.credentials.app_id,
            method: &method,
            params: query,
            timestamp,
            url,
            key: &self.credentials.app_secret,
        };
        let signature = envelope.sign();
        let api_url = format!("{}{}", self.credentials.app_root, url);

        debug!("Sending signed request to {api_url}");
        let response = self
            .client
            .request(method, &api_url)
            .query(query.pairs())
            .header("APPID", &self.credentials.app_id)
            .header("APP-SECRET", &self.credentials.app_secret)
            .header("TIMESTAMP", timestamp.to_string())
            .header("SIGN", signature.as_str())
            .send()
            .await?;
        debug!(status = %response.status(), "Received response");

        let body = match response.json::<Map<String, Value>>().await {
            Ok(body) => body,
            Err(e) if e.is_decode() => {
                // Check if the source of the error is serde_json::Error
                let message = e
                    .source()
                    .and_then(|cause| cause.downcast_ref::<serde_json::Error>())
                    .map(|serde_err| serde_err.to_string())
                    .unwrap_or_else(|| e.to_string());
                return Err(Error::Serialization(message));
            }
            Err(e) => return Err(Error::Network(e)),
        };

        let code = log_field(body.get("code"));
        let msg = log_field(body.get("msg"));
        info!(%code, %msg, "KYT API response");

        Ok(body)
    }

    /// Check whether the address is flagged as malicious
    pub async fn get_malicious_addr(
        &self,
        platform: &str,
        address: &str,
    ) -> Result<MaliceRecord, Error> {
        let query = QueryParams::new(platform, address);
        let body = self.issue_request(MALICE_PATH, Method::GET, &query).await?;
        decode_data(body)
    }

    /// Check whether the address is under sanctions
    pub async fn get_sanctioned_addr(
        &self,
        platform: &str,
        address: &str,
    ) -> Result<SanctionRecord, Error> {
        let query = QueryParams::new(platform, address);
        let body = self.issue_request(SANCTION_PATH, Method::GET, &query).await?;
        decode_data(body)
    }

    /// Risk score of an address. Not implemented.
    pub async fn get_addr_score(
        &self,
        _platform: &str,
        _address: &str,
        _currency: &str,
    ) -> Result<AddrScore, Error> {
        Err(Error::Unimplemented("get_addr_score"))
    }

    /// Risk score of a transaction. Not implemented.
    pub async fn get_tx_score(&self, _platform: &str, _hash: &str) -> Result<TxScore, Error> {
        Err(Error::Unimplemented("get_tx_score"))
    }

    /// Fund flow summary of an address. Not implemented.
    pub async fn get_addr_detail(
        &self,
        _platform: &str,
        _address: &str,
        _currency: &str,
    ) -> Result<AddrDetail, Error> {
        Err(Error::Unimplemented("get_addr_detail"))
    }

    /// Details of a transaction. Not implemented.
    pub async fn get_tx_detail(&self, _platform: &str, _hash: &str) -> Result<TxDetail, Error> {
        Err(Error::Unimplemented("get_tx_detail"))
    }
}

/// Render a response field for logging. Strings are logged without JSON quotes.
fn log_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Decode the `data` field of a response body into a record
fn decode_data<T: DeserializeOwned>(mut body: Map<String, Value>) -> Result<T, Error> {
    match body.remove("data") {
        None | Some(Value::Null) => Err(Error::MissingData),
        Some(data) => serde_json::from_value(data).map_err(Error::InvalidApiResponse),
    }
}
