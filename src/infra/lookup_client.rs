//! Thin asynchronous client for the cadastral lookup function.
//!
//! - One `GET <endpoint>?cadastralNumber=<id>` per call, no retries, no cache.
//! - Every failure is folded into a [`LookupError`] whose text is shown to the user.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{LookupConfig, DEFAULT_LOOKUP_TIMEOUT};
use crate::domain::{CadastralRecord, LookupError, ParcelIdentifier, ParcelLookup};

const USER_AGENT: &str = concat!("parcel-cost-calculator/", env!("CARGO_PKG_VERSION"));
const IDENTIFIER_PARAM: &str = "cadastralNumber";

const CAUSE_TIMEOUT: &str = "превышено время ожидания";
const CAUSE_CONNECT: &str = "нет соединения с сервисом";
const CAUSE_REQUEST: &str = "сбой запроса";

/// Failure to construct the client. Lookups themselves return [`LookupError`].
#[derive(Debug, Error)]
pub enum LookupClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Clone, Debug)]
pub struct LookupClient {
    http: Client,
    endpoint: Url,
}

impl LookupClient {
    pub fn new() -> Result<Self, LookupClientError> {
        Self::from_config(&LookupConfig::default())
    }

    pub fn from_config(config: &LookupConfig) -> Result<Self, LookupClientError> {
        Self::build(&config.endpoint, config.timeout)
    }

    pub fn with_base_url(base: &str) -> Result<Self, LookupClientError> {
        Self::build(base, DEFAULT_LOOKUP_TIMEOUT)
    }

    fn build(base: &str, timeout: Duration) -> Result<Self, LookupClientError> {
        let endpoint = Url::parse(base)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL; the identifier is percent-encoded into the query.
    pub fn request_url(&self, identifier: &ParcelIdentifier) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair(IDENTIFIER_PARAM, identifier.as_str());
        url
    }

    pub async fn fetch(
        &self,
        identifier: &ParcelIdentifier,
    ) -> Result<CadastralRecord, LookupError> {
        let span = tracing::debug_span!("parcel_lookup", identifier = %identifier);
        let url = self.request_url(identifier);
        debug!(parent: &span, %url, "Requesting cadastral record");

        let response = self.http.get(url).send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            let error = error_from_status(status, &body);
            warn!(
                parent: &span,
                status = status.as_u16(),
                detail = %error,
                "Lookup provider rejected request"
            );
            return Err(error);
        }

        let record = parse_record(identifier, &body)?;
        debug!(
            parent: &span,
            points = record.points_count,
            area = ?record.area,
            "Parsed cadastral record"
        );
        Ok(record)
    }
}

#[async_trait]
impl ParcelLookup for LookupClient {
    async fn fetch_record(
        &self,
        identifier: &ParcelIdentifier,
    ) -> Result<CadastralRecord, LookupError> {
        self.fetch(identifier).await
    }
}

/// The full reqwest error goes to the log; the user only gets a short cause.
fn transport_error(error: reqwest::Error) -> LookupError {
    warn!(%error, timeout = error.is_timeout(), "Lookup transport failure");
    let cause = if error.is_timeout() {
        CAUSE_TIMEOUT
    } else if error.is_connect() {
        CAUSE_CONNECT
    } else {
        CAUSE_REQUEST
    };
    LookupError::Transport {
        cause: cause.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default, deserialize_with = "lenient_text")]
    error: Option<String>,
}

fn error_from_status(status: StatusCode, body: &[u8]) -> LookupError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|payload| payload.error);

    match message {
        Some(message) => LookupError::Upstream {
            status: status.as_u16(),
            message,
        },
        None => LookupError::NotFound {
            status: status.as_u16(),
        },
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordDto {
    points_count: u32,
    #[serde(default, deserialize_with = "lenient_text")]
    cadastral_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    area: Option<f64>,
    #[serde(default, alias = "assessedCost", deserialize_with = "lenient_number")]
    cadastral_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    address: Option<String>,
}

impl RecordDto {
    fn into_record(self, requested: &ParcelIdentifier) -> CadastralRecord {
        let identifier = self
            .cadastral_number
            .unwrap_or_else(|| requested.as_str().to_string());
        CadastralRecord::new(identifier, self.points_count)
            .with_area(self.area)
            .with_assessed_cost(self.cadastral_cost)
            .with_category(self.category)
            .with_address(self.address)
    }
}

fn parse_record(requested: &ParcelIdentifier, body: &[u8]) -> Result<CadastralRecord, LookupError> {
    serde_json::from_slice::<RecordDto>(body)
        .map(|dto| dto.into_record(requested))
        .map_err(|error| {
            warn!(%error, "Malformed lookup response");
            LookupError::Malformed {
                cause: error.to_string(),
            }
        })
}

/// Numbers, numeric strings (`"450,5"` included) or nothing. Anything else is unknown.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(number)) => number.as_f64(),
        Some(serde_json::Value::String(text)) => text.trim().replace(',', ".").parse().ok(),
        _ => None,
    })
}

/// Non-blank strings; other JSON types are treated as unknown.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) if !text.trim().is_empty() => {
            Some(text.trim().to_string())
        }
        _ => None,
    })
}
