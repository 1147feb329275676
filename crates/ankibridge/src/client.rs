//! The AnkiConnect client and builder.

use std::time::Duration;

use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::trace;

use crate::actions::{CardActions, DeckActions, MiscActions, NoteActions, StatisticsActions};
use crate::error::{Error, Result};
use crate::request::{AnkiRequest, AnkiResponse};

/// Default URL for AnkiConnect.
const DEFAULT_URL: &str = "http://127.0.0.1:8765";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The main client for interacting with AnkiConnect.
///
/// # Example
///
/// ```no_run
/// use ankibridge::AnkiClient;
///
/// # async fn example() -> ankibridge::Result<()> {
/// let client = AnkiClient::new();
/// let cards = client.cards().find("deck:Japanese").await?;
/// println!("{} cards", cards.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AnkiClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl AnkiClient {
    /// Create a new client with default settings.
    ///
    /// Connects to `http://127.0.0.1:8765` with a 30 second timeout.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for custom client configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The AnkiConnect URL this client talks to.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Access card operations.
    pub fn cards(&self) -> CardActions<'_> {
        CardActions { client: self }
    }

    /// Access deck operations.
    pub fn decks(&self) -> DeckActions<'_> {
        DeckActions { client: self }
    }

    /// Access note operations.
    pub fn notes(&self) -> NoteActions<'_> {
        NoteActions { client: self }
    }

    /// Access statistics operations.
    pub fn statistics(&self) -> StatisticsActions<'_> {
        StatisticsActions { client: self }
    }

    /// Access miscellaneous operations.
    pub fn misc(&self) -> MiscActions<'_> {
        MiscActions { client: self }
    }

    /// Invoke an arbitrary AnkiConnect action.
    ///
    /// Returns the raw `result` member of the response, `Value::Null` for
    /// actions that succeed without a result.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ankibridge::AnkiClient;
    /// # async fn example() -> ankibridge::Result<()> {
    /// let client = AnkiClient::new();
    /// let ids = client
    ///     .invoke("findCards", Some(serde_json::json!({ "query": "deck:Default" })))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn invoke(&self, action: &str, params: Option<Value>) -> Result<Value> {
        let request = AnkiRequest::new(action, params, self.api_key.as_deref());
        Ok(self.send_request(&request).await?.unwrap_or(Value::Null))
    }

    /// Execute an action with parameters and decode its result.
    pub(crate) async fn call<P, R>(&self, action: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = AnkiRequest::new(action, Some(params), self.api_key.as_deref());
        self.decode(action, self.send_request(&request).await?)
    }

    /// Execute an action without parameters and decode its result.
    pub(crate) async fn call_without_params<R>(&self, action: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let request = AnkiRequest::<()>::new(action, None, self.api_key.as_deref());
        self.decode(action, self.send_request(&request).await?)
    }

    /// Execute an action that returns null on success.
    pub(crate) async fn call_void<P>(&self, action: &str, params: P) -> Result<()>
    where
        P: Serialize,
    {
        let request = AnkiRequest::new(action, Some(params), self.api_key.as_deref());
        self.send_request(&request).await.map(|_| ())
    }

    fn decode<R: DeserializeOwned>(&self, action: &str, result: Option<Value>) -> Result<R> {
        match result {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(Error::EmptyResponse(action.to_string())),
        }
    }

    /// Send a request to AnkiConnect and split the response envelope.
    async fn send_request<T>(&self, request: &AnkiRequest<'_, T>) -> Result<Option<Value>>
    where
        T: Serialize,
    {
        trace!(action = request.action, "Sending AnkiConnect request");

        let response = self
            .http_client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    Error::ConnectionRefused
                } else {
                    Error::Http(e)
                }
            })?;

        let anki_response: AnkiResponse = response.json().await?;

        match anki_response.error {
            Some(err) => Err(Error::action(request.action, err)),
            None => Ok(anki_response.result.filter(|v| !v.is_null())),
        }
    }
}

impl Default for AnkiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating a customized [`AnkiClient`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use ankibridge::AnkiClient;
///
/// let client = AnkiClient::builder()
///     .url("http://localhost:8765")
///     .api_key("my-secret-key")
///     .timeout(Duration::from_secs(60))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the AnkiConnect URL.
    ///
    /// Defaults to `http://127.0.0.1:8765`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Build the client.
    pub fn build(self) -> AnkiClient {
        let http_client = Client::builder()
            .timeout(self.timeout)
            .build()
            .expect("Failed to build HTTP client");

        AnkiClient {
            http_client,
            base_url: self.base_url,
            api_key: self.api_key,
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
