//! Review statistics and parameter coercion for the ankibridge MCP server.
//!
//! The crate has three layers:
//!
//! - [`stats`]: pure functions computing distributions, retention and study
//!   streaks over arrays already fetched from AnkiConnect
//! - [`coerce`]: validation helpers that accept structured tool parameters
//!   either natively or JSON-encoded inside strings
//! - [`analyze`]: workflows that fetch data through an [`AnkiClient`] and
//!   feed it to [`stats`]
//!
//! # Quick Start
//!
//! ```no_run
//! use ankibridge_stats::Engine;
//!
//! # async fn example() -> ankibridge_stats::Result<()> {
//! let engine = Engine::new();
//!
//! let streak = engine.analyze().study_streak().await?;
//! println!("Current streak: {} days", streak.current_streak);
//!
//! let ease = engine.analyze().ease_distribution("Japanese").await?;
//! for (label, count) in ease.buckets.iter() {
//!     println!("{label}: {count}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The pure functions need no client:
//!
//! ```
//! use ankibridge_stats::stats::compute_retention;
//!
//! let metrics = compute_retention(&[1, 3, 3, 4]);
//! assert_eq!(metrics.overall, 0.75);
//! ```
//!
//! # Feature Flags
//!
//! - `analyze` (default) - client-backed analysis workflows

mod error;

pub mod coerce;
pub mod stats;

#[cfg(feature = "analyze")]
pub mod analyze;

pub use error::{Error, Result};

pub use ankibridge::{AnkiClient, ClientBuilder, NoteBuilder, NoteOptions};

#[cfg(feature = "analyze")]
use analyze::AnalyzeEngine;

/// Workflow engine wrapping an [`AnkiClient`].
///
/// # Example
///
/// ```no_run
/// use ankibridge_stats::Engine;
///
/// let client = ankibridge_stats::AnkiClient::builder()
///     .url("http://localhost:8765")
///     .build();
/// let engine = Engine::from_client(client);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    client: AnkiClient,
}

impl Engine {
    /// Create a new engine with default client settings.
    ///
    /// Connects to AnkiConnect at `http://127.0.0.1:8765`.
    pub fn new() -> Self {
        Self {
            client: AnkiClient::new(),
        }
    }

    /// Create an engine from an existing client.
    pub fn from_client(client: AnkiClient) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying client.
    ///
    /// Use this for direct API access when workflows don't cover your use case.
    pub fn client(&self) -> &AnkiClient {
        &self.client
    }

    /// Access analysis workflows.
    #[cfg(feature = "analyze")]
    pub fn analyze(&self) -> AnalyzeEngine<'_> {
        AnalyzeEngine::new(&self.client)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
