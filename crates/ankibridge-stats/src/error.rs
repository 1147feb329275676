//! Error types for ankibridge-stats.
//!
//! Errors from the analysis workflows fall into two categories:
//!
//! 1. **Client errors**: Wrapped from the underlying [`ankibridge::Error`] type
//! 2. **Workflow errors**: Specific to this crate (unknown deck, bad bucket layout)
//!
//! Parameter coercion has its own error type,
//! [`ValidationError`](crate::coerce::ValidationError), because it is reported
//! per parameter rather than per workflow.
//!
//! # Example
//!
//! ```no_run
//! use ankibridge_stats::{Engine, Error};
//!
//! # async fn example() {
//! let engine = Engine::new();
//!
//! match engine.analyze().ease_distribution("NonexistentDeck").await {
//!     Ok(metrics) => println!("Mean ease: {:.2}", metrics.mean),
//!     Err(Error::DeckNotFound(name)) => eprintln!("Deck '{}' not found", name),
//!     Err(Error::Client(ankibridge::Error::ConnectionRefused)) => eprintln!("Is Anki running?"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use thiserror::Error;

/// Result type for ankibridge-stats operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during statistics workflows.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the underlying AnkiConnect client.
    #[error(transparent)]
    Client(#[from] ankibridge::Error),

    /// A deck was not found.
    #[error("deck not found: {0}")]
    DeckNotFound(String),

    /// Bucket boundaries were not finite and strictly ascending.
    #[error("invalid bucket boundaries: {0}")]
    InvalidBuckets(String),
}
