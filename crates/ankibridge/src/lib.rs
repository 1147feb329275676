//! Async client for the AnkiConnect RPC interface.
//!
//! AnkiConnect exposes a single HTTP endpoint that accepts
//! `{action, version, params}` envelopes. This crate wraps that endpoint in
//! a typed client: [`AnkiClient::invoke`] forwards any action verbatim, and
//! the action groups decode the handful of responses the statistics engine
//! and MCP server depend on.
//!
//! # Quick Start
//!
//! ```no_run
//! use ankibridge::AnkiClient;
//!
//! # async fn example() -> ankibridge::Result<()> {
//! let client = AnkiClient::new();
//!
//! let version = client.misc().version().await?;
//! println!("AnkiConnect version: {}", version);
//!
//! // Any action can be forwarded untyped
//! let decks = client.invoke("deckNames", None).await?;
//! println!("{}", decks);
//! # Ok(())
//! # }
//! ```
//!
//! # Action Groups
//!
//! - [`AnkiClient::cards()`] - Find cards, fetch card info and ease factors
//! - [`AnkiClient::decks()`] - List deck names
//! - [`AnkiClient::notes()`] - Add notes and update their fields
//! - [`AnkiClient::statistics()`] - Daily review counts and review logs
//! - [`AnkiClient::misc()`] - Version check
//!
//! # Requirements
//!
//! - Anki must be running with the [AnkiConnect](https://ankiweb.net/shared/info/2055492159) add-on installed
//! - By default, the client connects to `http://127.0.0.1:8765`

pub mod actions;
pub mod client;
pub mod error;
pub mod query;
mod request;
pub mod types;

pub use client::{AnkiClient, ClientBuilder};
pub use error::{Error, Result};
pub use query::QueryBuilder;
pub use types::{CardInfo, DuplicateScope, NewNote, NoteBuilder, NoteOptions, ReviewEntry};
