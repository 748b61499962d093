//! Camp Client - HTTP clients for external collaborators
//!
//! - [`BasketClient`]: remote JSON key-value basket holding the resort snapshot
//! - [`GeminiClient`]: generative-AI service behind the [`Intelligence`] trait

pub mod config;
pub mod error;
pub mod genai;
pub mod pantry;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use genai::{GeminiClient, Intelligence};
pub use pantry::BasketClient;
