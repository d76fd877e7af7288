//! Google Gemini-based brain implementation.
//!
//! This crate provides a [`Brain`] that calls the Gemini `generateContent`
//! endpoint. Each instance carries its own system prompt, so the router and
//! every specialist get a separately configured `GeminiBrain` sharing the
//! same credentials.
//!
//! # Usage
//!
//! ```rust,no_run
//! use gemini_brain::{Brain, GeminiBrain, GeminiBrainConfig, Turn};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = GeminiBrainConfig::from_env();
//!     config.system_prompt = Some("Reply concisely.".to_string());
//!
//!     let brain = GeminiBrain::new(config)?;
//!     let turns = brain.generate(vec![Turn::user("gm")]).await?;
//!     println!("{}", turns.last().map(|t| t.content.as_str()).unwrap_or(""));
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::GeminiBrain;
pub use config::{GeminiBrainConfig, GeminiBrainConfigBuilder};

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, Role, Turn};
