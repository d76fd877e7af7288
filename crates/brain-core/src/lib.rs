//! Core trait and types for the Hey Anon chat orchestrator.
//!
//! This crate provides the shared interface between the orchestration
//! engine and the model backends. It defines:
//!
//! - [`Brain`] - The capability trait every model backend implements
//! - [`Turn`] / [`Role`] - A single message in the conversation
//! - [`TurnSequence`] - An ordered turn list with merge-by-id semantics
//! - [`BrainError`] - Error types for capability calls
//!
//! # Example
//!
//! ```rust
//! use brain_core::{async_trait, Brain, BrainError, Turn};
//!
//! struct FixedBrain;
//!
//! #[async_trait]
//! impl Brain for FixedBrain {
//!     async fn generate(&self, mut turns: Vec<Turn>) -> Result<Vec<Turn>, BrainError> {
//!         turns.push(Turn::assistant("gm"));
//!         Ok(turns)
//!     }
//!
//!     fn name(&self) -> &str {
//!         "FixedBrain"
//!     }
//! }
//! ```

mod error;
mod history;
mod message;
mod prompt;
mod trait_def;

pub use error::BrainError;
pub use history::TurnSequence;
pub use message::{Role, Turn};
pub use prompt::{hash_prompt, load_prompt_file};
pub use trait_def::Brain;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
