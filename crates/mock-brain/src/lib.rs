//! Mock brain implementations for exercising the orchestrator.
//!
//! This crate provides mock implementations of the `Brain` trait for testing:
//! - `EchoBrain` - Replies with the latest user turn, optionally prefixed
//! - `ScriptedBrain` - Replies with a fixed text and records its calls
//! - `FailingBrain` - Always fails with a configurable error
//! - `DelayedBrain` - Holds each call for a fixed latency
//!
//! For production model calls, use the `gemini-brain` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, EchoBrain, Turn};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let brain = EchoBrain::new();
//!
//!     let turns = brain.generate(vec![Turn::user("gm")]).await?;
//!     println!("Reply: {}", turns[1].content);
//!     Ok(())
//! }
//! ```

mod delayed;
mod echo;
mod failing;
mod scripted;

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, Role, Turn, TurnSequence};

// Export mock implementations
pub use delayed::DelayedBrain;
pub use echo::EchoBrain;
pub use failing::FailingBrain;
pub use scripted::ScriptedBrain;
