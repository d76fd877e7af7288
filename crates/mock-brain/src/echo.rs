//! Echo brain implementation - replies with the latest user turn.

use brain_core::{async_trait, Brain, BrainError, Role, Turn};

/// A simple brain that echoes the most recent user turn back.
///
/// Useful for testing the message flow without any model processing.
#[derive(Debug, Clone, Default)]
pub struct EchoBrain {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoBrain {
    /// Create a new EchoBrain with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoBrain with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_brain::EchoBrain;
    ///
    /// let brain = EchoBrain::with_prefix("Echo: ");
    /// // Will respond with "Echo: <latest user text>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl Brain for EchoBrain {
    async fn generate(&self, mut turns: Vec<Turn>) -> Result<Vec<Turn>, BrainError> {
        let last_user = turns
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.content.clone())
            .unwrap_or_default();

        let reply = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, last_user),
            None => last_user,
        };

        turns.push(Turn::assistant(reply));
        Ok(turns)
    }

    fn name(&self) -> &str {
        "EchoBrain"
    }
}
