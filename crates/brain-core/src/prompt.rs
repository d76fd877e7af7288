//! Prompt helpers for loading and fingerprinting system prompts.

use std::path::Path;

use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let digest = Sha256::digest(prompt.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Load a prompt file.
///
/// Returns `Some(content)` if the file exists and is non-empty after
/// trimming, `None` otherwise.
pub fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let content = std::fs::read_to_string(path.as_ref()).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_prompt_stable() {
        let first = hash_prompt("route me");
        let second = hash_prompt("route me");
        let different = hash_prompt("route you");

        assert_eq!(first, second);
        assert_ne!(first, different);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_load_missing_prompt_file() {
        assert!(load_prompt_file("/definitely/not/here/SUPERVISOR_PROMPT.md").is_none());
    }

    #[test]
    fn test_load_prompt_file_trims() {
        let path = std::env::temp_dir().join(format!("prompt-{}.md", std::process::id()));
        std::fs::write(&path, "\n  You route things.  \n").unwrap();

        assert_eq!(load_prompt_file(&path).as_deref(), Some("You route things."));

        std::fs::write(&path, "   \n").unwrap();
        assert!(load_prompt_file(&path).is_none());

        std::fs::remove_file(&path).unwrap();
    }
}
