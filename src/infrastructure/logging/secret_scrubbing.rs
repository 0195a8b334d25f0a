use regex::Regex;
use std::fmt;

/// Redacts credentials from text before it is written to the log
#[derive(Clone)]
pub struct SecretScrubber {
    secret_field_pattern: Regex,
    password_pattern: Regex,
}

impl SecretScrubber {
    /// Create a new secret scrubber
    pub fn new() -> Self {
        Self {
            // The Secret member of a credential payload: "Secret":"..."
            secret_field_pattern: Regex::new(r#""Secret"\s*:\s*"(?:[^"\\]|\\.)*""#)
                .expect("secret field pattern is valid"),
            // Store-side password fields, JSON or key=value
            password_pattern: Regex::new(r#"["']?password["']?\s*[:=]\s*["']?[^"'\s,}]+["']?"#)
                .expect("password pattern is valid"),
        }
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = self
            .secret_field_pattern
            .replace_all(message, r#""Secret":"[REDACTED]""#);
        self.password_pattern
            .replace_all(&scrubbed, "password=[REDACTED]")
            .into_owned()
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
