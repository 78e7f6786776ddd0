//! Capability effect handler
//!
//! Decides the location-access capability from configuration. The `prompt`
//! policy asks once on the terminal and remembers a grant for the lifetime
//! of the handler; a refusal is not remembered, so the next attempt asks
//! again.

use async_trait::async_trait;
use sos_core::config::CapabilityConfig;
use sos_core::{CapabilityEffects, CapabilityPolicy};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

const PROMPT: &str = "Allow this device to share its location for SOS messages? [y/N] ";

type AnswerSource = Box<dyn AsyncBufRead + Unpin + Send>;

/// Policy-driven capability handler
pub struct ConfiguredCapabilityHandler {
    policy: CapabilityPolicy,
    granted: AtomicBool,
    answers: Mutex<AnswerSource>,
}

impl ConfiguredCapabilityHandler {
    /// Handler that prompts on stdin when the policy is `prompt`
    pub fn new(policy: CapabilityPolicy) -> Self {
        Self::with_answers(policy, Box::new(BufReader::new(tokio::io::stdin())))
    }

    /// Handler built from the `[capability]` section
    pub fn from_config(config: &CapabilityConfig) -> Self {
        Self::new(config.policy)
    }

    /// Handler that reads prompt answers from `answers`
    pub fn with_answers(policy: CapabilityPolicy, answers: AnswerSource) -> Self {
        Self {
            policy,
            granted: AtomicBool::new(false),
            answers: Mutex::new(answers),
        }
    }

    async fn prompt(&self) -> bool {
        let mut stderr = tokio::io::stderr();
        if let Err(e) = stderr.write_all(PROMPT.as_bytes()).await {
            tracing::warn!("Failed to write capability prompt: {}", e);
        }
        if let Err(e) = stderr.flush().await {
            tracing::warn!("Failed to flush capability prompt: {}", e);
        }

        let mut line = String::new();
        let mut answers = self.answers.lock().await;
        match answers.read_line(&mut line).await {
            Ok(0) => {
                tracing::warn!("No answer to capability prompt (end of input)");
                false
            }
            Ok(_) => is_affirmative(&line),
            Err(e) => {
                tracing::warn!("Failed to read capability answer: {}", e);
                false
            }
        }
    }
}

/// Whether a prompt answer grants the capability
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl CapabilityEffects for ConfiguredCapabilityHandler {
    async fn is_granted(&self) -> bool {
        match self.policy {
            CapabilityPolicy::Granted => true,
            CapabilityPolicy::Denied => false,
            CapabilityPolicy::Prompt => self.granted.load(Ordering::SeqCst),
        }
    }

    async fn request(&self) -> bool {
        match self.policy {
            CapabilityPolicy::Granted => true,
            CapabilityPolicy::Denied => {
                tracing::debug!("Location capability denied by policy");
                false
            }
            CapabilityPolicy::Prompt => {
                let granted = self.prompt().await;
                if granted {
                    self.granted.store(true, Ordering::SeqCst);
                }
                tracing::info!(granted, "Location capability prompt answered");
                granted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(policy: CapabilityPolicy, input: &'static str) -> ConfiguredCapabilityHandler {
        ConfiguredCapabilityHandler::with_answers(policy, Box::new(input.as_bytes()))
    }

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("no"));
    }

    #[tokio::test]
    async fn test_fixed_policies_never_prompt() {
        let granted = scripted(CapabilityPolicy::Granted, "");
        assert!(granted.is_granted().await);
        assert!(granted.request().await);

        let denied = scripted(CapabilityPolicy::Denied, "y\n");
        assert!(!denied.is_granted().await);
        assert!(!denied.request().await);
    }

    #[tokio::test]
    async fn test_prompt_grant_is_remembered() {
        let handler = scripted(CapabilityPolicy::Prompt, "y\n");
        assert!(!handler.is_granted().await);
        assert!(handler.request().await);
        assert!(handler.is_granted().await);
    }

    #[tokio::test]
    async fn test_prompt_refusal_and_eof_deny() {
        let handler = scripted(CapabilityPolicy::Prompt, "n\n");
        assert!(!handler.request().await);
        assert!(!handler.is_granted().await);
        // Input exhausted: treated as a refusal
        assert!(!handler.request().await);
    }
}
