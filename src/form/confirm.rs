use async_trait::async_trait;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";

/// Yes/no decision requested before a destructive action.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way (scripted runs, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

#[async_trait]
impl Confirm for FixedAnswer {
    async fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!(prompt, answer = self.0, "Confirmation answered automatically");
        self.0
    }
}
