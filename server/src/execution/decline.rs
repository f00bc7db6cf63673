use async_trait::async_trait;
use std::time::Duration;

use super::{Evaluation, Evaluator, ExecutionError};

pub const DECLINE_MESSAGE: &str = "JavaScript and TypeScript run in the browser. \
Server-side execution is disabled for this language.";

/// Declines to run anything and answers with a fixed explanation.
pub struct DeclineEvaluator;

#[async_trait]
impl Evaluator for DeclineEvaluator {
    async fn evaluate(&self, _: &str, _: Duration) -> Result<Evaluation, ExecutionError> {
        Ok(Evaluation::new(DECLINE_MESSAGE.to_string(), None))
    }
}
