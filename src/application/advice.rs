//! Expert guide: a streamed advice chat that runs alongside the session.

use std::future::Future;
use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, warn};

use crate::domain::entities::chat::ChatMessage;
use crate::domain::error::DomainError;
use crate::domain::ports::content_generator::ContentGenerator;

pub const GREETING: &str =
    "Hello! I'm your AI expert guide. How can I help you profit from digital products today?";
pub const APOLOGY: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

/// How an advice request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceOutcome {
    /// The stream ran to its end; holds the full reply.
    Completed(String),
    /// The caller cancelled first; holds whatever arrived before that.
    Cancelled(String),
}

pub struct ExpertGuide {
    content: Arc<dyn ContentGenerator>,
    history: Vec<ChatMessage>,
}

impl ExpertGuide {
    pub fn new(content: Arc<dyn ContentGenerator>) -> Self {
        Self {
            content,
            history: vec![ChatMessage::model(GREETING)],
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Asks the guide a question, feeding chunks to `on_chunk` as they arrive.
    ///
    /// When `cancel` resolves before the stream ends, the stream is dropped,
    /// which closes the connection.
    pub async fn ask<C, F>(
        &mut self,
        message: &str,
        cancel: C,
        mut on_chunk: F,
    ) -> Result<AdviceOutcome, DomainError>
    where
        C: Future<Output = ()>,
        F: FnMut(&str),
    {
        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::InvalidInput("message is empty".into()));
        }
        match self.converse(message, cancel, &mut on_chunk).await {
            Ok(outcome) => {
                let reply = match &outcome {
                    AdviceOutcome::Completed(text) | AdviceOutcome::Cancelled(text) => text,
                };
                if reply.is_empty() {
                    // No answer to pair the question with; keep turns alternating.
                    self.history.pop();
                } else {
                    self.history.push(ChatMessage::model(reply.clone()));
                }
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, "advice stream failed");
                self.history.push(ChatMessage::model(APOLOGY));
                Err(e)
            }
        }
    }

    async fn converse<C, F>(
        &mut self,
        message: &str,
        cancel: C,
        on_chunk: &mut F,
    ) -> Result<AdviceOutcome, DomainError>
    where
        C: Future<Output = ()>,
        F: FnMut(&str),
    {
        let prior = self.history.clone();
        self.history.push(ChatMessage::user(message));
        let mut stream = self.content.stream_advice(&prior, message).await?;

        let mut reply = String::new();
        tokio::pin!(cancel);
        loop {
            let next = tokio::select! {
                _ = &mut cancel => None,
                chunk = stream.next() => Some(chunk),
            };
            match next {
                None => {
                    debug!(received = reply.len(), "advice stream cancelled");
                    drop(stream);
                    return Ok(AdviceOutcome::Cancelled(reply));
                }
                Some(Some(Ok(text))) => {
                    on_chunk(&text);
                    reply.push_str(&text);
                }
                Some(Some(Err(e))) => return Err(e),
                Some(None) => return Ok(AdviceOutcome::Completed(reply)),
            }
        }
    }
}
