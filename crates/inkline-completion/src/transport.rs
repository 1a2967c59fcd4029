//! Seams to the host: transport dispatch and user-visible notifications
//!
//! The underlying duplex connection is out of scope; the core only calls
//! through [`CompletionTransport::send_message`] and expects the host to feed
//! incoming stream chunks into the provider's `receive_chunk`.

use crate::error::CompletionResult;
use async_trait::async_trait;
use inkline_protocol::{CompletionReplyError, InlineCompletionReply, InlineCompletionRequest};
use tracing::warn;

/// Duplex message channel to the completion backend
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// Dispatch one request and await its immediate acknowledgement
    ///
    /// For streaming requests the acknowledgement does not carry the full
    /// stream; chunks arrive out of band on the transport's `streamed`
    /// channel.
    async fn send_message(
        &self,
        request: InlineCompletionRequest,
    ) -> CompletionResult<InlineCompletionReply>;
}

/// A user-visible, non-blocking failure notification
///
/// The traceback is carried separately so the host can offer to reveal it on
/// demand instead of dumping it into the message.
#[derive(Debug, Clone)]
pub struct ErrorNotification {
    /// Short message naming the failed language surface
    pub message: String,
    /// Backend error class name
    pub error_type: String,
    /// Backend traceback text, revealed on request
    pub traceback: String,
}

impl ErrorNotification {
    /// Build a notification from an acknowledgement error
    pub fn from_reply_error(language_label: &str, error: &CompletionReplyError) -> Self {
        Self {
            message: format!(
                "Inline completion failed for {language_label}: {}",
                error.error_type
            ),
            error_type: error.error_type.clone(),
            traceback: error.traceback.clone(),
        }
    }
}

/// Surface for user-visible notifications
///
/// Implementations must not block; the provider emits the notification and
/// then fails the fetch call independently.
pub trait CompletionNotifier: Send + Sync {
    /// Show a backend failure to the user, offering the traceback
    fn notify_backend_error(&self, notification: &ErrorNotification);
}

/// Notifier that logs through `tracing` when no host UI is wired up
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl CompletionNotifier for TracingNotifier {
    fn notify_backend_error(&self, notification: &ErrorNotification) {
        warn!(
            error_type = %notification.error_type,
            "{}",
            notification.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_message_names_language_and_error() {
        let error = CompletionReplyError {
            error_type: "ValueError".to_string(),
            traceback: "Traceback...".to_string(),
        };
        let notification = ErrorNotification::from_reply_error("IPython", &error);

        assert!(notification.message.contains("IPython"));
        assert!(notification.message.contains("ValueError"));
        assert_eq!(notification.traceback, "Traceback...");
    }
}
