//! Inline completion provider orchestration
//!
//! [`InlineCompletionProvider`] coordinates one completion request end to
//! end: resolve the language from the editor-reported MIME type, apply the
//! request policy, extract bounded context windows, dispatch through the
//! transport, and surface structured backend failures. Streaming responses
//! are consumed separately through [`InlineCompletionProvider::stream`].

use crate::context::{truncated_prefix, truncated_suffix};
use crate::demux::{ChunkStream, StreamDemultiplexer};
use crate::error::{CompletionError, CompletionResult};
use crate::language::{display_name, resolve_language, LanguageRegistry};
use crate::policy::{RequestPolicy, TriggerKind};
use crate::settings::ProviderSettings;
use crate::transport::{CompletionNotifier, CompletionTransport, ErrorNotification};
use inkline_protocol::{
    InlineCompletionList, InlineCompletionRequest, StreamChunk, StreamToken,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error};

/// Host-provided context for one completion request
///
/// Captures what the core needs from the editor/document contract: current
/// MIME type, the document text with the cursor's character offset, the
/// document path and notebook cell id when present, and the trigger kind.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// MIME type reported by the editor
    pub mime: String,
    /// Full document (or cell) text
    pub text: String,
    /// Cursor position as a character offset into `text`
    pub offset: usize,
    /// Document path, if file-backed
    pub path: Option<String>,
    /// Notebook cell identifier, if cell-based
    pub cell_id: Option<String>,
    /// What caused this request
    pub trigger: TriggerKind,
}

/// Streaming inline completion provider
///
/// Settings are held as an atomically replaceable snapshot; every fetch
/// clones the snapshot and threads it through policy and context extraction
/// explicitly. Request sequence numbers are monotonically increasing,
/// starting at 1; the backend and UI use them to discard stale replies, the
/// provider itself does not.
pub struct InlineCompletionProvider {
    transport: Arc<dyn CompletionTransport>,
    notifier: Arc<dyn CompletionNotifier>,
    languages: LanguageRegistry,
    settings: parking_lot::RwLock<ProviderSettings>,
    demux: StreamDemultiplexer,
    next_number: AtomicU64,
}

impl InlineCompletionProvider {
    /// Create a provider over the default language registry
    pub fn new(
        transport: Arc<dyn CompletionTransport>,
        notifier: Arc<dyn CompletionNotifier>,
    ) -> Self {
        Self::with_registry(transport, notifier, LanguageRegistry::with_defaults())
    }

    /// Create a provider over a host-supplied language registry
    pub fn with_registry(
        transport: Arc<dyn CompletionTransport>,
        notifier: Arc<dyn CompletionNotifier>,
        languages: LanguageRegistry,
    ) -> Self {
        Self {
            transport,
            notifier,
            languages,
            settings: parking_lot::RwLock::new(ProviderSettings::default()),
            demux: StreamDemultiplexer::new(),
            next_number: AtomicU64::new(1),
        }
    }

    /// Replace the settings snapshot wholesale
    pub fn configure(&self, settings: ProviderSettings) -> CompletionResult<()> {
        settings.validate()?;
        *self.settings.write() = settings;
        Ok(())
    }

    /// Current settings snapshot
    pub fn settings(&self) -> ProviderSettings {
        self.settings.read().clone()
    }

    /// JSON schema of the recognized settings, for the host settings UI
    pub fn settings_schema(&self) -> serde_json::Value {
        crate::settings::settings_schema(&self.languages)
    }

    /// The language registry this provider resolves MIME types against
    pub fn language_registry(&self) -> &LanguageRegistry {
        &self.languages
    }

    /// Fetch completions for one request
    ///
    /// Unrecognized MIME types and disabled languages yield an empty list
    /// rather than an error. A structured failure in the acknowledgement is
    /// surfaced as a notification and returned as
    /// [`CompletionError::Backend`].
    pub async fn fetch(&self, context: &RequestContext) -> CompletionResult<InlineCompletionList> {
        let settings = self.settings.read().clone();
        let policy = RequestPolicy::new(settings.clone());

        let Some(language) = self.languages.find_by_mime(&context.mime) else {
            debug!(mime = %context.mime, "unrecognized MIME type; no completions");
            return Ok(InlineCompletionList::empty());
        };
        if !policy.is_enabled() {
            return Ok(InlineCompletionList::empty());
        }
        if !policy.is_language_enabled(&language.name) {
            debug!(language = %language.name, "completions disabled for language");
            return Ok(InlineCompletionList::empty());
        }

        let number = self.next_number.fetch_add(1, Ordering::SeqCst);
        let stream = policy.should_stream(context.trigger);
        if stream {
            // Drop waiters of any superseded streaming request so its
            // tokens can never resolve a future pull.
            self.demux.clear_pending().await;
        }

        let request = InlineCompletionRequest {
            path: context.path.clone(),
            mime: context.mime.clone(),
            prefix: truncated_prefix(&context.text, context.offset, settings.max_prefix),
            suffix: truncated_suffix(&context.text, context.offset, settings.max_suffix),
            language: resolve_language(Some(language)),
            number,
            stream,
            cell_id: context.cell_id.clone(),
        };
        debug!(number, stream, language = %request.language, "dispatching completion request");

        let reply = self.transport.send_message(request).await?;
        if let Some(reply_error) = reply.error {
            let notification =
                ErrorNotification::from_reply_error(&display_name(Some(language)), &reply_error);
            self.notifier.notify_backend_error(&notification);
            error!(
                error_type = %reply_error.error_type,
                number,
                "backend reported completion failure"
            );
            return Err(CompletionError::backend(
                reply_error.error_type,
                reply_error.traceback,
            ));
        }

        Ok(reply.list)
    }

    /// Lazy chunk sequence for a streaming response token
    pub fn stream(&self, token: impl Into<StreamToken>) -> ChunkStream {
        self.demux.stream(token)
    }

    /// Feed one transport chunk into the demultiplexer
    ///
    /// Hosts call this from their `streamed` subscription.
    pub async fn receive_chunk(&self, chunk: StreamChunk) -> CompletionResult<()> {
        self.demux.receive_chunk(chunk).await
    }
}
