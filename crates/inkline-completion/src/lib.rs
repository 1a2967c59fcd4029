//! Inkline streaming inline completion core
//!
//! Connects an editor surface to a streaming completion backend. The host
//! supplies a transport (a duplex message channel) and a notifier; the core
//! handles everything between an editor completion request and the merged or
//! streamed result:
//!
//! 1. **Language resolution**: map the editor-reported MIME type to a
//!    registered language and its canonical backend label
//! 2. **Request policy**: per-language enablement and the stream/no-stream
//!    decision from settings and trigger kind
//! 3. **Context extraction**: bounded prefix/suffix windows around the cursor
//! 4. **Dispatch**: one transport request per fetch, monotonically numbered
//! 5. **Stream demultiplexing**: route out-of-band chunks to the consumer
//!    awaiting their token, exposed as a lazy pull sequence
//!
//! ```text
//! editor request
//!     ↓
//! InlineCompletionProvider::fetch ── policy / context / language
//!     ↓                                   ↓
//! CompletionTransport::send_message   acknowledgement (or backend error)
//!
//! transport `streamed` events → receive_chunk → StreamDemultiplexer
//!                                                   ↓ (by token)
//!                                     ChunkStream::next consumers
//! ```
//!
//! # Example
//!
//! ```ignore
//! use inkline_completion::{InlineCompletionProvider, RequestContext, TriggerKind};
//! use std::sync::Arc;
//!
//! let provider = InlineCompletionProvider::new(transport, notifier);
//! let list = provider.fetch(&RequestContext {
//!     mime: "text/x-python".into(),
//!     text: source,
//!     offset: cursor,
//!     path: Some("nb.ipynb".into()),
//!     cell_id: Some(cell.id().into()),
//!     trigger: TriggerKind::Invoked,
//! }).await?;
//!
//! // For a streaming item, pull its chunks lazily:
//! let mut chunks = provider.stream(token);
//! while let Some(chunk) = chunks.next().await {
//!     render(chunk.response.insert_text);
//! }
//! ```

pub mod context;
pub mod demux;
pub mod error;
pub mod language;
pub mod policy;
pub mod provider;
pub mod settings;
pub mod transport;

pub use context::{truncated_prefix, truncated_suffix};
pub use demux::{ChunkStream, StreamDemultiplexer};
pub use error::{CompletionError, CompletionResult};
pub use language::{
    display_name, resolve_language, LanguageInfo, LanguageRegistry, UNKNOWN_LANGUAGE_LABEL,
};
pub use policy::{RequestPolicy, TriggerKind};
pub use provider::{InlineCompletionProvider, RequestContext};
pub use settings::{settings_schema, ProviderSettings, StreamingMode};
pub use transport::{CompletionNotifier, CompletionTransport, ErrorNotification, TracingNotifier};
