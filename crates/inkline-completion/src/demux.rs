//! Stream demultiplexing for incremental completion chunks
//!
//! The transport delivers [`StreamChunk`] values out of band and in arbitrary
//! timing across tokens; this module routes each chunk to the consumer
//! currently awaiting its token. The mapping holds one single-shot waiter per
//! token: a [`ChunkStream`] registers a fresh waiter for each pull, so chunks
//! for the same token are consumed strictly in arrival order, while
//! concurrently live tokens never interfere with each other.
//!
//! Only one logical streaming completion is considered live at a time from
//! the provider's perspective: before a new streaming dispatch the whole
//! mapping is cleared, so stale tokens from a superseded request can never
//! resolve a later pull. A pull that was already in flight when its waiter
//! was cleared is orphaned and never resolves (see [`ChunkStream::next`]).

use crate::error::{CompletionError, CompletionResult};
use inkline_protocol::{StreamChunk, StreamToken};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{debug, warn};

type PendingConsumers = Arc<RwLock<HashMap<StreamToken, oneshot::Sender<StreamChunk>>>>;

/// Routes transport chunks to the consumers awaiting their tokens
#[derive(Clone, Default)]
pub struct StreamDemultiplexer {
    pending: PendingConsumers,
}

impl StreamDemultiplexer {
    /// Create a demultiplexer with no pending consumers
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the lazy, finite chunk sequence for a token
    ///
    /// The sequence terminates after yielding a chunk whose `done` flag is
    /// set and must not be reused afterwards. Tokens must not be shared
    /// across concurrently active streams; a second `stream` call for a
    /// token claims the slot from the first.
    pub fn stream(&self, token: impl Into<StreamToken>) -> ChunkStream {
        ChunkStream {
            pending: Arc::clone(&self.pending),
            token: token.into(),
            state: StreamState::AwaitingChunk,
        }
    }

    /// Transport-driven entry point: route one chunk to its consumer
    ///
    /// A chunk without a token is a backend protocol breach and fails
    /// synchronously. A chunk whose token has no registered consumer is
    /// dropped with a warning; this legitimately happens when the consumer
    /// already terminated or was superseded.
    pub async fn receive_chunk(&self, chunk: StreamChunk) -> CompletionResult<()> {
        let token = match chunk.token() {
            Some(token) => token.to_string(),
            None => return Err(CompletionError::MissingToken),
        };

        // The waiter is single-shot, so sending consumes it; mid-stream
        // consumers register a fresh one on their next pull.
        let waiter = self.pending.write().await.remove(&token);
        match waiter {
            Some(tx) => {
                if tx.send(chunk).is_err() {
                    warn!(%token, "stream consumer went away before chunk delivery");
                }
            }
            None => {
                warn!(%token, "unhandled stream chunk; dropping");
            }
        }
        Ok(())
    }

    /// Discard all pending consumers
    ///
    /// Called before each new streaming dispatch. Consumers currently
    /// awaiting a chunk are orphaned and never resolve.
    pub async fn clear_pending(&self) {
        let mut pending = self.pending.write().await;
        if !pending.is_empty() {
            debug!(count = pending.len(), "clearing pending stream consumers");
        }
        pending.clear();
    }

    /// Number of tokens with a registered consumer
    pub async fn pending_count(&self) -> usize {
        self.pending.read().await.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    /// The next pull will register a waiter and suspend
    AwaitingChunk,
    /// A chunk was yielded and the stream can be pulled again
    Yielded,
    /// A `done` chunk was yielded; the sequence is exhausted
    Terminated,
}

/// Lazy pull sequence of chunks for one stream token
///
/// Each [`next`](ChunkStream::next) call registers a fresh waiter under the
/// token, suspends until a matching chunk arrives, and yields it; the
/// sequence ends after a chunk with `done` set. Not restartable after
/// termination.
pub struct ChunkStream {
    pending: PendingConsumers,
    token: StreamToken,
    state: StreamState,
}

impl ChunkStream {
    /// The token this stream consumes
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether the sequence has terminated
    pub fn is_terminated(&self) -> bool {
        self.state == StreamState::Terminated
    }

    /// Pull the next chunk, suspending until one arrives for this token
    ///
    /// Returns `None` once the sequence has terminated. If this stream's
    /// waiter is discarded while a pull is suspended (a superseding request
    /// cleared the mapping, or another stream claimed the token), the pull
    /// is orphaned and never resolves; callers that supersede streaming
    /// requests are expected to drop the old stream rather than keep
    /// polling it.
    pub async fn next(&mut self) -> Option<StreamChunk> {
        if self.state == StreamState::Terminated {
            return None;
        }
        self.state = StreamState::AwaitingChunk;

        let (tx, rx) = oneshot::channel();
        self.pending.write().await.insert(self.token.clone(), tx);

        match rx.await {
            Ok(chunk) => {
                self.state = if chunk.done {
                    StreamState::Terminated
                } else {
                    StreamState::Yielded
                };
                Some(chunk)
            }
            Err(_) => {
                // Orphaned: the slot was cleared or claimed. There is no
                // cancellation signal in the contract, so park forever
                // instead of yielding stale data.
                std::future::pending().await
            }
        }
    }
}
