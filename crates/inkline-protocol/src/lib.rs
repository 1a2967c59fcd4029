//! Wire types for the Inkline completion transport
//!
//! This crate defines the messages exchanged with a streaming completion
//! backend over a duplex message channel:
//!
//! - [`InlineCompletionRequest`]: one completion request, dispatched via the
//!   transport's `send_message` contract
//! - [`InlineCompletionReply`]: the immediate acknowledgement carrying either
//!   a completion list or a structured backend error
//! - [`StreamChunk`]: an out-of-band incremental piece of a streaming
//!   response, correlated to its logical stream by an opaque token
//!
//! The types carry no behavior beyond serialization; routing and policy live
//! in `inkline-completion`.

pub mod messages;

pub use messages::{
    CompletionReplyError, InlineCompletionItem, InlineCompletionList, InlineCompletionReply,
    InlineCompletionRequest, ItemError, StreamChunk, StreamToken,
};
