//! Completion transport message definitions

use serde::{Deserialize, Serialize};

/// Opaque identifier correlating stream chunks to the logical stream that
/// produced them. Generated by the backend; never reused across concurrent
/// streams.
pub type StreamToken = String;

/// One inline completion request
///
/// Created per fetch call and owned by it; the `number` field is a
/// monotonically increasing sequence number the backend echoes in its
/// acknowledgement so stale responses can be discarded by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineCompletionRequest {
    /// Document path, if the editing surface is file-backed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// MIME type reported by the editor
    pub mime: String,
    /// Truncated leading context (characters closest to the cursor)
    pub prefix: String,
    /// Truncated trailing context (characters closest to the cursor)
    pub suffix: String,
    /// Canonical backend language label
    pub language: String,
    /// Request sequence number, starting at 1
    pub number: u64,
    /// Whether the backend should stream incremental chunks for this request
    pub stream: bool,
    /// Notebook cell identifier, if the editing surface is cell-based
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_id: Option<String>,
}

/// A single completion suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineCompletionItem {
    /// Text to insert at the cursor
    pub insert_text: String,
    /// Text used to filter the item against what the user has typed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_text: Option<String>,
    /// True while a streaming item is still being generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_incomplete: Option<bool>,
    /// Stream token when this item is produced incrementally
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<StreamToken>,
    /// Per-item generation error, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ItemError>,
}

impl InlineCompletionItem {
    /// Create an item that inserts the given text
    pub fn new(insert_text: impl Into<String>) -> Self {
        Self {
            insert_text: insert_text.into(),
            filter_text: None,
            is_incomplete: None,
            token: None,
            error: None,
        }
    }

    /// Attach a stream token to this item
    pub fn with_token(mut self, token: impl Into<StreamToken>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Error attached to a single completion item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemError {
    /// Human-readable error message
    pub message: String,
}

/// Ordered list of completion suggestions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InlineCompletionList {
    /// Suggestions in backend ranking order
    pub items: Vec<InlineCompletionItem>,
}

impl InlineCompletionList {
    /// An empty completion list (unrecognized or disabled language)
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Structured backend failure carried in an acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionReplyError {
    /// Error class name reported by the backend (e.g. "ValueError")
    #[serde(rename = "type")]
    pub error_type: String,
    /// Backend traceback text
    pub traceback: String,
}

/// Immediate acknowledgement of an [`InlineCompletionRequest`]
///
/// For streaming requests this acknowledges dispatch only; incremental
/// content follows out of band as [`StreamChunk`] values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineCompletionReply {
    /// Suggestions available at acknowledgement time
    pub list: InlineCompletionList,
    /// Sequence number of the request this reply acknowledges
    pub reply_to: u64,
    /// Structured failure, mutually exclusive with a useful `list`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CompletionReplyError>,
}

impl InlineCompletionReply {
    /// Create a successful acknowledgement
    pub fn new(list: InlineCompletionList, reply_to: u64) -> Self {
        Self {
            list,
            reply_to,
            error: None,
        }
    }

    /// Create an acknowledgement carrying a structured backend failure
    pub fn with_error(reply_to: u64, error_type: impl Into<String>, traceback: impl Into<String>) -> Self {
        Self {
            list: InlineCompletionList::empty(),
            reply_to,
            error: Some(CompletionReplyError {
                error_type: error_type.into(),
                traceback: traceback.into(),
            }),
        }
    }
}

/// One incremental piece of a streaming completion response
///
/// Produced by the transport out of band and routed to its consumer purely
/// through the token embedded in the response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Incremental item payload, tagged with its stream token
    pub response: InlineCompletionItem,
    /// True for the final chunk of a stream
    pub done: bool,
}

impl StreamChunk {
    /// Create a chunk for the given payload
    pub fn new(response: InlineCompletionItem, done: bool) -> Self {
        Self { response, done }
    }

    /// The token correlating this chunk to its logical stream
    ///
    /// `None` indicates a backend protocol breach; the demultiplexer treats
    /// it as a hard error at the point of receipt.
    pub fn token(&self) -> Option<&str> {
        self.response.token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization_shape() {
        let request = InlineCompletionRequest {
            path: Some("nb.ipynb".to_string()),
            mime: "text/x-python".to_string(),
            prefix: "def f(".to_string(),
            suffix: "):".to_string(),
            language: "python".to_string(),
            number: 1,
            stream: true,
            cell_id: Some("cell-1".to_string()),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["mime"], "text/x-python");
        assert_eq!(value["number"], 1);
        assert_eq!(value["stream"], true);
        assert_eq!(value["cell_id"], "cell-1");
    }

    #[test]
    fn test_request_omits_absent_path_and_cell() {
        let request = InlineCompletionRequest {
            path: None,
            mime: "text/x-python".to_string(),
            prefix: String::new(),
            suffix: String::new(),
            language: "python".to_string(),
            number: 2,
            stream: false,
            cell_id: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("path").is_none());
        assert!(value.get("cell_id").is_none());
    }

    #[test]
    fn test_item_uses_camel_case_on_the_wire() {
        let item = InlineCompletionItem::new("print()").with_token("tok-1");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["insertText"], "print()");
        assert_eq!(value["token"], "tok-1");
        assert!(value.get("filterText").is_none());
    }

    #[test]
    fn test_reply_error_round_trip() {
        let reply: InlineCompletionReply = serde_json::from_value(json!({
            "list": { "items": [] },
            "reply_to": 7,
            "error": { "type": "ValueError", "traceback": "Traceback..." }
        }))
        .unwrap();

        let error = reply.error.unwrap();
        assert_eq!(error.error_type, "ValueError");
        assert_eq!(error.traceback, "Traceback...");
        assert_eq!(reply.reply_to, 7);
    }

    #[test]
    fn test_chunk_token_extraction() {
        let chunk = StreamChunk::new(InlineCompletionItem::new("x").with_token("tok-2"), false);
        assert_eq!(chunk.token(), Some("tok-2"));

        let bare = StreamChunk::new(InlineCompletionItem::new("x"), true);
        assert_eq!(bare.token(), None);
    }
}
