//! Chat collaborator wire types and session state
//!
//! The core serializes its message history and deserializes the textual
//! reply; model and transport details belong to the host. One request may
//! be in flight at a time — the session refuses a new send rather than
//! cancelling the outstanding one.

use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One piece of a message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatPart {
    Text { text: String },
    Image { image: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: Vec<ChatPart>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: vec![ChatPart::Text { text: text.into() }] }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: vec![ChatPart::Text { text: text.into() }] }
    }

    /// Concatenated text parts, for display.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                ChatPart::Text { text } => Some(text.as_str()),
                ChatPart::Image { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Request body sent to the chat collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    /// Base64 data URI of the current view, attached to this turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
}

/// Successful response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub usage: Option<serde_json::Value>,
}

/// Error envelope returned with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatFailure {
    pub response: String,
    pub error: String,
}

/// Message history plus the single-outstanding-request flag.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    busy: bool,
    pdf_context: Option<String>,
    document_name: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// A request is in flight; input stays disabled until it resolves.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Attach extracted document context to future requests.
    pub fn set_context(&mut self, context: Option<String>, document_name: Option<String>) {
        self.pdf_context = context;
        self.document_name = document_name;
    }

    /// Record the user's turn and build the request, or `None` when a
    /// request is already outstanding or the text is only whitespace.
    pub fn begin(&mut self, text: &str, screenshot: Option<String>) -> Option<ChatRequest> {
        let text = text.trim();
        if self.busy || text.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::user(text));
        self.busy = true;
        Some(ChatRequest {
            messages: self.messages.clone(),
            pdf_context: self.pdf_context.clone(),
            document_name: self.document_name.clone(),
            screenshot,
        })
    }

    /// Record the assistant's reply and release the session.
    pub fn complete(&mut self, reply: ChatReply) {
        self.messages.push(ChatMessage::assistant(reply.response));
        self.busy = false;
    }

    /// Collaborator failure: append a synthetic assistant message so the
    /// failure is visible inline, then release the session.
    pub fn fail(&mut self, detail: &str) {
        warn!("chat request failed: {detail}");
        self.messages.push(ChatMessage::assistant(format!(
            "I'm currently unable to process your request due to a technical issue.\nDetails: {detail}"
        )));
        self.busy = false;
    }
}
