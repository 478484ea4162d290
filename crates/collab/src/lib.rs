//! External collaborator boundaries for the Redline viewer: page rendering,
//! chat, screenshot capture, text extraction, and file storage. Each module
//! defines the wire/trait contract; implementations live with the host.

pub mod chat;
pub mod extract;
pub mod files;
pub mod pdf;
pub mod screenshot;

pub use chat::{ChatFailure, ChatMessage, ChatPart, ChatReply, ChatRequest, ChatRole, ChatSession};
pub use extract::{prepare_context, truncate_context, DocumentText};
pub use files::{DocumentRef, FileStore, FileStoreError, SignedUrl};
pub use pdf::{DocumentInfo, DocumentSource, PageRenderError, PageRenderer, RenderedPage};
pub use screenshot::{ScreenshotChannel, ScreenshotCommand, ScreenshotOutcome};
