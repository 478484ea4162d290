//! Core data model for the Redline markup overlay: annotations, background
//! elements, comment threads, and the pure hit-testing that interaction
//! logic builds on. No I/O and no view state live here.

pub mod annotation;
pub mod element;
pub mod geometry;
pub mod store;
pub mod thread;

pub use annotation::{Annotation, AnnotationId, Color, TextFormatting, PIN_SIZE};
pub use element::{ElementKind, ElementSet, VectorElement};
pub use geometry::{Point, Rect, ResizeHandle};
pub use store::AnnotationStore;
pub use thread::{CommentReply, CommentThread, CommentThreadStore, ReplyId, ThreadId};
