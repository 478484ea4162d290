//! Interactive viewer logic for the Redline markup overlay: the pan/zoom
//! view transform, the tool palette, the interaction state machine, the
//! floating text editor, comment dialog positioning, and document load
//! state. Everything here is host-agnostic — input comes in as plain
//! pointer/keyboard values and effects go out as [`controller::Event`]s.

pub mod comment_dialog;
pub mod controller;
pub mod load;
pub mod text_editor;
pub mod tool;
pub mod view;

pub use comment_dialog::{clamp_to_container, estimated_size, CommentDialogState, Size};
pub use controller::{Event, Interaction, InteractionController, PointerInput};
pub use load::ViewerLoadState;
pub use text_editor::{EditorOutcome, TextAnnotationEditor, TextCommit, TextDraft};
pub use tool::{CursorStyle, ToolMode};
pub use view::ViewTransform;
