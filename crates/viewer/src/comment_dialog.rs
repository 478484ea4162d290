//! Comment dialog positioning and draft state
//!
//! The dialog floats next to a thread marker (or a just-placed pin) in
//! screen space. Positioning is a pure clamp against the container; the
//! state half tracks the composer/reply/edit drafts and optimistic replies
//! awaiting confirmation.

use redline_core::{CommentReply, Point, Rect, ReplyId, ThreadId};

pub const DIALOG_WIDTH: f32 = 320.0;
pub const DIALOG_MARGIN: f32 = 10.0;
pub const DIALOG_MAX_HEIGHT: f32 = 500.0;
/// Height of the dialog chrome plus the composer.
pub const DIALOG_BASE_HEIGHT: f32 = 200.0;
/// Estimated height added per visible reply.
pub const REPLY_HEIGHT: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Estimated dialog footprint: the composer is fixed-height, an open thread
/// grows with its replies up to the cap.
pub fn estimated_size(reply_count: usize, creating: bool) -> Size {
    let height = if creating {
        DIALOG_BASE_HEIGHT
    } else {
        DIALOG_MAX_HEIGHT.min(DIALOG_BASE_HEIGHT + reply_count as f32 * REPLY_HEIGHT)
    };
    Size { width: DIALOG_WIDTH, height }
}

/// Clamp the dialog's top-left so it stays inside `container`, backing off
/// by `margin` from each edge it would overflow. Right/bottom overflow is
/// corrected before left/top so a dialog larger than the container still
/// keeps its top-left visible.
pub fn clamp_to_container(anchor: Point, size: Size, container: Rect, margin: f32) -> Point {
    let container = container.normalized();
    let mut x = anchor.x;
    let mut y = anchor.y;

    if x + size.width > container.x + container.width {
        x = container.x + container.width - size.width - margin;
    }
    if x < container.x {
        x = container.x + margin;
    }
    if y + size.height > container.y + container.height {
        y = container.y + container.height - size.height - margin;
    }
    if y < container.y {
        y = container.y + margin;
    }
    Point::new(x, y)
}

/// Draft state behind an open comment dialog.
///
/// `thread` is `None` while composing the first comment at a fresh anchor.
/// Optimistic replies live here, not in the store, until the host confirms
/// them.
#[derive(Debug, Clone, Default)]
pub struct CommentDialogState {
    anchor: Point,
    thread: Option<ThreadId>,
    elements: Vec<String>,
    composer: String,
    reply_draft: String,
    editing: Option<(ReplyId, String)>,
    optimistic: Vec<CommentReply>,
}

impl CommentDialogState {
    /// Composer for a brand-new comment at `anchor`.
    pub fn composer(anchor: Point, elements: Vec<String>) -> Self {
        Self { anchor, elements, ..Self::default() }
    }

    /// Dialog over an existing thread.
    pub fn for_thread(anchor: Point, thread: ThreadId) -> Self {
        Self { anchor, thread: Some(thread), ..Self::default() }
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn thread(&self) -> Option<ThreadId> {
        self.thread
    }

    pub fn is_creating(&self) -> bool {
        self.thread.is_none()
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Where to place the dialog given the visible reply count.
    pub fn position(&self, reply_count: usize, container: Rect) -> Point {
        let size = estimated_size(reply_count + self.optimistic.len(), self.is_creating());
        clamp_to_container(self.anchor, size, container, DIALOG_MARGIN)
    }

    pub fn set_composer_text(&mut self, text: impl Into<String>) {
        self.composer = text.into();
    }

    pub fn composer_text(&self) -> &str {
        &self.composer
    }

    /// Take the composer draft for submission; `None` if only whitespace.
    pub fn submit_composer(&mut self) -> Option<String> {
        let text = std::mem::take(&mut self.composer);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn set_reply_text(&mut self, text: impl Into<String>) {
        self.reply_draft = text.into();
    }

    pub fn reply_text(&self) -> &str {
        &self.reply_draft
    }

    pub fn submit_reply(&mut self) -> Option<String> {
        let text = std::mem::take(&mut self.reply_draft);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn begin_edit(&mut self, reply: &CommentReply) {
        self.editing = Some((reply.id, reply.text.clone()));
    }

    pub fn editing(&self) -> Option<(ReplyId, &str)> {
        self.editing.as_ref().map(|(id, text)| (*id, text.as_str()))
    }

    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        if let Some((_, draft)) = &mut self.editing {
            *draft = text.into();
        }
    }

    pub fn submit_edit(&mut self) -> Option<(ReplyId, String)> {
        let (id, text) = self.editing.take()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some((id, trimmed.to_string()))
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Show a reply immediately while the host persists it.
    pub fn push_optimistic(&mut self, reply: CommentReply) {
        self.optimistic.push(reply);
    }

    /// Drop a confirmed (or failed) optimistic reply.
    pub fn clear_optimistic(&mut self, reply_id: ReplyId) {
        self.optimistic.retain(|reply| reply.id != reply_id);
    }

    pub fn optimistic_replies(&self) -> &[CommentReply] {
        &self.optimistic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Rect = Rect { x: 0.0, y: 0.0, width: 1280.0, height: 800.0 };

    #[test]
    fn composer_height_is_fixed() {
        assert_eq!(estimated_size(7, true), Size { width: 320.0, height: 200.0 });
    }

    #[test]
    fn thread_height_grows_per_reply_up_to_the_cap() {
        assert_eq!(estimated_size(1, false).height, 280.0);
        assert_eq!(estimated_size(3, false).height, 440.0);
        assert_eq!(estimated_size(10, false).height, 500.0);
    }

    #[test]
    fn anchor_inside_the_container_is_untouched() {
        let size = estimated_size(0, true);
        let position =
            clamp_to_container(Point::new(100.0, 100.0), size, CONTAINER, DIALOG_MARGIN);
        assert_eq!(position, Point::new(100.0, 100.0));
    }

    #[test]
    fn overflowing_edges_back_off_by_the_margin() {
        let size = estimated_size(0, true);
        // Right edge: 1200 + 320 > 1280.
        let position =
            clamp_to_container(Point::new(1200.0, 700.0), size, CONTAINER, DIALOG_MARGIN);
        assert_eq!(position, Point::new(1280.0 - 320.0 - 10.0, 800.0 - 200.0 - 10.0));

        // Left/top underflow.
        let position =
            clamp_to_container(Point::new(-50.0, -50.0), size, CONTAINER, DIALOG_MARGIN);
        assert_eq!(position, Point::new(10.0, 10.0));
    }

    #[test]
    fn position_accounts_for_optimistic_replies() {
        let mut dialog = CommentDialogState::for_thread(Point::new(600.0, 760.0), ThreadId::new());
        let before = dialog.position(1, CONTAINER);
        dialog.push_optimistic(CommentReply::pending("sending", "Current User", 0));
        let after = dialog.position(1, CONTAINER);
        // Taller dialog, pushed further up from the bottom edge.
        assert!(after.y < before.y);
    }

    #[test]
    fn whitespace_submissions_are_rejected() {
        let mut dialog = CommentDialogState::composer(Point::default(), vec![]);
        dialog.set_composer_text("   ");
        assert_eq!(dialog.submit_composer(), None);

        dialog.set_composer_text("  Check this wall  ");
        assert_eq!(dialog.submit_composer(), Some("Check this wall".to_string()));
        // Draft is consumed by submission.
        assert_eq!(dialog.composer_text(), "");
    }

    #[test]
    fn edit_flow_round_trips() {
        let mut dialog = CommentDialogState::for_thread(Point::default(), ThreadId::new());
        let reply = CommentReply::new("original", "Current User", 0);
        dialog.begin_edit(&reply);
        dialog.set_edit_text("revised");
        assert_eq!(dialog.submit_edit(), Some((reply.id, "revised".to_string())));
        assert!(dialog.editing().is_none());
    }

    #[test]
    fn optimistic_replies_clear_by_id() {
        let mut dialog = CommentDialogState::for_thread(Point::default(), ThreadId::new());
        let reply = CommentReply::pending("sending", "Current User", 0);
        let id = reply.id;
        dialog.push_optimistic(reply);
        assert_eq!(dialog.optimistic_replies().len(), 1);
        dialog.clear_optimistic(id);
        assert!(dialog.optimistic_replies().is_empty());
    }
}
