//! Comment threads and replies
//!
//! A thread is a positioned conversation pinned to the drawing, optionally
//! associated with background elements captured by a marquee. Threads own
//! their replies exclusively; a stored thread always has at least one reply,
//! and deleting the last reply removes the thread itself.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadId(uuid::Uuid);

impl ThreadId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ThreadId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplyId(uuid::Uuid);

impl ReplyId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ReplyId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentReply {
    pub id: ReplyId,
    pub text: String,
    pub author: String,
    pub timestamp_ms: i64,
    #[serde(default)]
    pub edited: bool,
    /// Optimistic reply not yet confirmed by the caller layer. Rendered in a
    /// "sending" state; confirmed or discarded by the host.
    #[serde(default)]
    pub pending: bool,
}

impl CommentReply {
    pub fn new(text: impl Into<String>, author: impl Into<String>, timestamp_ms: i64) -> Self {
        Self {
            id: ReplyId::new(),
            text: text.into(),
            author: author.into(),
            timestamp_ms,
            edited: false,
            pending: false,
        }
    }

    pub fn pending(text: impl Into<String>, author: impl Into<String>, timestamp_ms: i64) -> Self {
        Self { pending: true, ..Self::new(text, author, timestamp_ms) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub id: ThreadId,
    pub position: Point,
    pub timestamp_ms: i64,
    pub associated_elements: Vec<String>,
    pub resolved: bool,
    pub replies: Vec<CommentReply>,
}

/// Collection of comment threads, immutable-replace like the annotation
/// store.
#[derive(Debug, Clone, Default)]
pub struct CommentThreadStore {
    threads: Vec<CommentThread>,
}

impl CommentThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommentThread> {
        self.threads.iter()
    }

    pub fn get(&self, id: ThreadId) -> Option<&CommentThread> {
        self.threads.iter().find(|thread| thread.id == id)
    }

    /// 1-based badge number shown on the thread marker.
    pub fn display_number(&self, id: ThreadId) -> Option<usize> {
        self.threads.iter().position(|thread| thread.id == id).map(|index| index + 1)
    }

    /// Create a thread with its first reply. The invariant that a stored
    /// thread has at least one reply holds by construction.
    pub fn create_thread(
        &mut self,
        position: Point,
        associated_elements: Vec<String>,
        first_reply: CommentReply,
    ) -> ThreadId {
        let thread = CommentThread {
            id: ThreadId::new(),
            position,
            timestamp_ms: first_reply.timestamp_ms,
            associated_elements,
            resolved: false,
            replies: vec![first_reply],
        };
        let id = thread.id;
        let mut next = self.threads.clone();
        next.push(thread);
        self.threads = next;
        id
    }

    pub fn append_reply(&mut self, id: ThreadId, reply: CommentReply) {
        self.replace_thread(id, |thread| thread.replies.push(reply));
    }

    pub fn edit_reply(&mut self, id: ThreadId, reply_id: ReplyId, text: impl Into<String>) {
        let text = text.into();
        self.replace_thread(id, |thread| {
            if let Some(reply) = thread.replies.iter_mut().find(|reply| reply.id == reply_id) {
                reply.text = text;
                reply.edited = true;
            }
        });
    }

    /// Mark an optimistic reply as confirmed.
    pub fn confirm_reply(&mut self, id: ThreadId, reply_id: ReplyId) {
        self.replace_thread(id, |thread| {
            if let Some(reply) = thread.replies.iter_mut().find(|reply| reply.id == reply_id) {
                reply.pending = false;
            }
        });
    }

    /// Remove one reply; a thread left with no replies is pruned.
    pub fn remove_reply(&mut self, id: ThreadId, reply_id: ReplyId) {
        self.replace_thread(id, |thread| thread.replies.retain(|reply| reply.id != reply_id));
        self.threads = self
            .threads
            .iter()
            .filter(|thread| !thread.replies.is_empty())
            .cloned()
            .collect();
    }

    pub fn remove_thread(&mut self, id: ThreadId) {
        self.threads = self.threads.iter().filter(|thread| thread.id != id).cloned().collect();
    }

    pub fn remove_threads(&mut self, ids: &[ThreadId]) {
        if ids.is_empty() {
            return;
        }
        self.threads = self
            .threads
            .iter()
            .filter(|thread| !ids.contains(&thread.id))
            .cloned()
            .collect();
    }

    pub fn toggle_resolved(&mut self, id: ThreadId) {
        self.replace_thread(id, |thread| thread.resolved = !thread.resolved);
    }

    pub fn move_thread(&mut self, id: ThreadId, position: Point) {
        self.replace_thread(id, |thread| thread.position = position);
    }

    fn replace_thread(&mut self, id: ThreadId, mutate: impl FnOnce(&mut CommentThread)) {
        let Some(index) = self.threads.iter().position(|thread| thread.id == id) else {
            return;
        };
        let mut next = self.threads.clone();
        mutate(&mut next[index]);
        self.threads = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_thread(replies: usize) -> (CommentThreadStore, ThreadId) {
        let mut store = CommentThreadStore::new();
        let id = store.create_thread(
            Point::new(10.0, 10.0),
            vec!["room-1".into()],
            CommentReply::new("first", "Current User", 1_000),
        );
        for i in 1..replies {
            store.append_reply(id, CommentReply::new(format!("reply {i}"), "Current User", 1_000 + i as i64));
        }
        (store, id)
    }

    #[test]
    fn created_thread_has_one_reply_and_is_unresolved() {
        let (store, id) = store_with_thread(1);
        let thread = store.get(id).unwrap();
        assert_eq!(thread.replies.len(), 1);
        assert!(!thread.resolved);
        assert_eq!(thread.associated_elements, vec!["room-1".to_string()]);
    }

    #[test]
    fn deleting_last_reply_prunes_the_thread() {
        let (mut store, id) = store_with_thread(1);
        let reply_id = store.get(id).unwrap().replies[0].id;
        store.remove_reply(id, reply_id);
        assert!(store.get(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn deleting_a_non_last_reply_keeps_the_thread() {
        let (mut store, id) = store_with_thread(3);
        let reply_id = store.get(id).unwrap().replies[1].id;
        store.remove_reply(id, reply_id);
        assert_eq!(store.get(id).unwrap().replies.len(), 2);
    }

    #[test]
    fn editing_marks_reply_edited() {
        let (mut store, id) = store_with_thread(1);
        let reply_id = store.get(id).unwrap().replies[0].id;
        store.edit_reply(id, reply_id, "revised");
        let reply = &store.get(id).unwrap().replies[0];
        assert_eq!(reply.text, "revised");
        assert!(reply.edited);
    }

    #[test]
    fn resolve_toggles_both_ways() {
        let (mut store, id) = store_with_thread(1);
        store.toggle_resolved(id);
        assert!(store.get(id).unwrap().resolved);
        store.toggle_resolved(id);
        assert!(!store.get(id).unwrap().resolved);
    }

    #[test]
    fn pending_reply_can_be_confirmed() {
        let (mut store, id) = store_with_thread(1);
        let reply = CommentReply::pending("optimistic", "CN", 2_000);
        let reply_id = reply.id;
        store.append_reply(id, reply);
        assert!(store.get(id).unwrap().replies[1].pending);

        store.confirm_reply(id, reply_id);
        assert!(!store.get(id).unwrap().replies[1].pending);
    }

    #[test]
    fn display_numbers_follow_creation_order() {
        let mut store = CommentThreadStore::new();
        let a = store.create_thread(Point::default(), vec![], CommentReply::new("a", "u", 0));
        let b = store.create_thread(Point::default(), vec![], CommentReply::new("b", "u", 0));
        assert_eq!(store.display_number(a), Some(1));
        assert_eq!(store.display_number(b), Some(2));
    }
}
