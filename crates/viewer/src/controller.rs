//! Interaction state machine for the markup overlay
//!
//! One tagged-union [`Interaction`] holds the active gesture; exactly one
//! variant is live at a time, so "two modes at once" states are
//! unrepresentable. Handlers take raw pointer/keyboard input, mutate the
//! owned stores and view, and return the [`Event`]s the host needs to react
//! to. Nothing here blocks and nothing here panics on gesture noise: stale
//! indices and zero-size commits are silent no-ops.

use std::mem;
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use redline_core::hit_test::{resize_handle_at, thread_at_point, topmost_annotation_at};
use redline_core::{
    Annotation, AnnotationStore, CommentReply, CommentThreadStore, ElementSet, Point, Rect,
    ResizeHandle, ThreadId,
};

use crate::text_editor::{TextCommit, TextDraft};
use crate::tool::{CursorStyle, ToolMode};
use crate::view::{ViewTransform, DEFAULT_PAN_SMOOTHING, FINE_PAN_SMOOTHING, ZOOM_STEP};

/// Minimum final extent for a drawn shape to be kept: radius for circles,
/// |width| or |height| for rect-like shapes.
pub const DRAW_COMMIT_THRESHOLD: f32 = 5.0;

/// Pointer travel after which a comment marquee stops being a click.
pub const MARQUEE_RECT_THRESHOLD: f32 = 5.0;

/// Smallest extent a resize gesture may produce.
pub const MIN_RESIZE_EXTENT: f32 = 10.0;

/// Author attributed to locally-created replies until the host supplies one.
pub const DEFAULT_AUTHOR: &str = "Current User";

/// Raw pointer event in client coordinates.
#[derive(Debug, Clone, Copy)]
pub struct PointerInput {
    pub client: Point,
    pub ctrl_or_cmd: bool,
}

impl PointerInput {
    pub fn at(x: f32, y: f32) -> Self {
        Self { client: Point::new(x, y), ctrl_or_cmd: false }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_or_cmd = true;
        self
    }
}

/// The active gesture. `Idle` is the rest state; every pointer-up path
/// returns here.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Idle,
    /// Shape tool drag in progress; the draft is not yet in the store.
    Drawing { draft: Annotation },
    /// Moving the annotation at `index`; `offset` is grab point minus the
    /// normalized bounds origin.
    Dragging { index: usize, offset: Point },
    Resizing { index: usize, handle: ResizeHandle },
    DraggingThread { id: ThreadId, offset: Point },
    /// `last` is the previous pointer position in client coordinates.
    Panning { last: Point },
    /// Comment-tool gesture: starts as a click (point mode) and becomes a
    /// rectangle once the pointer travels past the threshold. Never reverts.
    Marquee { start: Point, end: Point, elements: Vec<String>, rectangle_mode: bool },
}

/// What the host must react to after a handler ran.
///
/// Anchors are document-space; hosts position dialogs via
/// [`ViewTransform::to_screen`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    AnnotationsChanged,
    ThreadsChanged,
    SelectionChanged,
    ViewChanged,
    OpenCommentComposer { anchor: Point, elements: Vec<String> },
    OpenThread { anchor: Point, thread_id: ThreadId },
    OpenTextEditor { draft: TextDraft },
    CloseOverlays,
    ScreenshotRequested,
}

pub struct InteractionController {
    view: ViewTransform,
    annotations: AnnotationStore,
    threads: CommentThreadStore,
    elements: ElementSet,
    tool: ToolMode,
    interaction: Interaction,
    selected_annotations: Vec<usize>,
    selected_threads: Vec<ThreadId>,
    hovered_thread: Option<ThreadId>,
    shift_held: bool,
    author: String,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(ElementSet::default())
    }
}

impl InteractionController {
    pub fn new(elements: ElementSet) -> Self {
        Self {
            view: ViewTransform::new(),
            annotations: AnnotationStore::new(),
            threads: CommentThreadStore::new(),
            elements,
            tool: ToolMode::default(),
            interaction: Interaction::Idle,
            selected_annotations: Vec::new(),
            selected_threads: Vec::new(),
            hovered_thread: None,
            shift_held: false,
            author: DEFAULT_AUTHOR.to_string(),
        }
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn set_view_origin(&mut self, origin: Point) {
        self.view.set_origin(origin);
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    pub fn threads(&self) -> &CommentThreadStore {
        &self.threads
    }

    pub fn elements(&self) -> &ElementSet {
        &self.elements
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn selected_annotation_indices(&self) -> &[usize] {
        &self.selected_annotations
    }

    pub fn selected_thread_ids(&self) -> &[ThreadId] {
        &self.selected_threads
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    /// In-progress shape draft, if a drawing gesture is active. Rendered by
    /// the host on top of the committed annotations.
    pub fn drawing_draft(&self) -> Option<&Annotation> {
        match &self.interaction {
            Interaction::Drawing { draft } => Some(draft),
            _ => None,
        }
    }

    /// Active marquee rectangle and captured element ids, if any.
    pub fn marquee(&self) -> Option<(Rect, &[String])> {
        match &self.interaction {
            Interaction::Marquee { start, end, elements, rectangle_mode: true } => {
                Some((Rect::from_corners(*start, *end), elements.as_slice()))
            }
            _ => None,
        }
    }

    /// Switching tools aborts any in-progress gesture; selection survives.
    pub fn set_tool(&mut self, tool: ToolMode) -> Vec<Event> {
        self.tool = tool;
        self.interaction = Interaction::Idle;
        Vec::new()
    }

    pub fn pointer_down(&mut self, input: PointerInput) -> Vec<Event> {
        let point = self.view.to_document(input.client);
        match self.tool {
            ToolMode::Cursor => self.cursor_down(point, input),
            // The comment tool outranks the shift-pan affordance; every
            // other tool yields to it.
            ToolMode::Comment => self.comment_down(point),
            _ if self.shift_held => {
                self.interaction = Interaction::Panning { last: input.client };
                Vec::new()
            }
            ToolMode::Text => self.text_down(point),
            ToolMode::Highlight | ToolMode::Rectangle | ToolMode::Circle => {
                let draft = match self.tool {
                    ToolMode::Highlight => Annotation::highlight(Rect::new(point.x, point.y, 0.0, 0.0)),
                    ToolMode::Rectangle => Annotation::rectangle(Rect::new(point.x, point.y, 0.0, 0.0)),
                    _ => Annotation::circle(point, 0.0),
                };
                self.interaction = Interaction::Drawing { draft };
                Vec::new()
            }
        }
    }

    fn cursor_down(&mut self, point: Point, input: PointerInput) -> Vec<Event> {
        // Resize handles only exist on selected annotations.
        for &index in &self.selected_annotations {
            let Some(annotation) = self.annotations.get(index) else { continue };
            if let Some(handle) = resize_handle_at(annotation, point, self.view.zoom()) {
                self.interaction = Interaction::Resizing { index, handle };
                return Vec::new();
            }
        }

        if let Some(index) = topmost_annotation_at(&self.annotations, point) {
            let origin = self
                .annotations
                .get(index)
                .map(|annotation| annotation.bounds().origin())
                .unwrap_or_default();
            self.interaction = Interaction::Dragging {
                index,
                offset: Point::new(point.x - origin.x, point.y - origin.y),
            };
            if input.ctrl_or_cmd {
                match self.selected_annotations.iter().position(|&i| i == index) {
                    Some(at) => {
                        self.selected_annotations.remove(at);
                    }
                    None => self.selected_annotations.push(index),
                }
            } else {
                self.selected_annotations = vec![index];
            }
            self.selected_threads.clear();
            return vec![Event::SelectionChanged];
        }

        if let Some(id) = thread_at_point(&self.threads, point) {
            let position = self.threads.get(id).map(|thread| thread.position).unwrap_or_default();
            self.interaction = Interaction::DraggingThread {
                id,
                offset: Point::new(point.x - position.x, point.y - position.y),
            };
            if input.ctrl_or_cmd {
                match self.selected_threads.iter().position(|&t| t == id) {
                    Some(at) => {
                        self.selected_threads.remove(at);
                    }
                    None => self.selected_threads.push(id),
                }
            } else {
                self.selected_threads = vec![id];
            }
            self.selected_annotations.clear();
            return vec![Event::SelectionChanged];
        }

        // Empty space: drop selection and start panning unless ctrl/cmd asks
        // to keep the click inert.
        let had_selection =
            !self.selected_annotations.is_empty() || !self.selected_threads.is_empty();
        self.selected_annotations.clear();
        self.selected_threads.clear();
        if !input.ctrl_or_cmd {
            self.interaction = Interaction::Panning { last: input.client };
        }
        if had_selection {
            vec![Event::SelectionChanged]
        } else {
            Vec::new()
        }
    }

    fn comment_down(&mut self, point: Point) -> Vec<Event> {
        if let Some(thread_id) = thread_at_point(&self.threads, point) {
            let anchor = self.threads.get(thread_id).map(|t| t.position).unwrap_or(point);
            return vec![Event::OpenThread { anchor, thread_id }];
        }
        let elements: Vec<String> =
            self.elements.at_point(point).map(str::to_string).into_iter().collect();
        self.interaction = Interaction::Marquee {
            start: point,
            end: point,
            elements,
            rectangle_mode: false,
        };
        Vec::new()
    }

    fn text_down(&mut self, point: Point) -> Vec<Event> {
        let existing = self
            .annotations
            .iter()
            .rev()
            .find(|annotation| annotation.is_text() && annotation.bounds().contains(point));
        let draft = match existing.and_then(TextDraft::from_annotation) {
            Some(draft) => draft,
            None => TextDraft::new_at(point),
        };
        vec![Event::OpenTextEditor { draft }]
    }

    pub fn pointer_move(&mut self, input: PointerInput) -> Vec<Event> {
        let point = self.view.to_document(input.client);
        match &mut self.interaction {
            Interaction::Idle => {
                if matches!(self.tool, ToolMode::Cursor | ToolMode::Comment) {
                    self.hovered_thread = thread_at_point(&self.threads, point);
                }
                Vec::new()
            }
            Interaction::Panning { last } => {
                let smoothing =
                    if self.shift_held { FINE_PAN_SMOOTHING } else { DEFAULT_PAN_SMOOTHING };
                let dx = input.client.x - last.x;
                let dy = input.client.y - last.y;
                *last = input.client;
                self.view.pan_by(dx, dy, smoothing);
                vec![Event::ViewChanged]
            }
            Interaction::Drawing { draft } => {
                match draft {
                    Annotation::Circle { center, radius, .. } => {
                        *radius = center.distance_to(point);
                    }
                    Annotation::Highlight { rect, .. }
                    | Annotation::Rectangle { rect, .. }
                    | Annotation::Text { rect, .. } => {
                        rect.width = point.x - rect.x;
                        rect.height = point.y - rect.y;
                    }
                    Annotation::Comment { .. } => {}
                }
                vec![Event::AnnotationsChanged]
            }
            Interaction::Dragging { index, offset } => {
                let index = *index;
                let offset = *offset;
                if self.annotations.get(index).is_none() {
                    self.interaction = Interaction::Idle;
                    return Vec::new();
                }
                self.annotations.update_at(index, |annotation| match annotation {
                    Annotation::Circle { center, .. } => *center = point,
                    other => {
                        other.move_bounds_origin_to(Point::new(
                            point.x - offset.x,
                            point.y - offset.y,
                        ));
                    }
                });
                vec![Event::AnnotationsChanged]
            }
            Interaction::Resizing { index, handle } => {
                let index = *index;
                let handle = *handle;
                if self.annotations.get(index).is_none() {
                    self.interaction = Interaction::Idle;
                    return Vec::new();
                }
                self.annotations.update_at(index, |annotation| {
                    apply_resize(annotation, handle, point);
                });
                vec![Event::AnnotationsChanged]
            }
            Interaction::DraggingThread { id, offset } => {
                let id = *id;
                let position = Point::new(point.x - offset.x, point.y - offset.y);
                self.threads.move_thread(id, position);
                vec![Event::ThreadsChanged]
            }
            Interaction::Marquee { start, end, elements, rectangle_mode } => {
                *end = point;
                if !*rectangle_mode && start.distance_to(point) > MARQUEE_RECT_THRESHOLD {
                    *rectangle_mode = true;
                }
                if *rectangle_mode {
                    *elements = self.elements.in_rect(*start, *end);
                }
                vec![Event::SelectionChanged]
            }
        }
    }

    pub fn pointer_up(&mut self, _input: PointerInput) -> Vec<Event> {
        match mem::replace(&mut self.interaction, Interaction::Idle) {
            Interaction::Drawing { draft } => {
                if draft_meets_threshold(&draft) {
                    debug!("committing drawn annotation");
                    self.annotations.append(draft);
                    vec![Event::AnnotationsChanged]
                } else {
                    debug!("discarding sub-threshold draft");
                    vec![Event::AnnotationsChanged]
                }
            }
            Interaction::Marquee { start, elements, rectangle_mode, .. } => {
                if !rectangle_mode {
                    // A plain click: drop a pin and open the composer.
                    self.annotations.append(Annotation::comment_pin(start));
                    vec![
                        Event::AnnotationsChanged,
                        Event::OpenCommentComposer { anchor: start, elements },
                    ]
                } else if !elements.is_empty() {
                    vec![Event::OpenCommentComposer { anchor: start, elements }]
                } else {
                    debug!("marquee captured no elements; discarding");
                    vec![Event::SelectionChanged]
                }
            }
            _ => Vec::new(),
        }
    }

    pub fn wheel(&mut self, client: Point, delta_x: f32, delta_y: f32) -> Vec<Event> {
        if self.shift_held {
            self.view.wheel_pan(delta_x, delta_y);
            return vec![Event::ViewChanged];
        }
        if delta_y == 0.0 {
            return Vec::new();
        }
        let before = self.view.zoom();
        let step = if delta_y > 0.0 { -ZOOM_STEP } else { ZOOM_STEP };
        self.view.zoom_at(client, step);
        if self.view.zoom() != before {
            vec![Event::ViewChanged]
        } else {
            Vec::new()
        }
    }

    pub fn zoom_in(&mut self) -> Vec<Event> {
        self.view.zoom_step(ZOOM_STEP);
        vec![Event::ViewChanged]
    }

    pub fn zoom_out(&mut self) -> Vec<Event> {
        self.view.zoom_step(-ZOOM_STEP);
        vec![Event::ViewChanged]
    }

    pub fn reset_view(&mut self) -> Vec<Event> {
        self.view.reset();
        vec![Event::ViewChanged]
    }

    pub fn shift_down(&mut self) {
        self.shift_held = true;
    }

    pub fn shift_up(&mut self) {
        self.shift_held = false;
    }

    /// Backspace/Delete: remove everything selected.
    pub fn delete_pressed(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if !self.selected_annotations.is_empty() {
            self.annotations.remove_indices(&self.selected_annotations);
            self.selected_annotations.clear();
            events.push(Event::AnnotationsChanged);
        }
        if !self.selected_threads.is_empty() {
            self.threads.remove_threads(&self.selected_threads);
            self.selected_threads.clear();
            events.push(Event::ThreadsChanged);
        }
        if !events.is_empty() {
            events.push(Event::SelectionChanged);
        }
        events
    }

    /// Escape: abort the active gesture, drop selection, close overlays.
    pub fn escape_pressed(&mut self) -> Vec<Event> {
        self.interaction = Interaction::Idle;
        self.selected_annotations.clear();
        self.selected_threads.clear();
        vec![Event::SelectionChanged, Event::CloseOverlays]
    }

    /// Manual capture action. Screenshots never run mid-gesture.
    pub fn request_screenshot(&self) -> Vec<Event> {
        if self.interaction == Interaction::Idle {
            vec![Event::ScreenshotRequested]
        } else {
            debug!("screenshot request ignored during an active gesture");
            Vec::new()
        }
    }

    /// Composer save: create a thread with its first reply. Trimmed-empty
    /// text cancels.
    pub fn commit_comment(
        &mut self,
        anchor: Point,
        elements: Vec<String>,
        text: &str,
    ) -> Vec<Event> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let reply = CommentReply::new(text, self.author.clone(), now_ms());
        self.threads.create_thread(anchor, elements, reply);
        vec![Event::ThreadsChanged]
    }

    pub fn commit_reply(&mut self, thread_id: ThreadId, text: &str) -> Vec<Event> {
        let text = text.trim();
        if text.is_empty() || self.threads.get(thread_id).is_none() {
            return Vec::new();
        }
        self.threads.append_reply(thread_id, CommentReply::new(text, self.author.clone(), now_ms()));
        vec![Event::ThreadsChanged]
    }

    pub fn edit_reply(
        &mut self,
        thread_id: ThreadId,
        reply_id: redline_core::ReplyId,
        text: &str,
    ) -> Vec<Event> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        self.threads.edit_reply(thread_id, reply_id, text);
        vec![Event::ThreadsChanged]
    }

    pub fn delete_reply(&mut self, thread_id: ThreadId, reply_id: redline_core::ReplyId) -> Vec<Event> {
        self.threads.remove_reply(thread_id, reply_id);
        vec![Event::ThreadsChanged]
    }

    pub fn delete_thread(&mut self, thread_id: ThreadId) -> Vec<Event> {
        self.threads.remove_thread(thread_id);
        self.selected_threads.retain(|&id| id != thread_id);
        vec![Event::ThreadsChanged]
    }

    pub fn toggle_thread_resolved(&mut self, thread_id: ThreadId) -> Vec<Event> {
        self.threads.toggle_resolved(thread_id);
        vec![Event::ThreadsChanged]
    }

    /// Text editor save: insert or replace by id. Trimmed-empty text cancels.
    pub fn commit_text_annotation(&mut self, commit: TextCommit) -> Vec<Event> {
        if commit.text.trim().is_empty() {
            return Vec::new();
        }
        self.annotations.upsert_by_id(Annotation::Text {
            id: commit.id,
            rect: commit.rect,
            text: commit.text,
            formatting: commit.formatting,
        });
        vec![Event::AnnotationsChanged]
    }

    /// Cursor the host should show right now.
    pub fn cursor_style(&self) -> CursorStyle {
        match &self.interaction {
            Interaction::Panning { .. }
            | Interaction::Dragging { .. }
            | Interaction::DraggingThread { .. } => CursorStyle::Grabbing,
            Interaction::Resizing { handle, .. } => match handle {
                ResizeHandle::Nw | ResizeHandle::Se => CursorStyle::ResizeNwSe,
                ResizeHandle::Ne | ResizeHandle::Sw => CursorStyle::ResizeNeSw,
                ResizeHandle::Top | ResizeHandle::Bottom => CursorStyle::ResizeNs,
                ResizeHandle::Left | ResizeHandle::Right => CursorStyle::ResizeEw,
            },
            Interaction::Drawing { .. } | Interaction::Marquee { rectangle_mode: true, .. } => {
                CursorStyle::Crosshair
            }
            _ => {
                if self.shift_held {
                    CursorStyle::Grab
                } else {
                    match self.tool {
                        ToolMode::Cursor => {
                            if self.hovered_thread.is_some() {
                                CursorStyle::Pointer
                            } else {
                                CursorStyle::Default
                            }
                        }
                        ToolMode::Comment => CursorStyle::Pointer,
                        _ => CursorStyle::Crosshair,
                    }
                }
            }
        }
    }
}

fn draft_meets_threshold(draft: &Annotation) -> bool {
    match draft {
        Annotation::Circle { radius, .. } => *radius > DRAW_COMMIT_THRESHOLD,
        Annotation::Highlight { rect, .. }
        | Annotation::Rectangle { rect, .. }
        | Annotation::Text { rect, .. } => {
            rect.width.abs() > DRAW_COMMIT_THRESHOLD || rect.height.abs() > DRAW_COMMIT_THRESHOLD
        }
        Annotation::Comment { .. } => false,
    }
}

/// Recompute an annotation's geometry for a handle drag ending at `point`.
///
/// Circle cardinals resize along their axis from the unchanged center;
/// rect-like corners re-derive the two adjacent edges. Extents never drop
/// below [`MIN_RESIZE_EXTENT`].
fn apply_resize(annotation: &mut Annotation, handle: ResizeHandle, point: Point) {
    match annotation {
        Annotation::Circle { center, radius, .. } => {
            let next = match handle {
                ResizeHandle::Top | ResizeHandle::Bottom => (center.y - point.y).abs(),
                ResizeHandle::Left | ResizeHandle::Right => (center.x - point.x).abs(),
                _ => center.distance_to(point),
            };
            *radius = next.max(MIN_RESIZE_EXTENT);
        }
        Annotation::Highlight { rect, .. }
        | Annotation::Rectangle { rect, .. }
        | Annotation::Text { rect, .. } => {
            let bounds = rect.normalized();
            let (x, y, width, height) = match handle {
                ResizeHandle::Nw => (
                    point.x,
                    point.y,
                    bounds.x + bounds.width - point.x,
                    bounds.y + bounds.height - point.y,
                ),
                ResizeHandle::Ne => {
                    (bounds.x, point.y, point.x - bounds.x, bounds.y + bounds.height - point.y)
                }
                ResizeHandle::Sw => {
                    (point.x, bounds.y, bounds.x + bounds.width - point.x, point.y - bounds.y)
                }
                ResizeHandle::Se => (bounds.x, bounds.y, point.x - bounds.x, point.y - bounds.y),
                // Cardinal handles are never produced for rect-like shapes.
                _ => (bounds.x, bounds.y, bounds.width, bounds.height),
            };
            *rect = Rect::new(x, y, width.max(MIN_RESIZE_EXTENT), height.max(MIN_RESIZE_EXTENT));
        }
        Annotation::Comment { .. } => {}
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}
