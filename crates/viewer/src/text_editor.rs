//! Floating text annotation editor
//!
//! The editor is a small overlay bound to a document-space rectangle. It
//! edits a draft; nothing touches the annotation store until the draft is
//! saved, and a save with only whitespace behaves as a cancel.

use redline_core::{Annotation, AnnotationId, Color, Point, Rect, TextFormatting};

/// Default footprint of a freshly-placed text annotation.
pub const DEFAULT_WIDTH: f32 = 250.0;
pub const DEFAULT_HEIGHT: f32 = 150.0;

/// Resize floors: the editor never shrinks below a usable size.
pub const MIN_WIDTH: f32 = 250.0;
pub const MIN_HEIGHT: f32 = 120.0;

pub const FONT_SIZE_STEP: f32 = 2.0;
pub const FONT_SIZE_MIN: f32 = 8.0;
pub const FONT_SIZE_MAX: f32 = 72.0;

/// Text color swatches offered by the toolbar.
pub const TEXT_COLORS: [Color; 12] = [
    Color::rgb(0xff, 0xff, 0xff),
    Color::rgb(0x00, 0x00, 0x00),
    Color::rgb(0xff, 0x47, 0x57),
    Color::rgb(0x2e, 0xd5, 0x73),
    Color::rgb(0x37, 0x42, 0xfa),
    Color::rgb(0xff, 0xa5, 0x02),
    Color::rgb(0xff, 0x6b, 0x81),
    Color::rgb(0x70, 0xa1, 0xff),
    Color::rgb(0x53, 0x52, 0xed),
    Color::rgb(0xff, 0x38, 0x38),
    Color::rgb(0x2f, 0x34, 0x62),
    Color::rgb(0x57, 0x60, 0x6f),
];

/// Background color swatches.
pub const BACKGROUND_COLORS: [Color; 12] = [
    Color::rgb(0x2d, 0x2d, 0x2d),
    Color::rgb(0x1a, 0x1a, 0x1a),
    Color::rgb(0x0f, 0x34, 0x60),
    Color::rgb(0x2d, 0x34, 0x36),
    Color::rgb(0x6c, 0x5c, 0xe7),
    Color::rgb(0xa2, 0x9b, 0xfe),
    Color::rgb(0xfd, 0x79, 0xa8),
    Color::rgb(0xfd, 0xcb, 0x6e),
    Color::rgb(0xe1, 0x70, 0x55),
    Color::rgb(0x00, 0xb8, 0x94),
    Color::rgb(0x00, 0xce, 0xc9),
    Color::rgb(0x74, 0xb9, 0xff),
];

/// Editable snapshot of a text annotation, existing or fresh.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraft {
    pub id: AnnotationId,
    pub rect: Rect,
    pub text: String,
    pub formatting: TextFormatting,
}

impl TextDraft {
    /// Fresh draft at the clicked point with the default footprint.
    pub fn new_at(point: Point) -> Self {
        Self {
            id: AnnotationId::new(),
            rect: Rect::new(point.x, point.y, DEFAULT_WIDTH, DEFAULT_HEIGHT),
            text: String::new(),
            formatting: TextFormatting::default(),
        }
    }

    /// Draft editing an existing text annotation in place.
    pub fn from_annotation(annotation: &Annotation) -> Option<Self> {
        match annotation {
            Annotation::Text { id, rect, text, formatting } => Some(Self {
                id: *id,
                rect: *rect,
                text: text.clone(),
                formatting: *formatting,
            }),
            _ => None,
        }
    }
}

/// Saved editor output, fed to the controller's text-commit path.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommit {
    pub id: AnnotationId,
    pub rect: Rect,
    pub text: String,
    pub formatting: TextFormatting,
}

impl From<TextDraft> for TextCommit {
    fn from(draft: TextDraft) -> Self {
        Self { id: draft.id, rect: draft.rect, text: draft.text, formatting: draft.formatting }
    }
}

/// Which formatting flag a toolbar button or shortcut toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatToggle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
}

#[derive(Debug, Clone, Copy)]
enum EditorGesture {
    /// Header drag; `last` is the previous pointer position in client space.
    Drag { last: Point },
    /// Corner resize; deltas accumulate from the gesture start.
    Resize { start: Point, start_width: f32, start_height: f32 },
}

/// Outcome of closing the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    Commit(TextCommit),
    Cancel,
}

pub struct TextAnnotationEditor {
    draft: TextDraft,
    gesture: Option<EditorGesture>,
}

impl TextAnnotationEditor {
    pub fn new(draft: TextDraft) -> Self {
        Self { draft, gesture: None }
    }

    pub fn draft(&self) -> &TextDraft {
        &self.draft
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    pub fn toggle(&mut self, toggle: FormatToggle) {
        let formatting = &mut self.draft.formatting;
        match toggle {
            FormatToggle::Bold => formatting.bold = !formatting.bold,
            FormatToggle::Italic => formatting.italic = !formatting.italic,
            FormatToggle::Underline => formatting.underline = !formatting.underline,
            FormatToggle::Strikethrough => formatting.strikethrough = !formatting.strikethrough,
            FormatToggle::Code => formatting.code = !formatting.code,
        }
    }

    /// Step the font size, clamped to the usable range.
    pub fn adjust_font_size(&mut self, delta: f32) {
        let next = self.draft.formatting.font_size + delta;
        self.draft.formatting.font_size = next.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.draft.formatting.color = color;
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.draft.formatting.background_color = color;
    }

    /// `ctrl/cmd + key` shortcut. Returns whether the key was consumed.
    pub fn shortcut(&mut self, key: char) -> bool {
        match key.to_ascii_lowercase() {
            'b' => self.toggle(FormatToggle::Bold),
            'i' => self.toggle(FormatToggle::Italic),
            'u' => self.toggle(FormatToggle::Underline),
            _ => return false,
        }
        true
    }

    /// Start moving the editor from its header.
    pub fn begin_drag(&mut self, client: Point) {
        self.gesture = Some(EditorGesture::Drag { last: client });
    }

    /// Start resizing from the corner grip.
    pub fn begin_resize(&mut self, client: Point) {
        self.gesture = Some(EditorGesture::Resize {
            start: client,
            start_width: self.draft.rect.width,
            start_height: self.draft.rect.height,
        });
    }

    /// Pointer movement during a drag or resize. Client deltas divide by
    /// zoom so the editor tracks the pointer at any magnification.
    pub fn pointer_move(&mut self, client: Point, zoom: f32) {
        let zoom = zoom.max(f32::EPSILON);
        match &mut self.gesture {
            Some(EditorGesture::Drag { last }) => {
                self.draft.rect.x += (client.x - last.x) / zoom;
                self.draft.rect.y += (client.y - last.y) / zoom;
                *last = client;
            }
            Some(EditorGesture::Resize { start, start_width, start_height }) => {
                let dx = (client.x - start.x) / zoom;
                let dy = (client.y - start.y) / zoom;
                self.draft.rect.width = (*start_width + dx).max(MIN_WIDTH);
                self.draft.rect.height = (*start_height + dy).max(MIN_HEIGHT);
            }
            None => {}
        }
    }

    pub fn pointer_up(&mut self) {
        self.gesture = None;
    }

    /// Save the draft; whitespace-only text cancels instead.
    pub fn save(self) -> EditorOutcome {
        if self.draft.text.trim().is_empty() {
            EditorOutcome::Cancel
        } else {
            EditorOutcome::Commit(self.draft.into())
        }
    }

    pub fn cancel(self) -> EditorOutcome {
        EditorOutcome::Cancel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> TextAnnotationEditor {
        TextAnnotationEditor::new(TextDraft::new_at(Point::new(100.0, 100.0)))
    }

    #[test]
    fn fresh_draft_uses_default_footprint() {
        let draft = TextDraft::new_at(Point::new(30.0, 40.0));
        assert_eq!(draft.rect, Rect::new(30.0, 40.0, 250.0, 150.0));
        assert_eq!(draft.formatting, TextFormatting::default());
    }

    #[test]
    fn drag_divides_client_delta_by_zoom() {
        let mut editor = editor();
        editor.begin_drag(Point::new(0.0, 0.0));
        editor.pointer_move(Point::new(40.0, 20.0), 2.0);
        assert_eq!(editor.draft().rect.origin(), Point::new(120.0, 110.0));

        // Incremental: a second move continues from the last position.
        editor.pointer_move(Point::new(80.0, 20.0), 2.0);
        assert_eq!(editor.draft().rect.origin(), Point::new(140.0, 110.0));
    }

    #[test]
    fn resize_enforces_floors() {
        let mut editor = editor();
        editor.begin_resize(Point::new(0.0, 0.0));
        editor.pointer_move(Point::new(-500.0, -500.0), 1.0);
        assert_eq!(editor.draft().rect.width, MIN_WIDTH);
        assert_eq!(editor.draft().rect.height, MIN_HEIGHT);

        editor.pointer_move(Point::new(100.0, 50.0), 1.0);
        assert_eq!(editor.draft().rect.width, 350.0);
        assert_eq!(editor.draft().rect.height, 200.0);
    }

    #[test]
    fn font_size_clamps_to_range() {
        let mut editor = editor();
        for _ in 0..100 {
            editor.adjust_font_size(FONT_SIZE_STEP);
        }
        assert_eq!(editor.draft().formatting.font_size, FONT_SIZE_MAX);
        for _ in 0..100 {
            editor.adjust_font_size(-FONT_SIZE_STEP);
        }
        assert_eq!(editor.draft().formatting.font_size, FONT_SIZE_MIN);
    }

    #[test]
    fn shortcuts_toggle_formatting() {
        let mut editor = editor();
        assert!(editor.shortcut('b'));
        assert!(editor.shortcut('I'));
        assert!(editor.shortcut('u'));
        assert!(!editor.shortcut('x'));
        let formatting = editor.draft().formatting;
        assert!(formatting.bold && formatting.italic && formatting.underline);

        editor.toggle(FormatToggle::Bold);
        assert!(!editor.draft().formatting.bold);
    }

    #[test]
    fn whitespace_only_save_is_a_cancel() {
        let mut editor = editor();
        editor.set_text("   \n\t");
        assert_eq!(editor.save(), EditorOutcome::Cancel);

        let mut editor = self::editor();
        editor.set_text("verify clearance");
        match editor.save() {
            EditorOutcome::Commit(commit) => assert_eq!(commit.text, "verify clearance"),
            EditorOutcome::Cancel => panic!("non-empty text must commit"),
        }
    }

    #[test]
    fn existing_annotation_round_trips_through_a_draft() {
        let annotation = Annotation::text(
            Rect::new(5.0, 5.0, 300.0, 200.0),
            "keep".into(),
            TextFormatting { bold: true, ..Default::default() },
        );
        let draft = TextDraft::from_annotation(&annotation).unwrap();
        assert_eq!(draft.id, annotation.id());
        assert_eq!(draft.text, "keep");
        assert!(draft.formatting.bold);

        let pin = Annotation::comment_pin(Point::default());
        assert!(TextDraft::from_annotation(&pin).is_none());
    }
}
