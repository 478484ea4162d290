//! Markup annotation data model
//!
//! Annotations are the user-drawn overlay entities: highlight and rectangle
//! regions, circles, formatted text boxes, and lightweight comment pins.
//! All geometry is stored in document space; insertion order into the store
//! is display order (later entries render on top).

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Stable unique identifier for an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationId(uuid::Uuid);

impl AnnotationId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for AnnotationId {
    fn default() -> Self {
        Self::new()
    }
}

/// RGBA color, serialized as a `#rrggbb` / `#rrggbbaa` hex string to match
/// the host's wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid hex color: {0}")]
pub struct ParseColorError(String);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Default stroke for shape annotations.
    pub const SHAPE_RED: Color = Color::rgb(0xff, 0x00, 0x00);
    /// Default translucent fill for highlights.
    pub const HIGHLIGHT_YELLOW: Color = Color::rgba(0xff, 0xff, 0x00, 0x4d);
    /// Default marker color for comment pins.
    pub const PIN_BLUE: Color = Color::rgb(0x00, 0x78, 0xd4);
    pub const TEXT_WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const EDITOR_GRAY: Color = Color::rgb(0x2d, 0x2d, 0x2d);

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn parse_hex(value: &str) -> Result<Self, ParseColorError> {
        let hex = value.strip_prefix('#').unwrap_or(value);
        let invalid = || ParseColorError(value.to_string());
        let byte = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(invalid)
        };
        match hex.len() {
            6 => Ok(Self::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Ok(Self::rgba(byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?)),
            _ => Err(invalid()),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::parse_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// Rich-text flags and styling for text annotations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextFormatting {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub font_size: f32,
    pub color: Color,
    pub background_color: Color,
}

impl Default for TextFormatting {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            code: false,
            font_size: 14.0,
            color: Color::TEXT_WHITE,
            background_color: Color::EDITOR_GRAY,
        }
    }
}

/// Visual footprint of a comment pin marker, in document units.
pub const PIN_SIZE: f32 = 20.0;

/// A single overlay annotation.
///
/// The variant is the shape; `width`/`height` of rect-like variants may be
/// negative mid-draw and are normalized at the bounds/hit-test layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Annotation {
    Highlight {
        id: AnnotationId,
        rect: Rect,
        color: Color,
    },
    Rectangle {
        id: AnnotationId,
        rect: Rect,
        color: Color,
    },
    Circle {
        id: AnnotationId,
        center: Point,
        radius: f32,
        color: Color,
    },
    Text {
        id: AnnotationId,
        rect: Rect,
        text: String,
        formatting: TextFormatting,
    },
    Comment {
        id: AnnotationId,
        position: Point,
        color: Color,
    },
}

impl Annotation {
    pub fn highlight(rect: Rect) -> Self {
        Self::Highlight { id: AnnotationId::new(), rect, color: Color::HIGHLIGHT_YELLOW }
    }

    pub fn rectangle(rect: Rect) -> Self {
        Self::Rectangle { id: AnnotationId::new(), rect, color: Color::SHAPE_RED }
    }

    pub fn circle(center: Point, radius: f32) -> Self {
        Self::Circle { id: AnnotationId::new(), center, radius, color: Color::SHAPE_RED }
    }

    pub fn text(rect: Rect, text: String, formatting: TextFormatting) -> Self {
        Self::Text { id: AnnotationId::new(), rect, text, formatting }
    }

    pub fn comment_pin(position: Point) -> Self {
        Self::Comment { id: AnnotationId::new(), position, color: Color::PIN_BLUE }
    }

    pub fn id(&self) -> AnnotationId {
        match self {
            Self::Highlight { id, .. }
            | Self::Rectangle { id, .. }
            | Self::Circle { id, .. }
            | Self::Text { id, .. }
            | Self::Comment { id, .. } => *id,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Normalized bounding box in document space.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Highlight { rect, .. }
            | Self::Rectangle { rect, .. }
            | Self::Text { rect, .. } => rect.normalized(),
            Self::Circle { center, radius, .. } => {
                Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
            }
            Self::Comment { position, .. } => Rect::new(
                position.x - PIN_SIZE / 2.0,
                position.y - PIN_SIZE / 2.0,
                PIN_SIZE,
                PIN_SIZE,
            ),
        }
    }

    /// Translate so the normalized bounds origin lands at `origin`.
    ///
    /// Circles center on the pointer during drags instead of using an offset;
    /// that special case lives in the interaction controller.
    pub fn move_bounds_origin_to(&mut self, origin: Point) {
        match self {
            Self::Highlight { rect, .. }
            | Self::Rectangle { rect, .. }
            | Self::Text { rect, .. } => {
                let normalized = rect.normalized();
                rect.x += origin.x - normalized.x;
                rect.y += origin.y - normalized.y;
            }
            Self::Circle { center, radius, .. } => {
                center.x = origin.x + *radius;
                center.y = origin.y + *radius;
            }
            Self::Comment { position, .. } => {
                position.x = origin.x + PIN_SIZE / 2.0;
                position.y = origin.y + PIN_SIZE / 2.0;
            }
        }
    }
}
