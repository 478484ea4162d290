//! Pan/zoom view transform
//!
//! Maps between client coordinates (pointer events, relative to the page)
//! and document coordinates (where annotations live). `origin` is the
//! top-left of the viewer container in client space; the host updates it on
//! layout changes.

use redline_core::Point;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;

/// Zoom increment per wheel notch and per toolbar button press.
pub const ZOOM_STEP: f32 = 0.05;

/// Pan smoothing while shift is held: raw 1:1 tracking.
pub const FINE_PAN_SMOOTHING: f32 = 1.0;
/// Default pan smoothing: slightly damped drag.
pub const DEFAULT_PAN_SMOOTHING: f32 = 0.8;

/// Horizontal/vertical pan speed multiplier for shift+wheel scrolling.
pub const WHEEL_PAN_SPEED: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    zoom: f32,
    pan: Point,
    origin: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { zoom: 1.0, pan: Point::default(), origin: Point::default() }
    }
}

impl ViewTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Record the container's top-left in client space.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Client point -> document point under the current pan/zoom.
    pub fn to_document(&self, client: Point) -> Point {
        Point::new(
            (client.x - self.origin.x - self.pan.x) / self.zoom,
            (client.y - self.origin.y - self.pan.y) / self.zoom,
        )
    }

    /// Document point -> client point; exact inverse of [`Self::to_document`].
    pub fn to_screen(&self, document: Point) -> Point {
        Point::new(
            document.x * self.zoom + self.pan.x + self.origin.x,
            document.y * self.zoom + self.pan.y + self.origin.y,
        )
    }

    /// Zoom by `delta` keeping the document point under `client` stationary.
    ///
    /// Non-finite input is ignored rather than poisoning the transform.
    pub fn zoom_at(&mut self, client: Point, delta: f32) {
        if !delta.is_finite() || !client.x.is_finite() || !client.y.is_finite() {
            return;
        }
        let next = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        if next == self.zoom {
            return;
        }
        let local = Point::new(client.x - self.origin.x, client.y - self.origin.y);
        let factor = next / self.zoom;
        self.pan = Point::new(
            local.x - (local.x - self.pan.x) * factor,
            local.y - (local.y - self.pan.y) * factor,
        );
        self.zoom = next;
    }

    /// Zoom by `delta` anchored at the container origin (toolbar buttons).
    pub fn zoom_step(&mut self, delta: f32) {
        self.zoom_at(self.origin, delta);
    }

    /// Translate the view by a client-space delta, damped by `smoothing`.
    pub fn pan_by(&mut self, dx: f32, dy: f32, smoothing: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.pan = self.pan.offset(dx * smoothing, dy * smoothing);
    }

    /// Shift+wheel panning: scroll deltas move the content, sped up so large
    /// sheets traverse quickly.
    pub fn wheel_pan(&mut self, delta_x: f32, delta_y: f32) {
        self.pan_by(-delta_x * WHEEL_PAN_SPEED, -delta_y * WHEEL_PAN_SPEED, 1.0);
    }

    /// Back to 100% zoom with no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::default();
    }
}
