//! Document load state
//!
//! Collaborator failures never take the process down; the viewer pane
//! degrades to a visible, retryable error state instead.

use log::warn;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewerLoadState {
    #[default]
    Loading,
    Ready { num_pages: u32, current_page: u32 },
    Failed { message: String },
}

impl ViewerLoadState {
    /// Document loaded; the viewer opens on page 1.
    pub fn ready(num_pages: u32) -> Self {
        Self::Ready { num_pages: num_pages.max(1), current_page: 1 }
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("document load failed: {message}");
        *self = Self::Failed { message };
    }

    /// Manual retry from the error pane.
    pub fn retry(&mut self) {
        *self = Self::Loading;
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Navigate, clamped to the document's page range. No-op unless ready.
    pub fn set_page(&mut self, page: u32) {
        if let Self::Ready { num_pages, current_page } = self {
            *current_page = page.clamp(1, *num_pages);
        }
    }

    pub fn next_page(&mut self) {
        if let Self::Ready { current_page, .. } = self {
            let next = current_page.saturating_add(1);
            self.set_page(next);
        }
    }

    pub fn previous_page(&mut self) {
        if let Self::Ready { current_page, .. } = self {
            let previous = current_page.saturating_sub(1);
            self.set_page(previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_clamp_to_document_range() {
        let mut state = ViewerLoadState::ready(5);
        state.set_page(99);
        assert_eq!(state, ViewerLoadState::Ready { num_pages: 5, current_page: 5 });
        state.set_page(0);
        assert_eq!(state, ViewerLoadState::Ready { num_pages: 5, current_page: 1 });

        state.previous_page();
        assert_eq!(state, ViewerLoadState::Ready { num_pages: 5, current_page: 1 });
    }

    #[test]
    fn failure_is_retryable() {
        let mut state = ViewerLoadState::default();
        state.fail("render collaborator unavailable");
        assert!(matches!(&state, ViewerLoadState::Failed { message } if message.contains("unavailable")));

        state.retry();
        assert_eq!(state, ViewerLoadState::Loading);

        // Page navigation is inert until the document is ready again.
        state.set_page(3);
        assert_eq!(state, ViewerLoadState::Loading);
    }
}
