//! Page rendering collaborator boundary
//!
//! The viewer never rasterizes pages itself; a backend implements
//! [`PageRenderer`] and the overlay's view transform wraps whatever it
//! returns. Render failures surface through [`PageRenderError`] and degrade
//! to the viewer's failed/retry state.

use std::path::{Path, PathBuf};

/// Where a document's bytes come from.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    Path(PathBuf),
    Url(String),
    Bytes(Vec<u8>),
}

impl From<PathBuf> for DocumentSource {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<&Path> for DocumentSource {
    fn from(value: &Path) -> Self {
        Self::Path(value.to_path_buf())
    }
}

impl From<Vec<u8>> for DocumentSource {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// Reported by the backend once a document loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentInfo {
    pub num_pages: u32,
}

/// A rasterized page the host composites beneath the overlay.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub width_px: u32,
    pub height_px: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum PageRenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to load document: {0}")]
    Load(String),
    #[error("page {page} out of range (num_pages={num_pages})")]
    PageOutOfRange { page: u32, num_pages: u32 },
    #[error("backend error: {0}")]
    Backend(String),
}

/// Rendering backend contract. Pages are 1-based to match the viewer's
/// page navigation.
pub trait PageRenderer {
    fn load(&mut self, source: DocumentSource) -> Result<DocumentInfo, PageRenderError>;
    fn render_page(&self, page: u32, scale: f32) -> Result<RenderedPage, PageRenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRenderer {
        num_pages: u32,
    }

    impl PageRenderer for FixedRenderer {
        fn load(&mut self, _source: DocumentSource) -> Result<DocumentInfo, PageRenderError> {
            Ok(DocumentInfo { num_pages: self.num_pages })
        }

        fn render_page(&self, page: u32, _scale: f32) -> Result<RenderedPage, PageRenderError> {
            if page == 0 || page > self.num_pages {
                return Err(PageRenderError::PageOutOfRange { page, num_pages: self.num_pages });
            }
            Ok(RenderedPage { width_px: 1, height_px: 1, rgba: vec![0; 4] })
        }
    }

    #[test]
    fn out_of_range_pages_are_errors_not_panics() {
        let mut renderer = FixedRenderer { num_pages: 3 };
        let info = renderer.load(DocumentSource::Bytes(vec![])).unwrap();
        assert_eq!(info.num_pages, 3);
        assert!(renderer.render_page(2, 1.0).is_ok());
        assert!(matches!(
            renderer.render_page(4, 1.0),
            Err(PageRenderError::PageOutOfRange { page: 4, num_pages: 3 })
        ));
    }
}
