//! Ordered annotation store
//!
//! Insertion order is display order: later annotations render on top and win
//! overlapping hit-tests. Mutation is immutable-replace style — every
//! operation builds the next collection and swaps it in whole, so a reader
//! mid-render never observes a partially-updated entity.

use crate::annotation::{Annotation, AnnotationId};

#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Annotation> {
        self.annotations.get(index)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn index_of(&self, id: AnnotationId) -> Option<usize> {
        self.annotations.iter().position(|annotation| annotation.id() == id)
    }

    pub fn append(&mut self, annotation: Annotation) {
        let mut next = self.annotations.clone();
        next.push(annotation);
        self.annotations = next;
    }

    /// Replace the annotation at `index`; stale indices are ignored.
    pub fn replace_at(&mut self, index: usize, annotation: Annotation) {
        if index >= self.annotations.len() {
            return;
        }
        let mut next = self.annotations.clone();
        next[index] = annotation;
        self.annotations = next;
    }

    /// Apply `mutate` to a copy of the annotation at `index` and swap the
    /// result in. No-op on a stale index.
    pub fn update_at(&mut self, index: usize, mutate: impl FnOnce(&mut Annotation)) {
        let Some(current) = self.annotations.get(index) else {
            return;
        };
        let mut updated = current.clone();
        mutate(&mut updated);
        self.replace_at(index, updated);
    }

    /// Insert at `id` if present, otherwise append. Used by the text editor
    /// commit path, which edits existing annotations in place.
    pub fn upsert_by_id(&mut self, annotation: Annotation) {
        match self.index_of(annotation.id()) {
            Some(index) => self.replace_at(index, annotation),
            None => self.append(annotation),
        }
    }

    /// Remove every annotation whose index is in `indices`.
    pub fn remove_indices(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        self.annotations = self
            .annotations
            .iter()
            .enumerate()
            .filter(|(index, _)| !indices.contains(index))
            .map(|(_, annotation)| annotation.clone())
            .collect();
    }

    pub fn remove_by_id(&mut self, id: AnnotationId) -> bool {
        let before = self.annotations.len();
        self.annotations = self
            .annotations
            .iter()
            .filter(|annotation| annotation.id() != id)
            .cloned()
            .collect();
        self.annotations.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rect};

    #[test]
    fn append_preserves_insertion_order() {
        let mut store = AnnotationStore::new();
        store.append(Annotation::rectangle(Rect::new(0.0, 0.0, 10.0, 10.0)));
        store.append(Annotation::circle(Point::new(5.0, 5.0), 3.0));

        assert_eq!(store.len(), 2);
        assert!(matches!(store.get(0), Some(Annotation::Rectangle { .. })));
        assert!(matches!(store.get(1), Some(Annotation::Circle { .. })));
    }

    #[test]
    fn stale_index_updates_are_ignored() {
        let mut store = AnnotationStore::new();
        store.append(Annotation::rectangle(Rect::new(0.0, 0.0, 10.0, 10.0)));

        store.update_at(5, |_| panic!("must not run for a stale index"));
        store.replace_at(5, Annotation::circle(Point::new(0.0, 0.0), 1.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_indices_drops_exactly_the_selected_set() {
        let mut store = AnnotationStore::new();
        for i in 0..4 {
            store.append(Annotation::rectangle(Rect::new(i as f32, 0.0, 10.0, 10.0)));
        }

        store.remove_indices(&[0, 2]);
        assert_eq!(store.len(), 2);
        let xs: Vec<f32> = store.iter().map(|a| a.bounds().x).collect();
        assert_eq!(xs, vec![1.0, 3.0]);
    }

    #[test]
    fn upsert_replaces_matching_id_and_appends_otherwise() {
        let mut store = AnnotationStore::new();
        let text = Annotation::text(Rect::new(0.0, 0.0, 250.0, 150.0), "draft".into(), Default::default());
        let id = text.id();
        store.upsert_by_id(text);
        assert_eq!(store.len(), 1);

        let edited = match store.get(0).unwrap().clone() {
            Annotation::Text { rect, formatting, .. } => {
                Annotation::Text { id, rect, text: "final".into(), formatting }
            }
            other => other,
        };
        store.upsert_by_id(edited);
        assert_eq!(store.len(), 1);
        assert!(matches!(store.get(0), Some(Annotation::Text { text, .. }) if text == "final"));

        store.upsert_by_id(Annotation::comment_pin(Point::new(1.0, 1.0)));
        assert_eq!(store.len(), 2);
    }
}
