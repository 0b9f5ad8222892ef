//! # Drawing history
//!
//! The ordered log of every completed [`Operation`]. Order is paint order: replay walks it front to
//! back so later operations cover earlier ones. There is no redo, undo simply drops the newest entry.
//!
//! Text is special. Only the newest Text-family entry in the whole log is ever painted, older
//! snapshots are superseded rather than stacked. Hidden and erased markers are Text-family too, so
//! appending one makes the text before it disappear.

use crate::{
    canvas::Canvas,
    operation::{Operation, TextOperation},
};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("nothing to undo")]
pub struct EmptyHistoryError;

#[derive(Clone, Default, Debug)]
pub struct DrawingHistory {
    operations: Vec<Operation>,
    /// Index of the newest Text-family operation, kept in step with `operations` by every mutation.
    last_text: Option<usize>,
}
impl DrawingHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    pub fn append(&mut self, operation: impl Into<Operation>) {
        let operation = operation.into();
        if operation.text().is_some() {
            self.last_text = Some(self.operations.len());
        }
        self.operations.push(operation);
    }
    /// Remove and return the newest operation.
    pub fn undo(&mut self) -> Result<Operation, EmptyHistoryError> {
        let operation = self.operations.pop().ok_or(EmptyHistoryError)?;
        if operation.text().is_some() {
            self.last_text = self.scan_last_text();
        }
        Ok(operation)
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
    pub fn clear(&mut self) {
        self.operations.clear();
        self.last_text = None;
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }
    /// The newest Text-family operation, whether visible, hidden, or erased.
    #[must_use]
    pub fn last_text(&self) -> Option<&TextOperation> {
        self.operations.get(self.last_text?)?.text()
    }
    /// Suppress the current text until [`Self::show_text`].
    pub fn hide_text(&mut self) {
        self.append(TextOperation::hidden());
    }
    /// Drop the hidden marker, if the newest text is one. Otherwise does nothing.
    pub fn show_text(&mut self) {
        let Some(idx) = self.last_text else {
            return;
        };
        if self.operations[idx].text().is_some_and(TextOperation::is_hidden) {
            self.operations.remove(idx);
            self.last_text = self.scan_last_text();
        }
    }
    /// Paint every operation in order, skipping all text but the newest.
    pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for (idx, operation) in self.operations.iter().enumerate() {
            if operation.text().is_some() && Some(idx) != self.last_text {
                continue;
            }
            operation.draw(canvas);
        }
    }
    fn scan_last_text(&self) -> Option<usize> {
        self.operations
            .iter()
            .rposition(|operation| operation.text().is_some())
    }
}
impl<'a> IntoIterator for &'a DrawingHistory {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
