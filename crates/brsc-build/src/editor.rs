//! Statement-list editing facility
//!
//! Plugins never mutate statement lists directly; they go through the
//! [`Editor`] handed to them on each prepare-file event. Edits apply
//! immediately in this model, and the editor keeps a count so the
//! build driver can tell whether a file was touched.

/// Splice facility for plugin edits during file preparation.
#[derive(Debug, Default)]
pub struct Editor {
    edits: usize,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `item` at the front of `list`, shifting existing items back.
    pub fn array_unshift<T>(&mut self, list: &mut Vec<T>, item: T) {
        list.insert(0, item);
        self.edits += 1;
    }

    /// Append `item` to the end of `list`.
    pub fn array_push<T>(&mut self, list: &mut Vec<T>, item: T) {
        list.push(item);
        self.edits += 1;
    }

    /// Number of edits applied through this editor
    pub fn edit_count(&self) -> usize {
        self.edits
    }
}
