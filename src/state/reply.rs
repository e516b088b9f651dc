//! Transport-independent replies produced by the dialog

use crate::utils::helpers::chunk_labels;

/// Layout of a reply keyboard as rows of button labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardLayout {
    pub rows: Vec<Vec<String>>,
}

impl KeyboardLayout {
    /// Labels laid out in a grid of `columns` per row
    pub fn grid(labels: &[String], columns: usize) -> Self {
        Self { rows: chunk_labels(labels, columns) }
    }

    /// One label per row
    pub fn column(labels: &[String]) -> Self {
        Self::grid(labels, 1)
    }

    /// All labels, row by row
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}

/// A reply message with an optional replacement keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<KeyboardLayout>,
}

impl Reply {
    /// Text only, the current keyboard stays
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), keyboard: None }
    }

    /// Text with a replacement keyboard
    pub fn with_keyboard(text: impl Into<String>, keyboard: KeyboardLayout) -> Self {
        Self { text: text.into(), keyboard: Some(keyboard) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_grid_layout() {
        let layout = KeyboardLayout::grid(&labels(&["a", "b", "c", "d", "e"]), 2);
        assert_eq!(layout.rows.len(), 3);
        assert_eq!(layout.rows[2], labels(&["e"]));
        assert_eq!(layout.labels().count(), 5);
    }

    #[test]
    fn test_column_layout() {
        let layout = KeyboardLayout::column(&labels(&["Food", "Rent"]));
        assert_eq!(layout.rows, vec![labels(&["Food"]), labels(&["Rent"])]);
    }
}
