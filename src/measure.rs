use unicode_width::UnicodeWidthStr;

/// Monospace text metrics used to size node boxes from their labels.
pub struct TextMetrics {
    pub char_width: f64,
    pub padding_x: f64,
    pub min_node_width: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            padding_x: 12.0,
            min_node_width: 40.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Box width for a single label, padded on both sides.
    pub fn label_width(&self, label: &str) -> f64 {
        (self.text_width(label) + self.padding_x * 2.0).max(self.min_node_width)
    }

    /// Width that fits every label, for a layout with uniform node width.
    pub fn widest<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> f64 {
        labels
            .into_iter()
            .map(|label| self.label_width(label))
            .fold(self.min_node_width, f64::max)
    }
}
