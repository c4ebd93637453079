#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAlignment {
    /// Label beside the symbol, at one of four corner positions
    Corner,
    /// Label centered on the anchor point
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Point size, in the same units as screen coordinates
    pub size: f64,
    pub bold: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "sans".to_string(),
            size: 10.0,
            bold: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacemarkStyle {
    /// Icon bitmap size `[width, height]`
    pub icon_size: [f64; 2],
    /// Offset of the anchor inside the icon, from its top-left corner
    pub hot_spot: [f64; 2],
    pub font: FontSpec,
    pub label_color: [u8; 4],
    pub alignment: LabelAlignment,
    /// Draw the label with an outline; adds the glow margin around it
    pub glow: bool,
}

impl PlacemarkStyle {
    /// Icon of the given size with the hot spot at its center
    pub fn with_icon(mut self, width: f64, height: f64) -> Self {
        self.icon_size = [width, height];
        self.hot_spot = [width / 2.0, height / 2.0];
        self
    }

    pub fn with_alignment(mut self, alignment: LabelAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font.size = size;
        self
    }

    pub fn with_glow(mut self, glow: bool) -> Self {
        self.glow = glow;
        self
    }
}

impl Default for PlacemarkStyle {
    fn default() -> Self {
        Self {
            icon_size: [8.0, 8.0],
            hot_spot: [4.0, 4.0],
            font: FontSpec::default(),
            label_color: [255, 255, 255, 255],
            alignment: LabelAlignment::Corner,
            glow: false,
        }
    }
}

/// Font metrics capability
pub trait TextMeasurer {
    fn text_width(&self, font: &FontSpec, text: &str) -> f64;
    fn line_height(&self, font: &FontSpec) -> f64;
}

/// Fixed advance per character, proportional to the font size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub advance_ratio: f64,
    pub line_ratio: f64,
}

impl MonospaceMetrics {
    /// Terminal cells: a size-4 font maps one char onto one 2x4 braille cell
    pub fn terminal() -> Self {
        Self {
            advance_ratio: 0.5,
            line_ratio: 1.0,
        }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_ratio: 1.2,
        }
    }
}

impl TextMeasurer for MonospaceMetrics {
    fn text_width(&self, font: &FontSpec, text: &str) -> f64 {
        text.chars().count() as f64 * font.size * self.advance_ratio
    }

    fn line_height(&self, font: &FontSpec) -> f64 {
        font.size * self.line_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_width() {
        let m = MonospaceMetrics::terminal();
        let font = FontSpec {
            size: 4.0,
            ..FontSpec::default()
        };
        assert_eq!(m.text_width(&font, "Paris"), 10.0);
        assert_eq!(m.line_height(&font), 4.0);
        assert_eq!(m.text_width(&font, ""), 0.0);
    }

    #[test]
    fn test_with_icon_centers_hot_spot() {
        let style = PlacemarkStyle::default().with_icon(10.0, 6.0);
        assert_eq!(style.hot_spot, [5.0, 3.0]);
    }
}
