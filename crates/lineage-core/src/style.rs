//! Sizing constants for family diagrams.
//!
//! A [`Style`] is built once per request and handed by reference to every
//! layout phase. The defaults are the values the preview renderer is drawn
//! against; overriding them is possible through configuration but the
//! protocol never negotiates them.

use serde::Deserialize;

/// Fixed sizes used by the layout engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Style {
    /// Font size of a family title.
    family_title_size: f32,
    /// Outer padding around a family block.
    family_padding: i32,
    /// Horizontal gap between two root subtrees of one family.
    family_gap: i32,
    /// Font size of a person name.
    person_name_size: f32,
    /// Height of a person box.
    person_height: f32,
    /// Horizontal padding inside a person box.
    person_padding_x: f32,
    /// Horizontal margin outside a person box.
    person_margin_x: f32,
    /// Vertical band reserved for connector arrows above a generation.
    arrows_height: i32,
    /// Cell size of the packing grid.
    grid_step: i32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            family_title_size: 16.0,
            family_padding: 10,
            family_gap: 15,
            person_name_size: 12.0,
            person_height: 30.0,
            person_padding_x: 20.0,
            person_margin_x: 10.0,
            arrows_height: 25,
            grid_step: 30,
        }
    }
}

impl Style {
    pub fn family_title_size(&self) -> f32 {
        self.family_title_size
    }

    pub fn family_padding(&self) -> i32 {
        self.family_padding
    }

    pub fn family_gap(&self) -> i32 {
        self.family_gap
    }

    pub fn person_name_size(&self) -> f32 {
        self.person_name_size
    }

    pub fn person_height(&self) -> f32 {
        self.person_height
    }

    pub fn person_padding_x(&self) -> f32 {
        self.person_padding_x
    }

    pub fn person_margin_x(&self) -> f32 {
        self.person_margin_x
    }

    pub fn arrows_height(&self) -> i32 {
        self.arrows_height
    }

    pub fn grid_step(&self) -> i32 {
        self.grid_step
    }

    /// Integer height of the family title box.
    pub fn title_height(&self) -> i32 {
        self.family_title_size as i32
    }

    /// Width of a title label with `chars` characters.
    pub fn title_width(&self, chars: usize, font_ratio: f32) -> i32 {
        (chars as f32 * self.family_title_size * font_ratio) as i32
    }

    /// Declared width of a person sizing node, margins included.
    pub fn person_node_width(&self, chars: usize, font_ratio: f32) -> f32 {
        chars as f32 * self.person_name_size * font_ratio
            + self.person_padding_x * 2.0
            + self.person_margin_x * 2.0
    }

    /// Declared height of a person sizing node, arrow band included.
    pub fn person_node_height(&self) -> f32 {
        self.person_height + self.arrows_height as f32
    }

    /// Y of the first generation inside a family block.
    pub fn roots_top(&self) -> i32 {
        self.family_padding + self.title_height() + self.arrows_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_node_width() {
        let style = Style::default();

        // 4 chars * 12 + 2*20 + 2*10
        assert_eq!(style.person_node_width(4, 1.0), 108.0);
        assert_eq!(style.person_node_width(4, 0.5), 84.0);
        assert_eq!(style.person_node_height(), 55.0);
    }

    #[test]
    fn test_roots_top() {
        let style = Style::default();
        assert_eq!(style.roots_top(), 10 + 16 + 25);
    }

    #[test]
    fn test_title_width_truncates() {
        let style = Style::default();
        assert_eq!(style.title_width(5, 0.5), 40);
        assert_eq!(style.title_width(3, 0.7), 33);
    }
}
