use ratatui::style::Color;

/// Colors and emphasis for a tile of a given value.
pub trait AppearanceProvider {
    fn tile_color(&self, value: u32) -> Color;
    fn number_color(&self, value: u32) -> Color;
    fn font_bold(&self, value: u32) -> bool {
        value >= 128
    }
}

/// The classic 2048 palette.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassicAppearance;

impl AppearanceProvider for ClassicAppearance {
    fn tile_color(&self, value: u32) -> Color {
        match value {
            2 => Color::Rgb(238, 228, 218),
            4 => Color::Rgb(237, 224, 200),
            8 => Color::Rgb(242, 177, 121),
            16 => Color::Rgb(245, 149, 99),
            32 => Color::Rgb(246, 124, 95),
            64 => Color::Rgb(246, 94, 59),
            128 => Color::Rgb(237, 207, 114),
            256 => Color::Rgb(237, 204, 97),
            512 => Color::Rgb(237, 200, 80),
            1024 => Color::Rgb(237, 197, 63),
            2048 => Color::Rgb(237, 194, 46),
            _ => Color::White,
        }
    }

    fn number_color(&self, value: u32) -> Color {
        match value {
            2 | 4 => Color::Rgb(119, 110, 101),
            _ => Color::White,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn small_tiles_use_dark_text() {
        let appearance = ClassicAppearance;
        assert_eq!(appearance.number_color(2), Color::Rgb(119, 110, 101));
        assert_eq!(appearance.number_color(4), Color::Rgb(119, 110, 101));
        assert_eq!(appearance.number_color(8), Color::White);
    }

    #[test]
    fn unknown_values_fall_back_to_white() {
        let appearance = ClassicAppearance;
        assert_eq!(appearance.tile_color(4096), Color::White);
        assert_eq!(appearance.tile_color(3), Color::White);
        assert_ne!(appearance.tile_color(2048), Color::White);
    }

    #[test]
    fn large_tiles_are_bold() {
        assert!(!ClassicAppearance.font_bold(64));
        assert!(ClassicAppearance.font_bold(128));
    }
}
