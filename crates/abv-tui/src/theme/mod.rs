use ratatui::style::Color;

use abv_core::{MessageLevel, Mode};

/// Nord palette with the roles the abv screens use.
pub struct NordTheme {
    pub polar_night: [Color; 4],
    pub snow_storm: [Color; 3],
    pub frost: [Color; 4],
    pub aurora: [Color; 5],
}

impl Default for NordTheme {
    fn default() -> Self {
        Self {
            polar_night: [
                Color::Rgb(46, 52, 64),
                Color::Rgb(59, 66, 82),
                Color::Rgb(67, 76, 94),
                Color::Rgb(76, 86, 106),
            ],
            snow_storm: [
                Color::Rgb(216, 222, 233),
                Color::Rgb(229, 233, 240),
                Color::Rgb(236, 239, 244),
            ],
            frost: [
                Color::Rgb(143, 188, 187),
                Color::Rgb(136, 192, 208),
                Color::Rgb(129, 161, 193),
                Color::Rgb(94, 129, 172),
            ],
            aurora: [
                Color::Rgb(191, 97, 106),
                Color::Rgb(208, 135, 112),
                Color::Rgb(235, 203, 139),
                Color::Rgb(163, 190, 140),
                Color::Rgb(180, 142, 173),
            ],
        }
    }
}

impl NordTheme {
    pub fn bg(&self) -> Color {
        self.polar_night[0]
    }
    pub fn bg_secondary(&self) -> Color {
        self.polar_night[1]
    }
    pub fn border(&self) -> Color {
        self.polar_night[3]
    }
    pub fn fg(&self) -> Color {
        self.snow_storm[0]
    }
    pub fn fg_bright(&self) -> Color {
        self.snow_storm[2]
    }
    pub fn muted(&self) -> Color {
        self.frost[2]
    }
    pub fn accent(&self) -> Color {
        self.frost[1]
    }
    pub fn selection_bg(&self) -> Color {
        self.frost[3]
    }
    pub fn danger(&self) -> Color {
        self.aurora[0]
    }
    pub fn warning(&self) -> Color {
        self.aurora[1]
    }
    pub fn success(&self) -> Color {
        self.aurora[3]
    }

    /// Prompt symbol background: brown-ish for stocking, green for serving.
    pub fn mode(&self, mode: Mode) -> Color {
        match mode {
            Mode::Stocking => self.aurora[2],
            Mode::Serving => self.aurora[3],
        }
    }

    pub fn level(&self, level: MessageLevel) -> Color {
        match level {
            MessageLevel::Debug => self.muted(),
            MessageLevel::Info => self.accent(),
            MessageLevel::Warning => self.warning(),
            MessageLevel::Error => self.danger(),
        }
    }
}
