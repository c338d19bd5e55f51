//! Dark/light preference and the colours each one draws with.

use crate::task::Priority;
use ratatui::style::Color;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggle(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "🌙",
            Theme::Light => "☀️",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette::dark(),
            Theme::Light => Palette::light(),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub focus: Color,
    pub accent: Color,
    pub red: Color,
    pub green: Color,
    pub tag: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(15, 17, 21),
            text: Color::Rgb(230, 232, 236),
            muted: Color::Rgb(140, 146, 158),
            border: Color::Rgb(60, 66, 78),
            focus: Color::Cyan,
            accent: Color::Rgb(240, 180, 60),
            red: Color::Rgb(235, 87, 87),
            green: Color::Rgb(80, 200, 120),
            tag: Color::Rgb(120, 160, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(248, 249, 251),
            text: Color::Rgb(24, 26, 31),
            muted: Color::Rgb(100, 106, 118),
            border: Color::Rgb(200, 204, 212),
            focus: Color::Blue,
            accent: Color::Rgb(200, 130, 0),
            red: Color::Rgb(200, 40, 40),
            green: Color::Rgb(30, 140, 70),
            tag: Color::Rgb(40, 80, 200),
        }
    }

    pub fn priority(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.red,
            Priority::Med => self.accent,
            Priority::Low => self.green,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
    }

    #[test]
    fn parses_wire_names() {
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("solarized".parse::<Theme>().is_err());
    }
}
