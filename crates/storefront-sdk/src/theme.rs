//! Light and dark theme tokens.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User's theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the device setting.
    #[default]
    System,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Whether this mode renders dark given the device preference.
    pub fn is_dark(&self, system_prefers_dark: bool) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => system_prefers_dark,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            _ => Err(()),
        }
    }
}

/// Color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub success: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        primary: "#6366f1",
        secondary: "#64748b",
        accent: "#ec4899",
        background: "#f8fafc",
        surface: "#ffffff",
        error: "#ef4444",
        warning: "#f59e0b",
        success: "#10b981",
        text_primary: "#0f172a",
        text_secondary: "#64748b",
        border: "#e2e8f0",
    };

    pub const DARK: Palette = Palette {
        primary: "#818cf8",
        secondary: "#94a3b8",
        accent: "#f472b6",
        background: "#0f172a",
        surface: "#1e293b",
        error: "#f87171",
        warning: "#fbbf24",
        success: "#34d399",
        text_primary: "#f1f5f9",
        text_secondary: "#94a3b8",
        border: "#334155",
    };
}

/// Card surface styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardStyle {
    pub background: &'static str,
    pub border: &'static str,
    pub radius: u8,
}

/// One elevation level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shadow {
    pub color: &'static str,
    pub opacity: f32,
    pub radius: u8,
    pub offset_y: u8,
}

/// Elevation levels, small to large.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadowLevels {
    pub sm: Shadow,
    pub md: Shadow,
    pub lg: Shadow,
}

/// A resolved theme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Theme {
    /// The preference this theme was resolved from.
    pub mode: ThemeMode,
    pub is_dark: bool,
    pub colors: Palette,
    pub card: CardStyle,
    pub shadows: ShadowLevels,
}

const LIGHT_SHADOWS: ShadowLevels = ShadowLevels {
    sm: Shadow { color: "#000000", opacity: 0.05, radius: 2, offset_y: 1 },
    md: Shadow { color: "#000000", opacity: 0.1, radius: 6, offset_y: 4 },
    lg: Shadow { color: "#000000", opacity: 0.15, radius: 15, offset_y: 10 },
};

const DARK_SHADOWS: ShadowLevels = ShadowLevels {
    sm: Shadow { color: "#000000", opacity: 0.3, radius: 2, offset_y: 1 },
    md: Shadow { color: "#000000", opacity: 0.4, radius: 6, offset_y: 4 },
    lg: Shadow { color: "#000000", opacity: 0.5, radius: 15, offset_y: 10 },
};

impl Theme {
    /// Pick the light or dark tokens for `mode`.
    pub fn resolve(mode: ThemeMode, system_prefers_dark: bool) -> Theme {
        let is_dark = mode.is_dark(system_prefers_dark);
        let (colors, shadows) = if is_dark {
            (Palette::DARK, DARK_SHADOWS)
        } else {
            (Palette::LIGHT, LIGHT_SHADOWS)
        };
        Theme {
            mode,
            is_dark,
            colors,
            card: CardStyle {
                background: colors.surface,
                border: colors.border,
                radius: 12,
            },
            shadows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        for mode in ThemeMode::ALL {
            assert_eq!(mode.as_str().parse::<ThemeMode>(), Ok(mode));
        }
        assert!("sepia".parse::<ThemeMode>().is_err());
        assert_eq!(ThemeMode::default(), ThemeMode::System);
    }

    #[test]
    fn test_resolve_follows_system_only_in_system_mode() {
        assert!(Theme::resolve(ThemeMode::System, true).is_dark);
        assert!(!Theme::resolve(ThemeMode::System, false).is_dark);
        assert!(!Theme::resolve(ThemeMode::Light, true).is_dark);
        assert!(Theme::resolve(ThemeMode::Dark, false).is_dark);
    }

    #[test]
    fn test_card_uses_palette_surface() {
        let dark = Theme::resolve(ThemeMode::Dark, false);
        assert_eq!(dark.colors, Palette::DARK);
        assert_eq!(dark.card.background, Palette::DARK.surface);
        assert_eq!(dark.mode, ThemeMode::Dark);
    }
}
