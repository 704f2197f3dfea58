use anyhow::{Context, Result, anyhow};
use ratatui::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Theme errors
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Failed to parse theme file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Unknown color reference: ${0}")]
    UnknownColorRef(String),

    #[error("Unknown style reference: ${0}")]
    UnknownStyleRef(String),

    #[error("Theme file not found: {0}")]
    FileNotFound(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Base colors that components derive their own styling from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Strong border, used for resting outlines
    pub border_strong: Color,
    /// Default graphics accent (hover and focus outlines)
    pub graphics_default: Color,
    pub text_default: Color,
    pub text_muted: Color,
    pub icon_default: Color,
    pub tooltip_bg: Color,
    pub tooltip_fg: Color,
}

/// Runtime theme with direct field access for all UI elements
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // === Default Colors ===
    pub default_fg: Color,
    pub default_bg: Color,

    pub palette: Palette,

    // === Header ===
    pub header_title: Style,

    // === Results Panel ===
    pub results_text: Style,
    pub results_selected: Style,
    pub results_count: Style,
    pub results_border: Style,

    // === Status Bar ===
    pub status_bar_bg: Color,
    pub status_key: Style,
    pub status_desc: Style,
    pub flash_info: Style,
    pub flash_warn: Style,
    pub flash_error: Style,

    // === Error Modal ===
    pub error_modal_bg: Color,
    pub error_title: Style,
    pub error_text: Style,
    pub error_border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (dark)
    pub fn catppuccin_mocha() -> Self {
        let fg = Color::Rgb(205, 214, 244);
        let bg = Color::Rgb(30, 30, 46);
        let subtext = Color::Rgb(166, 173, 200);

        Theme {
            default_fg: fg,
            default_bg: bg,

            palette: Palette {
                border_strong: Color::Rgb(108, 112, 134),
                graphics_default: Color::Rgb(137, 180, 250),
                text_default: fg,
                text_muted: subtext,
                icon_default: Color::Rgb(186, 194, 222),
                tooltip_bg: Color::Rgb(69, 71, 90),
                tooltip_fg: fg,
            },

            header_title: Style::default()
                .fg(Color::Rgb(137, 180, 250))
                .add_modifier(Modifier::BOLD),

            results_text: Style::default().fg(fg),
            results_selected: Style::default()
                .fg(Color::Rgb(137, 180, 250))
                .add_modifier(Modifier::BOLD),
            results_count: Style::default().fg(subtext).add_modifier(Modifier::DIM),
            results_border: Style::default().fg(Color::Rgb(69, 71, 90)),

            status_bar_bg: Color::Rgb(49, 50, 68),
            status_key: Style::default().add_modifier(Modifier::BOLD),
            status_desc: Style::default().fg(subtext),
            flash_info: Style::default().fg(Color::Rgb(166, 227, 161)),
            flash_warn: Style::default().fg(Color::Rgb(249, 226, 175)),
            flash_error: Style::default().fg(Color::Rgb(243, 139, 168)),

            error_modal_bg: Color::Rgb(24, 24, 37),
            error_title: Style::default()
                .fg(Color::Rgb(243, 139, 168))
                .add_modifier(Modifier::BOLD),
            error_text: Style::default().fg(fg),
            error_border: Style::default().fg(Color::Rgb(243, 139, 168)),
        }
    }

    /// Catppuccin Latte theme (light)
    pub fn catppuccin_latte() -> Self {
        let fg = Color::Rgb(76, 79, 105);
        let bg = Color::Rgb(239, 241, 245);
        let subtext = Color::Rgb(108, 111, 133);

        Theme {
            default_fg: fg,
            default_bg: bg,

            palette: Palette {
                border_strong: Color::Rgb(156, 160, 176),
                graphics_default: Color::Rgb(30, 102, 245),
                text_default: fg,
                text_muted: subtext,
                icon_default: Color::Rgb(92, 95, 119),
                tooltip_bg: Color::Rgb(188, 192, 204),
                tooltip_fg: fg,
            },

            header_title: Style::default()
                .fg(Color::Rgb(30, 102, 245))
                .add_modifier(Modifier::BOLD),

            results_text: Style::default().fg(fg),
            results_selected: Style::default()
                .fg(Color::Rgb(30, 102, 245))
                .add_modifier(Modifier::BOLD),
            results_count: Style::default().fg(subtext).add_modifier(Modifier::DIM),
            results_border: Style::default().fg(Color::Rgb(188, 192, 204)),

            status_bar_bg: Color::Rgb(204, 208, 218),
            status_key: Style::default().add_modifier(Modifier::BOLD),
            status_desc: Style::default().fg(subtext),
            flash_info: Style::default().fg(Color::Rgb(64, 160, 43)),
            flash_warn: Style::default().fg(Color::Rgb(223, 142, 29)),
            flash_error: Style::default().fg(Color::Rgb(210, 15, 57)),

            error_modal_bg: Color::Rgb(230, 233, 239),
            error_title: Style::default()
                .fg(Color::Rgb(210, 15, 57))
                .add_modifier(Modifier::BOLD),
            error_text: Style::default().fg(fg),
            error_border: Style::default().fg(Color::Rgb(210, 15, 57)),
        }
    }

    /// Tokyo Night theme (dark)
    pub fn tokyonight_night() -> Self {
        let fg = Color::Rgb(192, 202, 245);
        let bg = Color::Rgb(26, 27, 38);
        let subtext = Color::Rgb(169, 177, 214);

        Theme {
            default_fg: fg,
            default_bg: bg,

            palette: Palette {
                border_strong: Color::Rgb(68, 75, 106),
                graphics_default: Color::Rgb(125, 207, 255),
                text_default: fg,
                text_muted: subtext,
                icon_default: Color::Rgb(148, 156, 186),
                tooltip_bg: Color::Rgb(36, 40, 59),
                tooltip_fg: fg,
            },

            header_title: Style::default()
                .fg(Color::Rgb(125, 207, 255))
                .add_modifier(Modifier::BOLD),

            results_text: Style::default().fg(fg),
            results_selected: Style::default()
                .fg(Color::Rgb(125, 207, 255))
                .add_modifier(Modifier::BOLD),
            results_count: Style::default().fg(subtext).add_modifier(Modifier::DIM),
            results_border: Style::default().fg(Color::Rgb(36, 40, 59)),

            status_bar_bg: Color::Rgb(36, 40, 59),
            status_key: Style::default().add_modifier(Modifier::BOLD),
            status_desc: Style::default().fg(subtext),
            flash_info: Style::default().fg(Color::Rgb(158, 206, 106)),
            flash_warn: Style::default().fg(Color::Rgb(224, 175, 104)),
            flash_error: Style::default().fg(Color::Rgb(247, 118, 142)),

            error_modal_bg: Color::Rgb(22, 24, 35),
            error_title: Style::default()
                .fg(Color::Rgb(247, 118, 142))
                .add_modifier(Modifier::BOLD),
            error_text: Style::default().fg(fg),
            error_border: Style::default().fg(Color::Rgb(247, 118, 142)),
        }
    }

    /// Tokyo Night Day theme (light)
    pub fn tokyonight_day() -> Self {
        let fg = Color::Rgb(52, 59, 88);
        let bg = Color::Rgb(230, 233, 244);
        let subtext = Color::Rgb(78, 89, 131);

        Theme {
            default_fg: fg,
            default_bg: bg,

            palette: Palette {
                border_strong: Color::Rgb(165, 173, 203),
                graphics_default: Color::Rgb(34, 94, 168),
                text_default: fg,
                text_muted: subtext,
                icon_default: Color::Rgb(104, 112, 147),
                tooltip_bg: Color::Rgb(214, 219, 237),
                tooltip_fg: fg,
            },

            header_title: Style::default()
                .fg(Color::Rgb(34, 94, 168))
                .add_modifier(Modifier::BOLD),

            results_text: Style::default().fg(fg),
            results_selected: Style::default()
                .fg(Color::Rgb(34, 94, 168))
                .add_modifier(Modifier::BOLD),
            results_count: Style::default().fg(subtext).add_modifier(Modifier::DIM),
            results_border: Style::default().fg(Color::Rgb(214, 219, 237)),

            status_bar_bg: Color::Rgb(214, 219, 237),
            status_key: Style::default().add_modifier(Modifier::BOLD),
            status_desc: Style::default().fg(subtext),
            flash_info: Style::default().fg(Color::Rgb(51, 125, 7)),
            flash_warn: Style::default().fg(Color::Rgb(150, 80, 0)),
            flash_error: Style::default().fg(Color::Rgb(186, 33, 66)),

            error_modal_bg: Color::Rgb(243, 244, 249),
            error_title: Style::default()
                .fg(Color::Rgb(186, 33, 66))
                .add_modifier(Modifier::BOLD),
            error_text: Style::default().fg(fg),
            error_border: Style::default().fg(Color::Rgb(186, 33, 66)),
        }
    }

    /// Load theme by name (custom overrides built-in)
    pub fn load(name: &str) -> Result<Self> {
        // Custom themes override built-in ones
        if let Ok(theme_path) = Self::get_theme_path(name)
            && theme_path.exists()
        {
            return Self::load_from_file(&theme_path);
        }

        if let Some(built_in) = BuiltInTheme::from_name(name) {
            return Ok(built_in.to_theme());
        }

        Err(anyhow!(
            "Unknown theme '{}'. Available built-in themes: {}",
            name,
            BuiltInTheme::all()
                .iter()
                .map(|t| t.name())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }

    /// Path where a custom theme with this name would live
    pub fn get_theme_path(name: &str) -> Result<PathBuf> {
        Ok(get_config_dir()?.join("themes").join(format!("{}.toml", name)))
    }

    /// Load theme from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ThemeError::FileNotFound(path.display().to_string()).into());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file: {}", path.display()))?;

        let definition: ThemeDefinition = toml::from_str(&content)
            .with_context(|| format!("Failed to parse theme file: {}", path.display()))?;

        Self::from_definition(definition)
    }

    /// Convert ThemeDefinition to runtime Theme
    pub fn from_definition(def: ThemeDefinition) -> Result<Self> {
        // Start from the named base, or the default theme
        let mut theme = def
            .base
            .as_deref()
            .and_then(BuiltInTheme::from_name)
            .map(|b| b.to_theme())
            .unwrap_or_default();

        for (key, color_val) in &def.palette {
            let color = resolve_color(color_val, &def)?;
            match key.as_str() {
                "default_fg" => theme.default_fg = color,
                "default_bg" => theme.default_bg = color,
                "border_strong" => theme.palette.border_strong = color,
                "graphics_default" => theme.palette.graphics_default = color,
                "text_default" => theme.palette.text_default = color,
                "text_muted" => theme.palette.text_muted = color,
                "icon_default" => theme.palette.icon_default = color,
                "tooltip_bg" => theme.palette.tooltip_bg = color,
                "tooltip_fg" => theme.palette.tooltip_fg = color,
                "status_bar_bg" => theme.status_bar_bg = color,
                "error_modal_bg" => theme.error_modal_bg = color,
                _ => log::warn!("Ignoring unknown palette entry '{}'", key),
            }
        }

        for (key, style_def) in &def.elements {
            let style = resolve_style(style_def, &def)?;
            match key.as_str() {
                "header_title" => theme.header_title = style,
                "results_text" => theme.results_text = style,
                "results_selected" => theme.results_selected = style,
                "results_count" => theme.results_count = style,
                "results_border" => theme.results_border = style,
                "status_key" => theme.status_key = style,
                "status_desc" => theme.status_desc = style,
                "flash_info" => theme.flash_info = style,
                "flash_warn" => theme.flash_warn = style,
                "flash_error" => theme.flash_error = style,
                "error_title" => theme.error_title = style,
                "error_text" => theme.error_text = style,
                "error_border" => theme.error_border = style,
                _ => log::warn!("Ignoring unknown theme element '{}'", key),
            }
        }

        Ok(theme)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltInTheme {
    CatppuccinMocha,
    CatppuccinLatte,
    TokyonightNight,
    TokyonightDay,
}

impl BuiltInTheme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "catppuccin-mocha" => Some(Self::CatppuccinMocha),
            "catppuccin-latte" => Some(Self::CatppuccinLatte),
            "tokyonight-night" => Some(Self::TokyonightNight),
            "tokyonight-day" => Some(Self::TokyonightDay),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CatppuccinMocha => "catppuccin-mocha",
            Self::CatppuccinLatte => "catppuccin-latte",
            Self::TokyonightNight => "tokyonight-night",
            Self::TokyonightDay => "tokyonight-day",
        }
    }

    pub fn all() -> &'static [BuiltInTheme] {
        &[
            Self::CatppuccinMocha,
            Self::CatppuccinLatte,
            Self::TokyonightNight,
            Self::TokyonightDay,
        ]
    }

    pub fn to_theme(&self) -> Theme {
        match self {
            Self::CatppuccinMocha => Theme::catppuccin_mocha(),
            Self::CatppuccinLatte => Theme::catppuccin_latte(),
            Self::TokyonightNight => Theme::tokyonight_night(),
            Self::TokyonightDay => Theme::tokyonight_day(),
        }
    }
}

/// TOML deserialization structure
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ThemeDefinition {
    /// Built-in theme to start from
    pub base: Option<String>,

    #[serde(default)]
    pub colors: HashMap<String, ColorValue>,

    #[serde(default)]
    pub styles: HashMap<String, StyleDef>,

    #[serde(default)]
    pub palette: HashMap<String, ColorValue>,

    #[serde(default)]
    pub elements: HashMap<String, StyleDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ColorValue {
    Rgb([u8; 3]),
    Reference(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum StyleDef {
    Reference(String),
    Inline {
        fg: Option<ColorValue>,
        bg: Option<ColorValue>,
        #[serde(default)]
        bold: bool,
        #[serde(default)]
        italic: bool,
        #[serde(default)]
        underline: bool,
        #[serde(default)]
        dim: bool,
        #[serde(default)]
        reversed: bool,
    },
}

/// Resolve a ColorValue to a ratatui Color within a ThemeDefinition context
fn resolve_color(value: &ColorValue, def: &ThemeDefinition) -> Result<Color> {
    match value {
        ColorValue::Rgb(rgb) => Ok(Color::Rgb(rgb[0], rgb[1], rgb[2])),
        ColorValue::Reference(name) => {
            let name = name.strip_prefix('$').unwrap_or(name);
            let color_val = def
                .colors
                .get(name)
                .ok_or_else(|| ThemeError::UnknownColorRef(name.to_string()))?;
            match color_val {
                // References only resolve one level deep
                ColorValue::Rgb(rgb) => Ok(Color::Rgb(rgb[0], rgb[1], rgb[2])),
                ColorValue::Reference(inner) => {
                    Err(ThemeError::UnknownColorRef(inner.to_string()).into())
                }
            }
        }
    }
}

/// Resolve StyleDef to a Style
fn resolve_style(style_def: &StyleDef, def: &ThemeDefinition) -> Result<Style> {
    match style_def {
        StyleDef::Reference(name) => {
            let name = name.strip_prefix('$').unwrap_or(name);
            let style = def
                .styles
                .get(name)
                .ok_or_else(|| ThemeError::UnknownStyleRef(name.to_string()))?;
            // Named styles must be inline; chains are rejected
            if let StyleDef::Reference(inner) = style {
                return Err(ThemeError::UnknownStyleRef(inner.to_string()).into());
            }
            resolve_style(style, def)
        }
        StyleDef::Inline {
            fg,
            bg,
            bold,
            italic,
            underline,
            dim,
            reversed,
        } => {
            let mut style = Style::default();
            if let Some(fg_val) = fg {
                style = style.fg(resolve_color(fg_val, def)?);
            }
            if let Some(bg_val) = bg {
                style = style.bg(resolve_color(bg_val, def)?);
            }
            if *bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            if *italic {
                style = style.add_modifier(Modifier::ITALIC);
            }
            if *underline {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            if *dim {
                style = style.add_modifier(Modifier::DIM);
            }
            if *reversed {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Ok(style)
        }
    }
}

/// Get searchbar config directory using XDG specification
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("searchbar"));
    }
    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config/searchbar"))
}

/// Get list of available custom themes
pub fn list_custom_themes() -> Result<Vec<String>> {
    let themes_dir = get_config_dir()?.join("themes");

    if !themes_dir.exists() {
        return Ok(Vec::new());
    }

    let mut themes = Vec::new();
    for entry in fs::read_dir(&themes_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml")
            && let Some(name) = path.file_stem().and_then(|s| s.to_str())
        {
            themes.push(name.to_string());
        }
    }
    themes.sort();

    Ok(themes)
}
