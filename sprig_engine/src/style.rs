// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flat color-and-metric table consulted by layout and drawing.
//!
//! A [`Style`] is injected into the [`Context`](crate::Context) at
//! construction and is read-only while a frame is open. With the `serde`
//! feature every field is optional on input, so a partial table only
//! overrides what it names:
//!
//! ```toml
//! padding = 3
//! spacing = 2
//!
//! [colors]
//! window_bg = { r = 20, g = 20, b = 28, a = 255 }
//! ```

use sprig_draw::{Color, FontId, Vec2};

/// Named palette roles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColorId {
    /// Control text.
    Text,
    /// One-pixel frame border; transparent disables borders.
    Border,
    /// Window background.
    WindowBg,
    /// Title bar background.
    TitleBg,
    /// Title bar text.
    TitleText,
    /// Panel background.
    PanelBg,
    /// Button at rest.
    Button,
    /// Hovered button.
    ButtonHover,
    /// Focused button.
    ButtonFocus,
    /// Input field at rest.
    Base,
    /// Hovered input field.
    BaseHover,
    /// Focused input field.
    BaseFocus,
    /// Scrollbar track.
    ScrollBase,
    /// Scrollbar thumb.
    ScrollThumb,
}

impl ColorId {
    /// The variant used while the control is hovered.
    pub fn hovered(self) -> Self {
        match self {
            Self::Button => Self::ButtonHover,
            Self::Base => Self::BaseHover,
            other => other,
        }
    }

    /// The variant used while the control is focused.
    pub fn focused(self) -> Self {
        match self {
            Self::Button | Self::ButtonHover => Self::ButtonFocus,
            Self::Base | Self::BaseHover => Self::BaseFocus,
            other => other,
        }
    }

    /// Roles whose frames are drawn without a border.
    pub fn is_borderless(self) -> bool {
        matches!(self, Self::ScrollBase | Self::ScrollThumb | Self::TitleBg)
    }
}

/// One color per [`ColorId`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[allow(missing_docs, reason = "Fields mirror the ColorId variants one to one.")]
pub struct Palette {
    pub text: Color,
    pub border: Color,
    pub window_bg: Color,
    pub title_bg: Color,
    pub title_text: Color,
    pub panel_bg: Color,
    pub button: Color,
    pub button_hover: Color,
    pub button_focus: Color,
    pub base: Color,
    pub base_hover: Color,
    pub base_focus: Color,
    pub scroll_base: Color,
    pub scroll_thumb: Color,
}

impl Palette {
    /// Look up a role.
    pub fn get(&self, id: ColorId) -> Color {
        match id {
            ColorId::Text => self.text,
            ColorId::Border => self.border,
            ColorId::WindowBg => self.window_bg,
            ColorId::TitleBg => self.title_bg,
            ColorId::TitleText => self.title_text,
            ColorId::PanelBg => self.panel_bg,
            ColorId::Button => self.button,
            ColorId::ButtonHover => self.button_hover,
            ColorId::ButtonFocus => self.button_focus,
            ColorId::Base => self.base,
            ColorId::BaseHover => self.base_hover,
            ColorId::BaseFocus => self.base_focus,
            ColorId::ScrollBase => self.scroll_base,
            ColorId::ScrollThumb => self.scroll_thumb,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Color::rgb(230, 230, 230),
            border: Color::rgb(25, 25, 25),
            window_bg: Color::rgb(50, 50, 50),
            title_bg: Color::rgb(25, 25, 25),
            title_text: Color::rgb(240, 240, 240),
            panel_bg: Color::TRANSPARENT,
            button: Color::rgb(75, 75, 75),
            button_hover: Color::rgb(95, 95, 95),
            button_focus: Color::rgb(115, 115, 115),
            base: Color::rgb(30, 30, 30),
            base_hover: Color::rgb(35, 35, 35),
            base_focus: Color::rgb(40, 40, 40),
            scroll_base: Color::rgb(43, 43, 43),
            scroll_thumb: Color::rgb(30, 30, 30),
        }
    }
}

/// Spacing, sizes, font, and palette.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Style {
    /// Font handle passed to [`TextMetrics`](crate::TextMetrics) and text commands.
    pub font: FontId,
    /// Default cell content size; padding is added on both sides.
    pub size: Vec2,
    /// Inner padding of cells and container bodies.
    pub padding: i32,
    /// Gap between cells and rows.
    pub spacing: i32,
    /// Tree node indent.
    pub indent: i32,
    /// Window title bar height; also the resize handle size.
    pub title_height: i32,
    /// Scrollbar thickness.
    pub scrollbar_size: i32,
    /// Minimum scrollbar thumb length and slider thumb width.
    pub thumb_size: i32,
    /// Colors.
    pub colors: Palette,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font: FontId(0),
            size: Vec2::new(68, 10),
            padding: 5,
            spacing: 4,
            indent: 24,
            title_height: 24,
            scrollbar_size: 12,
            thumb_size: 8,
            colors: Palette::default(),
        }
    }
}

impl Style {
    /// Default row height: content size plus padding on both sides.
    pub fn row_height(&self) -> i32 {
        self.size.y + self.padding * 2
    }

    /// Default cell width for rows with no column template.
    pub fn cell_width(&self) -> i32 {
        self.size.x + self.padding * 2
    }

    /// Parse a (possibly partial) style table.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, crate::error::ConfigError> {
        Ok(toml::from_str(s)?)
    }
}
