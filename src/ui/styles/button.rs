// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::{
    border,
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Theme};

/// Main action of a view: upload, capture.
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    let (background, border_color, shadow) = match status {
        button::Status::Active | button::Status::Pressed => {
            (palette::PRIMARY_500, palette::PRIMARY_600, shadow::SM)
        }
        button::Status::Hovered => (palette::PRIMARY_400, palette::PRIMARY_500, shadow::MD),
        button::Status::Disabled => return disabled(theme),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: border_color,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow,
        snap: true,
    }
}

/// Alternative actions: choose file, use camera, cancel.
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background;
    let (background, border_color, shadow) = match status {
        button::Status::Active | button::Status::Pressed => {
            (base.weak.color, palette::GRAY_400, shadow::NONE)
        }
        button::Status::Hovered => (base.strong.color, palette::PRIMARY_500, shadow::SM),
        button::Status::Disabled => return disabled(theme),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: base.base.text,
        border: Border {
            color: border_color,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow,
        snap: true,
    }
}

fn disabled(theme: &Theme) -> button::Style {
    let fill = if matches!(theme, Theme::Light) {
        palette::GRAY_200
    } else {
        palette::GRAY_700
    };
    button::Style {
        background: Some(Background::Color(fill)),
        text_color: palette::GRAY_400,
        border: Border {
            color: palette::GRAY_400,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
