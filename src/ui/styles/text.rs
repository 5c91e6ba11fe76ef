// SPDX-License-Identifier: MPL-2.0
//! Text styles.

use crate::ui::design_tokens::palette;
use iced::widget::text;
use iced::Theme;

/// Inline validation message under the upload box.
pub fn error(_theme: &Theme) -> text::Style {
    text::Style {
        color: Some(palette::ERROR_500),
    }
}

/// Secondary hints such as the accepted types line.
pub fn muted(theme: &Theme) -> text::Style {
    let base = theme.extended_palette().background.base.text;
    text::Style {
        color: Some(iced::Color { a: 0.7, ..base }),
    }
}
