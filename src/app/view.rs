// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The upload form fills the window; toasts float above it in the
//! bottom-right corner.

use super::Message;
use crate::application::intake::IntakeContext;
use crate::domain::intake::UiVisibility;
use crate::i18n::fluent::I18n;
use crate::ui::notifications::{self, Toast};
use crate::ui::preview::PreviewController;
use crate::ui::upload_box;
use iced::widget::{scrollable, Container, Stack};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub intake: &'a IntakeContext,
    pub preview: &'a PreviewController,
    pub visibility: UiVisibility,
    pub notifications: &'a notifications::Manager,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let form = upload_box::view(upload_box::ViewContext {
        i18n: ctx.i18n,
        intake: ctx.intake,
        preview: ctx.preview,
        visibility: ctx.visibility,
    })
    .map(Message::UploadBox);

    let content = Container::new(scrollable(form))
        .width(Length::Fill)
        .height(Length::Fill);

    let toasts = Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification);

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(content)
        .push(toasts)
        .into()
}
