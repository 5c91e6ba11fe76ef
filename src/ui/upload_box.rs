// SPDX-License-Identifier: MPL-2.0
//! The upload form: drop zone, input buttons, preview surfaces and the
//! inline validation message.
//!
//! The view only reads state. Which surface is drawn comes from the
//! [`UiVisibility`] the preview controller was synced to, so the static
//! preview and the live camera view can never appear together.

use crate::application::intake::{GatePhase, IntakeContext};
use crate::domain::intake::{
    format_megabytes, ImageCandidate, UiVisibility, ADVERTISED_LIMIT_LABEL, ALLOWED_EXTENSIONS,
};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::preview::PreviewController;
use crate::ui::styles;
use iced::widget::{button, image, text, Column, Container, Row, Text};
use iced::{alignment::Horizontal, ContentFit, Element, Length};

/// Contextual data needed to render the upload form.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub intake: &'a IntakeContext,
    pub preview: &'a PreviewController,
    pub visibility: UiVisibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    ChooseFile,
    UseCamera,
    Capture,
    CancelCamera,
    Submit,
}

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let heading = Text::new(ctx.i18n.tr("upload-heading")).size(typography::TITLE_MD);

    let types = ALLOWED_EXTENSIONS.join(", ");
    let accepted = text(ctx.i18n.tr_with_args(
        "upload-accepted-types",
        &[("types", types.as_str()), ("limit", ADVERTISED_LIMIT_LABEL)],
    ))
    .size(typography::CAPTION)
    .style(styles::text::muted);

    let mut content = Column::new()
        .width(Length::Fill)
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .push(heading)
        .push(drop_zone(&ctx))
        .push(accepted)
        .push(actions(&ctx));

    if let Some(rejection) = ctx.intake.inline_error().rejection() {
        let args = rejection.i18n_args();
        let args: Vec<(&str, &str)> = args.iter().map(|(k, v)| (*k, v.as_str())).collect();
        content = content.push(
            text(ctx.i18n.tr_with_args(rejection.i18n_key(), &args))
                .size(typography::BODY)
                .style(styles::text::error),
        );
    }

    content.into()
}

fn drop_zone<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let hovered = ctx.intake.drop_zone().is_hovered();

    let inner: Element<'a, Message> = if ctx.visibility.camera_visible {
        live_view(ctx)
    } else if ctx.intake.camera().is_pending() {
        Column::new()
            .spacing(spacing::SM)
            .align_x(Horizontal::Center)
            .push(Text::new(ctx.i18n.tr("camera-starting")).size(typography::BODY))
            .push(
                button(Text::new(ctx.i18n.tr("camera-cancel")).size(typography::BODY))
                    .on_press(Message::CancelCamera)
                    .style(styles::button::secondary),
            )
            .into()
    } else if let (true, Some(candidate)) = (
        ctx.visibility.preview_visible,
        ctx.intake.selection().current(),
    ) {
        still_view(ctx, candidate)
    } else {
        let hint = if hovered {
            "upload-drop-release"
        } else {
            "upload-drop-hint"
        };
        Text::new(ctx.i18n.tr(hint)).size(typography::BODY_LG).into()
    };

    Container::new(inner)
        .width(Length::Fill)
        .height(Length::Shrink)
        .padding(spacing::MD)
        .center_x(Length::Fill)
        .style(styles::container::drop_zone(hovered))
        .into()
}

fn still_view<'a>(ctx: &ViewContext<'a>, candidate: &'a ImageCandidate) -> Element<'a, Message> {
    let size = format_megabytes(candidate.byte_size());
    let caption = ctx.i18n.tr_with_args(
        "upload-selected",
        &[("name", candidate.name()), ("size", size.as_str())],
    );

    let mut column = Column::new()
        .spacing(spacing::XS)
        .align_x(Horizontal::Center);
    if let Some(handle) = ctx.preview.still() {
        column = column.push(framed(
            image(handle.clone())
                .content_fit(ContentFit::Contain)
                .height(Length::Fixed(sizing::PREVIEW_MAX_HEIGHT)),
        ));
    }
    column
        .push(text(caption).size(typography::CAPTION).style(styles::text::muted))
        .into()
}

fn live_view<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let surface: Element<'a, Message> = match ctx.preview.live() {
        Some(handle) => framed(
            image(handle.clone())
                .content_fit(ContentFit::Contain)
                .height(Length::Fixed(sizing::PREVIEW_MAX_HEIGHT)),
        ),
        None => Container::new(Text::new(ctx.i18n.tr("camera-waiting-frame")).size(typography::BODY))
            .center_x(Length::Fill)
            .height(Length::Fixed(sizing::DROP_ZONE_HEIGHT))
            .into(),
    };

    let capture = button(Text::new(ctx.i18n.tr("camera-capture")).size(typography::BODY))
        .on_press_maybe(ctx.preview.live().map(|_| Message::Capture))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::primary);
    let cancel = button(Text::new(ctx.i18n.tr("camera-cancel")).size(typography::BODY))
        .on_press(Message::CancelCamera)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::secondary);

    Column::new()
        .spacing(spacing::SM)
        .align_x(Horizontal::Center)
        .push(surface)
        .push(Row::new().spacing(spacing::SM).push(capture).push(cancel))
        .into()
}

fn actions<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let in_flight = ctx.intake.gate().phase() == GatePhase::Submitted;
    let camera_busy = ctx.visibility.camera_visible || ctx.intake.camera().is_pending();

    let choose = button(Text::new(ctx.i18n.tr("upload-choose-file")).size(typography::BODY))
        .on_press_maybe((!in_flight).then_some(Message::ChooseFile))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::secondary);
    let camera = button(Text::new(ctx.i18n.tr("upload-use-camera")).size(typography::BODY))
        .on_press_maybe((!in_flight && !camera_busy).then_some(Message::UseCamera))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::secondary);

    let submit_label = if in_flight {
        "upload-submitting"
    } else {
        "upload-submit"
    };
    let submit = button(Text::new(ctx.i18n.tr(submit_label)).size(typography::BODY))
        .on_press_maybe((!in_flight).then_some(Message::Submit))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::primary);

    Row::new()
        .spacing(spacing::SM)
        .push(choose)
        .push(camera)
        .push(Container::new(submit).align_right(Length::Fill))
        .into()
}

fn framed<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    Container::new(content)
        .padding(spacing::XXS)
        .style(styles::container::preview_frame)
        .into()
}
