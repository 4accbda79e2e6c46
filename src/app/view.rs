// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The dashboard is a header, an optional sidebar (user name, stat cards)
//! and a main column (note editor, keyword preview, recent activity). The
//! help dialog and the toast overlay are stacked on top.

use super::{Message, NoteEditor, SEARCH_INPUT_ID};
use crate::activity::Activity;
use crate::forms::FormField;
use crate::progress::StatKind;
use crate::session::Session;
use crate::shortcuts::Shortcut;
use crate::text::{self, Segment, DEFAULT_KEYWORD_COUNT};
use crate::ui::design_tokens::{border, palette, radius, shadow, sizing, spacing, typography};
use crate::ui::notifications::Toast;
use crate::ui::theming::ColorScheme;
use crate::ui::tooltip;
use chrono::Utc;
use iced::widget::text::Span;
use iced::widget::{
    button, container, mouse_area, rich_text, scrollable, span, text_editor, text_input, Column,
    Container, Id, Row, Stack, Text,
};
use iced::{alignment, Color, Element, Length, Theme};

/// Anchor names of widgets carrying a tooltip.
pub mod anchors {
    pub const THEME_TOGGLE: &str = "theme-toggle";
    pub const MENU_TOGGLE: &str = "menu-toggle";
    pub const SAVE_NOTE: &str = "save-note";
    pub const CLEAR_ACTIVITY: &str = "clear-activity";
}

/// Tooltip text of an anchor.
#[must_use]
pub fn tooltip_text(anchor: &str) -> Option<&'static str> {
    match anchor {
        anchors::THEME_TOGGLE => Some("Toggle light/dark theme (Ctrl+D)"),
        anchors::MENU_TOGGLE => Some("Show or hide the sidebar"),
        anchors::SAVE_NOTE => Some("Save the current note (Ctrl+S)"),
        anchors::CLEAR_ACTIVITY => Some("Remove every entry from the history"),
        _ => None,
    }
}

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub session: &'a Session,
    pub note: &'a NoteEditor,
    pub name_input: &'a str,
}

/// Renders the dashboard with its overlays.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let colors = ctx.session.theme().colors();

    let mut body = Row::new().height(Length::Fill);
    if ctx.session.sidebar_open() {
        body = body.push(view_sidebar(ctx.session, ctx.name_input));
    }
    body = body.push(
        scrollable(
            Column::new()
                .spacing(spacing::LG)
                .padding(spacing::LG)
                .push(view_note_editor(ctx.session, ctx.note))
                .push(view_keywords(ctx.note, &colors))
                .push(view_activity(ctx.session)),
        )
        .width(Length::Fill)
        .height(Length::Fill),
    );

    let base = Column::new()
        .push(view_header(ctx.session))
        .push(body)
        .width(Length::Fill)
        .height(Length::Fill);

    let mut stack = Stack::new().push(base);
    if ctx.session.modal_open() {
        stack = stack.push(view_help_modal(&colors));
    }
    stack = stack.push(Toast::view_overlay(ctx.session.notifications()).map(Message::Notification));

    Container::new(stack)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_header(session: &Session) -> Element<'_, Message> {
    let tooltips = session.tooltips();

    let menu_button = tooltip::with_tooltip(
        button(Text::new("☰").size(typography::TITLE_SM))
            .on_press(Message::ToggleMobileMenu)
            .style(button::text),
        anchors::MENU_TOGGLE,
        tooltips,
        Message::TooltipShow(anchors::MENU_TOGGLE),
        Message::TooltipHide(anchors::MENU_TOGGLE),
    );

    let title = Container::new(Text::new("SmartStudy").size(typography::TITLE_MD))
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Left);

    let greeting = Text::new(format!("Hello, {}", session.user())).size(typography::BODY);

    let help_button = button(Text::new("?").size(typography::BODY))
        .on_press(Message::OpenHelp)
        .style(button::secondary);

    let theme_button = tooltip::with_tooltip(
        button(Text::new(session.theme().toggle_label()).size(typography::BODY))
            .on_press(Message::ToggleTheme)
            .style(button::secondary),
        anchors::THEME_TOGGLE,
        tooltips,
        Message::TooltipShow(anchors::THEME_TOGGLE),
        Message::TooltipHide(anchors::THEME_TOGGLE),
    );

    Container::new(
        Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(menu_button)
            .push(title)
            .push(greeting)
            .push(help_button)
            .push(theme_button),
    )
    .padding([spacing::XS, spacing::MD])
    .width(Length::Fill)
    .style(header_style)
    .into()
}

fn view_sidebar<'a>(session: &'a Session, name_input: &'a str) -> Element<'a, Message> {
    let name_row = Row::new()
        .spacing(spacing::XS)
        .push(
            text_input("Your name", name_input)
                .on_input(Message::UserNameChanged)
                .on_submit(Message::SaveUserName)
                .padding(spacing::XS)
                .width(Length::Fill),
        )
        .push(
            button(Text::new("Save").size(typography::BODY_SM))
                .on_press(Message::SaveUserName)
                .style(button::secondary),
        );

    let mut content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::MD)
        .push(section_title("Profile"))
        .push(Text::new(format!("Signed in as {}", session.user())).size(typography::BODY_SM))
        .push(name_row)
        .push(section_title("Progress"));

    for kind in StatKind::ALL {
        content = content.push(view_stat_card(kind, session.stat_count(kind.as_str())));
    }

    Container::new(scrollable(content))
        .width(Length::Fixed(sizing::SIDEBAR_WIDTH))
        .height(Length::Fill)
        .style(sidebar_style)
        .into()
}

fn view_stat_card(kind: StatKind, count: u64) -> Element<'static, Message> {
    let labels = Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(kind.label()).size(typography::BODY_SM))
        .push(Text::new(count.to_string()).size(typography::TITLE_LG));

    Container::new(
        Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(labels).width(Length::Fill))
            .push(
                button(Text::new("+1").size(typography::BODY_SM))
                    .on_press(Message::IncrementStat(kind))
                    .style(button::primary),
            ),
    )
    .padding(spacing::SM)
    .width(Length::Fill)
    .style(card_style)
    .into()
}

fn view_note_editor<'a>(session: &'a Session, note: &'a NoteEditor) -> Element<'a, Message> {
    let title_value = note
        .form
        .field("title")
        .map(|field| field.value.as_str())
        .unwrap_or_default();

    let title_input = text_input("Note title", title_value)
        .on_input(Message::NoteTitleChanged)
        .on_submit(Message::SubmitNote)
        .padding(spacing::XS)
        .size(typography::BODY_LG);

    let body_editor = text_editor(&note.body)
        .placeholder("Write your notes here. Drafts are saved automatically.")
        .on_action(Message::NoteBodyEdited)
        .height(Length::Fixed(180.0))
        .padding(spacing::XS);

    let save_button = tooltip::with_tooltip(
        button(Text::new("Save note").size(typography::BODY))
            .on_press(Message::SubmitNote)
            .style(button::primary),
        anchors::SAVE_NOTE,
        session.tooltips(),
        Message::TooltipShow(anchors::SAVE_NOTE),
        Message::TooltipHide(anchors::SAVE_NOTE),
    );

    let mut column = Column::new()
        .spacing(spacing::XS)
        .push(section_title("New note"))
        .push(title_input);
    if let Some(error) = note.form.field("title").and_then(FormField::error) {
        column = column.push(error_text(error));
    }
    column = column.push(body_editor);
    if let Some(error) = note.form.field("body").and_then(FormField::error) {
        column = column.push(error_text(error));
    }

    Container::new(column.push(save_button))
        .padding(spacing::MD)
        .width(Length::Fill)
        .style(card_style)
        .into()
}

fn view_keywords<'a>(note: &'a NoteEditor, colors: &ColorScheme) -> Element<'a, Message> {
    let body = note
        .form
        .field("body")
        .map(|field| field.value.as_str())
        .unwrap_or_default();
    let keywords = text::extract_keywords(body, DEFAULT_KEYWORD_COUNT);

    let mut column = Column::new()
        .spacing(spacing::XS)
        .push(section_title("Keywords"));

    if keywords.is_empty() {
        return Container::new(column.push(
            Text::new("Keywords appear here as you write.").size(typography::BODY_SM),
        ))
        .padding(spacing::MD)
        .width(Length::Fill)
        .style(card_style)
        .into();
    }

    column = column.push(Text::new(keywords.join(", ")).size(typography::BODY_SM));

    let highlight = colors.highlight;
    let spans: Vec<Span<'a>> = text::highlight_keywords(body, &keywords)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(text) => span(text),
            Segment::Highlight(text) => span(text).background(highlight),
        })
        .collect();
    column = column.push(rich_text(spans).size(typography::BODY));

    Container::new(column)
        .padding(spacing::MD)
        .width(Length::Fill)
        .style(card_style)
        .into()
}

fn view_activity(session: &Session) -> Element<'_, Message> {
    let search = text_input("Search activity (Ctrl+K)", session.search_input())
        .id(Id::new(SEARCH_INPUT_ID))
        .on_input(Message::SearchChanged)
        .padding(spacing::XS)
        .width(Length::Fill);

    let clear_button = tooltip::with_tooltip(
        button(Text::new("Clear history").size(typography::BODY_SM))
            .on_press_maybe((!session.activity().is_empty()).then_some(Message::ClearActivity))
            .style(button::danger),
        anchors::CLEAR_ACTIVITY,
        session.tooltips(),
        Message::TooltipShow(anchors::CLEAR_ACTIVITY),
        Message::TooltipHide(anchors::CLEAR_ACTIVITY),
    );

    let toolbar = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(search)
        .push(clear_button);

    let rows = session.recent_activity();
    let now = Utc::now();
    let mut list = Column::new().spacing(spacing::XS);
    if rows.is_empty() {
        let empty = if session.applied_search().is_empty() {
            "No recent activity"
        } else {
            "No activity matches your search"
        };
        list = list.push(Text::new(empty).size(typography::BODY_SM));
    } else {
        for activity in rows {
            list = list.push(view_activity_row(activity, now));
        }
    }

    Container::new(
        Column::new()
            .spacing(spacing::SM)
            .push(section_title("Recent activity"))
            .push(toolbar)
            .push(list),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(card_style)
    .into()
}

fn view_activity_row(activity: &Activity, now: chrono::DateTime<Utc>) -> Element<'_, Message> {
    let meta = format!(
        "{} · {} · {}",
        activity.kind,
        activity.user,
        text::format_time(activity.timestamp, now)
    );

    Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(activity.details.as_str()).size(typography::BODY))
        .push(muted_text(meta))
        .into()
}

fn view_help_modal(colors: &ColorScheme) -> Element<'static, Message> {
    let mut list = Column::new().spacing(spacing::XS);
    for (shortcut, keys) in Shortcut::ALL {
        list = list.push(
            Row::new()
                .spacing(spacing::MD)
                .push(
                    Container::new(Text::new(keys).size(typography::BODY))
                        .width(Length::Fixed(80.0)),
                )
                .push(Text::new(shortcut.description()).size(typography::BODY)),
        );
    }

    let card = Container::new(
        Column::new()
            .spacing(spacing::MD)
            .push(Text::new("Keyboard shortcuts").size(typography::TITLE_SM))
            .push(list)
            .push(
                button(Text::new("Close").size(typography::BODY))
                    .on_press(Message::CloseHelp)
                    .style(button::secondary),
            ),
    )
    .padding(spacing::LG)
    .style(modal_style);

    let backdrop_color = colors.overlay_background;
    mouse_area(
        Container::new(card)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(move |_theme: &Theme| container::Style {
                background: Some(backdrop_color.into()),
                ..Default::default()
            }),
    )
    .on_press(Message::CloseHelp)
    .into()
}

fn section_title(label: &str) -> Element<'_, Message> {
    Text::new(label).size(typography::TITLE_SM).into()
}

fn error_text(message: &str) -> Element<'_, Message> {
    Text::new(message)
        .size(typography::CAPTION)
        .style(|_theme: &Theme| iced::widget::text::Style {
            color: Some(palette::ERROR_500),
        })
        .into()
}

fn muted_text<'a>(content: String) -> Element<'a, Message> {
    Text::new(content)
        .size(typography::CAPTION)
        .style(|theme: &Theme| iced::widget::text::Style {
            color: Some(Color {
                a: 0.7,
                ..theme.palette().text
            }),
        })
        .into()
}

fn header_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.weak.color.into()),
        shadow: shadow::SM,
        ..Default::default()
    }
}

fn sidebar_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.weak.color.into()),
        border: iced::Border {
            color: palette.background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::NONE.into(),
        },
        ..Default::default()
    }
}

fn card_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.base.color.into()),
        border: iced::Border {
            color: palette.background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

fn modal_style(theme: &Theme) -> container::Style {
    container::Style {
        shadow: shadow::LG,
        border: iced::Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..card_style(theme)
    }
}
