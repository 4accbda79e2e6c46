// SPDX-License-Identifier: MPL-2.0
//! Message handling for the application.
//!
//! Every handler receives an [`UpdateContext`] borrowing the parts of `App`
//! it may touch, and returns the follow-up task (focus changes only).

use super::{Message, NoteEditor, SEARCH_INPUT_ID};
use crate::session::Session;
use crate::shortcuts::Shortcut;
use iced::widget::{operation, text_editor, Id};
use iced::Task;
use std::time::Instant;

/// Mutable view of the application state for one update.
pub struct UpdateContext<'a> {
    pub session: &'a mut Session,
    pub note: &'a mut NoteEditor,
    pub name_input: &'a mut String,
    /// Time at which the message is handled.
    pub now: Instant,
}

/// Routes a message to its handler.
pub fn handle_message(ctx: &mut UpdateContext<'_>, message: Message) -> Task<Message> {
    match message {
        Message::Notification(notification_message) => {
            ctx.session
                .handle_notification_message(&notification_message, ctx.now);
            Task::none()
        }
        Message::Tick(now) => {
            ctx.session.tick(now);
            Task::none()
        }
        Message::Shortcut(shortcut) => handle_shortcut(ctx, shortcut),
        Message::ToggleTheme => {
            ctx.session.toggle_theme(ctx.now);
            Task::none()
        }
        Message::ToggleMobileMenu => {
            ctx.session.toggle_mobile_menu();
            Task::none()
        }
        Message::OpenHelp => {
            ctx.session.open_modal();
            Task::none()
        }
        Message::CloseHelp => {
            ctx.session.close_modal();
            Task::none()
        }
        Message::NoteTitleChanged(title) => {
            ctx.note.form.set_value("title", title);
            Task::none()
        }
        Message::NoteBodyEdited(action) => {
            handle_body_edit(ctx, action);
            Task::none()
        }
        Message::SubmitNote => {
            submit_note(ctx);
            Task::none()
        }
        Message::SearchChanged(query) => {
            ctx.session.set_search_query(query, ctx.now);
            Task::none()
        }
        Message::ClearActivity => {
            ctx.session.clear_activity(ctx.now);
            Task::none()
        }
        Message::UserNameChanged(name) => {
            *ctx.name_input = name;
            Task::none()
        }
        Message::SaveUserName => {
            let name = ctx.name_input.clone();
            if !ctx.session.set_user_name(&name, ctx.now) {
                // Blank or unchanged: show the current name again.
                *ctx.name_input = ctx.session.user().to_string();
            }
            Task::none()
        }
        Message::IncrementStat(kind) => {
            ctx.session.update_progress(kind.as_str(), 1, ctx.now);
            Task::none()
        }
        Message::TooltipShow(anchor) => {
            if let Some(text) = super::view::tooltip_text(anchor) {
                ctx.session.tooltips_mut().show(anchor, text);
            }
            Task::none()
        }
        Message::TooltipHide(anchor) => {
            ctx.session.tooltips_mut().hide(anchor);
            Task::none()
        }
    }
}

fn handle_shortcut(ctx: &mut UpdateContext<'_>, shortcut: Shortcut) -> Task<Message> {
    tracing::debug!(?shortcut, "keyboard shortcut");
    match shortcut {
        Shortcut::Save => {
            submit_note(ctx);
            Task::none()
        }
        Shortcut::FocusSearch => operation::focus(Id::new(SEARCH_INPUT_ID)),
        Shortcut::ToggleTheme => {
            ctx.session.toggle_theme(ctx.now);
            Task::none()
        }
        Shortcut::CloseModal => {
            ctx.session.close_modal();
            Task::none()
        }
    }
}

fn handle_body_edit(ctx: &mut UpdateContext<'_>, action: text_editor::Action) {
    let is_edit = action.is_edit();
    ctx.note.body.perform(action);
    if is_edit {
        let text = ctx.note.body.text();
        ctx.note.form.set_value("body", text.as_str());
        ctx.session
            .on_draft_input(&ctx.note.form.id, text, ctx.now);
    }
}

fn submit_note(ctx: &mut UpdateContext<'_>) {
    if ctx.session.submit_note(&mut ctx.note.form, ctx.now) {
        ctx.note.reset();
    }
}
