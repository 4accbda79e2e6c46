// SPDX-License-Identifier: MPL-2.0
//! Application root state and the iced main loop.
//!
//! The `App` struct owns the [`Session`] plus the widget state that only makes
//! sense inside a window (the note editor buffer, the name field). Messages
//! are translated into session operations in [`update`]; timers are driven by
//! a tick subscription that only runs while something is pending.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config;
use crate::forms::{Form, FormField, FormId};
use crate::session::Session;
use crate::storage::Store;
use iced::widget::text_editor;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::time::Instant;

/// Form id of the dashboard note editor.
pub const NOTE_FORM_ID: &str = "notes";

/// Widget id of the activity search box.
pub const SEARCH_INPUT_ID: &str = "activity-search";

pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Note editor state: the validated form plus the multi-line body buffer.
pub struct NoteEditor {
    pub form: Form,
    pub body: text_editor::Content,
}

impl NoteEditor {
    fn new(draft: &str) -> Self {
        let mut form = Form::new(FormId::new(NOTE_FORM_ID))
            .with_field(FormField::new("title").required())
            .with_field(FormField::new("body").required());
        form.set_value("body", draft);
        Self {
            form,
            body: text_editor::Content::with_text(draft),
        }
    }

    fn title(&self) -> &str {
        self.form
            .field("title")
            .map(|field| field.value.as_str())
            .unwrap_or_default()
    }

    fn reset(&mut self) {
        *self = Self::new("");
    }
}

/// Root iced application state.
pub struct App {
    session: Session,
    note: NoteEditor,
    /// Contents of the user-name field in the sidebar.
    name_input: String,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("note_title", &self.note.title())
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot closure; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads config and store, then builds the session.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let now = Instant::now();
        let (mut config, config_warning) = config::load();
        if flags.heartbeat {
            config.notifications.heartbeat = Some(true);
        }
        let (store, store_warning) = Store::open();

        let mut session = Session::new(config, store, now);
        for warning in [config_warning, store_warning].into_iter().flatten() {
            session.warn(warning, now);
        }

        (Self::with_session(session), Task::none())
    }

    /// Builds the window state around an existing session, restoring the
    /// note draft.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        let draft = session.load_draft(&FormId::new(NOTE_FORM_ID));
        let name_input = session.user().to_string();
        Self {
            session,
            note: NoteEditor::new(&draft),
            name_input,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn title(&self) -> String {
        let title = self.note.title().trim();
        if title.is_empty() {
            "SmartStudy".to_string()
        } else {
            format!("{title} - SmartStudy")
        }
    }

    fn theme(&self) -> Theme {
        self.session.theme().to_iced()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.session.has_pending_timers()),
        ])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            session: &mut self.session,
            note: &mut self.note,
            name_input: &mut self.name_input,
            now: Instant::now(),
        };
        update::handle_message(&mut ctx, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            session: &self.session,
            note: &self.note,
            name_input: &self.name_input,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::progress::StatKind;
    use crate::session::THEME_CHANGE_ACTIVITY;
    use crate::shortcuts::Shortcut;
    use crate::ui::theming::ThemeMode;
    use std::time::Duration;

    fn app() -> App {
        App::with_session(Session::new(
            Config::default(),
            Store::in_memory(),
            Instant::now(),
        ))
    }

    #[test]
    fn toggle_theme_shortcut_switches_theme() {
        let mut app = app();
        let _ = app.update(Message::Shortcut(Shortcut::ToggleTheme));
        assert_eq!(app.session().theme(), ThemeMode::Light);
        assert_eq!(app.theme(), Theme::Light);
        assert_eq!(
            app.session().activity().iter().next().unwrap().kind,
            THEME_CHANGE_ACTIVITY
        );
    }

    #[test]
    fn escape_closes_help() {
        let mut app = app();
        let _ = app.update(Message::OpenHelp);
        assert!(app.session().modal_open());
        let _ = app.update(Message::Shortcut(Shortcut::CloseModal));
        assert!(!app.session().modal_open());
    }

    #[test]
    fn save_shortcut_validates_the_note() {
        let mut app = app();
        let _ = app.update(Message::Shortcut(Shortcut::Save));
        assert!(app.note.form.has_errors());

        let _ = app.update(Message::NoteTitleChanged("Cells".into()));
        app.note.form.set_value("body", "Mitochondria");
        let _ = app.update(Message::Shortcut(Shortcut::Save));
        assert!(app.session().activity().iter().any(|a| a.details == "Saved note: Cells"));
        assert_eq!(app.note.title(), "");
    }

    #[test]
    fn increment_stat_updates_counter() {
        let mut app = app();
        let _ = app.update(Message::IncrementStat(StatKind::Flashcards));
        assert_eq!(app.session().stat_count("flashcards"), 1);
    }

    #[test]
    fn saving_user_name_updates_session() {
        let mut app = app();
        let _ = app.update(Message::UserNameChanged("Ada".into()));
        let _ = app.update(Message::SaveUserName);
        assert_eq!(app.session().user(), "Ada");
    }

    #[test]
    fn draft_is_restored_on_startup() {
        let mut store = Store::in_memory();
        crate::autosave::save_draft(
            &mut store,
            &FormId::new(NOTE_FORM_ID),
            "unfinished".into(),
            chrono::Utc::now(),
        )
        .unwrap();
        let app = App::with_session(Session::new(Config::default(), store, Instant::now()));
        assert_eq!(app.note.body.text().trim_end(), "unfinished");
    }

    #[test]
    fn tick_drives_notification_expiry() {
        let mut app = app();
        let start = Instant::now();
        let _ = app.update(Message::ToggleMobileMenu);
        assert!(!app.session().sidebar_open());

        let id = app
            .session
            .show_notification("hello", crate::ui::notifications::Kind::Info, None, start);
        let _ = app.update(Message::Tick(start + Duration::from_secs(6)));
        let _ = app.update(Message::Tick(start + Duration::from_secs(7)));
        assert!(app.session().notifications().get(id).is_none());
    }
}
