// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use crate::config::TICK_INTERVAL_MS;
use crate::shortcuts;
use iced::{event, keyboard, time, Subscription};
use std::time::Duration;

/// Routes key presses bound to a shortcut.
///
/// Shortcuts fire even when a text field has focus: letter shortcuts need
/// the command modifier, which text fields do not consume for these keys.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| {
        if let event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) = event
        {
            shortcuts::from_key_press(&key, modifiers).map(Message::Shortcut)
        } else {
            None
        }
    })
}

/// Creates a periodic tick subscription for notification expiry, draft
/// auto-save and search debouncing. Idle sessions get no ticks.
pub fn create_tick_subscription(has_pending_timers: bool) -> Subscription<Message> {
    if has_pending_timers {
        time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
