// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` owns the notification container and every timer attached to
//! it. Each visible card holds exactly one auto-dismiss timer; dismissing a
//! card cancels that timer and replaces it with a removal timer that fires
//! once the exit transition is over. Because the card's phase changes before
//! any new timer is scheduled, a manual dismiss racing an expiry only takes
//! effect once.

use super::notification::{Kind, Notification, NotificationId};
use crate::config::{
    Config, DEFAULT_EXIT_TRANSITION_MS, DEFAULT_MIN_NOTIFICATION_DURATION_MS,
    DEFAULT_NOTIFICATION_DURATION_MS,
};
use crate::timer::{Scheduler, TimerHandle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Messages for notification state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific notification by ID (close button).
    Dismiss(NotificationId),
}

/// Durations governing the notification lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Used when `show` is called without a duration.
    pub default_duration: Duration,
    /// Requested durations below this are raised to it.
    pub min_duration: Duration,
    /// Delay between dismissal and removal from the container.
    pub exit_transition: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            default_duration: Duration::from_millis(DEFAULT_NOTIFICATION_DURATION_MS),
            min_duration: Duration::from_millis(DEFAULT_MIN_NOTIFICATION_DURATION_MS),
            exit_transition: Duration::from_millis(DEFAULT_EXIT_TRANSITION_MS),
        }
    }
}

impl Timing {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_duration: config.default_notification_duration(),
            min_duration: config.min_notification_duration(),
            exit_transition: config.exit_transition(),
        }
    }
}

/// Canned messages used by the heartbeat.
const HEARTBEAT_MESSAGES: &[&str] = &[
    "Time for a short study break?",
    "New study tip: review your flashcards before a quiz",
    "Your progress is saved automatically",
    "Try summarizing a chapter in your own words",
];

/// Simulated notification traffic: every `interval`, shows a canned message
/// with probability `probability`.
#[derive(Debug)]
pub struct Heartbeat {
    interval: Duration,
    probability: f64,
    rng: StdRng,
}

impl Heartbeat {
    /// Creates a heartbeat seeded from the operating system.
    #[must_use]
    pub fn new(interval: Duration, probability: f64) -> Self {
        Self::with_rng(interval, probability, StdRng::from_os_rng())
    }

    /// Creates a heartbeat with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(interval: Duration, probability: f64, seed: u64) -> Self {
        Self::with_rng(interval, probability, StdRng::seed_from_u64(seed))
    }

    fn with_rng(interval: Duration, probability: f64, rng: StdRng) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self {
            interval,
            probability,
            rng,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.heartbeat_interval(), config.heartbeat_probability())
    }

    /// Rolls the dice; returns the message to show, if any.
    fn roll(&mut self) -> Option<&'static str> {
        if self.rng.random_bool(self.probability) {
            let index = self.rng.random_range(0..HEARTBEAT_MESSAGES.len());
            Some(HEARTBEAT_MESSAGES[index])
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Expire(NotificationId),
    Remove(NotificationId),
    Heartbeat,
}

#[derive(Debug)]
struct Entry {
    notification: Notification,
    /// Auto-dismiss timer while visible, removal timer while exiting.
    timer: TimerHandle,
}

/// Owns the notification container.
#[derive(Debug)]
pub struct Manager {
    /// Active notifications, oldest first (newest appended last).
    container: Vec<Entry>,
    scheduler: Scheduler<Timer>,
    timing: Timing,
    next_id: u64,
    heartbeat: Option<Heartbeat>,
    heartbeat_timer: Option<TimerHandle>,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new(Timing::default())
    }
}

impl Manager {
    #[must_use]
    pub fn new(timing: Timing) -> Self {
        Self {
            container: Vec::new(),
            scheduler: Scheduler::new(),
            timing,
            next_id: 0,
            heartbeat: None,
            heartbeat_timer: None,
        }
    }

    #[must_use]
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Shows `message` and schedules its auto-dismissal.
    ///
    /// `duration` defaults to the configured default and is raised to the
    /// configured floor when shorter (zero included).
    pub fn show(
        &mut self,
        message: impl Into<String>,
        kind: Kind,
        duration: Option<Duration>,
        now: Instant,
    ) -> NotificationId {
        let duration = duration
            .unwrap_or(self.timing.default_duration)
            .max(self.timing.min_duration);
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let timer = self.scheduler.schedule(now, duration, Timer::Expire(id));
        let notification = Notification::new(id, kind, message, duration);
        tracing::debug!(id = id.0, ?kind, ?duration, "notification shown");
        self.container.push(Entry {
            notification,
            timer,
        });
        id
    }

    /// Dismisses a notification.
    ///
    /// Idempotent: dismissing a notification that is already leaving, or that
    /// no longer exists, does nothing. Returns `true` if this call started
    /// the exit transition.
    pub fn dismiss(&mut self, id: NotificationId, now: Instant) -> bool {
        let Some(entry) = self
            .container
            .iter_mut()
            .find(|entry| entry.notification.id() == id)
        else {
            return false;
        };
        if entry.notification.is_exiting() {
            return false;
        }

        self.scheduler.cancel(entry.timer);
        entry.notification.begin_exit();
        entry.timer = self
            .scheduler
            .schedule(now, self.timing.exit_transition, Timer::Remove(id));
        tracing::debug!(id = id.0, "notification dismissed");
        true
    }

    /// Fires every timer due at `now`.
    pub fn tick(&mut self, now: Instant) {
        for timer in self.scheduler.take_due(now) {
            match timer {
                Timer::Expire(id) => {
                    self.dismiss(id, now);
                }
                Timer::Remove(id) => self.remove(id),
                Timer::Heartbeat => self.beat(now),
            }
        }
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: &Message, now: Instant) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id, now);
            }
        }
    }

    /// Starts simulated traffic. Replaces any running heartbeat.
    pub fn enable_heartbeat(&mut self, heartbeat: Heartbeat, now: Instant) {
        self.disable_heartbeat();
        self.heartbeat_timer = Some(self.scheduler.schedule(
            now,
            heartbeat.interval,
            Timer::Heartbeat,
        ));
        self.heartbeat = Some(heartbeat);
        tracing::info!("notification heartbeat enabled");
    }

    pub fn disable_heartbeat(&mut self) {
        if let Some(timer) = self.heartbeat_timer.take() {
            self.scheduler.cancel(timer);
        }
        self.heartbeat = None;
    }

    #[must_use]
    pub fn heartbeat_enabled(&self) -> bool {
        self.heartbeat.is_some()
    }

    /// Returns the notifications in the container, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.container.iter().map(|entry| &entry.notification)
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.visible().find(|notification| notification.id() == id)
    }

    /// Returns the number of notifications in the container.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.container.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.container.is_empty()
    }

    /// Returns whether any timer (card or heartbeat) is waiting to fire.
    #[must_use]
    pub fn has_pending_timers(&self) -> bool {
        !self.scheduler.is_empty()
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    /// Removes every notification and cancels their timers.
    pub fn clear(&mut self) {
        for entry in self.container.drain(..) {
            self.scheduler.cancel(entry.timer);
        }
    }

    fn remove(&mut self, id: NotificationId) {
        let before = self.container.len();
        self.container.retain(|entry| entry.notification.id() != id);
        if self.container.len() < before {
            tracing::debug!(id = id.0, "notification removed");
        }
    }

    fn beat(&mut self, now: Instant) {
        let Some(heartbeat) = self.heartbeat.as_mut() else {
            return;
        };
        let interval = heartbeat.interval;
        let message = heartbeat.roll();
        self.heartbeat_timer = Some(self.scheduler.schedule(now, interval, Timer::Heartbeat));
        if let Some(message) = message {
            self.show(message, Kind::Info, None, now);
        }
    }
}
