// SPDX-License-Identifier: MPL-2.0
//! Key names used in the key/value store.
//!
//! Every key carries the `smartstudy_` prefix so the store can be shared with
//! data written by earlier versions of the application.

/// Prefix shared by every stored key.
pub const PREFIX: &str = "smartstudy_";

/// Current user name.
pub const USER: &str = "smartstudy_user";

/// Theme mode (`dark` or `light`).
pub const THEME: &str = "smartstudy_theme";

/// JSON array of activity records, newest first.
pub const ACTIVITY: &str = "smartstudy_activity";

/// Key for an arbitrary user preference, e.g. `preference("user")`.
#[must_use]
pub fn preference(name: &str) -> String {
    format!("{PREFIX}{name}")
}

/// Key holding the auto-saved draft of a form.
#[must_use]
pub fn draft(form_id: &str) -> String {
    format!("{PREFIX}draft_{form_id}")
}

/// Key holding the progress counter of a stat type.
#[must_use]
pub fn progress_count(stat_type: &str) -> String {
    format!("{PREFIX}{stat_type}_count")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_keys_match_preference_builder() {
        assert_eq!(preference("user"), USER);
        assert_eq!(preference("theme"), THEME);
        assert_eq!(preference("activity"), ACTIVITY);
    }

    #[test]
    fn derived_keys_follow_naming_pattern() {
        assert_eq!(draft("notes"), "smartstudy_draft_notes");
        assert_eq!(draft("default"), "smartstudy_draft_default");
        assert_eq!(progress_count("quizzes"), "smartstudy_quizzes_count");
    }
}
