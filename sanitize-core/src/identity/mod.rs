/// Identity strings: usernames, hall names and display names

use crate::error::{Result, SanitizeError};
use crate::text::normalize_unicode;
use regex::Regex;
use std::sync::LazyLock;

pub const DISPLAY_NAME_MIN_CHARS: usize = 3;
pub const DISPLAY_NAME_MAX_CHARS: usize = 32;

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_.-]{3,32}$").expect("username pattern"));

static HALL_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_.\- ]{3,32}$").expect("hall name pattern"));

/// Trim and lowercase a username, then require `[a-z0-9_.-]{3,32}`.
pub fn sanitize_username(raw: &str) -> Result<String> {
    let username = raw.trim().to_lowercase();

    if !USERNAME_PATTERN.is_match(&username) {
        return Err(SanitizeError::InvalidUsername);
    }

    Ok(username)
}

/// Hall names keep their case; only surrounding whitespace is removed.
pub fn sanitize_hall_name(raw: &str) -> Result<String> {
    let name = raw.trim();

    if !HALL_NAME_PATTERN.is_match(name) {
        return Err(SanitizeError::InvalidHallName);
    }

    Ok(name.to_string())
}

/// Normalize a human-facing display name.
///
/// The name is trimmed, NFKC-normalized and has every whitespace run
/// collapsed to a single ASCII space. Length is counted in code points so
/// that non-Latin scripts are not penalized for their UTF-8 width.
pub fn sanitize_display_name(raw: &str) -> Result<String> {
    let normalized = normalize_unicode(raw.trim());
    let name = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

    if name.is_empty() {
        return Err(SanitizeError::InvalidDisplayName);
    }

    let length = name.chars().count();
    if !(DISPLAY_NAME_MIN_CHARS..=DISPLAY_NAME_MAX_CHARS).contains(&length) {
        return Err(SanitizeError::InvalidDisplayName);
    }

    Ok(name)
}
