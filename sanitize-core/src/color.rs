/// Banner color validation

use crate::error::{Result, SanitizeError};
use regex::Regex;
use std::sync::LazyLock;

static HEX_COLOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}){1,2}$").expect("hex color pattern"));

/// Accept `#rgb` or `#rrggbb`. Absent or blank input stays absent; the case of
/// the hex digits is kept as given.
pub fn sanitize_color_format(raw: Option<&str>) -> Result<Option<String>> {
    let Some(color) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if !HEX_COLOR_PATTERN.is_match(color) {
        return Err(SanitizeError::InvalidBannerColor);
    }

    Ok(Some(color.to_string()))
}
