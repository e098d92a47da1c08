/// Free-text and chat message sanitization
///
/// Content in this module is cleaned, never rejected: unsafe markup is
/// neutralized and whatever remains is returned.

use ammonia::Builder;
use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// UGC policy: ammonia's default safe tag set, with links forced to
/// `rel="noopener noreferrer nofollow"` and limited to web and mail schemes.
static UGC_POLICY: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut policy = Builder::default();
    policy
        .link_rel(Some("noopener noreferrer nofollow"))
        .url_schemes(HashSet::from(["http", "https", "mailto"]));
    policy
});

/// NFKC-normalize a string.
pub fn normalize_unicode(input: &str) -> String {
    input.nfkc().collect()
}

/// Run the UGC policy over `input` and trim what is left.
pub fn clean_html(input: &str) -> String {
    UGC_POLICY.clean(input).to_string().trim().to_string()
}

/// Clean optional free text.
///
/// Absent or blank input stays absent, and so does text that cleans down to
/// nothing (for example a lone `<script>` block).
pub fn sanitize_text(text: Option<&str>) -> Option<String> {
    let trimmed = text?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = clean_html(trimmed);
    if cleaned.is_empty() {
        return None;
    }

    Some(cleaned)
}

/// Upper bound on normalize-then-clean rounds for a single message.
const MAX_MESSAGE_PASSES: usize = 4;

/// Normalize and clean a chat message. Interior whitespace and line breaks
/// are kept as typed.
///
/// Cleaning decodes character references, which can produce compatibility
/// characters (`&#65308;` is `＜`), so normalization and cleaning repeat
/// until the output no longer changes.
pub fn sanitize_message_content(content: &str) -> String {
    let mut cleaned = clean_html(&normalize_unicode(content.trim()));

    for _ in 1..MAX_MESSAGE_PASSES {
        let normalized = normalize_unicode(&cleaned);
        if normalized == cleaned {
            break;
        }
        cleaned = clean_html(&normalized);
    }

    cleaned
}
