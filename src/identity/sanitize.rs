use sha1::{Digest, Sha1};

/// Separator between identifier segments.
pub const SEGMENT_SEPARATOR: char = '.';

/// Lowercase a label, turn whitespace runs into single hyphens and drop
/// everything outside `[a-z0-9-]`.
///
/// Stripped characters do not split words (`"Save & Close"` becomes
/// `"save-close"`, `"e-mail"` stays `"e-mail"`). Leading and trailing
/// hyphens never survive, so the function is idempotent.
pub fn sanitize_label(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_hyphen = false;

    for c in raw.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        }
    }

    out
}

/// Sanitized label cut to at most `max` characters, without a dangling hyphen.
pub fn label_token(raw: &str, max: usize) -> Option<String> {
    let sanitized = sanitize_label(raw);
    if sanitized.is_empty() {
        return None;
    }
    let cut: String = sanitized.chars().take(max).collect();
    Some(cut.trim_end_matches('-').to_string())
}

pub fn text_fingerprint(text: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// First 8 hex characters of the SHA-1 fingerprint.
pub fn short_fingerprint(text: &str) -> String {
    text_fingerprint(text)[..8].to_string()
}

/// Join non-empty segments with `.`, collapsing a segment that repeats its
/// predecessor (case-insensitive) so nesting never yields `list.list`.
pub fn join_segments<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut kept: Vec<String> = Vec::new();
    for segment in segments {
        let segment = segment.as_ref().trim();
        if segment.is_empty() {
            continue;
        }
        if kept
            .last()
            .is_some_and(|prev| prev.to_lowercase() == segment.to_lowercase())
        {
            continue;
        }
        kept.push(segment.to_string());
    }
    kept.join(&SEGMENT_SEPARATOR.to_string())
}

/// Append every non-empty token to `base`, repeats included.
pub fn append_segments<S: AsRef<str>>(base: String, tokens: &[S]) -> String {
    let mut out = base;
    for token in tokens {
        let token = token.as_ref().trim();
        if token.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(SEGMENT_SEPARATOR);
        }
        out.push_str(token);
    }
    out
}

/// Keep `id` within `max` characters.
///
/// Over-long identifiers are cut and suffixed with a fingerprint of the
/// full text, so two long ids sharing a prefix still differ.
pub fn enforce_length(id: String, max: usize) -> String {
    if id.chars().count() <= max {
        return id;
    }
    let fingerprint = short_fingerprint(&id);
    let keep = max.saturating_sub(fingerprint.len() + 1);
    let head: String = id.chars().take(keep).collect();
    let head = head.trim_end_matches(['-', SEGMENT_SEPARATOR]);
    if head.is_empty() {
        fingerprint
    } else {
        format!("{}-{}", head, fingerprint)
    }
}
