//! Canonical key vocabulary and accelerator translation.
//!
//! Two deliberately separate lookup tables. Canonicalization maps raw key
//! labels (browser/UI style, any case) into the vocabulary used for storage,
//! comparison, and display. Accelerator translation maps canonical names into
//! the alternate vocabulary the OS hotkey registration call expects. The two
//! overlap but are not the same mapping; merging them would make round-trips
//! between display format and accelerator format silently lossy.

/// Map a raw key label to the canonical vocabulary.
///
/// Case-insensitive. Unknown labels pass through lowercased unchanged — a
/// plain character key is its own canonical name.
pub fn canonicalize(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let canonical = match lower.as_str() {
        "ctrl" | "control" => "control",
        "shift" => "shift",
        "alt" => "alt",
        "meta" | "cmd" | "command" => "meta",
        "esc" | "escape" => "escape",
        "return" | "enter" => "enter",
        "arrowup" | "up" => "up",
        "arrowdown" | "down" => "down",
        "arrowleft" | "left" => "left",
        "arrowright" | "right" => "right",
        _ => return lower,
    };
    canonical.to_string()
}

/// Map a canonical key name to the token expected in an accelerator string.
///
/// Documented inverse of [`canonicalize`] for the modifier subset. Applied
/// only when building the registration accelerator, never for display or
/// persistence.
pub fn accelerator_token(canonical: &str) -> String {
    let token = match canonical {
        "control" => "ctrl",
        "escape" => "esc",
        _ => return canonical.to_string(),
    };
    token.to_string()
}

/// Canonicalize a raw key list, dropping duplicates while preserving
/// first-seen order.
pub fn dedup_canonical(keys: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys {
        let canonical = canonicalize(key);
        if !out.contains(&canonical) {
            out.push(canonical);
        }
    }
    out
}

/// Format a key list for display: canonicalize, dedupe preserving order,
/// join with the given separator.
pub fn format_combo(keys: &[String], separator: &str) -> String {
    dedup_canonical(keys).join(separator)
}

/// Build the accelerator string for an OS hotkey registration.
///
/// Canonicalizes and dedupes, then translates each name through
/// [`accelerator_token`] and joins with `+`.
pub fn accelerator(keys: &[String]) -> String {
    dedup_canonical(keys)
        .iter()
        .map(|k| accelerator_token(k))
        .collect::<Vec<_>>()
        .join("+")
}
