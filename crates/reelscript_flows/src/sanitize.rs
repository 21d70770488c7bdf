//! Post-processing of model-written scripts.

use regex::Regex;
use std::sync::LazyLock;

// Hashtag tokens plus the horizontal space before them. A tag needs at least
// one letter, so numbered references like `#1` stay.
static HASHTAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]*#[\p{N}_]*[\p{L}\p{M}][\p{L}\p{M}\p{N}_]*").expect("Valid hashtag regex")
});

const BOLD_MARKER: &str = "**";

fn strip_once(text: &str) -> String {
    let without_bold = text.replace(BOLD_MARKER, "");
    HASHTAG.replace_all(&without_bold, "").trim().to_string()
}

/// Strip bold markers and hashtags, then trim.
///
/// The transform is repeated until the text stops changing, so applying it
/// to its own output is a no-op.
///
/// # Examples
///
/// ```
/// use reelscript_flows::sanitize_script;
///
/// let raw = "  **Hook:** Three ingredients. Zero excuses. #breakfast #healthy  ";
/// let clean = sanitize_script(raw);
/// assert_eq!(clean, "Hook: Three ingredients. Zero excuses.");
/// assert_eq!(sanitize_script(&clean), clean);
/// ```
pub fn sanitize_script(text: &str) -> String {
    let mut current = strip_once(text);
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_bold_markers() {
        assert_eq!(sanitize_script("**Bold** and **more**"), "Bold and more");
    }

    #[test]
    fn test_removes_hashtag_lines() {
        let raw = "Try this today.\n\n#food #reels #viral";
        assert_eq!(sanitize_script(raw), "Try this today.");
    }

    #[test]
    fn test_keeps_non_tag_hashes() {
        assert_eq!(sanitize_script("Step # 2: stir"), "Step # 2: stir");
        assert_eq!(sanitize_script("# Title"), "# Title");
    }

    #[test]
    fn test_keeps_numbered_references() {
        let raw = "The #1 mistake people make at breakfast. Tip #2: add oats.";
        assert_eq!(sanitize_script(raw), raw);
        assert_eq!(sanitize_script("Tip #1 #breakfast"), "Tip #1");
        assert_eq!(sanitize_script("Go #2024goals"), "Go");
    }

    #[test]
    fn test_unicode_hashtags() {
        assert_eq!(sanitize_script("नाश्ता तैयार #स्वस्थ"), "नाश्ता तैयार");
        assert_eq!(sanitize_script("Café time #café_vibes"), "Café time");
    }

    #[test]
    fn test_marker_split_hashtag_is_caught() {
        // Removing the bold marker exposes a hashtag
        assert_eq!(sanitize_script("Go #**viral**"), "Go");
    }

    #[test]
    fn test_idempotent_on_awkward_inputs() {
        let inputs = [
            "",
            "   ",
            "***",
            "****",
            "#",
            "##tag",
            "**#tag**",
            "a ** b",
            "line one  \n  #tag\n**line two**",
            "\u{2003}#tag text",
            "Tip #1",
            "#1#tag",
        ];
        for input in inputs {
            let once = sanitize_script(input);
            assert_eq!(sanitize_script(&once), once, "input: {input:?}");
            assert!(!once.contains(BOLD_MARKER), "input: {input:?}");
            assert!(!HASHTAG.is_match(&once), "input: {input:?}");
        }
    }
}
