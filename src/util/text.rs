/// Trim a user-edited name, substituting `placeholder` when nothing is left.
///
/// Idempotent: feeding the result back in returns it unchanged, as long as
/// the placeholder itself has no surrounding whitespace.
pub fn name_or_placeholder(raw: &str, placeholder: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        placeholder.trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Trim a name for creation; `None` if it is blank
pub fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_falls_back() {
        assert_eq!(name_or_placeholder("  Rope \n", "Untitled Item"), "Rope");
        assert_eq!(name_or_placeholder("   ", "Untitled Item"), "Untitled Item");
        assert_eq!(name_or_placeholder("", " Untitled "), "Untitled");
    }

    #[test]
    fn fallback_is_idempotent() {
        let once = name_or_placeholder("\t ", "Untitled Item");
        let twice = name_or_placeholder(&once, "Untitled Item");
        assert_eq!(once, twice);
    }

    #[test]
    fn non_blank_rejects_whitespace() {
        assert_eq!(non_blank(" Gear "), Some("Gear".to_string()));
        assert_eq!(non_blank(" \u{3000}\n"), None);
    }
}
