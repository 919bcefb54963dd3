//! Signal extraction from agent output
//!
//! The agent communicates back to the controller through literal bracket
//! tags embedded in its free-form output: `<ralph-promise>...</ralph-promise>`
//! carries the completion promise, `<ralph-complete>true</ralph-complete>`
//! (or `false`) carries the completion judgment. Matching is exact and
//! case-sensitive; the first well-formed occurrence of each marker kind
//! wins, and malformed or unterminated tags are skipped.

const PROMISE_OPEN: &str = "<ralph-promise>";
const PROMISE_CLOSE: &str = "</ralph-promise>";
const COMPLETE_OPEN: &str = "<ralph-complete>";
const COMPLETE_CLOSE: &str = "</ralph-complete>";

/// Markers extracted from one message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedSignals {
    /// Promise text, whitespace-trimmed
    pub promise: Option<String>,
    /// Completion judgment
    pub complete: Option<bool>,
}

impl ParsedSignals {
    /// True when no marker was found
    pub fn is_empty(&self) -> bool {
        self.promise.is_none() && self.complete.is_none()
    }
}

/// Scan a message's text for both marker kinds
pub fn scan(text: &str) -> ParsedSignals {
    ParsedSignals {
        promise: scan_promise(text),
        complete: scan_complete(text),
    }
}

/// Scan the text-typed segments of a message, joined in stream order
pub fn scan_segments<S: AsRef<str>>(segments: &[S]) -> ParsedSignals {
    let text = segments
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    scan(&text)
}

fn scan_promise(text: &str) -> Option<String> {
    let open = text.find(PROMISE_OPEN)?;
    let body_start = open + PROMISE_OPEN.len();
    let body_len = text[body_start..].find(PROMISE_CLOSE)?;
    Some(text[body_start..body_start + body_len].trim().to_string())
}

fn scan_complete(text: &str) -> Option<bool> {
    let mut from = 0;
    // An open tag whose body is not exactly true/false is skipped, so a
    // later well-formed marker can still be honored.
    while let Some(pos) = text[from..].find(COMPLETE_OPEN) {
        let body_start = from + pos + COMPLETE_OPEN.len();
        let rest = &text[body_start..];
        if let Some(tail) = rest.strip_prefix("true")
            && tail.starts_with(COMPLETE_CLOSE)
        {
            return Some(true);
        }
        if let Some(tail) = rest.strip_prefix("false")
            && tail.starts_with(COMPLETE_CLOSE)
        {
            return Some(false);
        }
        from = body_start;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_markers() {
        let signals = scan("I am still working on the task.");
        assert!(signals.is_empty());
    }

    #[test]
    fn test_promise_extraction() {
        let signals = scan("Here it is: <ralph-promise>all tests pass</ralph-promise>");
        assert_eq!(signals.promise.as_deref(), Some("all tests pass"));
        assert!(signals.complete.is_none());
    }

    #[test]
    fn test_promise_trims_whitespace() {
        let signals = scan("<ralph-promise>\n  the build is green  \n</ralph-promise>");
        assert_eq!(signals.promise.as_deref(), Some("the build is green"));
    }

    #[test]
    fn test_promise_spans_lines() {
        let signals = scan("<ralph-promise>line one\nline two</ralph-promise>");
        assert_eq!(signals.promise.as_deref(), Some("line one\nline two"));
    }

    #[test]
    fn test_promise_unterminated_tag_ignored() {
        let signals = scan("<ralph-promise>never closed");
        assert!(signals.promise.is_none());
    }

    #[test]
    fn test_promise_first_occurrence_wins() {
        let signals = scan(
            "<ralph-promise>first</ralph-promise> and <ralph-promise>second</ralph-promise>",
        );
        assert_eq!(signals.promise.as_deref(), Some("first"));
    }

    #[test]
    fn test_promise_nested_open_tag_kept_as_text() {
        // Content runs from the first open tag to the first close tag
        let signals = scan("<ralph-promise>a <ralph-promise>b</ralph-promise>");
        assert_eq!(signals.promise.as_deref(), Some("a <ralph-promise>b"));
    }

    #[test]
    fn test_complete_true() {
        let signals = scan("Done. <ralph-complete>true</ralph-complete>");
        assert_eq!(signals.complete, Some(true));
    }

    #[test]
    fn test_complete_false() {
        let signals = scan("<ralph-complete>false</ralph-complete> still going");
        assert_eq!(signals.complete, Some(false));
    }

    #[test]
    fn test_complete_rejects_other_bodies() {
        assert!(scan("<ralph-complete>maybe</ralph-complete>").complete.is_none());
        assert!(scan("<ralph-complete>TRUE</ralph-complete>").complete.is_none());
        assert!(scan("<ralph-complete> true </ralph-complete>").complete.is_none());
        assert!(scan("<ralph-complete>falsetto</ralph-complete>").complete.is_none());
    }

    #[test]
    fn test_complete_unterminated_tag_ignored() {
        assert!(scan("<ralph-complete>true").complete.is_none());
    }

    #[test]
    fn test_complete_first_wellformed_wins() {
        let signals = scan(
            "<ralph-complete>perhaps</ralph-complete><ralph-complete>true</ralph-complete>\
             <ralph-complete>false</ralph-complete>",
        );
        assert_eq!(signals.complete, Some(true));
    }

    #[test]
    fn test_both_markers_in_one_message() {
        let signals = scan(
            "<ralph-promise>docs regenerate cleanly</ralph-promise>\n\
             checking...\n<ralph-complete>false</ralph-complete>",
        );
        assert_eq!(signals.promise.as_deref(), Some("docs regenerate cleanly"));
        assert_eq!(signals.complete, Some(false));
    }

    #[test]
    fn test_case_sensitive_tags() {
        assert!(scan("<RALPH-PROMISE>x</RALPH-PROMISE>").is_empty());
        assert!(scan("<Ralph-Complete>true</Ralph-Complete>").is_empty());
    }

    #[test]
    fn test_scan_segments_joined_in_order() {
        let segments = vec![
            "part one <ralph-promise>the lint".to_string(),
            "passes</ralph-promise>".to_string(),
        ];
        // Segments are joined with newlines before scanning
        let signals = scan_segments(&segments);
        assert_eq!(signals.promise.as_deref(), Some("the lint\npasses"));
    }

    #[test]
    fn test_scan_segments_empty() {
        let segments: Vec<String> = vec![];
        assert!(scan_segments(&segments).is_empty());
    }
}
