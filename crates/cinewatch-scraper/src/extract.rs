//! Marker-bounded extraction of the embedded schedule block.
//!
//! The schedule data lives inside a third-party `<script>` body, bracketed
//! by two fixed textual markers. Extraction is deliberately this simple: a
//! miss means the upstream page changed shape, which the caller surfaces as
//! a run-aborting condition rather than a crash.

use regex::Regex;

/// Returns the substring of `text` strictly between the first occurrence of
/// `start_marker` and the first occurrence of `end_marker` after it, both
/// markers excluded.
///
/// Returns `None` when either marker is absent or the end marker only occurs
/// before the start marker. A `None` is a valid "nothing found" result, not
/// an error. Pure and deterministic.
#[must_use]
pub fn extract_block<'a>(text: &'a str, start_marker: &str, end_marker: &str) -> Option<&'a str> {
    let start = text.find(start_marker)?;
    let block_start = start + start_marker.len();
    let block_len = text[block_start..].find(end_marker)?;
    Some(&text[block_start..block_start + block_len])
}

/// Concatenates the bodies of all `<script>` elements in `html`, in document
/// order.
///
/// Marker search runs over this combined text, matching how the schedule
/// block is located regardless of which script tag carries it.
#[must_use]
pub fn collect_script_text(html: &str) -> String {
    let script_re = Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").expect("valid regex");
    let mut text = String::new();
    for cap in script_re.captures_iter(html) {
        if let Some(m) = cap.get(1) {
            text.push_str(m.as_str());
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_substring_between_markers() {
        let text = "<script>moment.locale('it') var days = {}; function gotToBuyPage(pid) {}</script>";
        let block = extract_block(text, "moment.locale('it')", "function gotToBuyPage(pid) {");
        assert_eq!(block, Some(" var days = {}; "));
    }

    #[test]
    fn missing_start_marker_returns_none() {
        assert_eq!(extract_block("var days = {}; END", "START", "END"), None);
    }

    #[test]
    fn missing_end_marker_returns_none() {
        assert_eq!(extract_block("START var days = {};", "START", "END"), None);
    }

    #[test]
    fn end_marker_only_before_start_returns_none() {
        assert_eq!(extract_block("END then START", "START", "END"), None);
    }

    #[test]
    fn uses_first_occurrence_of_each_marker() {
        let block = extract_block("START one END START two END", "START", "END");
        assert_eq!(block, Some(" one "));
    }

    #[test]
    fn adjacent_markers_yield_empty_block() {
        assert_eq!(extract_block("STARTEND", "START", "END"), Some(""));
    }

    #[test]
    fn end_marker_overlapping_start_is_found_after_it() {
        // The end-marker search begins after the start marker, so a marker
        // pair sharing text does not self-match.
        assert_eq!(extract_block("ABAB", "AB", "AB"), Some(""));
    }

    #[test]
    fn is_deterministic() {
        let text = "x START y END z";
        let first = extract_block(text, "START", "END");
        let second = extract_block(text, "START", "END");
        assert_eq!(first, second);
    }

    #[test]
    fn collects_all_script_bodies_in_order() {
        let html = "<html><script>one</script><p>skip</p><script type=\"text/javascript\">two</script></html>";
        assert_eq!(collect_script_text(html), "onetwo");
    }

    #[test]
    fn script_collection_spans_newlines() {
        let html = "<script>\nvar days = {};\n</script>";
        assert_eq!(collect_script_text(html), "\nvar days = {};\n");
    }

    #[test]
    fn no_scripts_yields_empty_text() {
        assert_eq!(collect_script_text("<html><body>hi</body></html>"), "");
    }
}
