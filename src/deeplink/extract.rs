use url::Url;

use crate::constants::TICKET_QUERY_PARAM;

/// Turn arbitrary scanned or pasted text into a candidate ticket
/// reference. Rules are tried in order, first match wins:
///
/// 1. empty input yields nothing;
/// 2. an HTTP(S) URL yields its `ticket` query parameter, or nothing if
///    the URL is malformed or the parameter is absent -- a URL never
///    falls through to the later rules;
/// 3. input containing `ticket=` yields the remainder, cut at the first
///    `&`, `#`, `?` or whitespace;
/// 4. anything else is taken verbatim as a raw identifier.
pub fn extract_ticket_reference(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lowered = trimmed.to_ascii_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        let parsed = Url::parse(trimmed).ok()?;
        return parsed
            .query_pairs()
            .find(|(key, _)| key.as_ref() == TICKET_QUERY_PARAM)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty());
    }

    if let Some(index) = trimmed.find("ticket=") {
        let rest = &trimmed[index + "ticket=".len()..];
        let end = rest
            .find(|c: char| c == '&' || c == '#' || c == '?' || c.is_whitespace())
            .unwrap_or(rest.len());
        let candidate = rest[..end].trim();
        return (!candidate.is_empty()).then(|| candidate.to_string());
    }

    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_round_trip() {
        let id = "9sFXC6iX6qG4zHBmteKSWJ71U2yJ7bsx49x7Zt9CVECX";
        assert_eq!(
            extract_ticket_reference(&format!("https://host/path?ticket={id}")).as_deref(),
            Some(id)
        );
        assert_eq!(
            extract_ticket_reference(&format!("http://host/?foo=1&ticket={id}&bar=2")).as_deref(),
            Some(id)
        );
    }

    #[test]
    fn query_fragment_round_trip() {
        assert_eq!(
            extract_ticket_reference("prefix ticket=ABC suffix").as_deref(),
            Some("ABC")
        );
        assert_eq!(
            extract_ticket_reference("ticket=ABC&other=1").as_deref(),
            Some("ABC")
        );
        assert_eq!(
            extract_ticket_reference("ticket=ABC#frag").as_deref(),
            Some("ABC")
        );
        assert_eq!(
            extract_ticket_reference("ticket=ABC?x").as_deref(),
            Some("ABC")
        );
    }

    #[test]
    fn raw_identifier_passes_through() {
        assert_eq!(
            extract_ticket_reference("  SomeBase58Value  ").as_deref(),
            Some("SomeBase58Value")
        );
    }

    #[test]
    fn negative_cases_yield_none() {
        assert_eq!(extract_ticket_reference(""), None);
        assert_eq!(extract_ticket_reference("   "), None);
        assert_eq!(extract_ticket_reference("https://host/path?other=1"), None);
        assert_eq!(extract_ticket_reference("ticket= &x"), None);
    }

    #[test]
    fn url_with_ticket_in_path_is_still_parsed_as_url() {
        // Rule ordering: the `ticket=` substring inside a URL path must
        // not short-circuit URL parsing.
        assert_eq!(
            extract_ticket_reference("https://host/ticket=abc/page?other=1"),
            None
        );
        assert_eq!(
            extract_ticket_reference("https://host/ticket=abc/page?ticket=T1").as_deref(),
            Some("T1")
        );
    }

    #[test]
    fn malformed_url_degrades_to_none() {
        assert_eq!(extract_ticket_reference("http://[not-a-url"), None);
    }
}
