/// Mount point for the primary application content.
pub const APP_SELECTOR: &str = "#app";

/// Mount point for document-head mutations.
pub const HEAD_OUTLET_SELECTOR: &str = "head::after";

/// A top-level UI component registered against a mount-point selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootComponent {
    pub name: String,
    pub selector: String,
}

impl RootComponent {
    pub fn new(name: &str, selector: &str) -> Self {
        Self {
            name: name.to_string(),
            selector: selector.to_string(),
        }
    }
}

// Check whether a selector has a match in the hosting page markup.
// Supports the selector forms the bootstrap actually registers: an id
// selector, the head outlet, and a bare tag name.
pub fn selector_matches(markup: &str, selector: &str) -> bool {
    if let Some(id) = selector.strip_prefix('#') {
        return markup.contains(&format!("id=\"{}\"", id))
            || markup.contains(&format!("id='{}'", id));
    }
    if let Some(tag) = selector.strip_suffix("::after") {
        return has_tag(markup, tag);
    }
    has_tag(markup, selector)
}

fn has_tag(markup: &str, tag: &str) -> bool {
    let lower = markup.to_ascii_lowercase();
    let needle = format!("<{}", tag.to_ascii_lowercase());
    let mut start = 0;
    while let Some(pos) = lower[start..].find(&needle) {
        let end = start + pos + needle.len();
        // The tag name must end here, otherwise "<head" matches "<header".
        match lower.as_bytes().get(end) {
            None | Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n')
            | Some(b'/') => return true,
            _ => start += pos + 1,
        }
    }
    false
}
