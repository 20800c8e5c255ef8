//! Markup emission for controls and areas
//!
//! The declaration context never builds HTML itself. It hands a
//! [`ControlBinding`] to a [`MarkupWriter`], and the writer decides how the
//! element looks. Bindings are plain data (domain, tag, action) so a single
//! fixed client-side handler can route every event to the evaluator.

mod html;

use std::borrow::Cow;

use crate::evaluator::UpdateMode;

pub use html::HtmlWriter;

/// Fixed client-side evaluator. It reads every rules payload on the page and
/// routes control events to it. Include it once per page.
pub const CLIENT_RUNTIME: &str = include_str!("runtime.js");

/// Extra HTML attributes passed through to the emitted element
pub type Attributes = Vec<(String, String)>;

/// What a control does to its domain when the user interacts with it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Replace the domain's tags (select, radio, link)
    Set,
    /// Add when checked, remove when cleared (checkbox)
    Toggle,
}

impl ControlAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Toggle => "toggle",
        }
    }

    /// Update a control event turns into; `checked` only matters for toggles
    pub fn update_mode(self, checked: bool) -> UpdateMode {
        match self {
            Self::Set => UpdateMode::Set,
            Self::Toggle if checked => UpdateMode::Add,
            Self::Toggle => UpdateMode::Remove,
        }
    }
}

/// Everything an emitted control needs to report its events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBinding<'a> {
    /// Id of the rendering context the control belongs to
    pub context: &'a str,
    pub domain: &'a str,
    pub action: ControlAction,
}

/// One option of a select control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Text shown to the user
    pub label: String,
    /// Tag activated when this option is chosen
    pub tag: String,
    /// Value submitted with the form
    pub value: String,
}

impl SelectOption {
    pub fn new(label: &str, tag: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            tag: tag.to_string(),
            value: value.to_string(),
        }
    }
}

/// Element-level details shared by every control kind
#[derive(Debug, Clone, Copy)]
pub struct ControlElement<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub attributes: &'a [(String, String)],
}

/// Renders controls, area wrappers and the rules payload
pub trait MarkupWriter {
    fn select(
        &self,
        element: ControlElement<'_>,
        binding: ControlBinding<'_>,
        options: &[SelectOption],
        selected: Option<usize>,
    ) -> String;

    fn radio_button(
        &self,
        element: ControlElement<'_>,
        binding: ControlBinding<'_>,
        tag: &str,
        value: &str,
        checked: bool,
    ) -> String;

    fn check_box(
        &self,
        element: ControlElement<'_>,
        binding: ControlBinding<'_>,
        tag: &str,
        value: &str,
        checked: bool,
    ) -> String;

    fn link(
        &self,
        element: ControlElement<'_>,
        binding: ControlBinding<'_>,
        tag: &str,
        label: &str,
    ) -> String;

    /// Wrap already-rendered markup in an area element
    fn area(&self, element: &str, id: &str, context: &str, body: &str) -> String;

    /// Embed the serialized rules for the page's evaluator
    fn rules(&self, context: &str, json: &str) -> String;

    /// Hide the areas the initial pass decided against, before any script runs
    fn initial_visibility(&self, context: &str, hidden: &[&str]) -> String;

    /// The client runtime element
    fn runtime(&self) -> String;
}

/// Element names are restricted to ASCII letters and digits, starting with a letter
pub fn is_valid_element_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape(input: &str) -> Cow<'_, str> {
    if !input.contains(&['&', '<', '>', '"', '\''][..]) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Quote a value as a CSS string
pub fn css_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    out.push('"');
    for c in input.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '<' => out.push_str("\\3c "),
            '\n' => out.push_str("\\a "),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Make JSON safe to place inside a `<script>` element
pub fn escape_script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_text_borrows() {
        assert!(matches!(escape("plain text"), Cow::Borrowed("plain text")));
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_toggle_follows_checked_state() {
        assert_eq!(ControlAction::Toggle.update_mode(true), UpdateMode::Add);
        assert_eq!(ControlAction::Toggle.update_mode(false), UpdateMode::Remove);
    }

    #[test]
    fn test_set_ignores_checked_state() {
        assert_eq!(ControlAction::Set.update_mode(true), UpdateMode::Set);
        assert_eq!(ControlAction::Set.update_mode(false), UpdateMode::Set);
    }

    #[test]
    fn test_element_names() {
        assert!(is_valid_element_name("div"));
        assert!(is_valid_element_name("h2"));
        assert!(!is_valid_element_name(""));
        assert!(!is_valid_element_name("2col"));
        assert!(!is_valid_element_name("div onclick=x"));
        assert!(!is_valid_element_name("my-widget"));
    }

    #[test]
    fn test_css_string() {
        assert_eq!(css_string("aplic4"), r#""aplic4""#);
        assert_eq!(css_string(r#"a"b\c<"#), r#""a\"b\\c\3c ""#);
    }

    #[test]
    fn test_runtime_understands_every_update_mode() {
        for mode in ["add", "remove", "set", "toggle"] {
            assert!(CLIENT_RUNTIME.contains(&format!(r#""{mode}""#)));
        }
        assert!(!CLIENT_RUNTIME.contains("</script"));
    }

    #[test]
    fn test_escape_script_json() {
        assert_eq!(
            escape_script_json(r#"{"tag":"</script>"}"#),
            r#"{"tag":"<\/script>"}"#
        );
    }
}
