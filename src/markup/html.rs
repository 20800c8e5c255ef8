//! Plain HTML writer with `data-applic-*` bindings

use std::fmt::Write;

use super::{
    css_string, escape, escape_script_json, ControlBinding, ControlElement, MarkupWriter,
    SelectOption, CLIENT_RUNTIME,
};

/// Emits HTML elements whose behaviour is described by data attributes.
///
/// Every control carries `data-applic-context`, `data-applic-domain` and
/// `data-applic-action`; tag-carrying elements add `data-applic-tag`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlWriter;

impl HtmlWriter {
    pub fn new() -> Self {
        Self
    }

    fn open(tag: &str, element: ControlElement<'_>, binding: ControlBinding<'_>) -> String {
        let mut out = format!(
            r#"<{tag} id="{}" name="{}" data-applic-context="{}" data-applic-domain="{}" data-applic-action="{}""#,
            escape(element.id),
            escape(element.name),
            escape(binding.context),
            escape(binding.domain),
            binding.action.as_str(),
        );
        for (key, value) in element.attributes {
            let _ = write!(out, r#" {}="{}""#, escape(key), escape(value));
        }
        out
    }

    fn input(
        kind: &str,
        element: ControlElement<'_>,
        binding: ControlBinding<'_>,
        tag: &str,
        value: &str,
        checked: bool,
    ) -> String {
        let mut out = Self::open("input", element, binding);
        let _ = write!(
            out,
            r#" type="{kind}" value="{}" data-applic-tag="{}""#,
            escape(value),
            escape(tag)
        );
        if checked {
            out.push_str(r#" checked="checked""#);
        }
        out.push_str(" />");
        out
    }
}

impl MarkupWriter for HtmlWriter {
    fn select(
        &self,
        element: ControlElement<'_>,
        binding: ControlBinding<'_>,
        options: &[SelectOption],
        selected: Option<usize>,
    ) -> String {
        let mut out = Self::open("select", element, binding);
        out.push('>');
        for (idx, option) in options.iter().enumerate() {
            let _ = write!(
                out,
                r#"<option value="{}" data-applic-tag="{}""#,
                escape(&option.value),
                escape(&option.tag)
            );
            if selected == Some(idx) {
                out.push_str(r#" selected="selected""#);
            }
            let _ = write!(out, ">{}</option>", escape(&option.label));
        }
        out.push_str("</select>");
        out
    }

    fn radio_button(
        &self,
        element: ControlElement<'_>,
        binding: ControlBinding<'_>,
        tag: &str,
        value: &str,
        checked: bool,
    ) -> String {
        Self::input("radio", element, binding, tag, value, checked)
    }

    fn check_box(
        &self,
        element: ControlElement<'_>,
        binding: ControlBinding<'_>,
        tag: &str,
        value: &str,
        checked: bool,
    ) -> String {
        Self::input("checkbox", element, binding, tag, value, checked)
    }

    fn link(
        &self,
        element: ControlElement<'_>,
        binding: ControlBinding<'_>,
        tag: &str,
        label: &str,
    ) -> String {
        let mut out = Self::open("a", element, binding);
        let _ = write!(
            out,
            r##" href="#" data-applic-tag="{}">{}</a>"##,
            escape(tag),
            escape(label)
        );
        out
    }

    fn area(&self, element: &str, id: &str, context: &str, body: &str) -> String {
        format!(
            r#"<{element} id="{}" data-applic-context="{}">{body}</{element}>"#,
            escape(id),
            escape(context),
        )
    }

    fn rules(&self, context: &str, json: &str) -> String {
        format!(
            r#"<script type="application/json" data-applic-rules="{}">{}</script>"#,
            escape(context),
            escape_script_json(json)
        )
    }

    fn initial_visibility(&self, context: &str, hidden: &[&str]) -> String {
        if hidden.is_empty() {
            return String::new();
        }
        let selectors: Vec<String> = hidden
            .iter()
            .map(|id| format!("[id={}]", css_string(id)))
            .collect();
        // the runtime's inline display overrides this once it has loaded
        format!(
            r#"<style data-applic-initial="{}">{}{{display:none}}</style>"#,
            escape(context),
            selectors.join(",")
        )
    }

    fn runtime(&self) -> String {
        format!("<script data-applic-runtime>{CLIENT_RUNTIME}</script>")
    }
}
