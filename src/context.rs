//! Render-time declaration context
//!
//! A page template creates one [`ApplicabilityContext`], declares its
//! controls and areas through it, and finally emits the rules payload that
//! the page's evaluator is loaded from:
//!
//! ```
//! use applicability::{ApplicabilityContext, ControlOptions, SelectOption};
//!
//! let mut ctx = ApplicabilityContext::new();
//! let page = ctx
//!     .render(|ctx| {
//!         let mut html = ctx.select_tag(
//!             "size",
//!             &[
//!                 SelectOption::new("Small", "small", "s"),
//!                 SelectOption::new("Large", "large", "l"),
//!             ],
//!             Some("l"),
//!             ControlOptions::default(),
//!         );
//!         html += &ctx.applies_to("div", &["large"], |_| "Large only".to_string())?;
//!         Ok(html)
//!     })
//!     .unwrap();
//! assert!(page.contains("Large only"));
//! ```

use crate::config::ApplicabilityConfig;
use crate::error::{ApplicabilityError, Result};
use crate::evaluator::{Evaluator, VisibilityMap};
use crate::ids::{IdSource, PageIdCounter};
use crate::markup::{
    is_valid_element_name, Attributes, ControlAction, ControlBinding, ControlElement, HtmlWriter,
    MarkupWriter, SelectOption,
};
use crate::state::{CombineMode, DisplayKind, PageRules, Registry, TagSet};

/// Per-control settings: an explicit id and pass-through attributes
#[derive(Debug, Clone, Default)]
pub struct ControlOptions {
    pub id: Option<String>,
    pub attributes: Attributes,
}

impl ControlOptions {
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }
}

/// Collects declarations for one page and renders their markup
#[derive(Debug)]
pub struct ApplicabilityContext<W: MarkupWriter = HtmlWriter, I: IdSource = PageIdCounter> {
    id: String,
    registry: Registry,
    writer: W,
    ids: I,
    pretty_rules: bool,
}

impl ApplicabilityContext {
    pub fn new() -> Self {
        Self::with_parts(HtmlWriter, PageIdCounter::default())
    }

    /// Build with the id scheme and output options from a config
    pub fn from_config(config: &ApplicabilityConfig) -> Self {
        let mut ctx = Self::with_parts(
            HtmlWriter,
            PageIdCounter::new(config.id_prefix(), config.first_id()),
        );
        ctx.pretty_rules = config.pretty_rules();
        ctx
    }
}

impl Default for ApplicabilityContext {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: MarkupWriter, I: IdSource> ApplicabilityContext<W, I> {
    pub fn with_parts(writer: W, mut ids: I) -> Self {
        let id = ids.next_id();
        Self {
            id,
            registry: Registry::new(),
            writer,
            ids,
            pretty_rules: false,
        }
    }

    /// Id of this context; every emitted control and area refers to it
    pub fn context_id(&self) -> &str {
        &self.id
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// A select whose options each activate one tag.
    ///
    /// The default is the first option whose value equals `default`, or the
    /// first option when nothing matches.
    pub fn select_tag(
        &mut self,
        name: &str,
        options: &[SelectOption],
        default: Option<&str>,
        control: ControlOptions,
    ) -> String {
        let selected = if options.is_empty() {
            None
        } else {
            Some(
                default
                    .and_then(|key| options.iter().position(|o| o.value == key))
                    .unwrap_or(0),
            )
        };
        let defaults: TagSet = selected
            .map(|idx| options[idx].tag.as_str())
            .into_iter()
            .collect();
        self.registry.register_domain(name, &defaults);

        let id = self.control_id(&control);
        self.writer.select(
            ControlElement {
                id: &id,
                name,
                attributes: &control.attributes,
            },
            ControlBinding {
                context: &self.id,
                domain: name,
                action: ControlAction::Set,
            },
            options,
            selected,
        )
    }

    /// A radio button; checking it makes `tag` the domain's only tag
    pub fn radio_button_tag(
        &mut self,
        name: &str,
        tag: &str,
        value: &str,
        checked: bool,
        control: ControlOptions,
    ) -> String {
        self.declare_default(name, tag, checked);
        let id = self.control_id(&control);
        self.writer.radio_button(
            ControlElement {
                id: &id,
                name,
                attributes: &control.attributes,
            },
            ControlBinding {
                context: &self.id,
                domain: name,
                action: ControlAction::Set,
            },
            tag,
            value,
            checked,
        )
    }

    /// A checkbox that adds `tag` when checked and removes it when cleared
    pub fn check_box_tag(
        &mut self,
        name: &str,
        tag: &str,
        value: &str,
        checked: bool,
        control: ControlOptions,
    ) -> String {
        self.declare_default(name, tag, checked);
        let id = self.control_id(&control);
        self.writer.check_box(
            ControlElement {
                id: &id,
                name,
                attributes: &control.attributes,
            },
            ControlBinding {
                context: &self.id,
                domain: name,
                action: ControlAction::Toggle,
            },
            tag,
            value,
            checked,
        )
    }

    /// A link that sets `tag` as the domain's only tag when clicked
    pub fn link_to(&mut self, label: &str, domain: &str, tag: &str, control: ControlOptions) -> String {
        self.registry.register_domain(domain, &TagSet::new());
        let id = self.control_id(&control);
        self.writer.link(
            ControlElement {
                id: &id,
                name: domain,
                attributes: &control.attributes,
            },
            ControlBinding {
                context: &self.id,
                domain,
                action: ControlAction::Set,
            },
            tag,
            label,
        )
    }

    /// Area shown when any of `tags` is active
    pub fn applies_to<F>(&mut self, element: &str, tags: &[&str], body: F) -> Result<String>
    where
        F: FnOnce(&mut Self) -> String,
    {
        self.applies_to_full(element, Some(CombineMode::Any), tags, body)
    }

    /// Area shown only when all of `tags` are active
    pub fn applies_to_all<F>(&mut self, element: &str, tags: &[&str], body: F) -> Result<String>
    where
        F: FnOnce(&mut Self) -> String,
    {
        self.applies_to_full(element, Some(CombineMode::All), tags, body)
    }

    /// Area hidden while any of `tags` is active
    pub fn applies_to_none<F>(&mut self, element: &str, tags: &[&str], body: F) -> Result<String>
    where
        F: FnOnce(&mut Self) -> String,
    {
        self.applies_to_full(element, Some(CombineMode::None), tags, body)
    }

    /// Wrap `body` in `element` and register it as an area.
    ///
    /// A `mode` of `None` still wraps the markup but registers nothing, so the
    /// region is never toggled. `element` must be ASCII alphanumeric.
    pub fn applies_to_full<F>(
        &mut self,
        element: &str,
        mode: Option<CombineMode>,
        tags: &[&str],
        body: F,
    ) -> Result<String>
    where
        F: FnOnce(&mut Self) -> String,
    {
        if !is_valid_element_name(element) {
            tracing::warn!(element, "rejecting area element name");
            return Err(ApplicabilityError::InvalidElementName {
                element: element.to_string(),
            });
        }
        let id = self.ids.next_id();
        if let Some(mode) = mode {
            self.registry.register_area(
                &id,
                tags.iter().collect(),
                mode,
                DisplayKind::for_element(element),
            )?;
        }
        let inner = body(self);
        Ok(self.writer.area(element, &id, &self.id, &inner))
    }

    pub fn rules(&self) -> PageRules {
        self.registry.rules()
    }

    /// Ids of the areas the initial pass hides, in declaration order
    pub fn initially_hidden(&self) -> Vec<String> {
        let rules = self.rules();
        let (evaluator, _) = Evaluator::load(&rules, VisibilityMap::new());
        rules
            .areas
            .iter()
            .filter(|area| evaluator.is_visible(&area.id) == Some(false))
            .map(|area| area.id.clone())
            .collect()
    }

    /// The rules payload element for this context, followed by the
    /// stylesheet hiding areas that start out hidden
    pub fn output_rules(&self) -> Result<String> {
        let json = self
            .rules()
            .to_json(self.pretty_rules)
            .map_err(|e| ApplicabilityError::RulesEncoding {
                message: e.to_string(),
            })?;
        let hidden = self.initially_hidden();
        let hidden: Vec<&str> = hidden.iter().map(String::as_str).collect();

        let mut out = self.writer.rules(&self.id, &json);
        out.push_str(&self.writer.initial_visibility(&self.id, &hidden));
        Ok(out)
    }

    /// Render a whole block and append the rules payload after it
    pub fn render<F>(&mut self, body: F) -> Result<String>
    where
        F: FnOnce(&mut Self) -> Result<String>,
    {
        let mut out = body(self)?;
        out.push_str(&self.output_rules()?);
        tracing::debug!(
            context = %self.id,
            domains = self.registry.domains().len(),
            areas = self.registry.areas().len(),
            "applicability block rendered"
        );
        Ok(out)
    }

    fn control_id(&mut self, control: &ControlOptions) -> String {
        match &control.id {
            Some(id) => id.clone(),
            None => self.ids.next_id(),
        }
    }

    fn declare_default(&mut self, domain: &str, tag: &str, checked: bool) {
        let defaults: TagSet = if checked {
            std::iter::once(tag).collect()
        } else {
            TagSet::new()
        };
        self.registry.register_domain(domain, &defaults);
    }
}
