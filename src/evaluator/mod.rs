//! Runtime evaluator: applies control updates and recomputes area visibility
//!
//! The evaluator owns the live copy of every domain's active tags. Each call
//! to [`Evaluator::update`] mutates exactly one domain, then re-decides every
//! area against the pool (the union of all active tags) and pushes the result
//! to a [`VisibilitySink`].

mod sink;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ApplicabilityError, Result};
use crate::markup::ControlAction;
use crate::state::{Area, Domain, PageRules, TagSet};

pub use sink::{AreaVisibility, VisibilityMap, VisibilitySink};

#[cfg(test)]
pub use sink::MockVisibilitySink;

/// How an update changes a domain's active tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Insert the tag (checkbox checked)
    Add,
    /// Drop the tag if present (checkbox cleared)
    Remove,
    /// Replace the set with just this tag (select, radio, link)
    Set,
}

impl UpdateMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Set => "set",
        }
    }
}

impl FromStr for UpdateMode {
    type Err = ApplicabilityError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            "set" => Ok(Self::Set),
            other => Err(ApplicabilityError::UnknownUpdateMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live page state plus the sink decisions are delivered to
#[derive(Debug)]
pub struct Evaluator<S: VisibilitySink> {
    domains: Vec<Domain>,
    areas: Vec<Area>,
    visibility: HashMap<String, bool>,
    sink: S,
}

impl<S: VisibilitySink> Evaluator<S> {
    /// Build from a rules document without running any pass
    pub fn new(rules: &PageRules, sink: S) -> Self {
        let mut domains: Vec<Domain> = Vec::with_capacity(rules.domains.len());
        for entry in &rules.domains {
            match domains.iter_mut().find(|d| d.name == entry.name) {
                Some(domain) => domain.active_tags.extend_from(&entry.defaults),
                None => domains.push(Domain::with_tags(&entry.name, entry.defaults.clone())),
            }
        }

        Self {
            domains,
            areas: rules.areas.clone(),
            visibility: HashMap::new(),
            sink,
        }
    }

    /// Seed domains with their defaults and run the initial pass
    pub fn load(rules: &PageRules, sink: S) -> (Self, Vec<ApplicabilityError>) {
        let mut evaluator = Self::new(rules, sink);
        let problems = evaluator.recompute_visibility();
        (evaluator, problems)
    }

    /// Apply one control event, then recompute every area.
    ///
    /// Returns the problems reported during the pass (unknown combine modes).
    pub fn update(&mut self, mode: UpdateMode, domain: &str, tag: &str) -> Vec<ApplicabilityError> {
        tracing::debug!(%mode, domain, tag, "applicability update");
        let active = &mut self.domain_mut(domain).active_tags;
        match mode {
            UpdateMode::Add => {
                active.insert(tag);
            }
            UpdateMode::Remove => {
                active.remove(tag);
            }
            UpdateMode::Set => active.set_only(tag),
        }
        self.recompute_visibility()
    }

    /// Apply an event from an emitted control
    pub fn apply_control(
        &mut self,
        action: ControlAction,
        checked: bool,
        domain: &str,
        tag: &str,
    ) -> Vec<ApplicabilityError> {
        self.update(action.update_mode(checked), domain, tag)
    }

    /// String-mode entrypoint used by event bridges.
    ///
    /// An unknown mode is reported and leaves every domain untouched, but the
    /// recompute pass still runs.
    pub fn update_raw(&mut self, mode: &str, domain: &str, tag: &str) -> Vec<ApplicabilityError> {
        match mode.parse::<UpdateMode>() {
            Ok(mode) => self.update(mode, domain, tag),
            Err(err) => {
                tracing::warn!(mode, domain, tag, "invalid update mode");
                let mut problems = vec![err];
                problems.extend(self.recompute_visibility());
                problems
            }
        }
    }

    /// Re-decide every area against the current pool
    pub fn recompute_visibility(&mut self) -> Vec<ApplicabilityError> {
        let pool = self.pool();
        let mut problems = Vec::new();

        for area in &self.areas {
            match area.decide(&pool) {
                Some(visible) => {
                    self.visibility.insert(area.id.clone(), visible);
                    self.sink.apply(&area.id, visible, area.display);
                }
                None => {
                    tracing::warn!(
                        area_id = %area.id,
                        mode = %area.mode,
                        "unknown combine mode, visibility unchanged"
                    );
                    problems.push(ApplicabilityError::UnknownCombineMode {
                        area_id: area.id.clone(),
                        mode: area.mode.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            areas = self.areas.len(),
            pool = pool.len(),
            "visibility recomputed"
        );
        problems
    }

    /// Union of every domain's active tags, in domain order
    pub fn pool(&self) -> TagSet {
        let mut pool = TagSet::new();
        for domain in &self.domains {
            pool.extend_from(&domain.active_tags);
        }
        pool
    }

    pub fn active_tags(&self, domain: &str) -> Option<&TagSet> {
        self.domains
            .iter()
            .find(|d| d.name == domain)
            .map(|d| &d.active_tags)
    }

    /// Last decision for an area, `None` before its first decision
    pub fn is_visible(&self, area_id: &str) -> Option<bool> {
        self.visibility.get(area_id).copied()
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn domain_mut(&mut self, name: &str) -> &mut Domain {
        let index = match self.domains.iter().position(|d| d.name == name) {
            Some(index) => index,
            None => {
                tracing::debug!(domain = name, "creating undeclared domain");
                self.domains.push(Domain::new(name));
                self.domains.len() - 1
            }
        };
        &mut self.domains[index]
    }
}

/// Load `rules`, apply each `MODE:DOMAIN:TAG` update in order and report the
/// final visibility of every area (see [`VisibilityMap::report`]).
///
/// Updates with an unknown mode are logged and skipped. A triple that cannot
/// be split fails the whole replay.
pub fn replay(rules: &PageRules, updates: &[String]) -> Result<String> {
    let (mut evaluator, _) = Evaluator::load(rules, VisibilityMap::new());
    for raw in updates {
        let (mode, domain, tag) = parse_update_triple(raw)?;
        evaluator.update_raw(&mode, &domain, &tag);
    }
    Ok(evaluator.sink().report(evaluator.areas()))
}

/// Parse a `MODE:DOMAIN:TAG` triple as given on the command line.
///
/// The mode is not validated here so that bad modes flow through
/// [`Evaluator::update_raw`] and get reported like any other.
pub fn parse_update_triple(input: &str) -> Result<(String, String, String)> {
    let mut parts = input.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(mode), Some(domain), Some(tag)) if !mode.is_empty() && !domain.is_empty() => {
            Ok((mode.to_string(), domain.to_string(), tag.to_string()))
        }
        _ => Err(ApplicabilityError::MalformedUpdate {
            input: input.to_string(),
        }),
    }
}
