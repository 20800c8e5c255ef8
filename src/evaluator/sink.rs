//! Visibility sinks: where area show/hide decisions are delivered

use std::collections::HashMap;
use std::fmt::Write;

use crate::state::{Area, DisplayKind};

/// Receives the visibility decision for each area after a recompute pass.
///
/// Implementations talk to whatever owns the rendered markup (a DOM bridge,
/// a test recorder, a terminal printer).
#[cfg_attr(test, mockall::automock)]
pub trait VisibilitySink {
    /// Show or hide the area with the given id
    fn apply(&mut self, area_id: &str, visible: bool, display: DisplayKind);
}

/// Latest decision recorded for one area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaVisibility {
    pub visible: bool,
    pub display: DisplayKind,
}

impl AreaVisibility {
    /// CSS `display` value for the area's current state
    pub fn css_display(&self) -> &'static str {
        if self.visible {
            self.display.css_value()
        } else {
            "none"
        }
    }
}

/// Sink that records the last decision per area
#[derive(Debug, Clone, Default)]
pub struct VisibilityMap {
    entries: HashMap<String, AreaVisibility>,
    applied: usize,
}

impl VisibilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, area_id: &str) -> Option<AreaVisibility> {
        self.entries.get(area_id).copied()
    }

    pub fn is_visible(&self, area_id: &str) -> Option<bool> {
        self.get(area_id).map(|v| v.visible)
    }

    /// Total number of decisions applied so far
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// One `ID<TAB>STATE<TAB>DISPLAY` line per area, in the order given.
    ///
    /// STATE is `shown` or `hidden`, or `undecided` for an area that has never
    /// received a decision (its combine mode is unknown).
    pub fn report(&self, areas: &[Area]) -> String {
        let mut out = String::new();
        for area in areas {
            let state = match self.is_visible(&area.id) {
                Some(true) => "shown",
                Some(false) => "hidden",
                None => "undecided",
            };
            let _ = writeln!(out, "{}\t{}\t{}", area.id, state, area.display.css_value());
        }
        out
    }
}

impl VisibilitySink for VisibilityMap {
    fn apply(&mut self, area_id: &str, visible: bool, display: DisplayKind) {
        self.applied += 1;
        self.entries
            .insert(area_id.to_string(), AreaVisibility { visible, display });
    }
}
