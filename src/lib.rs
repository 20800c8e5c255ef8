//! Applicability - show and hide page areas from form control selections
//!
//! Page templates declare controls (selects, radios, checkboxes, links)
//! bound to named domains and areas bound to tags through an
//! [`ApplicabilityContext`]. The resulting [`PageRules`] drive an
//! [`Evaluator`] that recomputes every area's visibility whenever a control
//! changes a domain's active tags.

pub mod config;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod ids;
pub mod markup;
pub mod state;

pub use config::ApplicabilityConfig;
pub use context::{ApplicabilityContext, ControlOptions};
pub use error::{ApplicabilityError, Result};
pub use evaluator::{
    parse_update_triple, replay, AreaVisibility, Evaluator, UpdateMode, VisibilityMap,
    VisibilitySink,
};
pub use ids::{IdSource, PageIdCounter, RandomIds};
pub use markup::{ControlAction, HtmlWriter, MarkupWriter, SelectOption, CLIENT_RUNTIME};
pub use state::{Area, CombineMode, DisplayKind, Domain, PageRules, Registry, TagSet};
