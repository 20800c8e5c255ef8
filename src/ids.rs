//! Element id sources for controls and areas

use uuid::Uuid;

/// Default prefix for generated element ids
pub const DEFAULT_ID_PREFIX: &str = "aplic";

/// Hands out element ids that are unique within one page
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Sequential ids scoped to a single rendering context
#[derive(Debug, Clone)]
pub struct PageIdCounter {
    prefix: String,
    next: u64,
}

impl PageIdCounter {
    pub fn new(prefix: &str, first: u64) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: first,
        }
    }
}

impl Default for PageIdCounter {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX, 1)
    }
}

impl IdSource for PageIdCounter {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        // wraps after u64::MAX ids; a single page never gets near that
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Random ids, for fragments rendered independently into the same page
#[derive(Debug, Clone)]
pub struct RandomIds {
    prefix: String,
}

impl RandomIds {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        format!("{}-{}", self.prefix, Uuid::new_v4().simple())
    }
}
