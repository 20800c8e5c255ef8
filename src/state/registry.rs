//! Render-time registry of domains and areas

use serde::{Deserialize, Serialize};

use super::area::{Area, CombineMode, DisplayKind};
use super::domain::TagSet;
use crate::error::{ApplicabilityError, Result};

/// Frozen, serializable description of one page's rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRules {
    /// Domain name and its default active tags, in declaration order
    #[serde(default)]
    pub domains: Vec<DomainDefaults>,
    #[serde(default)]
    pub areas: Vec<Area>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDefaults {
    pub name: String,
    #[serde(default)]
    pub defaults: TagSet,
}

impl PageRules {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Accumulates domain and area declarations during a render pass.
///
/// The registry only grows; there is no removal.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    domains: Vec<DomainDefaults>,
    areas: Vec<Area>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a domain, merging defaults into an earlier declaration of the same name
    pub fn register_domain(&mut self, name: &str, default_tags: &TagSet) {
        match self.domains.iter_mut().find(|d| d.name == name) {
            Some(domain) => domain.defaults.extend_from(default_tags),
            None => self.domains.push(DomainDefaults {
                name: name.to_string(),
                defaults: default_tags.clone(),
            }),
        }
    }

    /// Declare an area. Ids must be unique within the registry.
    pub fn register_area(
        &mut self,
        id: &str,
        applicabilities: TagSet,
        mode: CombineMode,
        display: DisplayKind,
    ) -> Result<()> {
        if self.area(id).is_some() {
            tracing::warn!(area_id = id, "duplicate area registration ignored");
            return Err(ApplicabilityError::DuplicateArea {
                area_id: id.to_string(),
            });
        }
        self.areas
            .push(Area::new(id, applicabilities, mode, display));
        Ok(())
    }

    pub fn domain(&self, name: &str) -> Option<&DomainDefaults> {
        self.domains.iter().find(|d| d.name == name)
    }

    pub fn area(&self, id: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.id == id)
    }

    pub fn domains(&self) -> &[DomainDefaults] {
        &self.domains
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// Snapshot the declarations as a rules document
    pub fn rules(&self) -> PageRules {
        PageRules {
            domains: self.domains.clone(),
            areas: self.areas.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> TagSet {
        items.iter().collect()
    }

    mod register_domain {
        use super::*;

        #[test]
        fn test_new_domain_gets_defaults() {
            let mut registry = Registry::new();
            registry.register_domain("size", &tags(&["large"]));
            let domain = registry.domain("size").unwrap();
            assert_eq!(domain.defaults, tags(&["large"]));
        }

        #[test]
        fn test_repeat_registration_appends_defaults() {
            let mut registry = Registry::new();
            registry.register_domain("extras", &tags(&["wax"]));
            registry.register_domain("extras", &TagSet::new());
            registry.register_domain("extras", &tags(&["polish", "wax"]));

            assert_eq!(registry.domains().len(), 1);
            assert_eq!(
                registry.domain("extras").unwrap().defaults,
                tags(&["wax", "polish"])
            );
        }

        #[test]
        fn test_domains_keep_declaration_order() {
            let mut registry = Registry::new();
            registry.register_domain("b", &TagSet::new());
            registry.register_domain("a", &TagSet::new());
            let names: Vec<_> = registry.domains().iter().map(|d| d.name.as_str()).collect();
            assert_eq!(names, vec!["b", "a"]);
        }
    }

    mod register_area {
        use super::*;

        #[test]
        fn test_areas_are_appended() {
            let mut registry = Registry::new();
            registry
                .register_area("a1", tags(&["x"]), CombineMode::Any, DisplayKind::Block)
                .unwrap();
            registry
                .register_area("a2", tags(&["y"]), CombineMode::All, DisplayKind::Inline)
                .unwrap();
            assert_eq!(registry.areas().len(), 2);
            assert_eq!(registry.area("a2").unwrap().mode, CombineMode::All);
        }

        #[test]
        fn test_duplicate_id_is_rejected() {
            let mut registry = Registry::new();
            registry
                .register_area("a1", tags(&["x"]), CombineMode::Any, DisplayKind::Block)
                .unwrap();
            let err = registry
                .register_area("a1", tags(&["y"]), CombineMode::None, DisplayKind::Block)
                .unwrap_err();
            assert_eq!(
                err,
                ApplicabilityError::DuplicateArea {
                    area_id: "a1".to_string()
                }
            );
            assert_eq!(registry.areas().len(), 1);
            assert_eq!(registry.area("a1").unwrap().mode, CombineMode::Any);
        }
    }

    mod rules {
        use super::*;

        #[test]
        fn test_rules_snapshot() {
            let mut registry = Registry::new();
            registry.register_domain("size", &tags(&["small"]));
            registry
                .register_area("a1", tags(&["large"]), CombineMode::None, DisplayKind::Inline)
                .unwrap();

            let rules = registry.rules();
            assert_eq!(
                rules.domains,
                vec![DomainDefaults {
                    name: "size".to_string(),
                    defaults: tags(&["small"]),
                }]
            );
            assert_eq!(rules.areas, registry.areas().to_vec());
        }

        #[test]
        fn test_json_shape() {
            let mut registry = Registry::new();
            registry.register_domain("size", &tags(&["small"]));
            registry
                .register_area("a1", tags(&["large"]), CombineMode::All, DisplayKind::Inline)
                .unwrap();

            let json = registry.rules().to_json(false).unwrap();
            assert_eq!(
                json,
                r#"{"domains":[{"name":"size","defaults":["small"]}],"areas":[{"id":"a1","applicabilities":["large"],"mode":"all","display":"inline"}]}"#
            );
            assert_eq!(PageRules::from_json(&json).unwrap(), registry.rules());
        }

        #[test]
        fn test_from_json_tolerates_missing_sections() {
            let rules = PageRules::from_json("{}").unwrap();
            assert!(rules.domains.is_empty());
            assert!(rules.areas.is_empty());
        }
    }
}
