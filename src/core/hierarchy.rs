//! Family hierarchy closure and capability projection.

use std::collections::{BTreeMap, HashSet, VecDeque};

use petgraph::graph::NodeIndex;
use petgraph::visit::{Dfs, EdgeRef, Reversed};
use petgraph::Direction;

use crate::core::entity::{EntityId, PlatformId};
use crate::core::registry::{Node, Registry};

impl Registry {
    /// Every family `entity` belongs to, directly or transitively, nearest
    /// first. The entity itself is never included.
    ///
    /// Breadth-first over memberships: direct families in declaration order,
    /// then their families, and so on. Each name appears once. Always
    /// recomputed from the current graph.
    pub fn family_hierarchy(&self, entity: impl Into<EntityId>) -> Vec<String> {
        let start = entity.into().node();
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut hierarchy = Vec::new();

        while let Some(node) = queue.pop_front() {
            for edge in self.edges_in_order(node, Direction::Outgoing) {
                let parent = edge.target();
                if seen.insert(parent) {
                    hierarchy.push(self.entity_name(self.entity_id(parent)).to_string());
                    queue.push_back(parent);
                }
            }
        }

        hierarchy
    }

    /// Whether `entity` currently belongs (transitively) to `family`.
    pub fn has_family(&self, entity: impl Into<EntityId>, family: &str) -> bool {
        self.family_hierarchy(entity).iter().any(|f| f == family)
    }

    /// Expose family membership on a platform once its attributes are known.
    ///
    /// Records the platform's hierarchy and one capability flag per family
    /// in the registry. From then on the registry re-projects the platform
    /// whenever a family is added or a membership above it changes, so the
    /// platform's own family queries never lag the graph. Attribute
    /// accessors always read the attribute map directly.
    pub fn project_capabilities(&mut self, id: PlatformId) {
        let hierarchy = self.family_hierarchy(id);
        let capabilities: BTreeMap<String, bool> = self
            .families()
            .map(|f| {
                let name = self.get_family(f).name().to_string();
                let member = hierarchy.contains(&name);
                (name, member)
            })
            .collect();

        let platform = self.platform_mut(id);
        tracing::debug!(
            "projected `{}` into families [{}]",
            platform.registry_name(),
            hierarchy.join(", ")
        );
        platform.family_hierarchy = hierarchy;
        platform.capabilities = capabilities;
        platform.projected = true;
    }

    /// Re-project every projected platform at or below `node`.
    pub(crate) fn refresh_projections_below(&mut self, node: NodeIndex) {
        let graph = Reversed(&self.graph);
        let mut dfs = Dfs::new(graph, node);
        let mut stale = Vec::new();
        while let Some(n) = dfs.next(graph) {
            if let Node::Platform(platform) = &self.graph[n] {
                if platform.projected {
                    stale.push(PlatformId(n));
                }
            }
        }

        for id in stale {
            self.project_capabilities(id);
        }
    }

    /// Re-project every projected platform.
    pub(crate) fn refresh_all_projections(&mut self) {
        let stale: Vec<_> = self
            .platforms()
            .filter(|&id| self.platform(id).projected)
            .collect();
        for id in stale {
            self.project_capabilities(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> (Registry, PlatformId) {
        let mut registry = Registry::new();
        registry.family("unix", None);
        let linux = registry.family("linux", None);
        registry.in_family(linux, "unix").unwrap();
        let ubuntu = registry.name("ubuntu", None);
        registry.in_family(ubuntu, "linux").unwrap();
        (registry, ubuntu)
    }

    #[test]
    fn test_hierarchy_nearest_first() {
        let (registry, ubuntu) = registry();
        assert_eq!(registry.family_hierarchy(ubuntu), vec!["linux", "unix"]);
    }

    #[test]
    fn test_hierarchy_of_family() {
        let (registry, _) = registry();
        let linux = registry.family_id("linux").unwrap();
        assert_eq!(registry.family_hierarchy(linux), vec!["unix"]);
    }

    #[test]
    fn test_hierarchy_breadth_first_and_unique() {
        let mut registry = Registry::new();
        let linux = registry.family("linux", None);
        registry.in_family(linux, "unix").unwrap();
        let bsd = registry.family("bsd", None);
        registry.in_family(bsd, "unix").unwrap();
        let hybrid = registry.name("hybrid", None);
        registry.in_family(hybrid, "linux").unwrap();
        registry.in_family(hybrid, "bsd").unwrap();

        assert_eq!(registry.family_hierarchy(hybrid), vec!["linux", "bsd", "unix"]);
    }

    #[test]
    fn test_hierarchy_excludes_same_named_family() {
        let mut registry = Registry::new();
        let family = registry.family("windows", None);
        registry.in_family(family, "os").unwrap();
        let platform = registry.name("windows", None);
        registry.in_family(platform, "windows").unwrap();

        assert_eq!(registry.family_hierarchy(platform), vec!["windows", "os"]);
    }

    #[test]
    fn test_projection_records_capabilities() {
        let (mut registry, ubuntu) = registry();
        registry.family("windows", None);
        registry.project_capabilities(ubuntu);

        let platform = registry.platform(ubuntu);
        assert!(platform.has_family("linux"));
        assert!(platform.has_family("unix"));
        assert!(!platform.has_family("windows"));
        assert!(platform.is_unix());
        assert!(!platform.is_windows());

        let caps: Vec<_> = platform.capabilities().collect();
        assert!(caps.contains(&("linux", true)));
        assert!(caps.contains(&("windows", false)));
        assert_eq!(platform.family(), Some("linux"));
    }

    #[test]
    fn test_projection_tracks_new_memberships() {
        let (mut registry, ubuntu) = registry();
        registry.project_capabilities(ubuntu);
        assert!(!registry.platform(ubuntu).has_family("debian"));

        registry.in_family(ubuntu, "debian").unwrap();
        assert!(registry.has_family(ubuntu, "debian"));
        assert!(registry.platform(ubuntu).has_family("debian"));
        assert!(registry
            .platform(ubuntu)
            .capabilities()
            .any(|cap| cap == ("debian", true)));
    }

    #[test]
    fn test_projection_tracks_membership_above_platform() {
        let mut registry = Registry::new();
        let linux = registry.family("linux", None);
        let ubuntu = registry.name("ubuntu", None);
        registry.in_family(ubuntu, "linux").unwrap();
        registry.project_capabilities(ubuntu);
        assert!(!registry.platform(ubuntu).is_unix());

        registry.in_family(linux, "unix").unwrap();

        let platform = registry.platform(ubuntu);
        assert_eq!(platform.has_family("unix"), registry.has_family(ubuntu, "unix"));
        assert!(platform.is_unix());
        assert_eq!(platform.family_hierarchy(), ["linux", "unix"]);
        assert_eq!(platform.family(), Some("linux"));
    }

    #[test]
    fn test_new_family_gets_a_capability_flag() {
        let (mut registry, ubuntu) = registry();
        registry.project_capabilities(ubuntu);

        registry.family("windows", None);
        assert!(registry
            .platform(ubuntu)
            .capabilities()
            .any(|cap| cap == ("windows", false)));
    }

    #[test]
    fn test_unprojected_platform_is_left_alone() {
        let (mut registry, ubuntu) = registry();
        registry.in_family(ubuntu, "debian").unwrap();
        assert!(registry.platform(ubuntu).family_hierarchy().is_empty());
    }

    #[test]
    fn test_attributes_stay_live_after_projection() {
        let (mut registry, ubuntu) = registry();
        registry.platform_mut(ubuntu).set_attribute("release", "20.04");
        registry.project_capabilities(ubuntu);

        registry.platform_mut(ubuntu).set_attribute("release", "22.04");
        assert_eq!(
            registry.platform(ubuntu).attribute("release"),
            Some(&json!("22.04"))
        );
    }
}
