//! Entity registry - the catalog of families and platforms.
//!
//! The registry is an explicit value: build one at startup, populate it
//! with [`Registry::name`], [`Registry::family`] and [`Registry::in_family`],
//! then hand out shared references. Registration needs `&mut Registry`;
//! callers that register from several threads wrap it in a `Mutex`.
//!
//! Entity ids are handles into one registry and mean nothing to another.
//!
//! Memberships are edges in a directed graph pointing from a child entity
//! to the family it joined. Edges carry the child's condition at the time
//! the membership was declared.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use thiserror::Error;

use crate::core::entity::{Condition, EntityId, Family, FamilyId, Platform, PlatformId};

/// Errors raised while declaring family memberships.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unable to add family `{name}` to itself")]
    SelfMembership { name: String },

    #[error("adding `{child}` to family `{family}` would create a cycle")]
    Cycle { child: String, family: String },
}

#[derive(Debug, Clone)]
pub(crate) enum Node {
    Platform(Platform),
    Family(Family),
}

impl Node {
    fn name(&self) -> &str {
        match self {
            Node::Platform(p) => p.registry_name(),
            Node::Family(f) => f.name(),
        }
    }

    fn condition_mut(&mut self) -> &mut Condition {
        match self {
            Node::Platform(p) => &mut p.condition,
            Node::Family(f) => &mut f.condition,
        }
    }
}

/// A child entry of a family: the member and the condition it joined with.
#[derive(Debug, Clone, Copy)]
pub struct Child<'a> {
    pub entity: EntityId,
    pub condition: &'a Condition,
}

/// Catalog of families and platforms with unique names per kind.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Membership graph, child -> parent family
    pub(crate) graph: DiGraph<Node, Condition>,

    /// Platform name to node
    platforms: HashMap<String, NodeIndex>,

    /// Family name to node
    families: HashMap<String, NodeIndex>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Get or create the platform called `identifier`.
    ///
    /// When the platform already exists and `condition` is `Some` (even an
    /// empty condition), its condition is replaced in place. The returned id
    /// is the same for every call with the same name.
    pub fn name(&mut self, identifier: &str, condition: Option<Condition>) -> PlatformId {
        if let Some(&node) = self.platforms.get(identifier) {
            if let Some(condition) = condition {
                tracing::debug!("updating condition of platform `{}`", identifier);
                *self.graph[node].condition_mut() = condition;
            }
            return PlatformId(node);
        }

        tracing::debug!("registering platform `{}`", identifier);
        let platform = Platform::new(identifier, condition.unwrap_or_default());
        let node = self.graph.add_node(Node::Platform(platform));
        self.platforms.insert(identifier.to_string(), node);
        PlatformId(node)
    }

    /// Get or create the family called `identifier`.
    ///
    /// Same contract as [`name`](Self::name), over families.
    pub fn family(&mut self, identifier: &str, condition: Option<Condition>) -> FamilyId {
        if let Some(&node) = self.families.get(identifier) {
            if let Some(condition) = condition {
                tracing::debug!("updating condition of family `{}`", identifier);
                *self.graph[node].condition_mut() = condition;
            }
            return FamilyId(node);
        }

        tracing::debug!("registering family `{}`", identifier);
        let family = Family::new(identifier, condition.unwrap_or_default());
        let node = self.graph.add_node(Node::Family(family));
        self.families.insert(identifier.to_string(), node);
        self.refresh_all_projections();
        FamilyId(node)
    }

    /// Declare that `child` belongs to the family called `family`.
    ///
    /// The family is created if needed. The child's current condition moves
    /// onto the membership and the child's own condition is cleared.
    /// Declaring the same membership twice replaces its condition.
    pub fn in_family(
        &mut self,
        child: impl Into<EntityId>,
        family: &str,
    ) -> Result<FamilyId, RegistryError> {
        let child = child.into();
        let child_node = child.node();
        let child_name = self.graph[child_node].name().to_string();

        if let EntityId::Family(_) = child {
            if child_name == family {
                return Err(RegistryError::SelfMembership { name: child_name });
            }
        }

        let parent = self.family(family, None);
        if petgraph::algo::has_path_connecting(&self.graph, parent.0, child_node, None) {
            return Err(RegistryError::Cycle {
                child: child_name,
                family: family.to_string(),
            });
        }

        let condition = std::mem::take(self.graph[child_node].condition_mut());
        match self.graph.find_edge(child_node, parent.0) {
            Some(edge) => self.graph[edge] = condition,
            None => {
                self.graph.add_edge(child_node, parent.0, condition);
            }
        }

        tracing::debug!("`{}` joined family `{}`", child_name, family);
        self.refresh_projections_below(child_node);
        Ok(parent)
    }

    /// Look up a platform id by name.
    pub fn platform_id(&self, name: &str) -> Option<PlatformId> {
        self.platforms.get(name).copied().map(PlatformId)
    }

    /// Look up a family id by name.
    pub fn family_id(&self, name: &str) -> Option<FamilyId> {
        self.families.get(name).copied().map(FamilyId)
    }

    /// Get a platform.
    ///
    /// # Panics
    ///
    /// Ids are only valid in the registry that issued them; panics when
    /// given a platform id from another registry.
    pub fn platform(&self, id: PlatformId) -> &Platform {
        match &self.graph[id.0] {
            Node::Platform(p) => p,
            Node::Family(_) => unreachable!("platform id points at a family node"),
        }
    }

    /// Get a platform mutably (for detection logic filling attributes).
    ///
    /// # Panics
    ///
    /// Ids are only valid in the registry that issued them; panics when
    /// given a platform id from another registry.
    pub fn platform_mut(&mut self, id: PlatformId) -> &mut Platform {
        match &mut self.graph[id.0] {
            Node::Platform(p) => p,
            Node::Family(_) => unreachable!("platform id points at a family node"),
        }
    }

    /// Get a family.
    ///
    /// # Panics
    ///
    /// Ids are only valid in the registry that issued them; panics when
    /// given a family id from another registry.
    pub fn get_family(&self, id: FamilyId) -> &Family {
        match &self.graph[id.0] {
            Node::Family(f) => f,
            Node::Platform(_) => unreachable!("family id points at a platform node"),
        }
    }

    /// Get a family mutably.
    ///
    /// # Panics
    ///
    /// Ids are only valid in the registry that issued them; panics when
    /// given a family id from another registry.
    pub fn get_family_mut(&mut self, id: FamilyId) -> &mut Family {
        match &mut self.graph[id.0] {
            Node::Family(f) => f,
            Node::Platform(_) => unreachable!("family id points at a platform node"),
        }
    }

    /// Registry name of any entity.
    pub fn entity_name(&self, id: EntityId) -> &str {
        self.graph[id.node()].name()
    }

    /// Display title of any entity.
    pub fn title(&self, id: EntityId) -> String {
        match id {
            EntityId::Platform(p) => self.platform(p).title(),
            EntityId::Family(f) => self.get_family(f).title().to_string(),
        }
    }

    /// All platforms in registration order.
    pub fn platforms(&self) -> impl Iterator<Item = PlatformId> + '_ {
        self.graph.node_indices().filter_map(|n| match self.graph[n] {
            Node::Platform(_) => Some(PlatformId(n)),
            Node::Family(_) => None,
        })
    }

    /// All families in registration order.
    pub fn families(&self) -> impl Iterator<Item = FamilyId> + '_ {
        self.graph.node_indices().filter_map(|n| match self.graph[n] {
            Node::Family(_) => Some(FamilyId(n)),
            Node::Platform(_) => None,
        })
    }

    /// Names of the families `entity` joined directly, in declaration order.
    pub fn direct_families(&self, entity: impl Into<EntityId>) -> Vec<&str> {
        self.edges_in_order(entity.into().node(), Direction::Outgoing)
            .into_iter()
            .map(|e| self.graph[e.target()].name())
            .collect()
    }

    /// Ordered members of an entity.
    ///
    /// Families always have a (possibly empty) children list; platforms
    /// have none and return `None`.
    pub fn children(&self, entity: impl Into<EntityId>) -> Option<Vec<Child<'_>>> {
        let node = entity.into().node();
        if let Node::Platform(_) = self.graph[node] {
            return None;
        }

        let children = self
            .edges_in_order(node, Direction::Incoming)
            .into_iter()
            .map(|e| Child {
                entity: self.entity_id(e.source()),
                condition: e.weight(),
            })
            .collect();
        Some(children)
    }

    /// Entities without any family membership, keyed by name.
    ///
    /// Platforms are collected first, then families. A family overwrites a
    /// platform of the same name but keeps the platform's position.
    pub fn top_platforms(&self) -> Vec<(String, EntityId)> {
        let mut top: Vec<(String, EntityId)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        let roots = self
            .platforms()
            .map(EntityId::from)
            .chain(self.families().map(EntityId::from))
            .filter(|id| {
                self.graph
                    .edges_directed(id.node(), Direction::Outgoing)
                    .next()
                    .is_none()
            });

        for id in roots {
            let name = self.entity_name(id).to_string();
            match positions.get(&name) {
                Some(&pos) => top[pos].1 = id,
                None => {
                    positions.insert(name.clone(), top.len());
                    top.push((name, id));
                }
            }
        }

        top
    }

    /// Number of platforms.
    pub fn platform_count(&self) -> usize {
        self.platforms.len()
    }

    /// Number of families.
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    pub(crate) fn entity_id(&self, node: NodeIndex) -> EntityId {
        match self.graph[node] {
            Node::Platform(_) => EntityId::Platform(PlatformId(node)),
            Node::Family(_) => EntityId::Family(FamilyId(node)),
        }
    }

    /// Edges of `node` in the order they were added.
    pub(crate) fn edges_in_order(
        &self,
        node: NodeIndex,
        direction: Direction,
    ) -> Vec<EdgeReference<'_, Condition>> {
        let mut edges: Vec<_> = self.graph.edges_directed(node, direction).collect();
        edges.sort_by_key(|e| e.id());
        edges
    }
}
