//! Platform classification.
//!
//! This module contains the family/platform model:
//! - Entities and their typed ids
//! - The registry enforcing name uniqueness
//! - Hierarchy closure and capability projection
//! - The hierarchy printer
//! - Built-in platform specifications

pub mod entity;
pub mod hierarchy;
pub mod printer;
pub mod registry;
pub mod specifications;

pub use entity::{Attributes, Condition, EntityId, EntityKind, Family, FamilyId, Platform, PlatformId};
pub use printer::{list_all, print_children, write_all};
pub use registry::{Child, Registry, RegistryError};
