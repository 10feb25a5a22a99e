//! Human-readable listing of the family hierarchy.
//!
//! ```text
//! Os Family (Family)
//!   -> Windows Family
//!     -> Windows
//!   -> Unix Family
//!     -> Linux Family
//! ```
//!
//! Not meant for machine parsing.

use std::io::{self, Write};

use crate::core::entity::EntityId;
use crate::core::registry::Registry;

/// Print every top-level entity and its descendants to stdout.
pub fn list_all(registry: &Registry) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_all(registry, &mut out)
}

/// Write the full hierarchy listing to `out`.
pub fn write_all<W: Write>(registry: &Registry, out: &mut W) -> io::Result<()> {
    for (_, id) in registry.top_platforms() {
        writeln!(out, "{} ({})", registry.title(id), id.kind())?;
        print_children(registry, id, 2, out)?;
    }
    Ok(())
}

/// Write the descendants of `parent`, indented by `indent` spaces.
///
/// Recursion stops at entities without a children collection (platforms)
/// or with an empty one.
pub fn print_children<W: Write>(
    registry: &Registry,
    parent: EntityId,
    indent: usize,
    out: &mut W,
) -> io::Result<()> {
    let Some(children) = registry.children(parent) else {
        return Ok(());
    };

    for child in children {
        // Descriptor follows the title directly
        let descriptor = if child.condition.is_empty() {
            String::new()
        } else {
            child.condition.to_string()
        };
        writeln!(
            out,
            "{}-> {}{}",
            " ".repeat(indent),
            registry.title(child.entity),
            descriptor
        )?;
        print_children(registry, child.entity, indent + 2, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Condition;

    fn render(registry: &Registry) -> String {
        let mut buf = Vec::new();
        write_all(registry, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_nested_listing() {
        let mut registry = Registry::new();
        let linux = registry.family("linux", None);
        registry.in_family(linux, "unix").unwrap();
        let ubuntu = registry.name("ubuntu", None);
        registry.platform_mut(ubuntu).set_title("Ubuntu Linux");
        registry.in_family(ubuntu, "linux").unwrap();

        assert_eq!(
            render(&registry),
            "Unix Family (Family)\n  -> Linux Family\n    -> Ubuntu Linux\n"
        );
    }

    #[test]
    fn test_descriptor_printed_when_condition_present() {
        let mut registry = Registry::new();
        let centos = registry.name("centos", Some(Condition::new().with("release", ">= 6")));
        registry.in_family(centos, "redhat").unwrap();

        assert_eq!(
            render(&registry),
            "Redhat Family (Family)\n  -> Centos{release: \">= 6\"}\n"
        );
    }

    #[test]
    fn test_top_level_platform_has_no_children() {
        let mut registry = Registry::new();
        registry.name("mock", None);
        assert_eq!(render(&registry), "Mock (Platform)\n");
    }

    #[test]
    fn test_listing_does_not_mutate() {
        let mut registry = Registry::new();
        let linux = registry.family("linux", None);
        registry.in_family(linux, "unix").unwrap();

        let before = registry.top_platforms();
        render(&registry);
        assert_eq!(registry.top_platforms(), before);
        assert_eq!(registry.family_count(), 2);
    }
}
