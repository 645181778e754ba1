//! Dependency-graph validation.
//!
//! `start` recursion over declared dependencies is only bounded when the
//! graph is acyclic, so the manager runs this check before resolving
//! dependencies and fails fast with `DependencyCycle` instead of recursing
//! forever.

use std::collections::HashSet;

use crate::errors::{CoreError, Result};
use crate::registry::Registry;

/// Depth-first check that no dependency cycle is reachable from `root`.
///
/// Dependency names that are not registered are skipped here; they surface
/// as `MissingDependency` when the start walk actually resolves them.
pub fn ensure_acyclic(registry: &Registry, root: &str) -> Result<()> {
    let mut visiting = Vec::new();
    let mut visited = HashSet::new();
    visit(registry, root, &mut visiting, &mut visited)
}

fn visit(
    registry: &Registry,
    name: &str,
    visiting: &mut Vec<String>,
    visited: &mut HashSet<String>,
) -> Result<()> {
    if visited.contains(name) {
        return Ok(());
    }
    if let Some(position) = visiting.iter().position(|n| n == name) {
        let mut cycle: Vec<&str> = visiting[position..].iter().map(String::as_str).collect();
        cycle.push(name);
        return Err(CoreError::DependencyCycle(cycle.join(" -> ")));
    }

    let entry = match registry.get(name) {
        Some(entry) => entry,
        None => return Ok(()),
    };

    visiting.push(name.to_string());
    let deps: Vec<String> = entry.descriptor.depends_on.clone();
    for dep in &deps {
        visit(registry, dep, visiting, visited)?;
    }
    visiting.pop();
    visited.insert(name.to_string());

    Ok(())
}
