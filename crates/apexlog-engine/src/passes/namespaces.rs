use apexlog_types::LogEvent;
use std::collections::HashSet;

use super::packages::is_package;

/// Event types whose text starts with a qualified Apex name.
const QUALIFIED_TYPES: &[&str] = &[
    "METHOD_ENTRY",
    "CONSTRUCTOR_ENTRY",
    "CODE_UNIT_STARTED",
    "EXCEPTION_THROWN",
];

/// Tag nodes whose qualified name starts with the namespace of a
/// top-level package entry. Returns the namespaces that were found.
pub fn resolve(root: &mut LogEvent) -> HashSet<String> {
    let namespaces: HashSet<String> = root
        .children
        .iter()
        .filter(|child| is_package(child))
        .filter_map(|child| child.namespace.clone())
        .collect();

    if !namespaces.is_empty() {
        annotate(root, &namespaces);
    }
    namespaces
}

fn annotate(node: &mut LogEvent, namespaces: &HashSet<String>) {
    if QUALIFIED_TYPES.contains(&node.event_type)
        && let Some((prefix, _)) = node.text.split_once('.')
        && namespaces.contains(prefix)
    {
        node.namespace = Some(prefix.to_string());
    }
    for child in &mut node.children {
        annotate(child, namespaces);
    }
}
