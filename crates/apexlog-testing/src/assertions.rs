//! Tree assertions and outlines for call-tree tests.
//!
//! `outline` renders a tree as indented text so tests can compare whole
//! structures with a single snapshot.

use anyhow::{Result, bail};
use apexlog_types::LogEvent;
use std::fmt::Write;

/// Render `node` and its descendants, one line per node:
///
/// ```text
/// ROOT "Execution Root" 100..150 total=50 self=0
///   METHOD_ENTRY "Foo.bar()" 100..150 total=50 self=50
///     USER_DEBUG "hello" @120
/// ```
///
/// Only the first line of multi-line text is shown. Open nodes print `?`
/// for the exit stamp; truncated nodes are suffixed with `[truncated]`.
pub fn outline(node: &LogEvent) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

fn write_node(out: &mut String, node: &LogEvent, depth: usize) {
    let text = node.text.lines().next().unwrap_or_default();
    let _ = write!(out, "{}{} \"{}\"", "  ".repeat(depth), node.event_type, text);

    if node.is_timed() {
        let exit = node
            .exit_stamp
            .map_or_else(|| "?".to_string(), |e| e.to_string());
        let _ = write!(
            out,
            " {}..{} total={} self={}",
            node.timestamp, exit, node.duration.total, node.duration.self_time
        );
    } else {
        let _ = write!(out, " @{}", node.timestamp);
    }
    if let Some(namespace) = &node.namespace {
        let _ = write!(out, " ns={}", namespace);
    }
    if node.is_truncated {
        out.push_str(" [truncated]");
    }
    out.push('\n');

    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}

/// Check the structural invariants of a finished tree:
/// - `exit_stamp >= timestamp`
/// - `duration.total = exit_stamp - timestamp` and self time is the
///   total minus the children's totals
/// - totals are the node's own contribution plus its children's totals
/// - children are ordered by timestamp
pub fn assert_tree_invariants(node: &LogEvent) -> Result<()> {
    for event in node.walk() {
        let label = format!("{} at {}", event.event_type, event.timestamp);

        if let Some(exit) = event.exit_stamp {
            if exit < event.timestamp {
                bail!("{}: exit stamp {} precedes start", label, exit);
            }
            if event.duration.total != exit - event.timestamp {
                bail!(
                    "{}: total {} != {} - {}",
                    label,
                    event.duration.total,
                    exit,
                    event.timestamp
                );
            }
        }

        let children_total: i64 = event.children.iter().map(|c| c.duration.total).sum();
        if event.duration.self_time != event.duration.total - children_total {
            bail!(
                "{}: self time {} != {} - {}",
                label,
                event.duration.self_time,
                event.duration.total,
                children_total
            );
        }

        if !event.is_timed() && !event.children.is_empty() {
            bail!("{}: leaf carries children", label);
        }

        let mut expected = event.payload.own_totals();
        for child in &event.children {
            expected.add(&child.totals);
        }
        if event.totals != expected {
            bail!(
                "{}: totals {:?} != expected {:?}",
                label,
                event.totals,
                expected
            );
        }

        if event
            .children
            .windows(2)
            .any(|pair| pair[0].timestamp > pair[1].timestamp)
        {
            bail!("{}: children out of timestamp order", label);
        }
    }
    Ok(())
}
