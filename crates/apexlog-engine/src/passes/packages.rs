//! Package wrapper rewriting.
//!
//! Managed package entries have no exit line, so a package call shows up
//! as a run of `ENTERING_MANAGED_PKG` siblings. Adjacent entries for the
//! same namespace are merged into one node, and database work issued by
//! the package inside a DML operation is moved under it.

use apexlog_types::LogEvent;

pub const PACKAGE_ENTRY: &str = "ENTERING_MANAGED_PKG";

pub fn is_package(event: &LogEvent) -> bool {
    event.event_type == PACKAGE_ENTRY
}

/// Rewrite the child lists of `node` and its descendants, pre-order.
/// Each list is rebuilt rather than spliced in place.
pub fn merge(node: &mut LogEvent) {
    let parent_is_dml = node.payload.is_dml();
    let children = std::mem::take(&mut node.children);
    let mut rebuilt: Vec<LogEvent> = Vec::with_capacity(children.len());
    // index into `rebuilt` of the package that may absorb the next child
    let mut last_pkg: Option<usize> = None;

    for mut child in children {
        if let Some(idx) = last_pkg {
            let pkg = &mut rebuilt[idx];
            if is_package(&child) && child.namespace == pkg.namespace {
                pkg.exit_stamp = Some(child.end_stamp());
                pkg.recalculate_durations();
                continue;
            }
            if parent_is_dml && (child.payload.is_dml() || child.payload.is_soql()) {
                merge(&mut child);
                pkg.exit_stamp = Some(pkg.end_stamp().max(child.end_stamp()));
                pkg.children.push(child);
                pkg.recalculate_durations();
                continue;
            }
        }

        merge(&mut child);
        if let Some(idx) = last_pkg.take() {
            rebuilt[idx].recalculate_durations();
        }
        if is_package(&child) {
            last_pkg = Some(rebuilt.len());
        }
        rebuilt.push(child);
    }

    node.children = rebuilt;
    node.recalculate_durations();
}
