use apexlog_types::LogEvent;

/// Recompute duration and self time for `node` and every descendant.
///
/// A node's self time depends on its children's totals, so children are
/// settled first.
pub fn recalculate(node: &mut LogEvent) {
    for child in &mut node.children {
        recalculate(child);
    }
    node.recalculate_durations();
}
