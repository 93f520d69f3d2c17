use apexlog_types::LogEvent;

/// Post-order rollup: each node's totals are its own contribution plus
/// its direct children's totals.
pub fn aggregate(node: &mut LogEvent) {
    let mut totals = node.payload.own_totals();
    for child in &mut node.children {
        aggregate(child);
        totals.add(&child.totals);
    }
    node.totals = totals;
}
