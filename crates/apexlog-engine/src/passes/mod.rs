//! Post-processing passes, run once over a finished tree in a fixed
//! order: timing, totals, package wrappers, namespaces.

pub mod namespaces;
pub mod packages;
pub mod timing;
pub mod totals;

use apexlog_types::LogEvent;
use tracing::debug;

use crate::ParseOptions;

pub fn run(root: &mut LogEvent, options: &ParseOptions) {
    timing::recalculate(root);
    totals::aggregate(root);

    if options.package_wrappers {
        packages::merge(root);
        // reparented DML/SOQL now roll up into their package
        totals::aggregate(root);
    }

    if options.resolve_namespaces {
        let namespaces = namespaces::resolve(root);
        debug!(namespaces = namespaces.len(), "resolved namespaces");
    }

    debug!(
        dml = root.totals.dml_count,
        soql = root.totals.soql_count,
        thrown = root.totals.thrown_count,
        "post-processing complete"
    );
}
