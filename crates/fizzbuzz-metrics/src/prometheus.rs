//! Prometheus text exposition format.
//!
//! Renders counter snapshots into the Prometheus text exposition format
//! for scraping by a Prometheus server or compatible agent.

use crate::collector::JobSnapshot;

/// Render job counter snapshots into Prometheus text format.
///
/// Produces one COUNTER family with `job` and `status` labels. Snapshots are
/// expected pre-sorted by job (as `RequestMetrics::snapshot` returns them),
/// and statuses render in a fixed order, so output is deterministic.
pub fn render_prometheus(snapshots: &[JobSnapshot]) -> String {
    let mut out = String::new();

    out.push_str("# HELP fizzbuzz_processed_ops_total The total number of processed events by status.\n");
    out.push_str("# TYPE fizzbuzz_processed_ops_total counter\n");
    for s in snapshots {
        let statuses = [
            ("request", s.requests),
            ("success", s.success),
            ("error", s.error),
            ("error_on_stat_save", s.error_on_stat_save),
        ];
        for (status, value) in statuses {
            out.push_str(&format!(
                "fizzbuzz_processed_ops_total{{job=\"{}\",status=\"{}\"}} {}\n",
                s.job, status, value
            ));
        }
    }

    out
}
