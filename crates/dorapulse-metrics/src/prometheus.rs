//! Prometheus text exposition format.
//!
//! Renders the current snapshot into the Prometheus text exposition
//! format for scraping by a Prometheus server or compatible agent.

use dorapulse_core::MetricsSnapshot;

/// Render a snapshot into Prometheus text format.
///
/// Produces one GAUGE per DORA metric with a `repo` label, plus the
/// per-outcome deployment totals.
pub fn render_prometheus(snapshot: &MetricsSnapshot) -> String {
    let mut out = String::new();
    let repo = &snapshot.repo;

    out.push_str(
        "# HELP dorapulse_deployment_frequency_per_day Deployments per day over the lookback window.\n",
    );
    out.push_str("# TYPE dorapulse_deployment_frequency_per_day gauge\n");
    out.push_str(&format!(
        "dorapulse_deployment_frequency_per_day{{repo=\"{}\"}} {:.4}\n",
        repo, snapshot.deployment_frequency_per_day
    ));

    out.push_str(
        "# HELP dorapulse_lead_time_seconds Mean commit-to-deployment lead time in seconds.\n",
    );
    out.push_str("# TYPE dorapulse_lead_time_seconds gauge\n");
    out.push_str(&format!(
        "dorapulse_lead_time_seconds{{repo=\"{}\"}} {:.2}\n",
        repo, snapshot.lead_time_seconds
    ));

    out.push_str(
        "# HELP dorapulse_change_failure_rate_percent Failed deployments as a percentage of all deployments.\n",
    );
    out.push_str("# TYPE dorapulse_change_failure_rate_percent gauge\n");
    out.push_str(&format!(
        "dorapulse_change_failure_rate_percent{{repo=\"{}\"}} {:.2}\n",
        repo, snapshot.change_failure_rate_pct
    ));

    out.push_str("# HELP dorapulse_mttr_seconds Mean time to recovery in seconds.\n");
    out.push_str("# TYPE dorapulse_mttr_seconds gauge\n");
    out.push_str(&format!(
        "dorapulse_mttr_seconds{{repo=\"{}\"}} {:.2}\n",
        repo, snapshot.mttr_seconds
    ));

    out.push_str(
        "# HELP dorapulse_deployments_total Deployments completed in the lookback window.\n",
    );
    out.push_str("# TYPE dorapulse_deployments_total gauge\n");
    out.push_str(&format!(
        "dorapulse_deployments_total{{repo=\"{}\",status=\"success\"}} {}\n",
        repo, snapshot.successful_deployments
    ));
    out.push_str(&format!(
        "dorapulse_deployments_total{{repo=\"{}\",status=\"failure\"}} {}\n",
        repo, snapshot.failed_deployments
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn test_snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            repo: "acme/api".to_string(),
            computed_at: ts("2026-01-11T00:00:00Z"),
            successful_deployments: 3,
            failed_deployments: 2,
            deployment_frequency_per_day: 0.5,
            lead_time_seconds: 5400.0,
            change_failure_rate_pct: 40.0,
            mttr_seconds: 172_800.0,
            lead_time_samples: 4,
            recovery_intervals: 2,
        }
    }

    #[test]
    fn render_carries_all_gauges() {
        let output = render_prometheus(&test_snapshot());

        assert!(output.contains("dorapulse_deployment_frequency_per_day{repo=\"acme/api\"} 0.5000"));
        assert!(output.contains("dorapulse_lead_time_seconds{repo=\"acme/api\"} 5400.00"));
        assert!(output.contains("dorapulse_change_failure_rate_percent{repo=\"acme/api\"} 40.00"));
        assert!(output.contains("dorapulse_mttr_seconds{repo=\"acme/api\"} 172800.00"));
        assert!(output.contains("dorapulse_deployments_total{repo=\"acme/api\",status=\"success\"} 3"));
        assert!(output.contains("dorapulse_deployments_total{repo=\"acme/api\",status=\"failure\"} 2"));
    }

    #[test]
    fn render_empty_snapshot_still_has_declarations() {
        let snap = MetricsSnapshot::empty("acme/api", ts("2026-01-01T00:00:00Z"));
        let output = render_prometheus(&snap);

        assert!(output.contains("# HELP dorapulse_deployment_frequency_per_day"));
        assert!(output.contains("# TYPE dorapulse_mttr_seconds gauge"));
        assert!(output.contains("dorapulse_lead_time_seconds{repo=\"acme/api\"} 0.00"));
    }

    #[test]
    fn render_format_is_prometheus_compatible() {
        let output = render_prometheus(&test_snapshot());

        // Every non-comment line should match: metric_name{labels} value
        for line in output.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            assert!(
                line.contains('{') && line.contains('}'),
                "line should have labels: {line}"
            );
            let value = line.rsplit(' ').next().unwrap();
            assert!(value.parse::<f64>().is_ok(), "value should be numeric: {line}");
        }
    }
}
