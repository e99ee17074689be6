//! Plain-text summary of a run.

use tally_algorithms::{BenchmarkReport, TimingComparison};
use tally_analytics::Segmentation;

use crate::export::ExportPaths;
use crate::pipeline::PipelineOutput;

/// Outliers listed individually in the report.
const OUTLIERS_SHOWN: usize = 5;

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(title.to_string());
    lines.push("=".repeat(title.len()));
}

fn format_ratio(ratio: f64) -> String {
    if ratio.is_finite() {
        format!("{ratio:.2}x")
    } else {
        "n/a (builtin too fast to measure)".to_string()
    }
}

fn timing_lines(lines: &mut Vec<String>, label: &str, timing: &TimingComparison) {
    lines.push(format!(
        "{label}: custom {:.6}s, builtin {:.6}s, ratio {} ({} runs)",
        timing.custom.as_secs_f64(),
        timing.builtin.as_secs_f64(),
        format_ratio(timing.ratio),
        timing.repeats,
    ));
}

/// Render the summary report, listing export locations when given.
pub fn render_summary(output: &PipelineOutput, paths: Option<&ExportPaths>) -> String {
    let metrics = &output.metrics;
    let mut lines = Vec::new();

    heading(&mut lines, "Sales Analytics Summary");
    lines.push(format!("Run: {}", output.run_id));
    lines.push(format!(
        "Rows: {} read, {} duplicates removed, {} after cleaning",
        output.ingest.raw_rows, output.ingest.duplicates_removed, output.ingest.cleaned_rows
    ));
    lines.push(format!(
        "Validation ({}): {} valid, {} rejected",
        output.config.validation_policy,
        output.batch.orders.len(),
        output.batch.rejected_count()
    ));
    for (field, count) in output.batch.rejections_by_field() {
        lines.push(format!("  - {field}: {count}"));
    }
    lines.push(String::new());

    lines.push(format!("Customers (unique): {}", metrics.unique_customers));
    lines.push(format!("Total revenue (completed): {:.2}", metrics.total_revenue));
    lines.push(match metrics.average_order_value {
        Some(aov) => format!("Average order value (AOV): {aov:.2}"),
        None => "Average order value (AOV): n/a".to_string(),
    });
    lines.push(format!("Most profitable category: {}", metrics.top_category));
    lines.push(format!(
        "Repeat customer rate (completed): {:.2}%",
        metrics.repeat_customer_rate
    ));
    lines.push(String::new());

    lines.push("Revenue by category (completed):".to_string());
    for entry in &metrics.revenue_by_category {
        lines.push(format!("  - {}: {:.2}", entry.category, entry.revenue));
    }
    lines.push(String::new());

    lines.push("Order status distribution (%):".to_string());
    for share in &metrics.status_distribution {
        lines.push(format!("  - {}: {:.2}%", share.status, share.percentage));
    }
    lines.push(String::new());

    lines.push("Average quantity by category:".to_string());
    for entry in &metrics.average_quantity_by_category {
        lines.push(format!("  - {}: {:.2}", entry.category, entry.average_quantity));
    }
    lines.push(String::new());

    lines.push("Monthly revenue (completed):".to_string());
    for month in &metrics.monthly_revenue {
        lines.push(match month.growth_pct {
            Some(growth) => format!(
                "  - {}: {:.2}  (growth {growth:.2}%)",
                month.month, month.revenue
            ),
            None => format!("  - {}: {:.2}", month.month, month.revenue),
        });
    }
    lines.push(String::new());

    match &metrics.outliers {
        Some(report) => {
            lines.push(format!("Outlier threshold (IQR upper bound): {:.2}", report.upper_bound));
            lines.push(format!("Outliers count (completed): {}", report.outliers.len()));
            if !report.outliers.is_empty() {
                lines.push("Top outliers:".to_string());
                for outlier in report.outliers.iter().take(OUTLIERS_SHOWN) {
                    lines.push(format!(
                        "  - order {} | customer {} | amount {:.2}",
                        outlier.order_id, outlier.customer_id, outlier.amount
                    ));
                }
            }
        }
        None => lines.push("Outliers: no completed orders".to_string()),
    }
    lines.push(String::new());

    match &metrics.segmentation {
        Segmentation::Tiered { counts, .. } => {
            lines.push("Customer segmentation (by lifetime value quartiles):".to_string());
            for count in counts {
                lines.push(format!("  - {}: {}", count.tier, count.customers));
            }
        }
        Segmentation::Insufficient(reason) => {
            lines.push(format!("Customer segmentation skipped: {reason}"));
        }
    }
    lines.push(String::new());

    heading(&mut lines, "Algorithmic Analysis");
    match &output.benchmark {
        BenchmarkReport::Completed {
            sample_size,
            sort_size,
            sort,
            search_target,
            search,
        } => {
            lines.push("Custom sort: merge_sort, O(n log n) time, O(n) extra space".to_string());
            lines.push("Custom search: binary search, O(log n) on sorted input".to_string());
            timing_lines(&mut lines, &format!("Sorting (n={sort_size} of {sample_size})"), sort);
            timing_lines(&mut lines, &format!("Searching (target {search_target:.2})"), search);
        }
        BenchmarkReport::Insufficient(reason) => {
            lines.push(format!("Not enough data for timing comparisons: {reason}"));
        }
    }

    if let Some(paths) = paths {
        lines.push(String::new());
        lines.push("Exports:".to_string());
        for path in [
            &paths.clean_orders,
            &paths.top_customers,
            &paths.top_products,
            &paths.metrics,
            &paths.summary,
        ] {
            lines.push(format!("  - {}", path.display()));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}
