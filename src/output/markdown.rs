//! Markdown report generation
//!
//! This module generates a human-readable markdown report of one crawl,
//! including run information, statistics and the highlighted text of every
//! page that was fetched.

use crate::content::PageView;
use crate::crawler::CrawlReport;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report of a crawl to disk
///
/// # Arguments
///
/// * `report` - The finished crawl
/// * `views` - Rendered pages, in the same order as `report.pages`
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(io::Error)` - Failed to write the report
pub fn write_markdown_report(
    report: &CrawlReport,
    views: &[PageView],
    output_path: &Path,
) -> std::io::Result<()> {
    let markdown = format_markdown_report(report, views);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    tracing::info!("Wrote crawl report to {}", output_path.display());
    Ok(())
}

/// Formats a crawl report as markdown
pub fn format_markdown_report(report: &CrawlReport, views: &[PageView]) -> String {
    let stats = &report.stats;
    let mut md = String::new();

    md.push_str("# Keyword Crawler Report\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Start URL**: {}\n", report.start_url));
    md.push_str(&format!("- **Max Depth**: {}\n", report.max_depth));
    md.push_str(&format!(
        "- **Started**: {}\n",
        report.started_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        report.finished_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        stats.elapsed.as_secs_f64()
    ));
    md.push_str(&format!("- **Status**: {}\n\n", stats.status()));

    md.push_str("## Statistics\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Pages Fetched | {} |\n", stats.pages_fetched));
    md.push_str(&format!("| Fetch Failures | {} |\n", stats.fetch_failures));
    md.push_str(&format!("| Invalid URLs | {} |\n", stats.invalid_urls));
    md.push_str(&format!(
        "| Skipped (already visited) | {} |\n",
        stats.skipped_visited
    ));
    md.push_str(&format!("| URLs Visited | {} |\n\n", stats.visited));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        stats.success_rate()
    ));

    // Depth breakdown
    if !report.pages.is_empty() {
        md.push_str("## Depth Breakdown\n\n");
        md.push_str("| Depth | Pages |\n");
        md.push_str("|-------|-------|\n");
        for depth in 0..=report.max_depth {
            let count = report.pages.iter().filter(|p| p.depth == depth).count();
            if count > 0 {
                md.push_str(&format!("| {} | {} |\n", depth, count));
            }
        }
        md.push('\n');
    }

    md.push_str("## Pages\n\n");
    if views.is_empty() {
        md.push_str("No pages were fetched.\n");
    }
    for (index, view) in views.iter().enumerate() {
        md.push_str(&format!("### {}. [{}]({})\n\n", index + 1, view.url, view.url));
        if let Some(title) = &view.title {
            md.push_str(&format!("*{}*\n\n", title));
        }
        md.push_str(&view.snippet);
        md.push_str("\n\n");
    }

    md
}
