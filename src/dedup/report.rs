//! Markdown report for a batch of duplicate checks

use super::result::{BatchSummary, DuplicateCheckResult};
use chrono::{DateTime, Local};
use std::fmt::Write;

/// Render a reviewer-facing Markdown report.
///
/// Headings are bilingual to match the catalog. Names are escaped so a `|`
/// in a resource name cannot break the table.
pub fn generate_report(results: &[DuplicateCheckResult], generated_at: DateTime<Local>) -> String {
    let summary = BatchSummary::from_results(results);
    let mut out = String::new();

    let _ = writeln!(out, "# 重复检测报告 / Duplicate Detection Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "生成时间 / Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);
    let _ = writeln!(out, "检查资源数 / Resources checked: {}", summary.checked);
    let _ = writeln!(out);
    let _ = writeln!(out, "---");
    let _ = writeln!(out);

    let _ = writeln!(out, "## 统计摘要 / Summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "- 检查总数 / Checked: {}", summary.checked);
    let _ = writeln!(out, "- 发现重复 / Duplicates: {}", summary.duplicates);
    let _ = writeln!(out, "- 通过检查 / Passed: {}", summary.passed);
    let _ = writeln!(out, "- 需要复核 / Needs review: {}", summary.advisory);

    let duplicates: Vec<&DuplicateCheckResult> = results.iter().filter(|r| r.is_duplicate).collect();
    if !duplicates.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "---");
        let _ = writeln!(out);
        let _ = writeln!(out, "## ⚠️ 发现的重复 / Duplicates Found");
        let _ = writeln!(out);
        let _ = writeln!(out, "| 资源 / Resource | 重复类型 / Type | 匹配资源 / Matched | 相似度 / Similarity |");
        let _ = writeln!(out, "|------|---------|---------|--------|");
        for r in duplicates {
            let kind = r.duplicate_type.map(|t| t.as_str()).unwrap_or("unknown");
            let _ = writeln!(
                out,
                "| {} | {} | {} | {:.2} |",
                cell(&r.resource_name),
                kind,
                cell(r.matched_name().unwrap_or("Unknown")),
                r.similarity_score
            );
        }
    }

    let advisory: Vec<&DuplicateCheckResult> = results.iter().filter(|r| r.is_advisory()).collect();
    if !advisory.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "---");
        let _ = writeln!(out);
        let _ = writeln!(out, "## 🔍 相似资源 / Near Matches");
        let _ = writeln!(out);
        for r in advisory {
            let _ = writeln!(out, "- {}", r.resource_name);
            for (check, m) in r.advisory_matches() {
                let _ = writeln!(out, "  - {} ({}: {:.2})", m.name, check, m.score);
            }
        }
    }

    let passed: Vec<&DuplicateCheckResult> = results.iter().filter(|r| !r.is_duplicate).collect();
    if !passed.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "---");
        let _ = writeln!(out);
        let _ = writeln!(out, "## ✅ 通过检查 / Passed");
        let _ = writeln!(out);
        for r in passed {
            let _ = writeln!(out, "- {}", r.resource_name);
        }
    }

    out
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}
