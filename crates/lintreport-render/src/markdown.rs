use crate::excerpt::truncate_excerpt;
use crate::RenderableFileReport;
use std::fmt::Write;

const STATUS_FINDINGS: &str = "❌ ТРЕБУЕТ ИСПРАВЛЕНИЯ";
const STATUS_CLEAN: &str = "✅ ОШИБОК НЕ НАЙДЕНО";

pub fn render_file_markdown(report: &RenderableFileReport) -> String {
    let mut out = String::new();
    let status = if report.total > 0 {
        STATUS_FINDINGS
    } else {
        STATUS_CLEAN
    };

    let _ = writeln!(out, "# 📋 ОТЧЕТ #{}: {}", report.seq, report.path);
    out.push('\n');
    let _ = writeln!(out, "**Дата анализа:** {}", report.analyzed_at);
    let _ = writeln!(out, "**Категория:** {}", report.category);
    let _ = writeln!(out, "**Статус:** {status}");
    out.push('\n');

    out.push_str("## 📊 СТАТИСТИКА\n\n");
    let _ = writeln!(out, "- 📊 Общее количество ошибок: {}", report.total);
    let _ = writeln!(out, "- 📁 Тип файла: {}", report.category);
    let _ = writeln!(out, "- 📍 Путь: `{}`", report.path);
    out.push('\n');

    out.push_str("## ❌ ОБНАРУЖЕННЫЕ ОШИБКИ\n\n");
    if report.total == 0 {
        let _ = writeln!(out, "✅ {} не обнаружил нарушений в этом файле.", report.tool);
        out.push('\n');
    } else {
        out.push_str("| Код | Количество | Описание |\n");
        out.push_str("|-----|------------|----------|\n");
        for row in &report.rows {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                row.code,
                row.count,
                escape_cell(&row.description)
            );
        }
        out.push('\n');

        out.push_str("### 🎯 Рекомендации по исправлению\n\n");
        for tier in report.tiers.iter().filter(|t| !t.items.is_empty()) {
            let _ = writeln!(out, "#### {}", tier.bucket.tier_heading());
            for item in &tier.items {
                let _ = writeln!(
                    out,
                    "- **{}** ({}): {}",
                    item.code, item.count, item.remediation
                );
            }
            out.push('\n');
        }
    }

    let _ = writeln!(out, "### 📝 Детальный вывод {}", report.tool);
    out.push('\n');
    let excerpt = truncate_excerpt(&report.raw_output, report.excerpt_chars);
    let fence = code_fence(&excerpt);
    let _ = writeln!(out, "{fence}text");
    // Only the final line break is dropped; the fence line supplies it.
    let body = excerpt.strip_suffix('\n').unwrap_or(&excerpt);
    if !body.is_empty() {
        out.push_str(body);
        out.push('\n');
    }
    let _ = writeln!(out, "{fence}");
    out.push('\n');

    out.push_str("---\n");
    let _ = writeln!(
        out,
        "*🤖 Отчет сгенерирован автоматически: {}*",
        report.generated_at
    );
    let _ = writeln!(out, "*{} · Отчет #{}*", report.project, report.seq);

    out
}

/// Backtick fence longer than any backtick run inside `body` (at least three).
fn code_fence(body: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in body.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat(longest.max(2) + 1)
}

/// Table cells cannot hold raw pipes or line breaks.
pub(crate) fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\n', '\r'], " ")
}
