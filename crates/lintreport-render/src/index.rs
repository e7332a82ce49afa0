use crate::RenderableIndex;
use crate::markdown::escape_cell;
use std::fmt::Write;

/// Rows shown in the top rule codes table.
const TOP_CODES: usize = 20;

pub fn render_index_markdown(index: &RenderableIndex) -> String {
    let mut out = String::new();
    let s = &index.summary;

    let _ = writeln!(out, "# 📚 ИНДЕКС ОТЧЕТОВ {}: {}", index.tool.to_uppercase(), index.project);
    out.push('\n');
    let _ = writeln!(out, "**Дата анализа:** {}", index.started_at);
    let _ = writeln!(out, "**Всего файлов:** {}", s.files_scanned);
    out.push('\n');

    out.push_str("## 📊 СВОДКА\n\n");
    let _ = writeln!(out, "- 📁 Проверено файлов: {}", s.files_scanned);
    let _ = writeln!(out, "- ❌ С ошибками: {}", s.files_with_findings);
    let _ = writeln!(out, "- ✅ Без ошибок: {}", s.files_clean);
    if s.files_failed > 0 {
        let _ = writeln!(out, "- ⚠️ Не удалось проверить: {}", s.files_failed);
    }
    let _ = writeln!(out, "- 📊 Всего ошибок: {}", s.diagnostics_total);
    let _ = writeln!(out, "- 🔴 Критические: {}", s.critical);
    let _ = writeln!(out, "- 🟡 Важные: {}", s.important);
    let _ = writeln!(out, "- 🟢 Косметические: {}", s.cosmetic);
    out.push('\n');

    if !index.categories.is_empty() {
        out.push_str("## 📁 ПО КАТЕГОРИЯМ\n\n");
        out.push_str("| Категория | Файлов | Ошибок |\n");
        out.push_str("|-----------|--------|--------|\n");
        for c in &index.categories {
            let _ = writeln!(out, "| {} | {} | {} |", c.category, c.files, c.diagnostics);
        }
        out.push('\n');
    }

    if !index.codes.is_empty() {
        out.push_str("## 🔝 ЧАСТЫЕ ОШИБКИ\n\n");
        out.push_str("| Код | Количество | Файлов | Уровень |\n");
        out.push_str("|-----|------------|--------|---------|\n");
        for c in index.codes.iter().take(TOP_CODES) {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} |",
                c.code,
                c.count,
                c.files,
                c.bucket.label()
            );
        }
        if index.codes.len() > TOP_CODES {
            let _ = writeln!(out, "\n_Еще кодов: {}_", index.codes.len() - TOP_CODES);
        }
        out.push('\n');
    }

    out.push_str("## 📋 ОТЧЕТЫ\n\n");
    if index.entries.is_empty() {
        out.push_str("Нет проверенных файлов.\n\n");
    } else {
        out.push_str("| # | Файл | Категория | Ошибок | Отчет |\n");
        out.push_str("|---|------|-----------|--------|-------|\n");
        for e in &index.entries {
            let link = match &e.report_file {
                Some(name) => format!("[{name}]({name})"),
                None => "-".to_string(),
            };
            let _ = writeln!(
                out,
                "| {:03} | `{}` | {} | {} | {} |",
                e.seq,
                escape_cell(&e.path),
                e.category,
                e.total,
                link
            );
        }
        out.push('\n');
    }

    if !index.failures.is_empty() {
        out.push_str("## ⚠️ НЕ УДАЛОСЬ ПРОВЕРИТЬ\n\n");
        for f in &index.failures {
            let _ = writeln!(out, "- `{}`: {}", f.path, f.message);
        }
        out.push('\n');
    }

    out.push_str("---\n");
    let _ = writeln!(
        out,
        "*🤖 Индекс сгенерирован автоматически: {}*",
        index.generated_at
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        RenderableBucket, RenderableCategoryRow, RenderableCodeRow, RenderableEntryRow,
        RenderableFailure, RenderableSummary,
    };

    fn index() -> RenderableIndex {
        RenderableIndex {
            project: "AI Security Assistant".to_string(),
            tool: "flake8".to_string(),
            started_at: "2025-09-14 10:30:00".to_string(),
            generated_at: "2025-09-14 10:30:05".to_string(),
            summary: RenderableSummary {
                files_scanned: 3,
                files_with_findings: 1,
                files_clean: 1,
                files_failed: 1,
                diagnostics_total: 4,
                critical: 2,
                important: 0,
                cosmetic: 2,
            },
            categories: vec![
                RenderableCategoryRow {
                    category: "OTHER".to_string(),
                    files: 1,
                    diagnostics: 0,
                },
                RenderableCategoryRow {
                    category: "SCRIPT".to_string(),
                    files: 1,
                    diagnostics: 4,
                },
            ],
            codes: vec![
                RenderableCodeRow {
                    code: "F401".to_string(),
                    bucket: RenderableBucket::Critical,
                    count: 2,
                    files: 1,
                },
                RenderableCodeRow {
                    code: "W291".to_string(),
                    bucket: RenderableBucket::Cosmetic,
                    count: 2,
                    files: 1,
                },
            ],
            entries: vec![
                RenderableEntryRow {
                    seq: 1,
                    path: "app/models.py".to_string(),
                    category: "OTHER".to_string(),
                    total: 0,
                    report_file: None,
                },
                RenderableEntryRow {
                    seq: 2,
                    path: "scripts/deploy.py".to_string(),
                    category: "SCRIPT".to_string(),
                    total: 4,
                    report_file: Some("002_scripts_deploy_py_REPORT.md".to_string()),
                },
            ],
            failures: vec![RenderableFailure {
                path: "broken.py".to_string(),
                message: "flake8 failed on broken.py (exit 3): boom".to_string(),
            }],
        }
    }

    #[test]
    fn renders_all_sections() {
        let md = render_index_markdown(&index());
        assert!(md.starts_with("# 📚 ИНДЕКС ОТЧЕТОВ FLAKE8: AI Security Assistant\n"));
        assert!(md.contains("- ❌ С ошибками: 1\n"));
        assert!(md.contains("- ⚠️ Не удалось проверить: 1\n"));
        assert!(md.contains("| SCRIPT | 1 | 4 |"));
        assert!(md.contains("| F401 | 2 | 1 | 🔴 критическая |"));
        assert!(md.contains(
            "| 002 | `scripts/deploy.py` | SCRIPT | 4 | [002_scripts_deploy_py_REPORT.md](002_scripts_deploy_py_REPORT.md) |"
        ));
        assert!(md.contains("| 001 | `app/models.py` | OTHER | 0 | - |"));
        assert!(md.contains("- `broken.py`: flake8 failed on broken.py (exit 3): boom"));
    }

    #[test]
    fn code_table_is_capped() {
        let mut idx = index();
        idx.codes = (0..25)
            .map(|i| RenderableCodeRow {
                code: format!("W{i:03}"),
                bucket: RenderableBucket::Cosmetic,
                count: 1,
                files: 1,
            })
            .collect();
        let md = render_index_markdown(&idx);
        assert!(md.contains("| W019 |"));
        assert!(!md.contains("| W020 |"));
        assert!(md.contains("_Еще кодов: 5_"));
    }

    #[test]
    fn failures_section_only_when_needed() {
        let mut idx = index();
        idx.failures.clear();
        idx.summary.files_failed = 0;
        let md = render_index_markdown(&idx);
        assert!(!md.contains("НЕ УДАЛОСЬ"));
    }
}
