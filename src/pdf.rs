//! PDF report assembly.
//!
//! Builds a single letter-sized document: title, metadata table, summary
//! line, then one section per scanned file with either a "no issues"
//! notice or a bordered issue table. Free-text fields are HTML-entity
//! escaped before embedding because the paragraph markup layer treats
//! `&`, `<` and `>` as markup. Cell text composition is kept pure so the
//! escaping can be asserted without generating a document.

use crate::models::{Issue, ScanRequest, ScanResult, Severity};
use anyhow::Context;
use chrono::{DateTime, Local};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PAGE_WIDTH: f32 = 215.9; // letter, mm
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 12.7; // 0.5 inch
const PT_TO_MM: f32 = 0.352_778;

/// Per-column widths of the issue table in mm; sums to the usable width.
const COLUMN_WIDTHS: [f32; 7] = [9.0, 31.0, 22.0, 16.0, 16.0, 48.0, 48.5];

const TABLE_HEADERS: [&str; 7] = [
    "#",
    "Title",
    "Type",
    "Severity",
    "Lines",
    "Description",
    "Suggestion",
];

/// Escape HTML entities in free text destined for the report.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Report file name for a given generation time:
/// `accessibility_report_<YYYYMMDD_HHMMSS>.pdf`.
pub fn report_filename(timestamp: &DateTime<Local>) -> String {
    format!(
        "accessibility_report_{}.pdf",
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Summary line for the whole run.
pub fn compose_summary(results: &[ScanResult]) -> String {
    let total_files = results.len();
    let total_issues: usize = results.iter().map(|r| r.issues.len()).sum();
    let files_with_issues = results.iter().filter(|r| !r.issues.is_empty()).count();
    format!(
        "Summary: {} issue(s) found across {} of {} file(s)",
        total_issues, files_with_issues, total_files
    )
}

/// Issue table cells with free-text fields escaped, one row per issue.
pub fn compose_pdf_rows(issues: &[Issue]) -> Vec<[String; 7]> {
    issues
        .iter()
        .enumerate()
        .map(|(idx, issue)| {
            [
                (idx + 1).to_string(),
                escape_html(&issue.title),
                escape_html(&issue.issue_type),
                issue.severity.to_string(),
                issue.lines_display(),
                escape_html(&issue.description),
                escape_html(&issue.suggestion),
            ]
        })
        .collect()
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::High => Color::Rgb(Rgb::new(0.85, 0.2, 0.2, None)),
        Severity::Medium => Color::Rgb(Rgb::new(0.92, 0.55, 0.1, None)),
        Severity::Low => Color::Rgb(Rgb::new(0.16, 0.65, 0.27, None)),
    }
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

/// Rough Helvetica advance estimate, good enough for wrapping and
/// centering.
fn text_width_mm(text: &str, font_pt: f32) -> f32 {
    text.chars().count() as f32 * font_pt * 0.5 * PT_TO_MM
}

fn chars_per_cell(width_mm: f32, font_pt: f32) -> usize {
    let per_char = font_pt * 0.5 * PT_TO_MM;
    ((width_mm - 2.0) / per_char).max(1.0) as usize
}

/// Cursor-based page writer; adds pages as content runs past the margin.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl<'a> PageCursor<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        PageCursor {
            doc,
            layer,
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn advance(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn text(&self, text: &str, font_pt: f32, x: f32, font: &IndirectFontRef) {
        self.layer.use_text(text, font_pt, Mm(x), Mm(self.y), font);
    }

    fn hline(&self, x1: f32, x2: f32, y: f32) {
        self.layer.set_outline_thickness(0.3);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(y)), false),
                (Point::new(Mm(x2), Mm(y)), false),
            ],
            is_closed: false,
        });
    }

    fn vline(&self, x: f32, y1: f32, y2: f32) {
        self.layer.set_outline_thickness(0.3);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x), Mm(y1)), false),
                (Point::new(Mm(x), Mm(y2)), false),
            ],
            is_closed: false,
        });
    }
}

fn column_offsets() -> [f32; 7] {
    let mut offsets = [0.0; 7];
    let mut x = MARGIN;
    for (i, w) in COLUMN_WIDTHS.iter().enumerate() {
        offsets[i] = x;
        x += w;
    }
    offsets
}

fn table_right_edge() -> f32 {
    MARGIN + COLUMN_WIDTHS.iter().sum::<f32>()
}

/// Draw one table row (wrapped cells, grid borders). The severity column
/// is rendered bold and colored by level.
fn draw_table_row(
    cursor: &mut PageCursor<'_>,
    cells: &[String; 7],
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
    font_pt: f32,
    severity: Option<Severity>,
) {
    let line_height = font_pt * PT_TO_MM * 1.35;
    let wrapped: Vec<Vec<String>> = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| crate::output::wrap_text(cell, chars_per_cell(COLUMN_WIDTHS[i], font_pt)))
        .collect();
    let height = wrapped.iter().map(Vec::len).max().unwrap_or(1) as f32 * line_height + 2.0;

    cursor.ensure_space(height + 2.0);
    let top = cursor.y;
    let offsets = column_offsets();
    for (i, lines) in wrapped.iter().enumerate() {
        let is_severity = i == 3 && severity.is_some();
        if is_severity {
            cursor.layer.set_fill_color(severity_color(severity.unwrap_or(Severity::Low)));
        }
        let cell_font = if is_severity { bold } else { font };
        let mut y = top - line_height;
        for line in lines {
            cursor
                .layer
                .use_text(line.as_str(), font_pt, Mm(offsets[i] + 1.0), Mm(y), cell_font);
            y -= line_height;
        }
        if is_severity {
            cursor.layer.set_fill_color(black());
        }
    }
    let bottom = top - height;
    cursor.hline(MARGIN, table_right_edge(), bottom);
    for x in offsets {
        cursor.vline(x, top, bottom);
    }
    cursor.vline(table_right_edge(), top, bottom);
    cursor.y = bottom;
}

/// Build the report and write it into `out_dir`; returns the file name.
pub fn export_report(
    results: &[ScanResult],
    request: &ScanRequest,
    out_dir: &Path,
) -> anyhow::Result<String> {
    let now = Local::now();
    let filename = report_filename(&now);
    let path = out_dir.join(&filename);

    let (doc, page, layer) =
        PdfDocument::new("Accessibility Analysis Report", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    {
        let mut cursor = PageCursor::new(&doc, doc.get_page(page).get_layer(layer));

        // Title, centered
        let title = "Accessibility Analysis Report";
        cursor.advance(10.0);
        let title_x = (PAGE_WIDTH - text_width_mm(title, 24.0)) / 2.0;
        cursor.text(title, 24.0, title_x.max(MARGIN), &bold);
        cursor.advance(12.0);

        // Metadata table
        let metadata = [
            ("WCAG Version:", request.version.to_string()),
            ("Accessibility Level:", request.level.to_string()),
            ("Scan Directory:", request.root.display().to_string()),
            (
                "Report Generated:",
                now.format("%Y-%m-%d %H:%M:%S").to_string(),
            ),
        ];
        let label_width = 50.0;
        let meta_right = MARGIN + 150.0;
        cursor.hline(MARGIN, meta_right, cursor.y);
        for (label, value) in &metadata {
            let row_height = 6.5;
            cursor.ensure_space(row_height);
            let top = cursor.y;
            cursor.advance(4.5);
            cursor.text(label, 10.0, MARGIN + 1.0, &bold);
            cursor.text(value, 10.0, MARGIN + label_width + 1.0, &font);
            cursor.advance(row_height - 4.5);
            cursor.hline(MARGIN, meta_right, cursor.y);
            cursor.vline(MARGIN, top, cursor.y);
            cursor.vline(MARGIN + label_width, top, cursor.y);
            cursor.vline(meta_right, top, cursor.y);
        }
        cursor.advance(10.0);

        // Summary
        cursor.text(&compose_summary(results), 14.0, MARGIN, &bold);
        cursor.advance(10.0);

        // Per-file sections, in traversal order
        for result in results {
            let base_name = result
                .file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| result.file.display().to_string());

            cursor.ensure_space(20.0);
            cursor.text(&format!("File: {}", base_name), 12.0, MARGIN, &bold);
            cursor.advance(5.0);
            cursor.layer.set_fill_color(Color::Rgb(Rgb::new(0.4, 0.4, 0.4, None)));
            cursor.text(&result.file.display().to_string(), 8.0, MARGIN, &font);
            cursor.layer.set_fill_color(black());
            cursor.advance(6.0);

            if result.issues.is_empty() {
                cursor.layer.set_fill_color(severity_color(Severity::Low));
                cursor.text("No accessibility issues found.", 10.0, MARGIN, &font);
                cursor.layer.set_fill_color(black());
                cursor.advance(10.0);
                continue;
            }

            let header: [String; 7] =
                std::array::from_fn(|i| TABLE_HEADERS[i].to_string());
            cursor.hline(MARGIN, table_right_edge(), cursor.y);
            draw_table_row(&mut cursor, &header, &bold, &bold, 9.0, None);
            for (idx, row) in compose_pdf_rows(&result.issues).iter().enumerate() {
                draw_table_row(
                    &mut cursor,
                    row,
                    &font,
                    &bold,
                    8.0,
                    Some(result.issues[idx].severity),
                );
            }
            cursor.advance(10.0);
        }
    }

    let file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    doc.save(&mut BufWriter::new(file))?;
    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OutputFormat, WcagLevel, WcagVersion};
    use regex::Regex;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn issue(title: &str, severity: Severity) -> Issue {
        Issue {
            title: title.into(),
            issue_type: "Alt Text".into(),
            description: "Image without alternative text".into(),
            line_numbers: vec![5],
            code_snippet: "<img src=x>".into(),
            suggestion: "Add alt".into(),
            severity,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img src="x" & 'y'>"#),
            "&lt;img src=&quot;x&quot; &amp; &#x27;y&#x27;&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_pdf_rows_escape_free_text() {
        let mut i = issue("Use <label> & <input>", Severity::High);
        i.suggestion = "wrap in <label>".into();
        let rows = compose_pdf_rows(&[i]);
        assert_eq!(rows[0][1], "Use &lt;label&gt; &amp; &lt;input&gt;");
        assert_eq!(rows[0][6], "wrap in &lt;label&gt;");
        // severity and lines stay verbatim
        assert_eq!(rows[0][3], "High");
        assert_eq!(rows[0][4], "5");
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            ScanResult::new(PathBuf::from("a.html"), vec![issue("t", Severity::High)]),
            ScanResult::new(PathBuf::from("b.html"), vec![]),
        ];
        assert_eq!(
            compose_summary(&results),
            "Summary: 1 issue(s) found across 1 of 2 file(s)"
        );
    }

    #[test]
    fn test_report_filename_shape() {
        let name = report_filename(&Local::now());
        let re = Regex::new(r"^accessibility_report_\d{8}_\d{6}\.pdf$").unwrap();
        assert!(re.is_match(&name), "unexpected name: {}", name);
    }

    #[test]
    fn test_export_writes_pdf() {
        let dir = tempdir().unwrap();
        let request = ScanRequest {
            level: WcagLevel::Aa,
            version: WcagVersion::V2_1,
            format: OutputFormat::Pdf,
            root: PathBuf::from("."),
        };
        let results = vec![
            ScanResult::new(PathBuf::from("a.html"), vec![issue("t", Severity::Medium)]),
            ScanResult::new(PathBuf::from("b.html"), vec![]),
        ];
        let name = export_report(&results, &request, dir.path()).unwrap();
        let re = Regex::new(r"^accessibility_report_\d{8}_\d{6}\.pdf$").unwrap();
        assert!(re.is_match(&name), "unexpected name: {}", name);
        let digits = name.chars().filter(|c| c.is_ascii_digit()).count();
        assert_eq!(digits, 14);
        let written = dir.path().join(&name);
        assert!(written.exists());
        assert!(std::fs::metadata(&written).unwrap().len() > 0);
    }
}
