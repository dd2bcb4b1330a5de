//! Console rendering for scan results.
//!
//! Table and list views are composed as pure functions so they can be
//! asserted against literal fixtures; printing streams incrementally,
//! one file at a time, in traversal order.

use crate::models::{Issue, OutputFormat, ScanResult};
use crate::utils::success_prefix;

const HEADERS: [&str; 7] = [
    "#",
    "Issue Title",
    "Issue Type",
    "Severity",
    "Line(s)",
    "Description",
    "Suggestion",
];

/// Soft-wrap caps per column; the index column is never wrapped.
const MAX_WIDTHS: [Option<usize>; 7] = [
    None,
    Some(25),
    Some(15),
    Some(10),
    Some(10),
    Some(40),
    Some(40),
];

/// Word-wrap `text` to at most `width` columns. Words longer than the
/// width are hard-split; embedded newlines are respected.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0usize;
        for word in raw_line.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();
            while chars.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                lines.push(chars[..width].iter().collect());
                chars.drain(..width);
            }
            let word_len = chars.len();
            let word: String = chars.into_iter().collect();
            if current.is_empty() {
                current = word;
                current_len = word_len;
            } else if current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(&word);
                current_len += 1 + word_len;
            } else {
                lines.push(std::mem::take(&mut current));
                current = word;
                current_len = word_len;
            }
        }
        lines.push(current);
    }
    lines
}

fn issue_cells(idx: usize, issue: &Issue) -> [String; 7] {
    [
        (idx + 1).to_string(),
        issue.title.clone(),
        issue.issue_type.clone(),
        issue.severity.to_string(),
        issue.lines_display(),
        issue.description.clone(),
        issue.suggestion.clone(),
    ]
}

fn column_widths(rows: &[[String; 7]]) -> [usize; 7] {
    let mut widths = [0usize; 7];
    for (i, header) in HEADERS.iter().enumerate() {
        widths[i] = header.len();
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let longest = cell
                .split('\n')
                .map(|l| l.chars().count())
                .max()
                .unwrap_or(0);
            widths[i] = widths[i].max(longest);
        }
    }
    for (i, cap) in MAX_WIDTHS.iter().enumerate() {
        if let Some(cap) = cap {
            widths[i] = widths[i].min(*cap);
        }
    }
    widths
}

fn separator(widths: &[usize; 7]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line
}

fn render_row(cells: &[Vec<String>; 7], widths: &[usize; 7]) -> String {
    let height = cells.iter().map(Vec::len).max().unwrap_or(1);
    let mut out = String::new();
    for line_no in 0..height {
        out.push('|');
        for (i, cell) in cells.iter().enumerate() {
            let text = cell.get(line_no).map(String::as_str).unwrap_or("");
            out.push_str(&format!(" {:<width$} |", text, width = widths[i]));
        }
        out.push('\n');
    }
    out
}

/// Compose a grid-formatted table of all issues for one file.
pub fn compose_issue_table(issues: &[Issue]) -> String {
    let rows: Vec<[String; 7]> = issues
        .iter()
        .enumerate()
        .map(|(i, issue)| issue_cells(i, issue))
        .collect();
    let widths = column_widths(&rows);
    let sep = separator(&widths);

    let header_cells: [Vec<String>; 7] =
        std::array::from_fn(|i| vec![HEADERS[i].to_string()]);

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&header_cells, &widths));
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        let wrapped: [Vec<String>; 7] = std::array::from_fn(|i| wrap_text(&row[i], widths[i]));
        out.push_str(&render_row(&wrapped, &widths));
        out.push_str(&sep);
        out.push('\n');
    }
    out
}

/// Compose the numbered-block list view of all issues for one file.
pub fn compose_issue_list(issues: &[Issue]) -> String {
    let mut out = String::new();
    for (idx, issue) in issues.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {} [{}] (Severity: {})\n",
            idx + 1,
            issue.title,
            issue.issue_type,
            issue.severity
        ));
        out.push_str(&format!("   Lines: {}\n", issue.lines_display()));
        out.push_str(&format!("   Description: {}\n", issue.description));
        out.push_str(&format!("   Suggestion: {}\n", issue.suggestion));
        out.push_str(&"-".repeat(80));
        out.push('\n');
    }
    out
}

/// Print one file's findings as they arrive. Zero issues get a success
/// marker in every mode; pdf mode defers issue rendering to the report.
pub fn print_file_result(result: &ScanResult, format: OutputFormat) {
    if result.issues.is_empty() {
        println!("{} No accessibility issues found.\n", success_prefix());
        return;
    }
    match format {
        OutputFormat::Table => {
            print!("{}", compose_issue_table(&result.issues));
            println!("\n{}\n", "-".repeat(100));
        }
        OutputFormat::List => {
            print!("{}", compose_issue_list(&result.issues));
        }
        OutputFormat::Pdf => {}
    }
}
