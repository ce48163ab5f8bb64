//! Plain aligned tables for terminal output.

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN_WIDTH: usize = 4;
const SEPARATOR: &str = "  ";

/// Render rows under a header line and a dashed divider.
///
/// When `max_width` is set, the last column absorbs any overflow and is cut
/// with an ellipsis.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    if let (Some(max_width), Some(last)) = (options.max_width, widths.len().checked_sub(1)) {
        let fixed: usize = widths[..last].iter().sum::<usize>() + last * SEPARATOR.len();
        widths[last] = widths[last].min(max_width.saturating_sub(fixed).max(MIN_COLUMN_WIDTH));
    }

    let header_line = join_cells(
        headers.iter().map(|header| (*header).to_string()),
        &widths,
        false,
    );
    let divider = "-".repeat(header_line.trim_end().chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    for row in rows {
        let line = join_cells(row.iter().cloned(), &widths, options.color);
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn join_cells(cells: impl Iterator<Item = String>, widths: &[usize], color: bool) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| {
            let text = truncate_text(&cell, *width);
            let pad = width.saturating_sub(text.chars().count());
            let shown = if color { colorize_status(&text) } else { text };
            format!("{shown}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Wrap known status words in ANSI color codes.
#[must_use]
pub fn colorize_status(value: &str) -> String {
    let code = match value {
        "ok" | "clean" => "32",
        "timeout" | "truncated" => "33",
        "failed" | "violations" => "31",
        _ => return value.to_string(),
    };
    format!("\u{1b}[{code}m{value}\u{1b}[0m")
}
