use crate::model::{FormDefinition, Submission};
use crate::storage::submissions::{DISPLAY_LIMIT, tail};

// ============================================================================
// Submission table — "Last 10 Submissions"
// ============================================================================

/// Recent submissions laid out as rows of display text, one column per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SubmissionTable {
    /// Keep the trailing [`DISPLAY_LIMIT`] entries, most recent last.
    pub fn build(definition: &FormDefinition, submissions: &[Submission]) -> Self {
        let headers: Vec<String> = definition.fields.iter().map(|f| f.name.clone()).collect();
        let rows = tail(submissions.iter().collect::<Vec<_>>(), DISPLAY_LIMIT)
            .into_iter()
            .map(|s| headers.iter().map(|h| s.display_value(h)).collect())
            .collect();
        Self {
            title: definition.form_title.clone(),
            headers,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Format the table for terminal output.
///
/// ```text
/// === Contact: Last 10 Submissions ===
///
/// Email         | Age
/// --------------+----
/// a@example.com | 31
/// b@example.com | N/A
/// ```
pub fn format_console_table(table: &SubmissionTable) -> String {
    let mut out = format!("=== {}: Last {} Submissions ===\n\n", table.title, DISPLAY_LIMIT);

    if table.is_empty() {
        out.push_str("No submissions yet.\n");
        return out;
    }

    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            table
                .rows
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    out.push_str(&line(&table.headers));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &table.rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}
