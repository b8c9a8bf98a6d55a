use crate::render::display::SubmissionTable;
use crate::render::engine::RenderedForm;
use crate::render::widget::{RenderedField, Widget};

// ============================================================================
// HTML page — the generated form and its recent submissions
// ============================================================================

/// Self-contained HTML page for a rendered form.
///
/// - One labelled control per field, in definition order
/// - `required` on mandatory fields
/// - Dropdowns start on a disabled "Select" placeholder
/// - Submission table below the form, or "No submissions yet."
/// - Inline CSS (no external dependencies)
pub fn generate_form_page(form: &RenderedForm, table: &SubmissionTable) -> String {
    let mut controls = String::new();
    for field in form.fields() {
        controls.push_str(&render_field(field, form.value(&field.name).unwrap_or("")));
    }

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 0; background: #f5f5f5; }}
form {{ max-width: 500px; margin: 30px auto; padding: 20px; background: #f9f9f9; border-radius: 8px; box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1); }}
.form-field {{ display: flex; justify-content: space-between; margin-bottom: 15px; }}
.form-field label {{ font-weight: bold; margin-right: 15px; }}
.form-field input, .form-field select {{ width: 70%; }}
.submissions {{ max-width: 900px; margin: 20px auto; padding: 0 20px; }}
table {{ border-collapse: collapse; width: 100%; background: white; }}
th, td {{ border: 1px solid #ccc; padding: 6px 10px; }}
th {{ text-align: center; }}
</style>
</head>
<body>
<form method="post">
<h2>{title}</h2>
{controls}<button type="submit">Save</button>
</form>
<div class="submissions">
<h3>Last 10 Submissions</h3>
{table}</div>
</body>
</html>
"##,
        title = escape_html(form.title()),
        controls = controls,
        table = render_table(table),
    )
}

fn render_field(field: &RenderedField, value: &str) -> String {
    let name = escape_html(&field.name);
    let required = if field.required { " required" } else { "" };

    let control = match &field.widget {
        Widget::Select { choices } => {
            let placeholder_selected = if value.is_empty() { " selected" } else { "" };
            let mut options = format!(
                "<option value=\"\" disabled{}>Select</option>\n",
                placeholder_selected
            );
            for choice in choices {
                let selected = if choice == value { " selected" } else { "" };
                options.push_str(&format!(
                    "<option value=\"{c}\"{selected}>{c}</option>\n",
                    c = escape_html(choice),
                    selected = selected,
                ));
            }
            format!(
                "<select name=\"{}\"{}>\n{}</select>",
                name, required, options
            )
        }
        other => format!(
            "<input type=\"{}\" name=\"{}\" value=\"{}\"{}>",
            other.input_type().unwrap_or("text"),
            name,
            escape_html(value),
            required
        ),
    };

    format!(
        "<div class=\"form-field\">\n<label>{}</label>\n{}\n</div>\n",
        name, control
    )
}

fn render_table(table: &SubmissionTable) -> String {
    if table.is_empty() {
        return "<p>No submissions yet.</p>\n".to_string();
    }

    let mut out = String::from("<table>\n<thead>\n<tr>");
    for header in &table.headers {
        out.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
