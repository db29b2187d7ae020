//! Generated pages: the parameter report and the admin page.

use std::fmt::Write;
use std::path::Path;

use crate::params::ParameterStore;

/// File name of the parameter report inside the document root.
pub const PARAMS_REPORT_FILE: &str = "params_info.html";

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// HTML table of every stored parameter.
pub fn render_params_report(entries: &[(String, String)]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html><head><title>Parameters Info</title></head><body>\n\
         <h1>Parameters Info</h1>\n<table border=\"1\">\n<tr><th>Key</th><th>Value</th></tr>\n",
    );

    for (key, value) in entries {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(key),
            escape_html(value)
        );
    }

    html.push_str("</table>\n</body></html>\n");
    html
}

/// Admin page: a delete-parameter form above the current parameter list.
pub fn render_admin_page(entries: &[(String, String)]) -> String {
    let mut html = String::from(
        "<html><head><title>Bonus Page</title></head><body><h1>Bonus Page</h1>\
         <form method=\"post\" action=\"/bonus.html/delete-parameter\">\
         <label for=\"paramToDelete\">Enter parameter key to delete:</label><br>\
         <input type=\"text\" id=\"paramToDelete\" name=\"paramToDelete\"><br>\
         <input type=\"submit\" value=\"Submit\">\
         </form><p>Here are the current parameters:</p><ul>",
    );

    for (key, value) in entries {
        let _ = write!(
            html,
            "<li>{}: {}</li>",
            escape_html(key),
            escape_html(value)
        );
    }

    html.push_str("</ul></body></html>");
    html
}

pub fn render_missing_parameter() -> String {
    "<html><head><title>Bad Request</title></head><body><h1>Bad Request</h1>\
     <p>Parameter to delete not found</p></body></html>"
        .to_string()
}

/// Renders the report from the store and saves it as `params_info.html`.
///
/// Returns the rendered page even when saving fails; the failure is logged.
pub async fn refresh_params_report(root: &Path, store: &ParameterStore) -> String {
    let html = render_params_report(&store.snapshot().await);
    let target = root.join(PARAMS_REPORT_FILE);

    if let Err(e) = tokio::fs::write(&target, html.as_bytes()).await {
        tracing::warn!(path = %target.display(), error = %e, "Failed to save parameter report");
    }

    html
}
