//! Header and content-region templates for the tab bar widget

use crate::tab::{display_name, TabId};

pub const CLOSE_CONTROL_CLASS: &str = "ui-icon-close";

/// Element id of the content region belonging to a tab
pub fn content_region_id(id: TabId) -> String {
    format!("tab-{id}")
}

pub fn tab_header(id: TabId, name: Option<&str>, filename: Option<&str>) -> String {
    let label = escape_html(display_name(name, filename));
    let title = escape_html(filename.unwrap_or(""));
    let region = content_region_id(id);

    format!(
        "<li data-tab=\"{id}\"><a href=\"#{region}\" title=\"{title}\">{label}</a>\
         <span class=\"ui-icon {CLOSE_CONTROL_CLASS}\" role=\"presentation\">Remove Tab</span></li>"
    )
}

pub fn tab_content(id: TabId) -> String {
    format!(
        "<div id=\"{}\" class=\"tab-content\"></div>",
        content_region_id(id)
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
