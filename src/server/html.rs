//! Minimal HTML pages for the two web front ends.

use crate::pipeline::SavedPage;
use crate::store::ImageRecord;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
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

pub fn numeric_form() -> String {
    layout(
        "Code point grid",
        concat!(
            "<form method=\"post\" action=\"/\">\n",
            "<textarea name=\"text\" rows=\"10\" cols=\"60\"></textarea><br>\n",
            "<label>Columns <input type=\"number\" name=\"cols\" value=\"10\" min=\"1\"></label>\n",
            "<button type=\"submit\">Encode</button>\n",
            "</form>\n",
        ),
    )
}

pub fn numeric_result(records: &[ImageRecord]) -> String {
    let mut body = String::new();
    if records.is_empty() {
        body.push_str("<p>No pages were uploaded.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for record in records {
            let url = escape(&record.url);
            body.push_str(&format!(
                "<li><a href=\"{url}\">{}</a><br><img src=\"{url}\" width=\"248\"></li>\n",
                escape(&record.filename)
            ));
        }
        body.push_str("</ul>\n");
    }
    body.push_str("<p><a href=\"/\">Encode more text</a></p>\n");
    layout("Uploaded pages", &body)
}

pub fn admin(records: &[ImageRecord]) -> String {
    let mut body = String::from("<table>\n<tr><th>Filename</th><th>URL</th></tr>\n");
    for record in records {
        let url = escape(&record.url);
        body.push_str(&format!(
            "<tr><td>{}</td><td><a href=\"{url}\">{url}</a></td></tr>\n",
            escape(&record.filename)
        ));
    }
    body.push_str("</table>\n");
    layout("Stored images", &body)
}

pub fn tiles_form() -> String {
    layout(
        "Bit tiles",
        concat!(
            "<form method=\"post\" action=\"/\">\n",
            "<textarea name=\"input_string\" rows=\"10\" cols=\"60\"></textarea><br>\n",
            "<button type=\"submit\">Encode</button>\n",
            "</form>\n",
        ),
    )
}

pub fn tiles_result(pages: &[SavedPage]) -> String {
    let mut body = String::from("<ul>\n");
    for page in pages {
        let name = escape(&page.file_name);
        body.push_str(&format!(
            "<li><a href=\"/download/{name}\">{name}</a></li>\n"
        ));
    }
    body.push_str("</ul>\n<p><a href=\"/\">Encode more text</a></p>\n");
    layout("Saved pages", &body)
}
