//! Application controllers. Each one is registered under its type name, e.g. `PhotoController`.

pub mod home;
pub mod photo;

pub use home::HomeController;
pub use photo::PhotoController;

use foto_core::response::TEXT_HTML;
use foto_core::Response;

/// Start an HTML response.
pub(crate) fn html(response: &mut Response) -> &mut Response {
    response.set_content_type(TEXT_HTML)
}

/// Escape text for an HTML body.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
