//! Page template substitution.

use crate::error::Result;
use crate::{extract_title, markdown_to_html};

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Replace every title and content placeholder in `template`.
pub fn fill(template: &str, title: &str, content: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
}

/// Point root-relative `href="/` and `src="/` values at `base_path`.
pub fn rewrite_base_path(html: &str, base_path: &str) -> String {
    if base_path == "/" {
        return html.to_string();
    }
    html.replace("href=\"/", &format!("href=\"{base_path}"))
        .replace("src=\"/", &format!("src=\"{base_path}"))
}

/// Render one markdown page into `template`.
pub fn render_page(template: &str, markdown: &str, base_path: &str) -> Result<String> {
    let title = extract_title(markdown)?;
    let content = markdown_to_html(markdown)?;
    Ok(rewrite_base_path(&fill(template, &title, &content), base_path))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::RenderError;

    const TEMPLATE: &str = "<html><head><title>{{ Title }}</title>\
        <link href=\"/index.css\" rel=\"stylesheet\"></head>\
        <body><article>{{ Content }}</article></body></html>";

    #[test]
    fn fills_every_placeholder() {
        assert_eq!(
            fill("{{ Title }}|{{ Content }}|{{ Title }}", "T", "C"),
            "T|C|T"
        );
    }

    #[test]
    fn root_base_path_is_identity() {
        let html = r#"<a href="/x">x</a><img src="/y.png">"#;
        assert_eq!(rewrite_base_path(html, "/"), html);
    }

    #[test]
    fn rewrites_root_relative_paths() {
        assert_eq!(
            rewrite_base_path(
                r#"<a href="/x">x</a><a href="https://e.com">e</a><img src="/y.png">"#,
                "/repo/"
            ),
            r#"<a href="/repo/x">x</a><a href="https://e.com">e</a><img src="/repo/y.png">"#
        );
    }

    #[test]
    fn renders_a_page() {
        let page = render_page(TEMPLATE, "# Hello\n\nSee [home](/).", "/site/").unwrap();
        assert_eq!(
            page,
            "<html><head><title>Hello</title>\
             <link href=\"/site/index.css\" rel=\"stylesheet\"></head>\
             <body><article><div><h1>Hello</h1><p>See <a href=\"/site/\">home</a>.</p></div>\
             </article></body></html>"
        );
    }

    #[test]
    fn page_without_title_fails() {
        assert_eq!(
            render_page(TEMPLATE, "no title here", "/"),
            Err(RenderError::NoTitleFound)
        );
    }
}
