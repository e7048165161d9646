use std::sync::LazyLock;

use regex::Regex;

use crate::block::Span;
use crate::error::{RenderError, Result};

/// `![alt](src)`, shortest match.
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());

/// `[text](href)`, shortest match.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

/// Split flat text into inline spans.
///
/// Passes run in a fixed order over the previous pass's output: `**` bold,
/// `_` italic, backtick code, then images and finally links. Only plain
/// text spans are re-split, so formatting never nests.
pub fn tokenize(text: &str) -> Result<Vec<Span>> {
    let spans = vec![Span::Text(text.to_owned())];
    let spans = split_delimiter(spans, "**", Span::Bold)?;
    let spans = split_delimiter(spans, "_", Span::Italic)?;
    let spans = split_delimiter(spans, "`", Span::Code)?;
    let spans = split_pattern(spans, &IMAGE_RE, |alt, url| Span::Image { alt, url });
    let spans = split_pattern(spans, &LINK_RE, |text, url| Span::Link { text, url });
    Ok(spans)
}

/// Split every plain span on `delimiter`, alternating plain and `wrap`ped
/// segments. An even segment count means a delimiter was left open.
fn split_delimiter(
    spans: Vec<Span>,
    delimiter: &'static str,
    wrap: fn(String) -> Span,
) -> Result<Vec<Span>> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        let Span::Text(text) = span else {
            out.push(span);
            continue;
        };

        let segments: Vec<&str> = text.split(delimiter).collect();
        if segments.len() % 2 == 0 {
            return Err(RenderError::MalformedInlineSyntax {
                delimiter,
                text: text.clone(),
            });
        }

        for (i, segment) in segments.into_iter().enumerate() {
            if segment.is_empty() {
                continue;
            }
            let segment = segment.to_owned();
            out.push(if i % 2 == 0 {
                Span::Text(segment)
            } else {
                wrap(segment)
            });
        }
    }
    Ok(out)
}

/// Pull every `pattern` match out of plain spans, keeping the text around
/// each match as plain spans.
fn split_pattern(
    spans: Vec<Span>,
    pattern: &Regex,
    wrap: fn(String, String) -> Span,
) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        let Span::Text(text) = span else {
            out.push(span);
            continue;
        };

        let mut last = 0;
        for caps in pattern.captures_iter(&text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                out.push(Span::Text(text[last..whole.start()].to_owned()));
            }
            out.push(wrap(caps[1].to_owned(), caps[2].to_owned()));
            last = whole.end();
        }
        if last < text.len() {
            out.push(Span::Text(text[last..].to_owned()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    #[test]
    fn plain_text() {
        assert_eq!(tokenize("just words").unwrap(), vec![text("just words")]);
    }

    #[test]
    fn empty_text_has_no_spans() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn all_span_kinds() {
        let spans = tokenize(
            "This is **text** with an _italic_ word and a `code block` and an \
             ![obi wan image](https://i.imgur.com/fJRm4Vk.jpeg) and a [link](https://boot.dev)",
        )
        .unwrap();
        assert_eq!(
            spans,
            vec![
                text("This is "),
                Span::Bold("text".into()),
                text(" with an "),
                Span::Italic("italic".into()),
                text(" word and a "),
                Span::Code("code block".into()),
                text(" and an "),
                Span::Image {
                    alt: "obi wan image".into(),
                    url: "https://i.imgur.com/fJRm4Vk.jpeg".into(),
                },
                text(" and a "),
                Span::Link {
                    text: "link".into(),
                    url: "https://boot.dev".into(),
                },
            ]
        );
    }

    #[test]
    fn bold_segments_alternate_with_text() {
        let input = "a **b** c **d** e";
        let spans = tokenize(input).unwrap();
        assert_eq!(
            spans,
            vec![
                text("a "),
                Span::Bold("b".into()),
                text(" c "),
                Span::Bold("d".into()),
                text(" e"),
            ]
        );
        let joined: String = spans.iter().map(Span::text).collect();
        assert_eq!(joined, input.replace("**", ""));
    }

    #[test]
    fn leading_and_trailing_delimiters_drop_empty_segments() {
        assert_eq!(
            tokenize("**all bold**").unwrap(),
            vec![Span::Bold("all bold".into())]
        );
    }

    #[test]
    fn formatting_does_not_nest() {
        // the underscores sit inside an already-bold span and stay literal
        assert_eq!(
            tokenize("**snake_case_name**").unwrap(),
            vec![Span::Bold("snake_case_name".into())]
        );
    }

    #[test]
    fn image_wins_over_link() {
        assert_eq!(
            tokenize("![a](u1) and [b](u2)").unwrap(),
            vec![
                Span::Image {
                    alt: "a".into(),
                    url: "u1".into()
                },
                text(" and "),
                Span::Link {
                    text: "b".into(),
                    url: "u2".into()
                },
            ]
        );
    }

    #[test]
    fn several_images_in_one_run() {
        let spans = tokenize(
            "This is text with an ![image](https://i.imgur.com/zjjcJKZ.png) and another \
             ![second image](https://i.imgur.com/3elNhQu.png)",
        )
        .unwrap();
        assert_eq!(
            spans,
            vec![
                text("This is text with an "),
                Span::Image {
                    alt: "image".into(),
                    url: "https://i.imgur.com/zjjcJKZ.png".into(),
                },
                text(" and another "),
                Span::Image {
                    alt: "second image".into(),
                    url: "https://i.imgur.com/3elNhQu.png".into(),
                },
            ]
        );
    }

    #[test]
    fn only_links_and_images_carry_urls() {
        let spans = tokenize("**b** _i_ `c` [l](u) ![m](v) t").unwrap();
        for span in &spans {
            let has_url = matches!(span, Span::Link { .. } | Span::Image { .. });
            assert_eq!(span.url().is_some(), has_url, "{span:?}");
        }
    }

    #[test]
    fn code_span_keeps_link_syntax() {
        assert_eq!(
            tokenize("`[x](y)`").unwrap(),
            vec![Span::Code("[x](y)".into())]
        );
    }

    #[rstest]
    #[case("a **b", "**")]
    #[case("an _open italic", "_")]
    #[case("tick ` here", "`")]
    fn unterminated_delimiter(#[case] input: &str, #[case] delimiter: &str) {
        match tokenize(input) {
            Err(RenderError::MalformedInlineSyntax { delimiter: d, .. }) => {
                assert_eq!(d, delimiter)
            }
            other => panic!("expected MalformedInlineSyntax, got {other:?}"),
        }
    }
}
