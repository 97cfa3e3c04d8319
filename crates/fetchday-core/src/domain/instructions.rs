//! Puzzle page → Markdown conversion.
//!
//! The puzzle page wraps each part of the puzzle in an `<article>`. Only a
//! handful of tags ever appear inside, so instead of a general HTML parser
//! this walks the markup recursively and maps each known tag to Markdown.
//! Anything outside that vocabulary is rejected so a layout change on the
//! remote side is noticed instead of silently producing a broken README.

use std::iter::Peekable;
use std::str::Chars;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::DomainError;

static ARTICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<article.*?>(.+?)</article>").expect("article pattern is valid")
});

static HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="(.+?)""#).expect("href pattern is valid"));

/// Convert a full puzzle page into README Markdown.
///
/// Each article becomes one block followed by a newline. `puzzle_url` is
/// linked from the day's title heading.
pub fn instructions_to_markdown(html: &str, puzzle_url: &str) -> Result<String, DomainError> {
    let mut readme = String::new();
    for article in extract_articles(html)? {
        readme.push_str(&article_to_markdown(article, puzzle_url)?);
        readme.push('\n');
    }
    Ok(readme)
}

/// Bodies of every `<article>` element, in page order.
pub fn extract_articles(html: &str) -> Result<Vec<&str>, DomainError> {
    let articles: Vec<&str> = ARTICLE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|body| body.as_str()))
        .collect();

    if articles.is_empty() {
        return Err(DomainError::NoInstructionArticles);
    }
    Ok(articles)
}

/// Convert the body of one article.
pub fn article_to_markdown(article: &str, puzzle_url: &str) -> Result<String, DomainError> {
    let mut walker = TagWalker {
        puzzle_url,
        input: article.chars().peekable(),
    };

    let mut output = String::new();
    while walker.input.peek().is_some() {
        output.push_str(&walker.element(false)?);
    }
    Ok(output)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    H2,
    P,
    Ul,
    Li,
    Em,
    Code,
    Pre,
    A,
    Span,
    /// Trailing text with no tag left to open.
    End,
}

struct TagWalker<'a> {
    puzzle_url: &'a str,
    input: Peekable<Chars<'a>>,
}

impl TagWalker<'_> {
    /// Convert one element. The opening `<` has already been consumed,
    /// except at the top level where text before the tag is discarded.
    fn element(&mut self, preformatted: bool) -> Result<String, DomainError> {
        let whole_tag: String = self.input.by_ref().take_while(|&c| c != '>').collect();
        let tag = self.parse_tag(&whole_tag)?;

        let mut inner_preformatted = preformatted;
        let mut output = String::new();

        match tag {
            Tag::H2 => output.push_str("\n## "),
            Tag::Em if preformatted => output.push_str("<b>"),
            Tag::Code if preformatted => output.push_str("<code>"),
            Tag::Em => output.push_str("**"),
            Tag::Code => output.push('`'),
            Tag::Pre => {
                output.push_str("\n\n<pre>");
                inner_preformatted = true;
            }
            Tag::P => output.push_str("\n\n"),
            Tag::Ul => output.push('\n'),
            Tag::Li => output.push_str("  - "),
            Tag::A => output.push('['),
            Tag::Span | Tag::End => {}
        }

        loop {
            let Some(c) = self.input.next() else {
                return Ok(output);
            };
            match c {
                '<' if self.input.peek() == Some(&'/') => {
                    self.input.by_ref().take_while(|&c| c != '>').for_each(drop);
                    break;
                }
                '<' => output.push_str(&self.element(inner_preformatted)?),
                '>' => break,
                c => output.push(c),
            }
        }

        match tag {
            Tag::H2 if output.contains(" --- Day") => {
                output = output.replace("\n## ", "# [");
                output.push_str(&format!("]({})", self.puzzle_url));
            }
            Tag::Em if preformatted => output.push_str("</b>"),
            Tag::Code if preformatted => output.push_str("</code>"),
            Tag::Em => output.push_str("**"),
            Tag::Code => output.push('`'),
            Tag::Pre => output.push_str("</pre>"),
            Tag::A => {
                let link = HREF
                    .captures(&whole_tag)
                    .and_then(|caps| caps.get(1))
                    .ok_or_else(|| DomainError::MissingLinkTarget {
                        anchor: whole_tag.trim().to_string(),
                    })?;
                output.push_str(&format!("]({})", link.as_str()));
            }
            Tag::H2 | Tag::P | Tag::Ul | Tag::Li | Tag::Span | Tag::End => {}
        }

        let mut output = output.trim_end().to_owned();

        // inline code holding emphasis reads better as emphasised code
        if output.starts_with('`') && output.contains("**") {
            output = format!("**{}**", output.replace("**", ""));
        }

        if !preformatted {
            output = output.replace("&gt;", ">").replace("&lt;", "<");
        }

        Ok(output)
    }

    fn parse_tag(&mut self, whole_tag: &str) -> Result<Tag, DomainError> {
        let name: String = whole_tag.chars().take_while(|&c| c != ' ').collect();
        let name = name.trim();
        let name = name.strip_prefix('<').unwrap_or(name);

        Ok(match name {
            "h2" => Tag::H2,
            "p" => Tag::P,
            "ul" => Tag::Ul,
            "li" => Tag::Li,
            "em" => Tag::Em,
            "code" => Tag::Code,
            "pre" => Tag::Pre,
            "a" => Tag::A,
            "span" => Tag::Span,
            "" if self.input.peek().is_none() => Tag::End,
            other => {
                return Err(DomainError::UnknownInstructionTag {
                    tag: other.to_string(),
                });
            }
        })
    }
}
