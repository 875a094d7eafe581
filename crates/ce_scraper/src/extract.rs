//! Selector-cascade extraction of title and body text from blog HTML.
//!
//! Pure functions over a parsed document so the whole cascade is
//! testable without network access.

use ce_core::{Error, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};

/// A selector match must yield more text than this to be accepted.
const MIN_SELECTOR_TEXT: usize = 200;

/// Below this total the scrape is reported as failed.
const MIN_ARTICLE_TEXT: usize = 100;

static TITLE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["h1.wp-block-post-title", "h1.entry-title", "article h1", "h1"]
        .iter()
        .map(|s| Selector::parse(s).expect("static selector"))
        .collect()
});

// Ordered by specificity, WordPress themes first.
static CONTENT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        ".entry-content",
        ".post-content",
        ".wp-block-post-content",
        "article .content",
        ".blog-content",
        "main article",
        "article",
    ]
    .iter()
    .map(|s| Selector::parse(s).expect("static selector"))
    .collect()
});

static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article p, main p, .content p").expect("static selector"));

const STRIPPED_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];
const STRIPPED_CLASSES: &[&str] = &[
    "sidebar",
    "comments",
    "share-buttons",
    "related-posts",
    "breadcrumb",
];

#[derive(Debug, Clone)]
pub struct ScrapedArticle {
    pub title: String,
    pub content: String,
    pub url: String,
}

fn is_stripped(el: &ElementRef) -> bool {
    if STRIPPED_TAGS.contains(&el.value().name()) {
        return true;
    }
    el.value().classes().any(|c| STRIPPED_CLASSES.contains(&c))
}

fn collect_text(el: ElementRef, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    if !is_stripped(&child_el) {
                        collect_text(child_el, out);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Text content of an element with script/style/nav/footer/header and
/// sidebar/comment/share/related/breadcrumb subtrees removed.
fn clean_text(el: ElementRef) -> String {
    let mut out = String::new();
    if !is_stripped(&el) {
        collect_text(el, &mut out);
    }
    collapse_whitespace(&out)
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn extract_title(document: &Html) -> Option<String> {
    for selector in TITLE_SELECTORS.iter() {
        if let Some(el) = document.select(selector).next() {
            let title = collapse_whitespace(&el.text().collect::<String>());
            if !title.is_empty() {
                return Some(title);
            }
        }
    }
    None
}

/// First content-selector match whose cleaned text exceeds the
/// acceptance threshold; falls back to concatenated paragraph text.
pub fn extract_content(document: &Html) -> String {
    for selector in CONTENT_SELECTORS.iter() {
        if let Some(el) = document.select(selector).next() {
            let text = clean_text(el);
            if text.chars().count() > MIN_SELECTOR_TEXT {
                return text;
            }
        }
    }

    let paragraphs: Vec<String> = document
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|p| !p.is_empty())
        .collect();
    paragraphs.join("\n\n")
}

/// Extract a full article or fail when the page yields no usable
/// title/content. Failures are per-item: the caller logs and moves on.
pub fn extract_article(html: &str, url: &str) -> Result<ScrapedArticle> {
    let document = Html::parse_document(html);

    let title = extract_title(&document).unwrap_or_default();
    let content = extract_content(&document);

    if title.is_empty() || content.chars().count() < MIN_ARTICLE_TEXT {
        return Err(Error::Scraping(format!(
            "Could not extract content from {} (title: {:?}, content length: {})",
            url,
            title,
            content.chars().count()
        )));
    }

    Ok(ScrapedArticle {
        title,
        content,
        url: url.to_string(),
    })
}
