//! Parsed-document capability layer
//!
//! Wraps the `scraper` DOM behind the handful of lookups the extraction
//! stages need: ordered script blocks, meta-tag content, first-match
//! selector queries, visible text, and `<img>` elements with declared
//! dimensions. Stages never touch selector syntax for anything else, so
//! the HTML library stays swappable.

use scraper::{ElementRef, Html, Selector};

/// A product page parsed once and shared by reference with every stage.
pub struct Dom {
    document: Html,
}

/// An `<img>` element with its declared (not fetched) dimensions.
#[derive(Debug, Clone)]
pub struct ImageTag {
    pub src: String,
    pub width: u64,
    pub height: u64,
}

impl ImageTag {
    /// Declared area in square units. Missing or unparseable dimensions
    /// count as zero; absurd declared sizes saturate instead of wrapping,
    /// since attribute values come from arbitrary pages.
    pub fn area(&self) -> u64 {
        self.width.saturating_mul(self.height)
    }
}

impl Dom {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Text contents of every `<script type="...">` block, in document order.
    pub fn script_blocks(&self, mime: &str) -> Vec<String> {
        let selector = match Selector::parse(&format!(r#"script[type="{}"]"#, mime)) {
            Ok(s) => s,
            Err(_) => return vec![],
        };

        self.document
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect()
    }

    /// Content of the first meta tag whose `property` or `name` attribute
    /// equals `key`. Empty content counts as absent.
    pub fn meta_content(&self, key: &str) -> Option<String> {
        for attr in ["property", "name"] {
            let selector = Selector::parse(&format!(r#"meta[{}="{}"]"#, attr, key)).ok()?;
            for element in self.document.select(&selector) {
                if let Some(content) = element.value().attr("content") {
                    if !content.is_empty() {
                        return Some(content.to_string());
                    }
                }
            }
        }
        None
    }

    /// Trimmed text of the first element matching `selector`.
    pub fn first_text(&self, selector_str: &str) -> Option<String> {
        let selector = Selector::parse(selector_str).ok()?;
        self.document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    /// Attribute value of the first element matching `selector`.
    pub fn first_attr(&self, selector_str: &str, attr_name: &str) -> Option<String> {
        let selector = Selector::parse(selector_str).ok()?;
        self.document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr(attr_name).map(String::from))
    }

    /// Rendered text of the page with script/style/noscript excluded and
    /// whitespace runs collapsed to single spaces, capped at `max_chars`.
    pub fn visible_text(&self, max_chars: usize) -> String {
        let mut out = String::new();
        let mut chars = 0usize;
        collect_visible_text(self.document.root_element(), &mut out, &mut chars, max_chars);
        out.trim_end().to_string()
    }

    /// All `<img>` elements in document order with their declared sizes.
    /// A trailing `px` on width/height attributes is tolerated.
    pub fn images(&self) -> Vec<ImageTag> {
        let selector = Selector::parse("img").unwrap();
        self.document
            .select(&selector)
            .filter_map(|el| {
                let src = el.value().attr("src")?.to_string();
                Some(ImageTag {
                    src,
                    width: parse_dimension(el.value().attr("width")),
                    height: parse_dimension(el.value().attr("height")),
                })
            })
            .collect()
    }
}

fn parse_dimension(attr: Option<&str>) -> u64 {
    attr.map(|v| v.trim().trim_end_matches("px"))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn collect_visible_text(el: ElementRef, out: &mut String, chars: &mut usize, max_chars: usize) {
    if *chars >= max_chars {
        return;
    }
    if matches!(el.value().name(), "script" | "style" | "noscript") {
        return;
    }

    for child in el.children() {
        if *chars >= max_chars {
            return;
        }
        if let Some(text) = child.value().as_text() {
            for word in text.split_whitespace() {
                if *chars >= max_chars {
                    return;
                }
                if !out.is_empty() {
                    out.push(' ');
                    *chars += 1;
                }
                out.push_str(word);
                *chars += word.chars().count();
            }
        } else if let Some(child_el) = ElementRef::wrap(child) {
            collect_visible_text(child_el, out, chars, max_chars);
        }
    }
}
