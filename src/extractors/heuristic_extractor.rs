//! Heuristic extraction for pages with no structured signals
//!
//! Pattern-based guessing: a price-shaped regex over likely containers and
//! visible text, and the largest declared-size <img> as the product shot.
//! This stage is best-effort by design and never fails — a miss just leaves
//! the field empty.

use regex::Regex;

use super::FieldSet;
use crate::dom::Dom;

/// Currency-symbol-prefixed amounts ("$1,299.99", "€ 45") or ISO-suffixed
/// amounts ("49.99 USD").
const PRICE_PATTERN: &str =
    r"[$€£¥]\s?\d+(?:,\d{3})*(?:\.\d+)?|\d+(?:[.,]\d+)?\s?(?:USD|EUR|GBP)";

/// Elements whose class/id/testid marks them as price containers.
const PRICE_CONTAINERS: &str = r#"[class*="price"], [id*="price"], [data-testid="price"]"#;

/// How much visible page text the fallback scan covers.
const VISIBLE_TEXT_SCAN_CHARS: usize = 5000;

/// Icons and thumbnails sit below this declared area.
const MIN_IMAGE_AREA: u64 = 5000;

/// Extract price and image by pattern matching. Title is never guessed here.
pub fn extract_heuristics(dom: &Dom) -> FieldSet {
    FieldSet {
        title: None,
        price: price_by_regex(dom),
        image: largest_image(dom),
    }
}

/// First price-shaped match in the first price container, else the first
/// match in the leading slice of visible page text.
fn price_by_regex(dom: &Dom) -> Option<String> {
    let pattern = Regex::new(PRICE_PATTERN).unwrap();

    if let Some(container_text) = dom.first_text(PRICE_CONTAINERS) {
        if let Some(found) = pattern.find(&container_text) {
            return Some(found.as_str().to_string());
        }
    }

    let text = dom.visible_text(VISIBLE_TEXT_SCAN_CHARS);
    pattern.find(&text).map(|m| m.as_str().to_string())
}

/// The <img> with the largest declared width*height area, ignoring inline
/// data URIs and SVGs. Strict comparison keeps the first of equal-area
/// candidates; anything at or below the minimum area is treated as an icon.
fn largest_image(dom: &Dom) -> Option<String> {
    let mut best: Option<(u64, String)> = None;

    for img in dom.images() {
        if img.src.starts_with("data:") || has_svg_extension(&img.src) {
            continue;
        }
        let area = img.area();
        if area <= MIN_IMAGE_AREA {
            continue;
        }
        if best.as_ref().map_or(true, |(max_area, _)| area > *max_area) {
            best = Some((area, img.src));
        }
    }

    best.map(|(_, src)| src)
}

fn has_svg_extension(src: &str) -> bool {
    src.split(['?', '#'])
        .next()
        .is_some_and(|path| path.to_lowercase().ends_with(".svg"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> FieldSet {
        extract_heuristics(&Dom::parse(html))
    }

    #[test]
    fn test_first_match_in_price_container() {
        let html = r#"
        <html><body>
            <div class="product-price">$19.99 was $25</div>
        </body></html>
        "#;

        let fields = extract(html);
        assert_eq!(fields.price.as_deref(), Some("$19.99"));
    }

    #[test]
    fn test_container_beats_body_text() {
        let html = r#"
        <html><body>
            <p>Shipping from $4.50</p>
            <span id="main-price">€ 89.00</span>
        </body></html>
        "#;

        let fields = extract(html);
        assert_eq!(fields.price.as_deref(), Some("€ 89.00"));
    }

    #[test]
    fn test_body_text_fallback() {
        let html = r#"
        <html><body>
            <p>Yours today for only ¥1,500 with free delivery.</p>
        </body></html>
        "#;

        let fields = extract(html);
        assert_eq!(fields.price.as_deref(), Some("¥1,500"));
    }

    #[test]
    fn test_iso_code_suffix() {
        let html = r#"
        <html><body>
            <div data-testid="price">49.99 USD</div>
        </body></html>
        "#;

        let fields = extract(html);
        assert_eq!(fields.price.as_deref(), Some("49.99 USD"));
    }

    #[test]
    fn test_script_prices_are_invisible() {
        let html = r#"
        <html><body>
            <script>var tracking = { price: "$999.00" };</script>
            <p>No price on this page.</p>
        </body></html>
        "#;

        let fields = extract(html);
        assert!(fields.price.is_none());
    }

    #[test]
    fn test_empty_container_falls_back_to_page_text() {
        let html = r#"
        <html><body>
            <div class="price-box">Call us for details</div>
            <p>Special offer: $12.00</p>
        </body></html>
        "#;

        let fields = extract(html);
        assert_eq!(fields.price.as_deref(), Some("$12.00"));
    }

    #[test]
    fn test_largest_image_wins() {
        let html = r#"
        <html><body>
            <img src="/thumb.jpg" width="100" height="100">
            <img src="/hero.jpg" width="800" height="600">
            <img src="/mid.jpg" width="300" height="300">
        </body></html>
        "#;

        let fields = extract(html);
        assert_eq!(fields.image.as_deref(), Some("/hero.jpg"));
    }

    #[test]
    fn test_icon_sized_image_is_never_selected() {
        let html = r#"
        <html><body>
            <img src="/only.jpg" width="50" height="50">
        </body></html>
        "#;

        let fields = extract(html);
        assert!(fields.image.is_none());
    }

    #[test]
    fn test_svg_and_data_uri_skipped() {
        let html = r#"
        <html><body>
            <img src="/logo.svg" width="1000" height="1000">
            <img src="data:image/png;base64,AAAA" width="1000" height="1000">
            <img src="/real.jpg" width="200" height="200">
        </body></html>
        "#;

        let fields = extract(html);
        assert_eq!(fields.image.as_deref(), Some("/real.jpg"));
    }

    #[test]
    fn test_equal_area_keeps_first() {
        let html = r#"
        <html><body>
            <img src="/first.jpg" width="300" height="300">
            <img src="/second.jpg" width="300" height="300">
        </body></html>
        "#;

        let fields = extract(html);
        assert_eq!(fields.image.as_deref(), Some("/first.jpg"));
    }

    #[test]
    fn test_absurd_declared_dimensions_do_not_panic() {
        let html = r#"
        <html><body>
            <img src="/hero.jpg" width="800" height="600">
            <img src="/huge.jpg" width="10000000000" height="10000000000">
        </body></html>
        "#;

        let fields = extract(html);
        // the saturated area still outranks any sane image
        assert_eq!(fields.image.as_deref(), Some("/huge.jpg"));
    }

    #[test]
    fn test_undeclared_dimensions_are_ignored() {
        let html = r#"
        <html><body>
            <img src="/nodims.jpg">
        </body></html>
        "#;

        let fields = extract(html);
        assert!(fields.image.is_none());
    }
}
