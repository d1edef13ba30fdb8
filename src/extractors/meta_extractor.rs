//! Social-sharing meta tag extraction
//!
//! Open Graph, Twitter Card, and product: namespace meta tags, the way
//! sites annotate pages for link previews. Each field tries its fallbacks
//! in order and stops at the first non-empty hit.

use super::FieldSet;
use crate::dom::Dom;

/// Extract title/price/image from meta tags and the document title.
pub fn extract_meta_tags(dom: &Dom) -> FieldSet {
    FieldSet {
        title: title_from_meta(dom),
        image: image_from_meta(dom),
        price: price_from_meta(dom),
    }
}

fn title_from_meta(dom: &Dom) -> Option<String> {
    dom.meta_content("og:title")
        .or_else(|| dom.meta_content("twitter:title"))
        .or_else(|| dom.first_text("title").filter(|t| !t.is_empty()))
}

fn image_from_meta(dom: &Dom) -> Option<String> {
    dom.meta_content("og:image")
        .or_else(|| dom.meta_content("twitter:image"))
        .or_else(|| dom.meta_content("og:image:secure_url"))
}

/// "{currency} {amount}" from price meta tags; currency defaults to "$".
/// No amount means no price at all.
fn price_from_meta(dom: &Dom) -> Option<String> {
    let amount = dom
        .meta_content("og:price:amount")
        .or_else(|| dom.meta_content("product:price:amount"))?;
    let currency = dom
        .meta_content("og:price:currency")
        .or_else(|| dom.meta_content("product:price:currency"))
        .unwrap_or_else(|| "$".to_string());

    Some(format!("{} {}", currency, amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> FieldSet {
        extract_meta_tags(&Dom::parse(html))
    }

    #[test]
    fn test_open_graph_page() {
        let html = r#"
        <html><head>
            <meta property="og:title" content="Linen Throw Pillow">
            <meta property="og:image" content="https://example.com/pillow.jpg">
            <meta property="og:price:amount" content="24.00">
            <meta property="og:price:currency" content="GBP">
        </head></html>
        "#;

        let fields = extract(html);
        assert_eq!(fields.title.as_deref(), Some("Linen Throw Pillow"));
        assert_eq!(fields.image.as_deref(), Some("https://example.com/pillow.jpg"));
        assert_eq!(fields.price.as_deref(), Some("GBP 24.00"));
    }

    #[test]
    fn test_open_graph_beats_twitter() {
        let html = r#"
        <html><head>
            <meta property="og:title" content="OG Title">
            <meta name="twitter:title" content="Twitter Title">
            <meta name="twitter:image" content="https://example.com/tw.jpg">
        </head></html>
        "#;

        let fields = extract(html);
        assert_eq!(fields.title.as_deref(), Some("OG Title"));
        // no og:image, so the Twitter image is used
        assert_eq!(fields.image.as_deref(), Some("https://example.com/tw.jpg"));
    }

    #[test]
    fn test_document_title_fallback() {
        let html = r#"
        <html>
        <head><title>  Plain Page Title  </title></head>
        <body></body>
        </html>
        "#;

        let fields = extract(html);
        assert_eq!(fields.title.as_deref(), Some("Plain Page Title"));
    }

    #[test]
    fn test_product_namespace_price_and_default_currency() {
        let html = r#"
        <html><head>
            <meta property="product:price:amount" content="15.50">
        </head></html>
        "#;

        let fields = extract(html);
        assert_eq!(fields.price.as_deref(), Some("$ 15.50"));
    }

    #[test]
    fn test_currency_without_amount_is_no_price() {
        let html = r#"
        <html><head>
            <meta property="og:price:currency" content="EUR">
        </head></html>
        "#;

        let fields = extract(html);
        assert!(fields.price.is_none());
    }

    #[test]
    fn test_secure_image_fallback() {
        let html = r#"
        <html><head>
            <meta property="og:image:secure_url" content="https://example.com/secure.jpg">
        </head></html>
        "#;

        let fields = extract(html);
        assert_eq!(fields.image.as_deref(), Some("https://example.com/secure.jpg"));
    }
}
