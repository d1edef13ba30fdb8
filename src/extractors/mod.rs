//! Product-field extraction stages
//!
//! Each module implements one strategy for recovering title/price/image
//! from a parsed page. The pipeline runs them in fixed order, merging each
//! stage's output into fields still unset from the previous stage.

mod heuristic_extractor;
mod jsonld_extractor;
mod meta_extractor;

pub use heuristic_extractor::*;
pub use jsonld_extractor::*;
pub use meta_extractor::*;

/// Accumulator threaded through the stage pipeline. Each stage returns a
/// `FieldSet` holding only what it determined; the driver merges with
/// "existing value wins".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    pub title: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl FieldSet {
    /// Fill any unset field from `other`. Fields already set are kept, so
    /// earlier stages always win over later ones.
    pub fn merge_missing(&mut self, other: FieldSet) {
        if self.title.is_none() {
            self.title = other.title;
        }
        if self.price.is_none() {
            self.price = other.price;
        }
        if self.image.is_none() {
            self.image = other.image;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.title.is_some() && self.price.is_some() && self.image.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_existing() {
        let mut fields = FieldSet {
            title: Some("First".to_string()),
            price: None,
            image: None,
        };
        fields.merge_missing(FieldSet {
            title: Some("Second".to_string()),
            price: Some("$ 5".to_string()),
            image: None,
        });

        assert_eq!(fields.title.as_deref(), Some("First"));
        assert_eq!(fields.price.as_deref(), Some("$ 5"));
        assert!(fields.image.is_none());
        assert!(!fields.is_complete());
    }
}
