use serde::Serialize;

use crate::error::Result;
use crate::store::{self, TableRecord};

/// One row of the reviews table, keyed by (product, user) rather than an
/// allocated id.
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub product_id: u32,
    pub user_id: u32,
    /// 1 to 5.
    pub rating: u32,
    pub comment: String,
}

/// Make a comment safe for the comma-delimited table: commas become
/// semicolons. There is no escaping in this format.
#[must_use]
pub fn sanitize_comment(comment: &str) -> String {
    comment.replace(',', ";")
}

impl TableRecord for Review {
    const TABLE: &'static str = "reviews";

    fn parse_line(line: &str) -> Result<Self> {
        // The comment is everything after the third comma; sanitized
        // comments hold none, but stay lenient about stray ones.
        let fields: Vec<&str> = line.splitn(4, ',').collect();
        Ok(Self {
            product_id: store::req_u32(&fields, 0, Self::TABLE)?,
            user_id: store::req_u32(&fields, 1, Self::TABLE)?,
            rating: store::req_u32(&fields, 2, Self::TABLE)?,
            comment: store::opt_str(&fields, 3),
        })
    }

    fn to_line(&self) -> String {
        format!(
            "{},{},{},{}",
            self.product_id,
            self.user_id,
            self.rating,
            sanitize_comment(&self.comment)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_fields() {
        let review = Review {
            product_id: 101,
            user_id: 7,
            rating: 4,
            comment: "solid; works".into(),
        };
        let back = Review::parse_line(&review.to_line()).unwrap();
        assert_eq!(back.product_id, 101);
        assert_eq!(back.user_id, 7);
        assert_eq!(back.rating, 4);
        assert_eq!(back.comment, "solid; works");
    }

    #[test]
    fn commas_in_comments_become_semicolons() {
        let review = Review {
            product_id: 101,
            user_id: 7,
            rating: 4,
            comment: "good, cheap, sturdy".into(),
        };
        assert_eq!(review.to_line(), "101,7,4,good; cheap; sturdy");
        let back = Review::parse_line(&review.to_line()).unwrap();
        assert_eq!(back.comment, "good; cheap; sturdy");
    }

    #[test]
    fn missing_comment_defaults_to_empty() {
        let review = Review::parse_line("101,7,4").unwrap();
        assert_eq!(review.comment, "");
    }
}
