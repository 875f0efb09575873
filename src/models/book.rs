use serde::{Deserialize, Serialize};

/// A catalog entry as the rest of the crate sees it.
///
/// Every field has a concrete value. Missing data shows up as an empty
/// string, an empty list or zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    /// May be empty when the source entry carried no id.
    #[serde(rename = "bookID")]
    pub book_id: String,
    pub title: String,
    pub subtitle: String,
    pub authors: Vec<String>,
    pub publisher: String,
    /// As sent by the service (`"1965"`, `"2005-08-02"`, ...).
    pub published_date: String,
    pub description: String,
    pub industry_identifiers: Vec<IndustryIdentifier>,
    pub page_count: i64,
    pub categories: Vec<String>,
    pub average_rating: f64,
    pub ratings_count: i64,
    pub image_links: ImageLinks,
    pub language: String,
    pub search_info: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageLinks {
    pub thumbnail: String,
    pub small_thumbnail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

#[cfg(test)]
mod tests {
    use super::Book;

    #[test]
    fn document_shape() -> anyhow::Result<()> {
        let book = Book {
            book_id: "abc".to_string(),
            title: "Dune".to_string(),
            ..Book::default()
        };

        let value = serde_json::to_value(&book)?;

        assert_eq!("abc", value["bookID"]);
        assert_eq!("Dune", value["title"]);
        assert_eq!(0, value["pageCount"]);

        Ok(())
    }

    #[test]
    fn partial_document_fills_defaults() -> anyhow::Result<()> {
        let r: Book = serde_json::from_str(r#"{"bookID": "x1", "authors": ["A"]}"#)?;

        let expected = Book {
            book_id: "x1".to_string(),
            authors: vec!["A".to_string()],
            ..Book::default()
        };

        assert_eq!(expected, r);

        Ok(())
    }
}
