use serde::{Deserialize, Serialize};

pub const READING_NOW_SHELF: &str = "Reading Now 📖";

/// A user's profile document as kept in the hosted document store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDocument {
    pub display_name: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub avatar: Option<String>,
    pub shelves: Vec<Shelf>,
    /// Left untyped because older clients wrote non-string entries here.
    pub search_history: Vec<serde_json::Value>,
    pub reviews: Vec<Review>,
    pub favourites: Vec<String>,
}

/// Named group of book ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Shelf {
    pub name: String,
    pub book_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Review {
    pub book_id: String,
    pub rating: f64,
    pub review_text: String,
}

impl UserDocument {
    pub fn shelf(&self, name: &str) -> Option<&Shelf> {
        self.shelves.iter().find(|shelf| shelf.name == name)
    }

    /// String entries of `searchHistory`, in stored order.
    pub fn search_queries(&self) -> Vec<String> {
        self.search_history
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{UserDocument, READING_NOW_SHELF};

    #[test]
    fn sparse_document() -> anyhow::Result<()> {
        let json = r#"{
            "userID": "u1",
            "shelves": [{"name": "Reading Now 📖", "bookIds": ["a", "b"]}],
            "searchHistory": ["dune", 3, null, "emma"]
        }"#;

        let r: UserDocument = serde_json::from_str(json)?;

        assert_eq!("u1", r.user_id);
        assert_eq!("", r.display_name);
        assert_eq!(
            Some(vec!["a".to_string(), "b".to_string()]),
            r.shelf(READING_NOW_SHELF).map(|s| s.book_ids.clone())
        );
        assert_eq!(vec!["dune".to_string(), "emma".to_string()], r.search_queries());
        assert!(r.favourites.is_empty());

        Ok(())
    }
}
