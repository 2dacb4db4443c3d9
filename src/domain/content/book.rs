//! Salon reading list entries.

use serde::{Deserialize, Serialize};

/// A book offered in the sunshine salon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub description: String,
}

impl Book {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            category: category.into(),
            description: description.into(),
        }
    }

    /// The two titles the salon ships with.
    pub fn catalog() -> Vec<Book> {
        vec![
            Book::new(
                "1",
                "Net Positive",
                "Paul Polman",
                "商業策略",
                "企業如何透過解決世界問題來獲利。",
            ),
            Book::new(
                "2",
                "Doughnut Economics",
                "Kate Raworth",
                "再生經濟",
                "21世紀經濟學家的思維。",
            ),
        ]
    }
}
