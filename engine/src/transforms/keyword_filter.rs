use shared::models::SourceRow;

/// Case-insensitive substring match of a description cell against a keyword set.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>, // Stored lowercased
}

impl KeywordFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn matches(&self, description: &str) -> bool {
        let description = description.to_lowercase();
        self.keywords.iter().any(|k| description.contains(k.as_str()))
    }

    /// Rows whose `column` cell matches, in input order. Rows with a missing cell are dropped.
    pub fn apply<'a>(&self, rows: &'a [SourceRow], column: usize) -> Vec<&'a SourceRow> {
        rows.iter()
            .filter(|row| row.get(column).is_some_and(|cell| self.matches(cell)))
            .collect()
    }
}
