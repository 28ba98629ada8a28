use std::collections::BTreeMap;

/// Query parameters for list endpoints: pagination, search, ordering and
/// free-form field filters, all forwarded verbatim to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn ordering(mut self, field: impl Into<String>) -> Self {
        self.ordering = Some(field.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }

    /// Flatten into `key=value` pairs in a stable order.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size".to_string(), size.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(ordering) = &self.ordering {
            pairs.push(("ordering".to_string(), ordering.clone()));
        }
        pairs.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_have_no_query() {
        assert!(ListParams::new().is_empty());
    }

    #[test]
    fn test_query_order() {
        let params = ListParams::new()
            .filter("fund", "GEF")
            .search("water")
            .page(2)
            .page_size(25)
            .ordering("-created_at");
        let expected: Vec<(String, String)> = [
            ("page", "2"),
            ("page_size", "25"),
            ("search", "water"),
            ("ordering", "-created_at"),
            ("fund", "GEF"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(params.to_query(), expected);
    }
}
