/*
 * Responsibility
 * - Query-string DTO for GET /api/games
 * - validate() returns the trimmed search term
 */
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

impl SearchParams {
    pub fn validate(&self) -> Result<&str, &'static str> {
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => Ok(term),
            _ => Err("the search query parameter is required"),
        }
    }
}
