//! User-submitted search input and its boundary checks

use serde::{Deserialize, Serialize};

use crate::core::{Result, SearchError};

pub const MIN_RESULT_LIMIT: u8 = 1;
pub const MAX_RESULT_LIMIT: u8 = 7;
pub const MAX_TEXT_LEN: usize = 256;

/// One form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryInput {
    /// Cheese name or type; drives the vector search.
    pub name_text: Option<String>,
    /// Keyword refinement over the description column.
    pub description_text: Option<String>,
    pub result_limit: u8,
}

impl QueryInput {
    pub fn new(
        name_text: impl Into<String>,
        description_text: impl Into<String>,
        result_limit: u8,
    ) -> Self {
        Self {
            name_text: Some(name_text.into()),
            description_text: Some(description_text.into()),
            result_limit,
        }
    }

    /// Name text with surrounding whitespace removed, `None` when blank.
    pub fn name(&self) -> Option<&str> {
        non_blank(self.name_text.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(self.description_text.as_deref())
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_RESULT_LIMIT..=MAX_RESULT_LIMIT).contains(&self.result_limit) {
            return Err(SearchError::InvalidInput(format!(
                "result limit must be between {} and {}, got {}",
                MIN_RESULT_LIMIT, MAX_RESULT_LIMIT, self.result_limit
            )));
        }
        check_text("name", self.name_text.as_deref())?;
        check_text("description", self.description_text.as_deref())?;
        Ok(())
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

fn check_text(field: &str, text: Option<&str>) -> Result<()> {
    let Some(text) = text else {
        return Ok(());
    };

    if text.chars().count() > MAX_TEXT_LEN {
        return Err(SearchError::InvalidInput(format!(
            "{} is longer than {} characters",
            field, MAX_TEXT_LEN
        )));
    }
    if text.chars().any(char::is_control) {
        return Err(SearchError::InvalidInput(format!(
            "{} contains control characters",
            field
        )));
    }
    Ok(())
}
