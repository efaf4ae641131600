//! SQL identifier validation and escaping.
//!
//! User-selected column names are spliced into SQL text before execution, so
//! every name passes through here first. Names are validated against a small
//! set of hard rules and then double-quote escaped; anything that survives
//! quoting is safe for DataFusion's parser.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ExploreError, Result};

/// Maximum accepted identifier length.
const MAX_IDENTIFIER_LEN: usize = 128;

static CONTROL_CHARS: Lazy<Regex> = Lazy::new(|| {
    // Control characters never belong in a column name, quoted or not.
    #[allow(clippy::expect_used)]
    Regex::new(r"[\x00-\x1f\x7f]").expect("hard-coded regex is valid")
});

/// Validates a column or table name without escaping it.
pub fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.trim().is_empty() {
        return Err(ExploreError::InvalidIdentifier(
            "identifier cannot be empty or whitespace-only".to_string(),
        ));
    }

    if identifier.len() > MAX_IDENTIFIER_LEN {
        return Err(ExploreError::InvalidIdentifier(format!(
            "identifier too long (max {MAX_IDENTIFIER_LEN} characters)"
        )));
    }

    if CONTROL_CHARS.is_match(identifier) {
        return Err(ExploreError::InvalidIdentifier(
            "identifier cannot contain control characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates and escapes an identifier for direct use in SQL text.
///
/// Escaping uses double quotes with internal double quotes doubled, so
/// uploaded headers like `Order Date` or `revenue ($)` work as-is.
pub fn escape_identifier(identifier: &str) -> Result<String> {
    validate_identifier(identifier)?;
    let escaped = identifier.replace('"', "\"\"");
    Ok(format!("\"{escaped}\""))
}
