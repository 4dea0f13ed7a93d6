//! Forgiving dimension-name lookup for user input
//!
//! Names typed on the command line rarely match the CSV byte for byte
//! ("emotional-connection" vs "Emotional connection"). Lookup tries an exact
//! match first, then compares normalized forms.

use relsense_core::DimensionTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// More than one dimension normalizes to the query
    Ambiguous {
        query: String,
        candidates: Vec<String>,
    },
    NotFound {
        query: String,
        suggestions: Vec<String>,
    },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::Ambiguous { query, candidates } => write!(
                f,
                "Dimension name '{}' is ambiguous; candidates: {}",
                query,
                candidates.join(", ")
            ),
            ResolveError::NotFound { query, suggestions } => write!(
                f,
                "Dimension '{}' not found. Available: {}",
                query,
                suggestions.join(", ")
            ),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Lowercase, trim and drop every character that is not alphanumeric or `_`
pub fn normalize_text(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Map user input onto the canonical dimension name of `table`
///
/// Exact match wins. Otherwise the query and every dimension name are
/// normalized; a single normalized hit is returned, several are ambiguous.
/// On a miss the suggestions are the names whose normalized form contains the
/// normalized query, or every name when nothing contains it.
pub fn resolve_dimension_name(table: &DimensionTable, query: &str) -> Result<String, ResolveError> {
    if let Some(row) = table.get(query) {
        return Ok(row.name.clone());
    }

    let target = normalize_text(query);
    let normalized: Vec<(&str, String)> = table.names().map(|n| (n, normalize_text(n))).collect();

    let matches: Vec<String> = normalized
        .iter()
        .filter(|(_, norm)| *norm == target)
        .map(|(name, _)| name.to_string())
        .collect();

    match matches.len() {
        1 => Ok(matches[0].clone()),
        0 => {
            let mut suggestions: Vec<String> = if target.is_empty() {
                Vec::new()
            } else {
                normalized
                    .iter()
                    .filter(|(_, norm)| norm.contains(&target))
                    .map(|(name, _)| name.to_string())
                    .collect()
            };
            if suggestions.is_empty() {
                suggestions = table.names().map(str::to_string).collect();
            }
            Err(ResolveError::NotFound {
                query: query.to_string(),
                suggestions,
            })
        }
        _ => Err(ResolveError::Ambiguous {
            query: query.to_string(),
            candidates: matches,
        }),
    }
}
