//! DTO for the mappings endpoint.

use serde::Serialize;

use crate::domain::registry::AliasMap;

/// Flat `original -> current` object, sorted by original domain.
///
/// ```json
/// { "old.example.com": "new.example.com" }
/// ```
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct MappingsResponse(pub AliasMap);
