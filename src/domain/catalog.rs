//! Catalog (reference) entities: exercise, metcon, and movement types.
//!
//! All three catalogs share the same shape and live behind a single
//! repository keyed by `CatalogKind`. Entries referenced by logged
//! workouts are deactivated instead of deleted; name uniqueness is
//! case-sensitive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Which catalog an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Exercise,
    Metcon,
    Movement,
}

impl CatalogKind {
    /// Stable discriminator stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Exercise => "exercise",
            CatalogKind::Metcon => "metcon",
            CatalogKind::Movement => "movement",
        }
    }

    /// Human-readable label for error messages.
    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::Exercise => "exercise type",
            CatalogKind::Metcon => "metcon type",
            CatalogKind::Movement => "movement type",
        }
    }
}

impl std::str::FromStr for CatalogKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exercise" => Ok(CatalogKind::Exercise),
            "metcon" => Ok(CatalogKind::Metcon),
            "movement" => Ok(CatalogKind::Movement),
            _ => Err(()),
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: Uuid,
    pub kind: CatalogKind,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a catalog delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogDeleteOutcome {
    /// Entry had no references and was removed.
    Deleted,
    /// Entry is referenced by logged workouts and was deactivated instead.
    Deactivated,
    /// No matching entry existed.
    NotFound,
}

/// Catalog item creation input
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewCatalogItem {
    #[schema(example = "Back Squat")]
    pub name: String,
    #[schema(example = "Barbell squat from a rack")]
    pub description: Option<String>,
}

/// Catalog item update input; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCatalogItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Catalog item response returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogItemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CatalogItem> for CatalogItemResponse {
    fn from(item: CatalogItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            is_active: item.is_active,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_discriminator_round_trip() {
        for kind in [CatalogKind::Exercise, CatalogKind::Metcon, CatalogKind::Movement] {
            assert_eq!(CatalogKind::from_str(kind.as_str()), Ok(kind));
        }
        assert!(CatalogKind::from_str("unknown").is_err());
    }
}
