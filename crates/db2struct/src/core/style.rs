//! Style flags controlling what the generator emits.

use serde::{Deserialize, Serialize};

/// Independent switches for annotations and type style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleFlags {
    /// Emit `json:"<column>"` tags (default: true).
    #[serde(default = "default_true")]
    pub json: bool,

    /// Emit `gorm:"column:...;type:..."` tags (default: false).
    #[serde(default)]
    pub gorm: bool,

    /// Use `gopkg.in/guregu/null` wrappers instead of `database/sql` ones (default: false).
    #[serde(default)]
    pub rich_nullable: bool,

    /// Emit a storage record, a plain-value record and conversions between them (default: false).
    #[serde(default)]
    pub dual: bool,
}

impl Default for StyleFlags {
    fn default() -> Self {
        Self {
            json: true,
            gorm: false,
            rich_nullable: false,
            dual: false,
        }
    }
}

impl StyleFlags {
    /// Flags with every presentation option cleared.
    ///
    /// This is what the real (storage) type resolution runs with.
    pub fn plain() -> Self {
        Self {
            json: false,
            gorm: false,
            rich_nullable: false,
            dual: false,
        }
    }
}

fn default_true() -> bool {
    true
}
