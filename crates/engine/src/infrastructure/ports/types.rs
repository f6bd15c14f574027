//! Records crossing port boundaries.

use chrono::{DateTime, Utc};
use riftroll_domain::{LoadoutId, LoadoutRecord};
use serde::{Deserialize, Serialize};

/// A loadout as persisted by a [`LoadoutStore`](super::LoadoutStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLoadout {
    pub id: LoadoutId,
    pub record: LoadoutRecord,
    pub saved_at: DateTime<Utc>,
}
