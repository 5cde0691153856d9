use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;

/// UI-level state of a comparison session, derived from the number of
/// entries in the compare set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareState {
    Idle,
    SingleSelected,
    MultiSelected,
}

impl CompareState {
    pub fn for_len(len: usize) -> Self {
        match len {
            0 => Self::Idle,
            1 => Self::SingleSelected,
            _ => Self::MultiSelected,
        }
    }

    pub fn shows_table(self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub fn shows_recommendations(self) -> bool {
        matches!(self, Self::SingleSelected)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareChange {
    Added,
    AlreadyPresent,
    Removed,
    NotPresent,
}

impl CompareChange {
    pub fn is_noop(self) -> bool {
        matches!(self, Self::AlreadyPresent | Self::NotPresent)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOutcome {
    pub from: CompareState,
    pub to: CompareState,
    pub product_id: ProductId,
    pub change: CompareChange,
}
