//! Task lifecycle status.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Todo,
    /// Work is in progress.
    Wip,
    /// Work is complete.
    Done,
    /// The due date passed before the task was completed.
    Overdue,
}

impl TaskStatus {
    /// Every status, in board order.
    pub const ALL: [Self; 4] = [Self::Todo, Self::Wip, Self::Done, Self::Overdue];

    /// Returns the canonical storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Wip => "WIP",
            Self::Done => "DONE",
            Self::Overdue => "OVERDUE",
        }
    }

    /// Position in the TODO → WIP → DONE progression. `Overdue` sits outside
    /// it.
    #[must_use]
    pub const fn progress_rank(self) -> Option<u8> {
        match self {
            Self::Todo => Some(0),
            Self::Wip => Some(1),
            Self::Done => Some(2),
            Self::Overdue => None,
        }
    }

    /// Returns whether the overdue sweep may still flip this status.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Todo | Self::Wip)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "TODO" => Ok(Self::Todo),
            "WIP" => Ok(Self::Wip),
            "DONE" => Ok(Self::Done),
            "OVERDUE" => Ok(Self::Overdue),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
