//! Status transition policy.
//!
//! [`TaskStatusPolicy::decide`] is a pure function of the current status, the
//! requested status, the acting user, and the task's assignee. It returns a
//! tagged [`Decision`] rather than an error so callers decide how a refusal
//! is reported.
//!
//! Authorization is checked first: only an admin or the assignee may change a
//! task. After that, an `OVERDUE` task may only stay `OVERDUE` or be closed as
//! `DONE` by an admin. Every other transition is allowed under
//! [`Progression::Permissive`]; [`Progression::ForwardOnly`] additionally
//! refuses moves backwards along TODO → WIP → DONE.

use super::{ParseProgressionError, TaskStatus};
use crate::identity::domain::{Actor, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How strictly non-overdue transitions are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Progression {
    /// Any status may follow any non-overdue status.
    #[default]
    Permissive,
    /// Statuses only move forward along TODO → WIP → DONE; DONE is final.
    ForwardOnly,
}

impl Progression {
    /// Returns the canonical configuration representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Permissive => "permissive",
            Self::ForwardOnly => "forward_only",
        }
    }
}

impl TryFrom<&str> for Progression {
    type Error = ParseProgressionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "permissive" => Ok(Self::Permissive),
            "forward_only" => Ok(Self::ForwardOnly),
            _ => Err(ParseProgressionError(value.to_owned())),
        }
    }
}

/// Category of a refusal, used to pick the response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenialKind {
    /// The actor lacks the role or ownership required.
    Authorization,
    /// The state machine does not permit the move.
    StateTransition,
}

/// Why a status change was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// The actor is neither an admin nor the assignee.
    Forbidden,
    /// An overdue task was asked to return to WIP or TODO.
    OverdueCannotReopen,
    /// A non-admin tried to close an overdue task.
    OverdueCloseRequiresAdmin,
    /// A forward-only policy refused a backwards move.
    BackwardTransition,
}

impl DenyReason {
    /// Returns the client-facing message for this refusal.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Forbidden => "Forbidden",
            Self::OverdueCannotReopen => "Overdue tasks cannot go back to WIP/TODO",
            Self::OverdueCloseRequiresAdmin => "Only admin can close overdue tasks",
            Self::BackwardTransition => "Tasks can only move forward from TODO to WIP to DONE",
        }
    }

    /// Returns whether this is an authorization or a state-machine refusal.
    #[must_use]
    pub const fn kind(self) -> DenialKind {
        match self {
            Self::Forbidden | Self::OverdueCloseRequiresAdmin => DenialKind::Authorization,
            Self::OverdueCannotReopen | Self::BackwardTransition => DenialKind::StateTransition,
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a status change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// The change may be persisted.
    Allow,
    /// The change must be refused.
    Deny(DenyReason),
}

impl Decision {
    /// Returns whether the decision allows the change.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decides task status transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStatusPolicy {
    progression: Progression,
}

impl TaskStatusPolicy {
    /// Creates a policy with the given progression mode.
    #[must_use]
    pub const fn new(progression: Progression) -> Self {
        Self { progression }
    }

    /// Returns the configured progression mode.
    #[must_use]
    pub const fn progression(&self) -> Progression {
        self.progression
    }

    /// Decides whether `actor` may move a task assigned to `assignee` from
    /// `current` to `requested`.
    #[must_use]
    pub fn decide(
        &self,
        current: TaskStatus,
        requested: TaskStatus,
        actor: &Actor,
        assignee: UserId,
    ) -> Decision {
        if !actor.is_admin() && !actor.is(assignee) {
            return Decision::Deny(DenyReason::Forbidden);
        }

        if current == TaskStatus::Overdue {
            return match requested {
                TaskStatus::Todo | TaskStatus::Wip => {
                    Decision::Deny(DenyReason::OverdueCannotReopen)
                }
                TaskStatus::Done if !actor.is_admin() => {
                    Decision::Deny(DenyReason::OverdueCloseRequiresAdmin)
                }
                TaskStatus::Done | TaskStatus::Overdue => Decision::Allow,
            };
        }

        match self.progression {
            Progression::Permissive => Decision::Allow,
            Progression::ForwardOnly if moves_backwards(current, requested) => {
                Decision::Deny(DenyReason::BackwardTransition)
            }
            Progression::ForwardOnly => Decision::Allow,
        }
    }

    /// Lists the statuses a client should offer `actor` for a task currently
    /// in `current`, in board order.
    ///
    /// `OVERDUE` is only offered when it is already the current status; the
    /// sweep, not a person, moves tasks into it.
    #[must_use]
    pub fn available_statuses(
        &self,
        current: TaskStatus,
        actor: &Actor,
        assignee: UserId,
    ) -> Vec<TaskStatus> {
        let leading = (current == TaskStatus::Overdue).then_some(TaskStatus::Overdue);
        leading
            .into_iter()
            .chain([TaskStatus::Todo, TaskStatus::Wip, TaskStatus::Done])
            .filter(|candidate| {
                self.decide(current, *candidate, actor, assignee)
                    .is_allowed()
            })
            .collect()
    }
}

fn moves_backwards(current: TaskStatus, requested: TaskStatus) -> bool {
    if current == TaskStatus::Done {
        return requested != TaskStatus::Done;
    }
    match (current.progress_rank(), requested.progress_rank()) {
        (Some(from), Some(to)) => to < from,
        _ => false,
    }
}
