//! Bringing a staff member's apartment list in line with a desired set.
//!
//! The backend only knows single assign/unassign calls, so the update is
//! issued as a sequence of calls. Nothing is atomic: a failed call leaves
//! the assignment partially applied and shows up in the [`AssignmentReport`].

use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value;

use super::Id;
use crate::api::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Add,
    Remove,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Add => f.write_str("add"),
            Change::Remove => f.write_str("remove"),
        }
    }
}

/// Difference between the current and the desired apartment set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentPlan {
    /// Assigned now but not desired, ascending
    pub remove: Vec<Id>,
    /// Desired but not assigned yet, ascending
    pub add: Vec<Id>,
}

impl AssignmentPlan {
    pub fn new<C, D>(current: C, desired: D) -> Self
    where
        C: IntoIterator<Item = Id>,
        D: IntoIterator<Item = Id>,
    {
        let current: BTreeSet<Id> = current.into_iter().collect();
        let desired: BTreeSet<Id> = desired.into_iter().collect();

        Self {
            remove: current.difference(&desired).copied().collect(),
            add: desired.difference(&current).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.add.is_empty()
    }

    /// Removals first, then additions.
    pub fn changes(&self) -> impl Iterator<Item = (Change, Id)> + '_ {
        let removals = self.remove.iter().map(|&id| (Change::Remove, id));
        let additions = self.add.iter().map(|&id| (Change::Add, id));
        removals.chain(additions)
    }
}

#[derive(Debug)]
pub struct AssignmentOutcome {
    pub apartment_id: Id,
    pub change: Change,
    pub result: Result<(), ApiError>,
}

/// Every change that was attempted, in the order it was issued.
#[derive(Debug, Default)]
pub struct AssignmentReport {
    pub outcomes: Vec<AssignmentOutcome>,
}

impl AssignmentReport {
    /// True when every change went through, including when there was nothing to do.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &AssignmentOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &AssignmentOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }
}

/// Staff resource whose apartments are managed one id at a time.
pub(crate) trait Assignments {
    async fn assigned(&self, owner: Id) -> ApiResult<Value>;
    async fn assign(&self, owner: Id, apartment_id: Id) -> ApiResult<Value>;
    async fn unassign(&self, owner: Id, apartment_id: Id) -> ApiResult<Value>;
}

/// Reads the current assignment, then issues one call per differing apartment.
///
/// Only a failure to read the current state is returned as `Err`; failed
/// changes are recorded in the report and the remaining ones still run.
pub(crate) async fn sync<A: Assignments>(
    target: &A,
    owner: Id,
    desired: &[Id],
) -> ApiResult<AssignmentReport> {
    let current = assigned_ids(&target.assigned(owner).await?)?;
    let plan = AssignmentPlan::new(current, desired.iter().copied());
    log::debug!(
        "Assignment of {}: removing {:?}, adding {:?}",
        owner,
        plan.remove,
        plan.add
    );

    let mut report = AssignmentReport::default();
    for (change, apartment_id) in plan.changes() {
        let result = match change {
            Change::Remove => target.unassign(owner, apartment_id).await,
            Change::Add => target.assign(owner, apartment_id).await,
        };
        if let Err(ref err) = result {
            log::warn!("Failed to {} apartment {}: {}", change, apartment_id, err);
        }
        report.outcomes.push(AssignmentOutcome {
            apartment_id,
            change,
            result: result.map(drop),
        });
    }

    Ok(report)
}

/// Apartment ids from a list response, either bare or as `{data: [...]}`.
///
/// Ids may be numbers or numeric strings. Anything unreadable fails the
/// whole read, a partial list would turn into wrong removals.
pub(crate) fn assigned_ids(body: &Value) -> ApiResult<Vec<Id>> {
    let items = match body.get("data").unwrap_or(body) {
        Value::Array(items) => items,
        other => return Err(unreadable(format!("expected a list of apartments, got {}", other))),
    };

    items
        .iter()
        .map(|item| {
            let id = match item {
                Value::Object(obj) => obj.get("apartment_id").or_else(|| obj.get("id")),
                _ => Some(item),
            };
            id.and_then(id_value)
                .ok_or_else(|| unreadable(format!("no apartment id in {}", item)))
        })
        .collect()
}

fn id_value(value: &Value) -> Option<Id> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn unreadable(msg: String) -> ApiError {
    log::warn!("Unreadable apartment assignment: {}", msg);
    ApiError::decode(serde::de::Error::custom(msg))
}
