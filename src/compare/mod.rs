//! Pass/skip/fail deltas between a baseline run and the current run.

use serde::Serialize;

use crate::error::{CompareError, Result};
use crate::results::{ResultRecord, ResultSet};

/// Signed change of each count, `current - baseline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Delta {
    pub pass: i64,
    pub skip: i64,
    pub fail: i64,
}

/// Verdict derived from the pass delta alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Improved,
    Unchanged,
    Regressed,
}

impl Outcome {
    pub fn is_regression(self) -> bool {
        matches!(self, Outcome::Regressed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Improved => "improved",
            Outcome::Unchanged => "unchanged",
            Outcome::Regressed => "regressed",
        }
    }
}

impl Delta {
    pub fn between(baseline: &ResultRecord, current: &ResultRecord) -> Result<Self> {
        Ok(Self {
            pass: sub("pass", current.pass, baseline.pass)?,
            skip: sub("skip", current.skip, baseline.skip)?,
            fail: sub("fail", current.fail, baseline.fail)?,
        })
    }

    pub fn outcome(&self) -> Outcome {
        match self.pass {
            p if p < 0 => Outcome::Regressed,
            0 => Outcome::Unchanged,
            _ => Outcome::Improved,
        }
    }
}

fn sub(field: &'static str, current: i64, baseline: i64) -> Result<i64> {
    current
        .checked_sub(baseline)
        .ok_or(CompareError::Overflow {
            field,
            current,
            baseline,
        })
}

/// Both inputs plus their delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub baseline: ResultSet,
    pub current: ResultSet,
    pub delta: Delta,
}

impl Comparison {
    pub fn outcome(&self) -> Outcome {
        self.delta.outcome()
    }
}

/// Compare `current` against `baseline`. Keys of the two sets play no part.
pub fn compare(baseline: ResultSet, current: ResultSet) -> Result<Comparison> {
    let delta = Delta::between(&baseline.record, &current.record)?;
    log::debug!(
        "delta '{}' -> '{}': pass {:+} skip {:+} fail {:+}",
        baseline.key,
        current.key,
        delta.pass,
        delta.skip,
        delta.fail
    );
    Ok(Comparison {
        baseline,
        current,
        delta,
    })
}
