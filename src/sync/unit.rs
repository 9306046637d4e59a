/*!
 * Units of work and their outcomes.
 *
 * Every provider request made by a batch operation is one unit of work. A
 * unit moves from `Pending` to `InFlight` when its work starts, local file
 * preparation included, and ends in `Succeeded` or `Failed`. Terminal states
 * never change again.
 */

use log::debug;
use std::fmt;
use std::path::PathBuf;

use crate::errors::AppError;
use crate::providers::UpdateCounts;

/// Lifecycle state of a unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitState {
    Pending,
    InFlight,
    Succeeded,
    Failed,
}

impl UnitState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// What a unit of work is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOfWork {
    /// Resource slug
    pub resource: String,
    /// Locale, in whichever notation the operation works with
    pub locale: Option<String>,
    /// Single string key
    pub key: Option<String>,
    state: UnitState,
}

impl UnitOfWork {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            locale: None,
            key: None,
            state: UnitState::Pending,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn state(&self) -> UnitState {
        self.state
    }

    /// Mark the unit as started
    pub fn begin(&mut self) {
        if self.state == UnitState::Pending {
            self.state = UnitState::InFlight;
            debug!("Starting {}", self);
        }
    }

    /// Move the unit to its terminal state
    ///
    /// A unit still `Pending` is started first, so no unit skips `InFlight`.
    pub fn settle(mut self, outcome: Result<SyncDetail, AppError>) -> SyncResult {
        self.begin();
        self.state = if outcome.is_ok() {
            UnitState::Succeeded
        } else {
            UnitState::Failed
        };
        debug!("Settled {} as {:?}", self, self.state);
        SyncResult { unit: self, outcome }
    }
}

impl fmt::Display for UnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resource {}", self.resource)?;
        if let Some(locale) = &self.locale {
            write!(f, " [{}]", locale)?;
        }
        if let Some(key) = &self.key {
            write!(f, " key '{}'", key)?;
        }
        Ok(())
    }
}

/// Payload of a successful unit
#[derive(Debug, Clone, PartialEq)]
pub enum SyncDetail {
    /// Content upload with the provider's string counts
    Counts(UpdateCounts),
    /// Downloaded translation written to a local file
    Written(PathBuf),
    /// Local file rewritten by a structural merge
    Merged {
        path: PathBuf,
        /// Translated keys that had no place in the source text
        unmatched: Vec<String>,
    },
    /// Nothing to do for this unit
    Skipped(String),
    /// Request accepted without further payload
    Done,
}

/// Outcome of one unit of work
#[derive(Debug)]
pub struct SyncResult {
    pub unit: UnitOfWork,
    pub outcome: Result<SyncDetail, AppError>,
}

impl SyncResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn state(&self) -> UnitState {
        self.unit.state()
    }

    pub fn error(&self) -> Option<&AppError> {
        self.outcome.as_ref().err()
    }

    /// Turn a failed result into its error, keeping the unit description
    pub fn into_result(self) -> Result<SyncDetail, AppError> {
        let unit = self.unit;
        self.outcome
            .map_err(|e| AppError::Unknown(format!("{} failed: {}", unit, e)))
    }
}

/// Aggregate of the outcomes of a batch operation
#[derive(Debug, Default)]
pub struct SyncReport {
    pub results: Vec<SyncResult>,
}

impl SyncReport {
    pub fn new(results: Vec<SyncResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &SyncResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &SyncResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }

    /// True only when every unit succeeded
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }
}
