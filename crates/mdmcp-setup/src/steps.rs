//! In-memory progress records for multi-step operations.

use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Started,
    Completed,
    Failed,
}

/// One tracked step. Times are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupStep {
    pub step: String,
    pub status: StepStatus,
    pub timestamp: i64,
    pub duration: i64,
    pub error: Option<String>,
}

/// Handle returned by [`SetupSteps::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepId(usize);

/// Append-only list of steps for the lifetime of one run.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct SetupSteps {
    steps: Vec<SetupStep>,
}

impl SetupSteps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, step: &str, status: StepStatus, error: Option<String>) -> StepId {
        self.steps.push(SetupStep {
            step: step.to_string(),
            status,
            timestamp: now_millis(),
            duration: 0,
            error,
        });
        StepId(self.steps.len() - 1)
    }

    /// Set the final status of a step. Unknown ids are ignored.
    pub fn update(&mut self, id: StepId, status: StepStatus, error: Option<String>) {
        if let Some(step) = self.steps.get_mut(id.0) {
            step.status = status;
            step.duration = now_millis() - step.timestamp;
            if error.is_some() {
                step.error = error;
            }
        }
    }

    pub fn get(&self, id: StepId) -> Option<&SetupStep> {
        self.steps.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SetupStep> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
