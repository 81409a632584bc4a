//! Sequential timeline construction.
//!
//! Blocks are appended at a moving cursor, so each block starts exactly where
//! the previous one ended. The finished list is handed out once.

use chrono::{Duration, NaiveDateTime};
use tracing::warn;

use crate::schedule::TimeBlock;
use crate::task::{Task, TaskType};

/// Description of a block to append at the cursor.
#[derive(Debug, Clone)]
pub(crate) struct BlockSpec {
    label: String,
    block_type: TaskType,
    task_id: Option<String>,
    minutes: i64,
    original_minutes: Option<i64>,
}

impl BlockSpec {
    pub fn synthetic(label: impl Into<String>, block_type: TaskType, minutes: i64) -> Self {
        Self {
            label: label.into(),
            block_type,
            task_id: None,
            minutes,
            original_minutes: None,
        }
    }

    pub fn for_task(task: &Task, minutes: i64) -> Self {
        Self {
            label: task.title.clone(),
            block_type: task.task_type,
            task_id: Some(task.id.clone()),
            minutes,
            original_minutes: None,
        }
    }

    /// Record the nominal length; ignored unless it exceeds the actual one.
    pub fn reduced_from(mut self, nominal_minutes: i64) -> Self {
        if nominal_minutes > self.minutes {
            self.original_minutes = Some(nominal_minutes);
        }
        self
    }
}

#[derive(Debug)]
pub(crate) struct BlockBuilder {
    cursor: NaiveDateTime,
    blocks: Vec<TimeBlock>,
}

impl BlockBuilder {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            cursor: start,
            blocks: Vec::new(),
        }
    }

    pub fn cursor(&self) -> NaiveDateTime {
        self.cursor
    }

    /// Append a block at the cursor. Zero-length specs are skipped so every
    /// emitted block has `end > start`; so is a block whose end is not a
    /// representable date.
    pub fn push(&mut self, spec: BlockSpec) -> bool {
        if spec.minutes <= 0 {
            return false;
        }
        let start = self.cursor;
        let Some(end) = Duration::try_minutes(spec.minutes).and_then(|d| start.checked_add_signed(d)) else {
            warn!(label = %spec.label, minutes = spec.minutes, "block end out of range, skipped");
            return false;
        };
        self.blocks.push(TimeBlock {
            id: uuid::Uuid::new_v4().to_string(),
            start,
            end,
            label: spec.label,
            block_type: spec.block_type,
            task_id: spec.task_id,
            is_reduced: spec.original_minutes.is_some(),
            original_minutes: spec.original_minutes,
        });
        self.cursor = end;
        true
    }

    /// Append a block that runs from the cursor to `end`, if there is room.
    /// The requested length is replaced, and its nominal length is kept only
    /// if it still exceeds the actual one.
    pub fn push_until(&mut self, end: NaiveDateTime, spec: BlockSpec) -> bool {
        let minutes = (end - self.cursor).num_minutes();
        let original_minutes = spec.original_minutes.filter(|&o| o > minutes);
        self.push(BlockSpec {
            minutes,
            original_minutes,
            ..spec
        })
    }

    pub fn finish(self) -> Vec<TimeBlock> {
        self.blocks
    }
}
