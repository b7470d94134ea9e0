use super::TransactionError;
use crate::model::{ProductId, RecordId};
use chrono::{DateTime, Utc};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Sale,
    Purchase,
    Return,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Sale => "sale",
            Self::Purchase => "purchase",
            Self::Return => "return",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionState {
    #[default]
    Idle,
    Submitting,
    Committed,
    Failed,
}

/// Log a record was written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    WarrantySale,
    Sale,
    Purchase,
    Return,
}

/// One remote write that went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppliedStep {
    Stock {
        product_id: ProductId,
        previous: u32,
        new: u32,
    },
    Log {
        log: LogKind,
        record_id: RecordId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    /// Index of the cart line the step belongs to.
    pub line: usize,
    pub step: AppliedStep,
}

#[derive(Debug)]
pub struct FailedLine {
    pub line: usize,
    pub product_id: ProductId,
    pub error: TransactionError,
}

/// Attempt to write back the stock level a step replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Compensation {
    /// Index into [`TransactionReport::steps`].
    pub step: usize,
    pub product_id: ProductId,
    pub restored_to: u32,
    /// `Err` holds the backend's message; the stock is then still wrong.
    pub outcome: Result<(), String>,
}

/// Saga log of one submission.
///
/// Tells "stock updated but log write failed" apart from "nothing happened": every
/// remote write that succeeded is in `steps`, in order.
#[derive(Debug)]
pub struct TransactionReport {
    pub kind: TransactionKind,
    pub state: TransactionState,
    pub started_at: DateTime<Utc>,
    pub lines_total: usize,
    pub lines_completed: usize,
    pub cart_total: f64,
    pub steps: Vec<StepRecord>,
    pub failure: Option<FailedLine>,
    pub compensations: Vec<Compensation>,
}

impl TransactionReport {
    pub(crate) fn new(kind: TransactionKind, lines_total: usize, cart_total: f64) -> Self {
        Self {
            kind,
            state: TransactionState::Submitting,
            started_at: Utc::now(),
            lines_total,
            lines_completed: 0,
            cart_total,
            steps: Vec::new(),
            failure: None,
            compensations: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, line: usize, step: AppliedStep) {
        self.steps.push(StepRecord { line, step });
    }

    pub fn is_committed(&self) -> bool {
        self.state == TransactionState::Committed
    }

    /// Failed after at least one remote write went through.
    pub fn is_partial(&self) -> bool {
        self.state == TransactionState::Failed && !self.steps.is_empty()
    }

    pub fn stock_mutations(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.step, AppliedStep::Stock { .. }))
            .count()
    }

    pub fn log_writes(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.step, AppliedStep::Log { .. }))
            .count()
    }

    pub fn record_ids(&self, log: LogKind) -> Vec<RecordId> {
        self.steps
            .iter()
            .filter_map(|s| match s.step {
                AppliedStep::Log { log: l, record_id } if l == log => Some(record_id),
                _ => None,
            })
            .collect()
    }

    /// Stock steps whose previous level has been written back.
    pub fn restored_steps(&self) -> impl Iterator<Item = usize> + '_ {
        self.compensations
            .iter()
            .filter(|c| c.outcome.is_ok())
            .map(|c| c.step)
    }
}

impl Display for TransactionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.failure {
            None => write!(
                f,
                "{} committed: {}/{} lines",
                self.kind, self.lines_completed, self.lines_total
            ),
            Some(failed) => {
                write!(
                    f,
                    "{} failed at line {} ({}): {}; {} stock update(s) and {} log write(s) applied",
                    self.kind,
                    failed.line + 1,
                    failed.product_id,
                    failed.error,
                    self.stock_mutations(),
                    self.log_writes()
                )?;
                if !self.compensations.is_empty() {
                    let restored = self.restored_steps().count();
                    write!(f, ", {restored}/{} restored", self.compensations.len())?;
                }
                Ok(())
            }
        }
    }
}
