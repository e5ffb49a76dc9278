use super::models::ExecutionResult;
use std::sync::{Arc, Mutex, PoisonError};

/// Append-only log of finished cases, shared by concurrently running cases.
///
/// Each entry is appended whole, after its case has been evaluated, so readers
/// never observe a partially evaluated case.
#[derive(Clone, Default)]
pub struct ResultLog {
    entries: Arc<Mutex<Vec<(usize, ExecutionResult)>>>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, index: usize, result: ExecutionResult) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        crate::debug_log!(
            "Finished case {} '{}' ({:?})",
            index + 1,
            result.case_name,
            result.outcome()
        );
        entries.push((index, result));
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drains the log into case order. Indices without an entry are filled
    /// by `missing`.
    pub fn into_ordered(
        self,
        count: usize,
        mut missing: impl FnMut(usize) -> ExecutionResult,
    ) -> Vec<ExecutionResult> {
        let entries = {
            let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *guard)
        };
        let mut slots: Vec<Option<ExecutionResult>> = (0..count).map(|_| None).collect();
        for (index, result) in entries {
            if let Some(slot) = slots.get_mut(index) {
                *slot = Some(result);
            }
        }
        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.unwrap_or_else(|| missing(index)))
            .collect()
    }
}
