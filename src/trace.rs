//! Step records and the trace assembled from them.
//!
//! A `Trace` is produced fresh by every traced `process` call and is never
//! mutated afterwards. Playback is a `TraceCursor` borrowing the trace, so
//! "which step is on screen" lives with the shell, not the engine.

use serde::Serialize;

use crate::state::CipherState;

/// Control bits read from the pre-clocking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlBits {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl ControlBits {
    pub fn read(state: &CipherState) -> Self {
        Self {
            x: state.x().control_bit(),
            y: state.y().control_bit(),
            z: state.z().control_bit(),
        }
    }

    pub fn as_array(&self) -> [u8; 3] {
        [self.x, self.y, self.z]
    }
}

/// Which registers clocked in a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rotation {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl Rotation {
    /// Number of registers that clocked. Always 2 or 3.
    pub fn count(&self) -> usize {
        [self.x, self.y, self.z].iter().filter(|r| **r).count()
    }
}

/// Everything that happened while processing one data bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    /// Zero-based position of the data bit.
    pub step: usize,
    pub control: ControlBits,
    pub majority: u8,
    pub rotated: Rotation,
    /// State before clocking.
    pub before: CipherState,
    /// State after clocking; the keystream bit is read from here.
    pub after: CipherState,
    pub keystream_bit: u8,
    pub data_bit: u8,
    pub output_bit: u8,
}

/// The initial state plus one record per data bit, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace {
    initial: CipherState,
    steps: Vec<StepRecord>,
}

impl Trace {
    pub(crate) fn new(initial: CipherState, steps: Vec<StepRecord>) -> Self {
        Self { initial, steps }
    }

    /// State freshly loaded from the key, before step 0.
    pub fn initial(&self) -> &CipherState {
        &self.initial
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepRecord> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepRecord> {
        self.steps.iter()
    }

    /// State after the last step, or the initial state for an empty trace.
    pub fn final_state(&self) -> &CipherState {
        self.steps.last().map_or(&self.initial, |s| &s.after)
    }

    /// The keystream bits in step order.
    pub fn keystream(&self) -> Vec<u8> {
        self.steps.iter().map(|s| s.keystream_bit).collect()
    }

    /// A playback cursor positioned on step 0.
    pub fn cursor(&self) -> TraceCursor<'_> {
        TraceCursor {
            trace: self,
            index: 0,
        }
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a StepRecord;
    type IntoIter = std::slice::Iter<'a, StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Read-only playback position over a `Trace`.
///
/// Moving past either end is a no-op; seeking out of range is refused and
/// leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct TraceCursor<'a> {
    trace: &'a Trace,
    index: usize,
}

impl<'a> TraceCursor<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// The record under the cursor, `None` only for an empty trace.
    pub fn current(&self) -> Option<&'a StepRecord> {
        self.trace.get(self.index)
    }

    /// Advance one step. Returns false when already on the last step.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 < self.trace.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Go back one step. Returns false when already on step 0.
    pub fn back(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `index`, returning the record there.
    pub fn seek(&mut self, index: usize) -> Option<&'a StepRecord> {
        let record = self.trace.get(index)?;
        self.index = index;
        Some(record)
    }

    pub fn rewind(&mut self) {
        self.index = 0;
    }

    pub fn fast_forward(&mut self) {
        self.index = self.trace.len().saturating_sub(1);
    }

    pub fn is_at_end(&self) -> bool {
        self.index + 1 >= self.trace.len()
    }

    /// Auto-advance from the current step to the end.
    pub fn play(self) -> Play<'a> {
        Play {
            steps: self.trace.steps[self.index.min(self.trace.len())..].iter(),
        }
    }
}

/// Records from a cursor's position onward, see [`TraceCursor::play`].
#[derive(Debug, Clone)]
pub struct Play<'a> {
    steps: std::slice::Iter<'a, StepRecord>,
}

impl<'a> Iterator for Play<'a> {
    type Item = &'a StepRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.steps.next()
    }
}
