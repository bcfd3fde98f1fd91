use crate::stats::Tally;

/// Narrow interface between the core and whatever draws the session.
///
/// The core pushes every observable change through these calls and never
/// reads the presentation back; implementations own their display buffers.
pub trait Surface {
    /// Remaining time changed. Render whole seconds (rounded up) and any
    /// progress visual proportional to `ms_remaining / SESSION_MS`.
    fn update_clock(&mut self, ms_remaining: u64);

    /// A new upcoming word entered the stream at `slot`.
    fn append_word(&mut self, slot: usize, word: &str);

    /// Show the assigned word at `slot` with its first `hidden` letters removed.
    fn trim_preview(&mut self, slot: usize, hidden: usize);

    /// Retire a finished word's preview entirely.
    fn remove_preview(&mut self, slot: usize);

    /// Mirror a typed character into the trail at `slot`.
    fn echo_char(&mut self, slot: usize, c: char);

    /// Shrink the trail at `slot` to `len` characters after a deletion.
    fn truncate_typed(&mut self, slot: usize, len: usize);

    /// Correctness highlight for the word at `slot`.
    fn mark_word(&mut self, slot: usize, correct: bool);

    /// Aggregate counters changed. The core supplies raw counts; formatting
    /// wpm/cpm/accuracy is the implementation's job.
    fn update_statistics(&mut self, tally: &Tally);

    /// Time ran out. Show the end banner and the reset affordance.
    fn enable_end_state(&mut self);

    /// A reset was accepted. Wipe previews, trail, statistics and clock.
    fn reset_to_defaults(&mut self);
}

/// Everything a [`Surface`] can be asked to do, as data.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    Clock(u64),
    WordAppended { slot: usize, word: String },
    PreviewTrimmed { slot: usize, hidden: usize },
    PreviewRemoved { slot: usize },
    CharEchoed { slot: usize, c: char },
    TypedTruncated { slot: usize, len: usize },
    WordMarked { slot: usize, correct: bool },
    Statistics(Tally),
    EndState,
    Defaults,
}

/// Records calls in order; the assertion workhorse for headless tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn update_clock(&mut self, ms_remaining: u64) {
        self.calls.push(SurfaceCall::Clock(ms_remaining));
    }

    fn append_word(&mut self, slot: usize, word: &str) {
        self.calls.push(SurfaceCall::WordAppended {
            slot,
            word: word.to_string(),
        });
    }

    fn trim_preview(&mut self, slot: usize, hidden: usize) {
        self.calls.push(SurfaceCall::PreviewTrimmed { slot, hidden });
    }

    fn remove_preview(&mut self, slot: usize) {
        self.calls.push(SurfaceCall::PreviewRemoved { slot });
    }

    fn echo_char(&mut self, slot: usize, c: char) {
        self.calls.push(SurfaceCall::CharEchoed { slot, c });
    }

    fn truncate_typed(&mut self, slot: usize, len: usize) {
        self.calls.push(SurfaceCall::TypedTruncated { slot, len });
    }

    fn mark_word(&mut self, slot: usize, correct: bool) {
        self.calls.push(SurfaceCall::WordMarked { slot, correct });
    }

    fn update_statistics(&mut self, tally: &Tally) {
        self.calls.push(SurfaceCall::Statistics(*tally));
    }

    fn enable_end_state(&mut self) {
        self.calls.push(SurfaceCall::EndState);
    }

    fn reset_to_defaults(&mut self) {
        self.calls.push(SurfaceCall::Defaults);
    }
}
