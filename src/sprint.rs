use crate::stats::{Summary, Tally};
use crate::surface::Surface;
use crate::words::WordSource;

/// Fixed session window in milliseconds.
pub const SESSION_MS: u64 = 60_000;
/// Countdown granularity; the runtime delivers one tick per interval.
pub const TICK_MS: u64 = 100;
/// Number of upcoming words kept ahead of the active one.
pub const EXTRA_WORDS: usize = 4;

/// Session lifecycle. `Ended` is terminal; only `reset()` leaves it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Freshly initialized, word stream not yet populated.
    Idle,
    /// Words are up, clock starts on the first keystroke.
    Armed,
    /// Clock is ticking.
    Running,
    /// Time exhausted.
    Ended,
}

/// One position in the word stream. Created when the stream advances past
/// it, destroyed only at full session reset.
#[derive(Clone, Debug, PartialEq)]
pub struct WordSlot {
    pub assigned: String,
    pub typed: String,
    pub correct: bool,
    hidden: usize,
}

impl WordSlot {
    fn new(assigned: String) -> Self {
        Self {
            assigned,
            typed: String::new(),
            correct: false,
            hidden: 0,
        }
    }

    pub fn assigned_len(&self) -> usize {
        self.assigned.chars().count()
    }

    /// Leading letters of the upcoming-word preview consumed so far.
    pub fn hidden(&self) -> usize {
        self.hidden
    }

    pub fn is_exact_match(&self) -> bool {
        self.typed == self.assigned
    }

    /// The preview tracks position, not correctness: it shrinks by one per
    /// keystroke and never past the end of the assigned word.
    pub(crate) fn consume_preview(&mut self) {
        self.hidden = (self.hidden + 1).min(self.assigned_len());
    }

    pub(crate) fn restore_preview(&mut self) {
        self.hidden -= 1;
    }

    /// Live correctness: the typed buffer is a non-empty, character exact
    /// prefix of the assigned word.
    pub(crate) fn refresh_correctness(&mut self) {
        self.correct =
            !self.typed.is_empty() && self.assigned.as_bytes().starts_with(self.typed.as_bytes());
    }
}

/// A sixty second session being displayed to the user.
///
/// Owns the word stream and all aggregate state. The input reconciler only
/// mutates the active slot and calls back in through `advance_word`.
#[derive(Debug)]
pub struct Sprint {
    pub slots: Vec<WordSlot>,
    pub active: usize,
    pub time_remaining_ms: u64,
    pub phase: Phase,
    pub tally: Tally,
}

impl Sprint {
    pub fn new() -> Self {
        Self {
            slots: vec![],
            active: 0,
            time_remaining_ms: SESSION_MS,
            phase: Phase::Idle,
            tally: Tally::default(),
        }
    }

    /// Populate the word stream and wait for the first keystroke.
    pub fn start(&mut self, words: &mut dyn WordSource, surface: &mut dyn Surface) {
        assert_eq!(
            self.phase,
            Phase::Idle,
            "start() requires a freshly initialized session"
        );

        for _ in 0..EXTRA_WORDS {
            self.append_word(words, surface);
        }
        self.active = 0;
        self.phase = Phase::Armed;
    }

    /// Begin the countdown. Called once per session, on the first character.
    pub fn arm_timer(&mut self) {
        assert_eq!(
            self.phase,
            Phase::Armed,
            "arm_timer() requires an armed session"
        );
        self.phase = Phase::Running;
    }

    /// One countdown step. Ticks outside a running session are ignored, so
    /// a persistent ticker needs no deregistration when the session ends.
    pub fn on_tick(&mut self, surface: &mut dyn Surface) {
        if self.phase != Phase::Running {
            return;
        }

        self.time_remaining_ms = self.time_remaining_ms.saturating_sub(TICK_MS);
        surface.update_clock(self.time_remaining_ms);

        if self.time_remaining_ms == 0 {
            self.phase = Phase::Ended;
            surface.enable_end_state();
        }
    }

    /// Close out the active word and move the stream forward one position.
    pub fn advance_word(&mut self, words: &mut dyn WordSource, surface: &mut dyn Surface) {
        assert_eq!(
            self.phase,
            Phase::Running,
            "advance_word() requires a running session"
        );
        let (exact, assigned_len) = {
            let slot = self
                .slots
                .get(self.active)
                .expect("advance_word() with no active word");
            assert!(
                !slot.typed.is_empty(),
                "advance_word() before the active word was started"
            );
            (slot.is_exact_match(), slot.assigned_len())
        };

        surface.remove_preview(self.active);

        if exact {
            self.tally.correct_words += 1;
            self.tally.chars_typed += assigned_len;
        } else {
            self.tally.wrong_words += 1;
        }
        surface.update_statistics(&self.tally);

        self.append_word(words, surface);
        self.active += 1;
    }

    /// Wipe the surface and begin a fresh session. Only valid once time has
    /// run out.
    pub fn reset(&mut self, words: &mut dyn WordSource, surface: &mut dyn Surface) {
        assert_eq!(
            self.phase,
            Phase::Ended,
            "reset() is only valid from the ended state"
        );

        surface.reset_to_defaults();
        *self = Sprint::new();
        self.start(words, surface);
    }

    pub fn active_slot(&self) -> Option<&WordSlot> {
        self.slots.get(self.active)
    }

    pub fn has_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub fn summary(&self) -> Summary {
        Summary::from(&self.tally)
    }

    fn append_word(&mut self, words: &mut dyn WordSource, surface: &mut dyn Surface) {
        let word = words.pick();
        let slot = self.slots.len();
        surface.append_word(slot, &word);
        self.slots.push(WordSlot::new(word));
    }
}

impl Default for Sprint {
    fn default() -> Self {
        Self::new()
    }
}
