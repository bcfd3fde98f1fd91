/// Aggregate counters owned by the session controller. Counters only grow;
/// a reset replaces the whole tally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct_words: usize,
    pub wrong_words: usize,
    /// Characters typed in correctly finished words only.
    pub chars_typed: usize,
}

impl Tally {
    pub fn finished_words(&self) -> usize {
        self.correct_words + self.wrong_words
    }

    /// Share of finished words typed correctly, rounded to a whole percent.
    /// `None` until at least one word has been finished.
    pub fn accuracy(&self) -> Option<u32> {
        match self.finished_words() {
            0 => None,
            total => Some(((self.correct_words as f64 / total as f64) * 100.0).round() as u32),
        }
    }
}

/// Derived figures over the fixed sixty second window. With a one minute
/// session, words per minute coincides with the correct word count and
/// characters per minute with the correct character count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub wpm: usize,
    pub cpm: usize,
    pub accuracy: Option<u32>,
}

impl From<&Tally> for Summary {
    fn from(tally: &Tally) -> Self {
        Self {
            wpm: tally.correct_words,
            cpm: tally.chars_typed,
            accuracy: tally.accuracy(),
        }
    }
}
