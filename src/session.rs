/// Length of every typing sprint, in seconds.
pub const SESSION_SECS: u16 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// Per-character classification of typed input against the sample text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Untyped,
    Correct,
    Incorrect,
}

/// A single 60-second typing run over one sample paragraph.
///
/// The countdown only moves via `tick()`, which the runtime drives once per
/// elapsed second while the session is `Running`. Error counts are derived on
/// every call rather than patched incrementally, so they cannot drift from
/// the input buffer.
#[derive(Debug, Clone)]
pub struct Session {
    pub sample: String,
    pub input: Vec<char>,
    pub seconds_remaining: u16,
    pub phase: Phase,
    /// Word count at the moment the countdown expired; 0 until then.
    pub wpm: usize,
    /// (elapsed seconds, words typed) recorded on each tick, for the results chart.
    pub progress: Vec<(f64, f64)>,
}

impl Session {
    pub fn new(sample: String) -> Self {
        Self {
            sample,
            input: Vec::new(),
            seconds_remaining: SESSION_SECS,
            phase: Phase::Idle,
            wpm: 0,
            progress: Vec::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn has_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn elapsed_secs(&self) -> u16 {
        SESSION_SECS - self.seconds_remaining
    }

    /// Append one typed character. The first captured keystroke after a reset
    /// starts the countdown; anything arriving after expiry is dropped.
    pub fn write(&mut self, c: char) {
        if self.has_finished() {
            return;
        }
        self.start_if_idle();
        self.input.push(c);
    }

    /// Remove the most recently typed character. A deletion is still a
    /// keystroke, so it also starts an idle session.
    pub fn backspace(&mut self) {
        if self.has_finished() {
            return;
        }
        self.start_if_idle();
        self.input.pop();
    }

    /// Replace the whole input buffer, for embeddings that hand over a raw
    /// input-field string instead of individual keystrokes.
    pub fn replace_input(&mut self, s: &str) {
        if self.has_finished() {
            return;
        }
        if !s.is_empty() {
            self.start_if_idle();
        }
        self.input = s.chars().collect();
    }

    fn start_if_idle(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Running;
        }
    }

    /// Advance the countdown by one second. No-op outside `Running`, so a
    /// tick still in flight when the countdown task is cancelled cannot
    /// decrement anything.
    pub fn tick(&mut self) {
        if !self.is_running() {
            return;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        self.progress
            .push((self.elapsed_secs() as f64, self.word_count() as f64));
        if self.seconds_remaining == 0 {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        self.wpm = self.word_count();
    }

    /// Back to `Idle` over the same sample text. Idempotent.
    pub fn reset(&mut self) {
        self.input.clear();
        self.seconds_remaining = SESSION_SECS;
        self.phase = Phase::Idle;
        self.wpm = 0;
        self.progress.clear();
    }

    /// Whitespace-delimited tokens typed so far. Over the fixed 60-second
    /// window this doubles as the reported WPM.
    pub fn word_count(&self) -> usize {
        self.input
            .iter()
            .collect::<String>()
            .split_whitespace()
            .count()
    }

    /// Count of typed positions that miss the sample. Recomputed from scratch
    /// on every call; characters typed past the end of the sample count as
    /// misses.
    pub fn errors(&self) -> usize {
        let sample: Vec<char> = self.sample.chars().collect();
        self.input
            .iter()
            .enumerate()
            .filter(|(idx, c)| sample.get(*idx) != Some(c))
            .count()
    }

    pub fn char_state(&self, idx: usize) -> Outcome {
        let expected = self.sample.chars().nth(idx);
        match (expected, self.input.get(idx)) {
            (_, None) => Outcome::Untyped,
            (Some(e), Some(&c)) if c == e => Outcome::Correct,
            _ => Outcome::Incorrect,
        }
    }

    /// Classification of every sample position. Pure function of
    /// `(sample, input)`.
    pub fn diff(&self) -> Vec<Outcome> {
        self.sample
            .chars()
            .enumerate()
            .map(|(idx, expected)| match self.input.get(idx) {
                None => Outcome::Untyped,
                Some(&c) if c == expected => Outcome::Correct,
                Some(_) => Outcome::Incorrect,
            })
            .collect()
    }

    /// Share of typed characters that hit the sample, as a percentage.
    /// Reports 100 before anything was typed.
    pub fn accuracy(&self) -> f64 {
        if self.input.is_empty() {
            return 100.0;
        }
        let correct = self.input.len() - self.errors();
        (correct as f64 / self.input.len() as f64) * 100.0
    }
}
