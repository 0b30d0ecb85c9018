use crate::ports::ReadTimeEstimator;

/// Word-count based read time: `ceil(words / wpm)` minutes, with the
/// quotient rounded to two decimals first.
#[derive(Debug, Clone, Copy)]
pub struct WordsPerMinute {
    pub wpm: u32,
}

impl WordsPerMinute {
    pub fn minutes(&self, text: &str) -> u64 {
        let words = text.split_whitespace().count() as f64;
        let minutes = words / f64::from(self.wpm.max(1));
        let rounded = (minutes * 100.0).round() / 100.0;
        rounded.ceil() as u64
    }
}

impl Default for WordsPerMinute {
    fn default() -> Self {
        Self { wpm: 200 }
    }
}

impl ReadTimeEstimator for WordsPerMinute {
    fn estimate(&self, text: &str) -> String {
        format!("{} min read", self.minutes(text))
    }
}
