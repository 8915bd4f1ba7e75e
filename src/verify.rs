/// Mismatches tolerated before a run is abandoned.
pub const MISMATCH_THRESHOLD: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub passed: bool,
    /// The mismatch count has gone past the threshold.
    pub fatal: bool,
}

/// Compares translated bytes against expected ones and counts disagreements.
#[derive(Debug, Clone)]
pub struct Verifier {
    threshold: usize,
    mismatches: usize,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(MISMATCH_THRESHOLD)
    }
}

impl Verifier {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            mismatches: 0,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn mismatches(&self) -> usize {
        self.mismatches
    }

    pub fn check(&mut self, actual: i8, expected: i8) -> Verdict {
        let passed = actual == expected;
        if !passed {
            self.mismatches += 1;
        }
        Verdict {
            passed,
            fatal: self.mismatches > self.threshold,
        }
    }

    pub fn reset(&mut self) {
        self.mismatches = 0;
    }
}
