#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Note division as a fraction of a whole note: step length, trigger gates
/// and the arpeggiator interval. Stays exact until converted to seconds or
/// frames at a tempo.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    /// Numerator: how many parts
    pub numerator: u32,
    /// Denominator: of what size (4 = quarter, 8 = eighth, etc.)
    pub denominator: u32,
}

impl Duration {
    pub const HALF: Duration = Duration {
        numerator: 1,
        denominator: 2,
    };
    pub const QUARTER: Duration = Duration {
        numerator: 1,
        denominator: 4,
    };
    pub const EIGHTH: Duration = Duration {
        numerator: 1,
        denominator: 8,
    };
    pub const SIXTEENTH: Duration = Duration {
        numerator: 1,
        denominator: 16,
    };
    pub const THIRTY_SECOND: Duration = Duration {
        numerator: 1,
        denominator: 32,
    };

    /// Reduce the fraction to lowest terms using GCD
    pub const fn reduce(self) -> Self {
        let gcd = const_gcd(self.numerator, self.denominator);
        Duration {
            numerator: self.numerator / gcd,
            denominator: self.denominator / gcd,
        }
    }

    /// Length in beats (quarter notes).
    pub fn beats(&self) -> f64 {
        4.0 * self.numerator as f64 / self.denominator as f64
    }

    /// Length in seconds at `bpm`.
    ///
    /// A sixteenth at 120 bpm: 60 / 120 / 4 = 0.125 s.
    pub fn to_seconds(&self, bpm: f64) -> f64 {
        self.beats() * 60.0 / bpm
    }

    /// Length in (fractional) audio frames at `bpm`.
    pub fn to_frames(&self, bpm: f64, sample_rate: f64) -> f64 {
        self.to_seconds(bpm) * sample_rate
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reduced = self.reduce();
        write!(f, "{}/{}", reduced.numerator, reduced.denominator)
    }
}

/// Compute greatest common divisor (Euclidean algorithm)
/// Used to reduce fractions to lowest terms
const fn const_gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}
