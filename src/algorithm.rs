use std::fmt;
use std::str::FromStr;

use crate::error::VisualizerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
    Counting,
    Radix,
    Bucket,
}

impl Algorithm {
    pub const ALL: [Algorithm; 9] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Heap,
        Algorithm::Counting,
        Algorithm::Radix,
        Algorithm::Bucket,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Heap => "heap",
            Algorithm::Counting => "counting",
            Algorithm::Radix => "radix",
            Algorithm::Bucket => "bucket",
        }
    }

    /// Fixed annotation shown under every status line of the run.
    pub fn complexity(self) -> &'static str {
        match self {
            Algorithm::Bubble | Algorithm::Selection | Algorithm::Insertion => {
                "Time Complexity: O(n^2) | Space Complexity: O(1)"
            }
            Algorithm::Merge => "Time Complexity: O(n log n) | Space Complexity: O(n)",
            Algorithm::Quick => "Time Complexity: O(n log n) | Space Complexity: O(log n)",
            Algorithm::Heap => "Time Complexity: O(n log n) | Space Complexity: O(1)",
            Algorithm::Counting => "Time Complexity: O(n + k) | Space Complexity: O(n + k)",
            Algorithm::Radix => "Time Complexity: O(nk) | Space Complexity: O(n + k)",
            Algorithm::Bucket => "Time Complexity: O(n + n^2/k + k) | Space Complexity: O(nk)",
        }
    }

    pub fn is_stable(self) -> bool {
        matches!(
            self,
            Algorithm::Bubble | Algorithm::Insertion | Algorithm::Merge | Algorithm::Counting | Algorithm::Radix
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.strip_suffix("sort").unwrap_or(&name).trim_end_matches(['-', '_', ' ']);
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| VisualizerError::UnknownAlgorithm(s.to_owned()))
    }
}
