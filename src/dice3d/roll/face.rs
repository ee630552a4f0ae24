//! The value a six-sided die can land on.

use std::fmt;

/// A face of a standard d6, always in `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceValue(u8);

impl FaceValue {
    pub const ONE: FaceValue = FaceValue(1);
    pub const SIX: FaceValue = FaceValue(6);

    pub const ALL: [FaceValue; 6] = [
        FaceValue(1),
        FaceValue(2),
        FaceValue(3),
        FaceValue(4),
        FaceValue(5),
        FaceValue(6),
    ];

    pub fn new(value: u8) -> Option<Self> {
        (1..=6).contains(&value).then_some(Self(value))
    }

    /// Face for a zero-based index (`0 => 1`, ..., `5 => 6`).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Opposite faces of a standard die always sum to seven.
    pub fn opposite(self) -> Self {
        Self(7 - self.0)
    }

    /// Unicode die glyph (⚀ .. ⚅).
    pub fn glyph(self) -> char {
        ['⚀', '⚁', '⚂', '⚃', '⚄', '⚅'][self.index()]
    }
}

impl Default for FaceValue {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u8> for FaceValue {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("Invalid face value: {value}. Expected 1-6"))
    }
}

impl From<FaceValue> for u32 {
    fn from(face: FaceValue) -> Self {
        u32::from(face.0)
    }
}

impl fmt::Display for FaceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
