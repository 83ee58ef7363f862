#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    /// The sign this direction contributes to offset arithmetic.
    pub fn signum(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    /// Derives the direction from the sign of an accumulated offset.
    ///
    /// The IEEE sign bit decides, so `-0.0` maps to `Backward`. This matters because a
    /// carousel resting on its first item holds an offset of zero whose sign still encodes
    /// which way the last movement went.
    pub fn from_offset(offset: f64) -> Self {
        if offset.is_sign_negative() {
            Self::Backward
        } else {
            Self::Forward
        }
    }
}

/// A logical index transition, as reported to `on_index_change` subscribers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexChange {
    pub index: usize,
    pub previous_index: usize,
}
