//! Two-level override resolution.
//!
//! Every merge in the pipeline (property fields, infobox fields, infoboxes)
//! compares an original value against the value inherited from the nearest
//! ancestor. [`Overridden::merge`] is the single rule they all share.

/// A merged value and whether it came from the original side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overridden<T> {
    pub value: T,
    pub overridden: bool,
}

impl<T> Overridden<T> {
    /// The original wins whenever present (`overridden = true`); otherwise the
    /// parent is inherited (`overridden = false`); with neither, nothing.
    pub fn merge(original: Option<T>, parent: Option<T>) -> Option<Self> {
        match (original, parent) {
            (Some(value), _) => Some(Self {
                value,
                overridden: true,
            }),
            (None, Some(value)) => Some(Self {
                value,
                overridden: false,
            }),
            (None, None) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Overridden<U> {
        Overridden {
            value: f(self.value),
            overridden: self.overridden,
        }
    }
}
