use std::fmt;

/// Polarity of the ion source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ionization {
    Positive,
    Negative,
}

impl Ionization {
    /// Sign of the charge of ions produced in this mode.
    pub fn sign(&self) -> i32 {
        match self {
            Ionization::Positive => 1,
            Ionization::Negative => -1,
        }
    }
}

impl fmt::Display for Ionization {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Ionization::Positive => write!(f, "POSITIVE"),
            Ionization::Negative => write!(f, "NEGATIVE"),
        }
    }
}
