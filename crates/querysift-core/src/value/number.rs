use std::cmp::Ordering;

///
/// Number
///
/// Numeric literal or field value. Comparisons widen across the three
/// representations; integers compare exactly, floats via `partial_cmp`.
///

#[derive(Clone, Copy, Debug)]
pub enum Number {
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Number {
    /// Parse a numeric literal, preferring the narrowest exact form.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if let Ok(v) = raw.parse::<i64>() {
            return Some(Self::Int(v));
        }
        if let Ok(v) = raw.parse::<u64>() {
            return Some(Self::Uint(v));
        }

        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Self::Float)
    }

    const fn as_i128(self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(v as i128),
            Self::Uint(v) => Some(v as i128),
            Self::Float(_) => None,
        }
    }

    #[expect(clippy::cast_precision_loss)]
    const fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Uint(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}
