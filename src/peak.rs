use std::cmp;
use std::fmt;
use std::hash;

use ordered_float::OrderedFloat;

/// Observed signal. Peaks are totally ordered by m/z, then intensity, which fixes the
/// iteration order of grouped signals and with it the outcome of adduct detection.
#[derive(Default, Clone, Copy, Debug)]
pub struct Peak {
    pub mz: f64,
    pub intensity: f64,
}

impl Peak {
    pub fn new(mz: f64, intensity: f64) -> Self {
        Self { mz, intensity }
    }

    #[inline]
    fn key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        (OrderedFloat(self.mz), OrderedFloat(self.intensity))
    }
}

impl fmt::Display for Peak {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Peak({}, {})", self.mz, self.intensity)
    }
}

impl hash::Hash for Peak {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl cmp::PartialEq for Peak {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl cmp::Eq for Peak {}

impl cmp::PartialOrd for Peak {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl cmp::Ord for Peak {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_order_by_mz_then_intensity() {
        let peaks: BTreeSet<Peak> = [
            Peak::new(722.482, 80000.0),
            Peak::new(700.5, 100000.0),
            Peak::new(700.5, 90000.0),
            Peak::new(350.754, 85000.0),
        ]
        .into_iter()
        .collect();

        let ordered = peaks.iter().copied().collect::<Vec<_>>();
        assert_eq!(
            ordered,
            vec![
                Peak::new(350.754, 85000.0),
                Peak::new(700.5, 90000.0),
                Peak::new(700.5, 100000.0),
                Peak::new(722.482, 80000.0),
            ]
        );
    }

    #[test]
    fn test_deduplication_by_value() {
        let peaks: BTreeSet<Peak> = [
            Peak::new(700.5, 100000.0),
            Peak::new(700.5, 100000.0),
            Peak::new(700.5, 100001.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(peaks.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Peak::new(700.5, 100.0).to_string(), "Peak(700.5, 100)");
    }
}
