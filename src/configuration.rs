use crate::error::Error;

/// Default mass tolerance in ppm used to consider two masses (or m/z values) equal.
pub const DEFAULT_PPM_TOLERANCE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Configuration {
    pub ppm_tolerance: f64,
}

impl Configuration {
    /// Creates a new configuration.
    ///
    /// Arguments:
    /// * `ppm_tolerance` - Maximum rounded ppm difference (inclusive) for two values to be considered equal.
    ///
    pub fn new(ppm_tolerance: f64) -> Result<Self, Error> {
        if !ppm_tolerance.is_finite() || ppm_tolerance < 0.0 {
            return Err(Error::InvalidPpmTolerance(ppm_tolerance));
        }

        Ok(Self { ppm_tolerance })
    }

    /// True if the given ppm difference is within the tolerance (boundary included).
    #[inline]
    pub fn within_tolerance(&self, ppm: u32) -> bool {
        ppm as f64 <= self.ppm_tolerance
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            ppm_tolerance: DEFAULT_PPM_TOLERANCE,
        }
    }
}
