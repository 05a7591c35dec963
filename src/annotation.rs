use std::collections::BTreeSet;
use std::fmt;
use std::hash;
use std::sync::Arc;

use ordered_float::OrderedFloat;

use crate::{
    configuration::Configuration, detection::AdductDetector, error::Error,
    ionization::Ionization, lipid::Lipid, peak::Peak,
};

/// Putative identification of a lipid in one sample.
///
/// The adduct is inferred once, when the annotation is created, from the grouped signals.
/// Changing the ionization afterwards or overriding the adduct does not trigger a new inference,
/// use [`Annotation::redetect_adduct`] for that.
///
/// Two annotations are equal if they share lipid, m/z and retention time, regardless of adduct and score.
///
#[derive(Debug, Clone)]
pub struct Annotation {
    lipid: Arc<Lipid>,
    mz: f64,
    intensity: f64,
    retention_time: f64,
    ionization: Option<Ionization>,
    grouped_signals: BTreeSet<Peak>,
    adduct: Option<String>,
    score: i32,
    total_scores_applied: u32,
}

impl Annotation {
    /// Creates an annotation without grouped signals. The adduct stays unresolved.
    ///
    /// Arguments:
    /// * `lipid` - The annotated lipid
    /// * `mz` - Representative m/z of the annotation
    /// * `intensity` - Intensity of the annotation
    /// * `retention_time` - Retention time in minutes
    /// * `ionization` - Polarity, `None` if unknown
    ///
    pub fn new(
        lipid: impl Into<Arc<Lipid>>,
        mz: f64,
        intensity: f64,
        retention_time: f64,
        ionization: impl Into<Option<Ionization>>,
    ) -> Self {
        Self::with_grouped_signals(
            lipid,
            mz,
            intensity,
            retention_time,
            std::iter::empty(),
            ionization,
        )
    }

    /// Creates an annotation and infers its adduct with the built-in adduct tables and the default tolerance.
    ///
    /// Arguments:
    /// * `lipid` - The annotated lipid
    /// * `mz` - Representative m/z of the annotation
    /// * `intensity` - Intensity of the annotation
    /// * `retention_time` - Retention time in minutes
    /// * `grouped_signals` - Co-eluting peaks believed to originate from the same molecule, duplicates are dropped
    /// * `ionization` - Polarity, `None` if unknown
    ///
    pub fn with_grouped_signals(
        lipid: impl Into<Arc<Lipid>>,
        mz: f64,
        intensity: f64,
        retention_time: f64,
        grouped_signals: impl IntoIterator<Item = Peak>,
        ionization: impl Into<Option<Ionization>>,
    ) -> Self {
        let config = Configuration::default();
        let detector = AdductDetector::with_builtin_tables(&config);
        Self::with_detector(
            lipid,
            mz,
            intensity,
            retention_time,
            grouped_signals,
            ionization,
            &detector,
        )
    }

    /// Creates an annotation and infers its adduct with the given detector.
    ///
    /// Arguments:
    /// * `lipid` - The annotated lipid
    /// * `mz` - Representative m/z of the annotation
    /// * `intensity` - Intensity of the annotation
    /// * `retention_time` - Retention time in minutes
    /// * `grouped_signals` - Co-eluting peaks believed to originate from the same molecule, duplicates are dropped
    /// * `ionization` - Polarity, `None` if unknown
    /// * `detector` - Adduct detector carrying tolerance and adduct tables
    ///
    pub fn with_detector(
        lipid: impl Into<Arc<Lipid>>,
        mz: f64,
        intensity: f64,
        retention_time: f64,
        grouped_signals: impl IntoIterator<Item = Peak>,
        ionization: impl Into<Option<Ionization>>,
        detector: &AdductDetector,
    ) -> Self {
        let mut annotation = Self {
            lipid: lipid.into(),
            mz,
            intensity,
            retention_time,
            ionization: ionization.into(),
            grouped_signals: grouped_signals.into_iter().collect(),
            adduct: None,
            score: 0,
            total_scores_applied: 0,
        };
        annotation.redetect_adduct(detector);
        annotation
    }

    /// Runs the adduct inference again on the current ionization and grouped signals,
    /// replacing any adduct set before.
    pub fn redetect_adduct(&mut self, detector: &AdductDetector) -> Option<&str> {
        self.adduct = detector
            .detect(self.ionization, &self.grouped_signals, self.mz)
            .map(str::to_string);
        self.adduct.as_deref()
    }

    pub fn lipid(&self) -> &Lipid {
        &self.lipid
    }

    pub fn mz(&self) -> f64 {
        self.mz
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Retention time in minutes
    pub fn retention_time(&self) -> f64 {
        self.retention_time
    }

    pub fn ionization(&self) -> Option<Ionization> {
        self.ionization
    }

    /// Does not re-run the adduct inference.
    pub fn set_ionization(&mut self, ionization: impl Into<Option<Ionization>>) {
        self.ionization = ionization.into();
    }

    /// Grouped signals in ascending (m/z, intensity) order.
    pub fn grouped_signals(&self) -> &BTreeSet<Peak> {
        &self.grouped_signals
    }

    /// Inferred (or manually set) adduct, `None` if unresolved.
    pub fn adduct(&self) -> Option<&str> {
        self.adduct.as_deref()
    }

    pub fn set_adduct(&mut self, adduct: Option<String>) {
        self.adduct = adduct;
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// Overwrites the running score, the number of applied scores is kept.
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    pub fn total_scores_applied(&self) -> u32 {
        self.total_scores_applied
    }

    /// Adds `delta` to the running score. Both the score and the counter wrap on overflow.
    pub fn add_score(&mut self, delta: i32) {
        self.score = self.score.wrapping_add(delta);
        self.total_scores_applied = self.total_scores_applied.wrapping_add(1);
    }

    /// Score divided by the number of applied scores. NaN if no score was applied yet,
    /// check [`Self::total_scores_applied`] or use [`Self::try_normalized_score`].
    pub fn normalized_score(&self) -> f64 {
        self.score as f64 / self.total_scores_applied as f64
    }

    pub fn try_normalized_score(&self) -> Result<f64, Error> {
        if self.total_scores_applied == 0 {
            return Err(Error::NoScoresApplied);
        }
        Ok(self.normalized_score())
    }

    #[inline]
    fn identity(&self) -> (&Lipid, OrderedFloat<f64>, OrderedFloat<f64>) {
        (
            self.lipid.as_ref(),
            OrderedFloat(self.mz),
            OrderedFloat(self.retention_time),
        )
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Annotation {}

impl hash::Hash for Annotation {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Annotation({}, mz={:.4}, RT={:.2}, adduct={}, intensity={:.1}, score={})",
            self.lipid.name(),
            self.mz,
            self.retention_time,
            self.adduct.as_deref().unwrap_or("unresolved"),
            self.intensity,
            self.score
        )
    }
}
