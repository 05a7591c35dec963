use std::collections::BTreeSet;

use ndarray::Array2;

use crate::{
    adduct::{AdductTable, AdductTables},
    configuration::Configuration,
    ionization::Ionization,
    peak::Peak,
    utils::ppm_increment,
};

/// Combination of hypotheses and peaks which resolved the adduct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdductMatch<'a> {
    /// Resolved adduct, explains `peak`
    pub adduct: &'a str,
    /// Peak matching the annotated m/z
    pub peak: Peak,
    /// Adduct explaining `partner_peak`
    pub partner_adduct: &'a str,
    pub partner_peak: Peak,
    /// Neutral mass implied by `adduct` and `peak`
    pub neutral_mass: f64,
}

/// Infers the adduct of an annotation from a group of co-eluting peaks.
///
/// Two peaks are explained by two different adducts of the same molecule if their neutral masses agree
/// within the configured ppm tolerance. The first such combination where one of the two peaks matches the
/// annotated m/z resolves the adduct. Hypotheses are iterated in table order, peaks in ascending
/// (m/z, intensity) order, so the outcome is deterministic but not necessarily the only valid assignment.
///
pub struct AdductDetector<'a> {
    config: &'a Configuration,
    tables: &'a AdductTables,
}

impl<'a> AdductDetector<'a> {
    /// Creates a new detector.
    ///
    /// Arguments:
    /// * `config` - The configuration holding the ppm tolerance.
    /// * `tables` - Adduct hypotheses per polarity.
    ///
    pub fn new(config: &'a Configuration, tables: &'a AdductTables) -> Self {
        Self { config, tables }
    }

    /// Creates a detector searching the built-in adduct tables.
    pub fn with_builtin_tables(config: &'a Configuration) -> Self {
        Self::new(config, AdductTables::builtin())
    }

    pub fn config(&self) -> &Configuration {
        self.config
    }

    pub fn tables(&self) -> &AdductTables {
        self.tables
    }

    /// Neutral masses of every peak under every hypothesis of the table.
    /// Rows follow the table order, columns the peak order. `None` where the conversion is undefined
    /// or the implied mass is not positive.
    ///
    /// # Arguments
    /// * `table` - Adduct hypotheses
    /// * `peaks` - Peaks to convert
    ///
    pub fn neutral_mass_matrix(table: &AdductTable, peaks: &[Peak]) -> Array2<Option<f64>> {
        let rules = table.iter().map(|(_, rule)| rule).collect::<Vec<_>>();
        Array2::from_shape_fn((rules.len(), peaks.len()), |(hypothesis, peak)| {
            rules[hypothesis]
                .neutral_mass(peaks[peak].mz)
                .filter(|mass| *mass > 0.0)
        })
    }

    /// Searches for the first consistent combination of two adduct hypotheses and two peaks.
    ///
    /// # Arguments
    /// * `ionization` - Polarity, selects the table to search. `None` never resolves.
    /// * `grouped_signals` - Co-eluting peaks of the annotation
    /// * `mz` - The annotated m/z
    ///
    pub fn find_match(
        &self,
        ionization: Option<Ionization>,
        grouped_signals: &BTreeSet<Peak>,
        mz: f64,
    ) -> Option<AdductMatch<'a>> {
        let Some(ionization) = ionization else {
            log::debug!("No ionization mode set, adduct of {mz:.4} stays unresolved");
            return None;
        };
        let tables: &'a AdductTables = self.tables;
        let table = tables.for_ionization(ionization);

        let peaks = grouped_signals.iter().copied().collect::<Vec<Peak>>();
        let labels = table.labels().collect::<Vec<&'a str>>();
        let masses = Self::neutral_mass_matrix(table, &peaks);

        for (h1, &adduct1) in labels.iter().enumerate() {
            for (h2, &adduct2) in labels.iter().enumerate() {
                // Labels are unique within a table
                if h1 == h2 {
                    continue;
                }
                for (i, p1) in peaks.iter().enumerate() {
                    for (j, p2) in peaks.iter().enumerate() {
                        if p1 == p2 {
                            continue;
                        }
                        let (Some(mass1), Some(mass2)) = (masses[[h1, i]], masses[[h2, j]]) else {
                            log::trace!(
                                "Skipping {adduct1}/{adduct2} for {p1}/{p2}, no positive neutral mass"
                            );
                            continue;
                        };
                        if !self.config.within_tolerance(ppm_increment(mass1, mass2)) {
                            continue;
                        }

                        if self.config.within_tolerance(ppm_increment(p1.mz, mz)) {
                            log::trace!("{p1} as {adduct1} pairs with {p2} as {adduct2}");
                            return Some(AdductMatch {
                                adduct: adduct1,
                                peak: *p1,
                                partner_adduct: adduct2,
                                partner_peak: *p2,
                                neutral_mass: mass1,
                            });
                        } else if self.config.within_tolerance(ppm_increment(p2.mz, mz)) {
                            log::trace!("{p2} as {adduct2} pairs with {p1} as {adduct1}");
                            return Some(AdductMatch {
                                adduct: adduct2,
                                peak: *p2,
                                partner_adduct: adduct1,
                                partner_peak: *p1,
                                neutral_mass: mass2,
                            });
                        }
                    }
                }
            }
        }

        log::debug!(
            "No consistent {ionization} adduct pair among {} peaks for {mz:.4}",
            peaks.len()
        );
        None
    }

    /// Label of the adduct resolved by [`Self::find_match`].
    pub fn detect(
        &self,
        ionization: Option<Ionization>,
        grouped_signals: &BTreeSet<Peak>,
        mz: f64,
    ) -> Option<&'a str> {
        self.find_match(ionization, grouped_signals, mz)
            .map(|found| found.adduct)
    }
}
