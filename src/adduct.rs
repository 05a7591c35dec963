use std::sync::LazyLock;

use indexmap::IndexMap;
use rustyms::Element;

use crate::{
    error::Error,
    ionization::Ionization,
    utils::{composition_mass, ELECTRON_MASS},
};

/// Describes how an ion of `multimer` neutral molecules relates to the neutral
/// monoisotopic mass:
///
/// `mz = (multimer * M + mass_shift) / |charge|`
///
/// `mass_shift` is the total mass added to the multimer, charge carriers and electrons included.
/// A rule with an unknown shift, a zero charge or a zero multimer has no defined conversion.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdductRule {
    multimer: u32,
    charge: i32,
    mass_shift: Option<f64>,
}

impl AdductRule {
    /// Creates a rule from an explicit mass shift.
    ///
    /// Arguments:
    /// * `multimer` - Number of neutral molecules in the ion
    /// * `charge` - Signed charge of the ion
    /// * `mass_shift` - Mass added to the multimer (Da)
    ///
    pub fn new(multimer: u32, charge: i32, mass_shift: f64) -> Self {
        Self {
            multimer,
            charge,
            mass_shift: Some(mass_shift),
        }
    }

    /// Creates a rule from the elements gained (positive counts) and lost (negative counts)
    /// by the multimer. One electron mass is removed per positive charge and added per negative charge.
    ///
    /// Arguments:
    /// * `multimer` - Number of neutral molecules in the ion
    /// * `charge` - Signed charge of the ion
    /// * `composition` - Elemental difference between the ion and the multimer
    ///
    pub fn from_composition(multimer: u32, charge: i32, composition: &[(Element, i32)]) -> Self {
        Self {
            multimer,
            charge,
            mass_shift: composition_mass(composition)
                .map(|mass| mass - charge as f64 * ELECTRON_MASS),
        }
    }

    pub fn multimer(&self) -> u32 {
        self.multimer
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn mass_shift(&self) -> Option<f64> {
        self.mass_shift
    }

    /// Neutral monoisotopic mass implied by observing this adduct at `mz`.
    pub fn neutral_mass(&self, mz: f64) -> Option<f64> {
        if self.multimer == 0 || self.charge == 0 {
            return None;
        }
        let shift = self.mass_shift?;
        Some((mz * self.charge.unsigned_abs() as f64 - shift) / self.multimer as f64)
    }

    /// m/z at which a molecule of `neutral_mass` is observed as this adduct. Inverse of [`Self::neutral_mass`].
    pub fn mz(&self, neutral_mass: f64) -> Option<f64> {
        if self.multimer == 0 || self.charge == 0 {
            return None;
        }
        let shift = self.mass_shift?;
        Some((neutral_mass * self.multimer as f64 + shift) / self.charge.unsigned_abs() as f64)
    }
}

/// Adduct hypotheses of one polarity, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdductTable {
    adducts: IndexMap<String, AdductRule>,
}

impl AdductTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hypothesis to the end of the table.
    ///
    /// Arguments:
    /// * `label` - Adduct label, e.g. `[M+H]+`
    /// * `rule` - Conversion rule for the label
    ///
    pub fn insert(&mut self, label: impl Into<String>, rule: AdductRule) -> Result<(), Error> {
        let label = label.into();
        if self.adducts.contains_key(&label) {
            return Err(Error::DuplicateAdduct(label));
        }
        self.adducts.insert(label, rule);
        Ok(())
    }

    /// Builder style [`Self::insert`].
    pub fn with(mut self, label: impl Into<String>, rule: AdductRule) -> Result<Self, Error> {
        self.insert(label, rule)?;
        Ok(self)
    }

    pub fn get(&self, label: &str) -> Option<&AdductRule> {
        self.adducts.get(label)
    }

    pub fn len(&self) -> usize {
        self.adducts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adducts.is_empty()
    }

    /// Labels and rules in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AdductRule)> {
        self.adducts.iter().map(|(label, rule)| (label.as_str(), rule))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.adducts.keys().map(String::as_str)
    }

    /// Neutral monoisotopic mass for `mz` observed as `adduct`.
    /// `None` if the adduct is not part of the table or its conversion is undefined.
    ///
    /// # Arguments
    /// * `mz` - Observed m/z
    /// * `adduct` - Adduct label
    ///
    pub fn monoisotopic_mass_from_mz(&self, mz: f64, adduct: &str) -> Option<f64> {
        self.get(adduct)?.neutral_mass(mz)
    }

    /// m/z of `monoisotopic_mass` observed as `adduct`.
    /// `None` if the adduct is not part of the table or its conversion is undefined.
    ///
    /// # Arguments
    /// * `monoisotopic_mass` - Neutral monoisotopic mass
    /// * `adduct` - Adduct label
    ///
    pub fn mz_from_monoisotopic_mass(&self, monoisotopic_mass: f64, adduct: &str) -> Option<f64> {
        self.get(adduct)?.mz(monoisotopic_mass)
    }
}

/// Label, multimer, absolute charge and elemental difference of a built-in adduct.
type BuiltinAdduct = (&'static str, u32, i32, &'static [(Element, i32)]);

const POSITIVE_ADDUCTS: &[BuiltinAdduct] = &[
    ("[M+H]+", 1, 1, &[(Element::H, 1)]),
    ("[M+2H]2+", 1, 2, &[(Element::H, 2)]),
    ("[M+Na]+", 1, 1, &[(Element::Na, 1)]),
    ("[M+K]+", 1, 1, &[(Element::K, 1)]),
    ("[M+NH4]+", 1, 1, &[(Element::N, 1), (Element::H, 4)]),
    ("[M+H-H2O]+", 1, 1, &[(Element::H, -1), (Element::O, -1)]),
    ("[M+H+Na]2+", 1, 2, &[(Element::H, 1), (Element::Na, 1)]),
    ("[M+2Na]2+", 1, 2, &[(Element::Na, 2)]),
    ("[2M+H]+", 2, 1, &[(Element::H, 1)]),
    ("[2M+Na]+", 2, 1, &[(Element::Na, 1)]),
    ("[M+3H]3+", 1, 3, &[(Element::H, 3)]),
];

// [2M-H]- has to come before [M-2H]2-, both explain a peak at twice the m/z of [M-H]-
const NEGATIVE_ADDUCTS: &[BuiltinAdduct] = &[
    ("[M-H]-", 1, 1, &[(Element::H, -1)]),
    ("[M-H-H2O]-", 1, 1, &[(Element::H, -3), (Element::O, -1)]),
    ("[M+Cl]-", 1, 1, &[(Element::Cl, 1)]),
    (
        "[M+HCOOH-H]-",
        1,
        1,
        &[(Element::C, 1), (Element::H, 1), (Element::O, 2)],
    ),
    (
        "[M+CH3COOH-H]-",
        1,
        1,
        &[(Element::C, 2), (Element::H, 3), (Element::O, 2)],
    ),
    ("[2M-H]-", 2, 1, &[(Element::H, -1)]),
    ("[M-2H]2-", 1, 2, &[(Element::H, -2)]),
    ("[3M-H]-", 3, 1, &[(Element::H, -1)]),
];

fn builtin_table(ionization: Ionization, adducts: &[BuiltinAdduct]) -> AdductTable {
    let adducts = adducts
        .iter()
        .map(|(label, multimer, charge, composition)| {
            let rule =
                AdductRule::from_composition(*multimer, ionization.sign() * charge, composition);
            if rule.mass_shift().is_none() {
                log::warn!("No mass shift for {ionization} adduct {label}, it will never match");
            }
            (label.to_string(), rule)
        })
        .collect();
    AdductTable { adducts }
}

static BUILTIN_TABLES: LazyLock<AdductTables> = LazyLock::new(|| AdductTables {
    positive: builtin_table(Ionization::Positive, POSITIVE_ADDUCTS),
    negative: builtin_table(Ionization::Negative, NEGATIVE_ADDUCTS),
});

/// One adduct table per polarity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdductTables {
    positive: AdductTable,
    negative: AdductTable,
}

impl AdductTables {
    pub fn new(positive: AdductTable, negative: AdductTable) -> Self {
        Self { positive, negative }
    }

    /// Common lipid adducts for both polarities.
    pub fn builtin() -> &'static Self {
        LazyLock::force(&BUILTIN_TABLES)
    }

    pub fn positive(&self) -> &AdductTable {
        &self.positive
    }

    pub fn negative(&self) -> &AdductTable {
        &self.negative
    }

    pub fn for_ionization(&self, ionization: Ionization) -> &AdductTable {
        match ionization {
            Ionization::Positive => &self.positive,
            Ionization::Negative => &self.negative,
        }
    }
}
