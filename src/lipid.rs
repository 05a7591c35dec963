use std::fmt;

/// Lipid class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LipidType {
    PC,
    PE,
    PI,
    PG,
    PS,
    PA,
    LPC,
    LPE,
    SM,
    CER,
    TG,
    DG,
    MG,
    CE,
    FA,
}

impl fmt::Display for LipidType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Reference identity of a lipid. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lipid {
    id: u32,
    name: String,
    formula: String,
    lipid_type: LipidType,
    carbon_count: u32,
    double_bonds: u32,
}

impl Lipid {
    /// Arguments:
    /// * `id` - Database identifier
    /// * `name` - Shorthand name, e.g. `PC 34:1`
    /// * `formula` - Molecular formula, e.g. `C42H82NO8P`
    /// * `lipid_type` - Lipid class
    /// * `carbon_count` - Total number of carbons in the acyl chains
    /// * `double_bonds` - Total number of double bonds in the acyl chains
    ///
    pub fn new(
        id: u32,
        name: impl Into<String>,
        formula: impl Into<String>,
        lipid_type: LipidType,
        carbon_count: u32,
        double_bonds: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            formula: formula.into(),
            lipid_type,
            carbon_count,
            double_bonds,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn lipid_type(&self) -> LipidType {
        self.lipid_type
    }

    pub fn carbon_count(&self) -> u32 {
        self.carbon_count
    }

    pub fn double_bonds(&self) -> u32 {
        self.double_bonds
    }
}

impl fmt::Display for Lipid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
