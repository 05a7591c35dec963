pub mod adduct;
pub mod annotation;
pub mod configuration;
/// First-match adduct inference over co-eluting peaks
pub mod detection;
pub mod error;
pub mod ionization;
pub mod lipid;
pub mod peak;
// Various utilities
pub mod utils;
