//! License openness lookups.
//!
//! - [`LicenseOracle`] — the capability the scorer consults: is an id known, and is it open.
//! - [`register`] — [`LicenseRegister`](register::LicenseRegister), a CKAN-style license list
//!   loaded from JSON or taken from the built-in defaults in [`builtin`].

pub mod builtin;
pub mod register;

pub use register::LicenseRegister;

/// Answers "is this license open" for the scorer.
///
/// Lookups use the identifier exactly as given. An unknown id and a known but
/// closed id are treated the same by the scorer.
pub trait LicenseOracle: Send + Sync {
    fn is_known(&self, license_id: &str) -> bool;

    /// Only meaningful when [`is_known`](LicenseOracle::is_known) is true.
    fn is_open(&self, license_id: &str) -> bool;

    fn is_known_open(&self, license_id: &str) -> bool {
        self.is_known(license_id) && self.is_open(license_id)
    }
}
