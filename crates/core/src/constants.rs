//! Constants used throughout the intake core crate.

/// Version of the built-in alias set. Bump whenever an alias is added, removed or retargeted.
pub const ALIAS_TABLE_VERSION: u32 = 1;

/// Default address for the REST server when `INTAKE_REST_ADDR` is not set.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default upper bound on raw entries accepted per extraction document over HTTP.
pub const DEFAULT_MAX_ENTRIES: usize = 256;

/// Member of the recognition service's response that carries the labelled pairs.
pub const EXTRACTED_MEMBER: &str = "extracted";
