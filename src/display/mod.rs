//! Terminal output styling for the CLI summary and palette preview

pub mod colours;

pub use colours::*;
