pub use openings_core::*;
