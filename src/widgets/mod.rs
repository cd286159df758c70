pub mod base;
pub mod filters;
pub mod inputs;
pub mod traits;
