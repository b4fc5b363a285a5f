pub mod context;
pub mod random;
pub mod report;
pub mod reset;
