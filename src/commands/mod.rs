pub mod setup;
pub mod taxrate;

pub use setup::SetupCommand;
pub use taxrate::TaxRateCommand;
