pub mod config;
pub mod error;
pub mod logging;
pub mod units;
pub mod validate;

// Re-export primary types for convenient access.
pub use config::{CrowdfundConfig, DappConfig, VestingConfig, validate_url};
pub use error::{ErrorStage, IntentError};
pub use units::{MAX_DECIMALS, from_base_units, to_base_units};
pub use validate::{
    Address, validate_address, validate_campaign_id, validate_duration_secs,
    validate_positive_amount, validate_required,
};
