//! Command implementations.

pub mod audit;
pub mod candidates;
pub mod import;
pub mod qualify;
pub mod stats;
pub mod validate;

pub use self::audit::execute_audit;
pub use self::candidates::execute_candidates;
pub use self::import::execute_import;
pub use self::qualify::execute_qualify;
pub use self::stats::execute_stats;
pub use self::validate::execute_validate;
