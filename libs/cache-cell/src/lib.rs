// =====================================================================================
// CACHE CELL - CACHE PROVIDER PORT & ADAPTERS
// =====================================================================================

pub mod error;
pub mod provider;
pub mod services;

pub use error::*;
pub use provider::CacheProvider;
pub use services::*;
