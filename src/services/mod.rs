// Service exports
pub mod error;
pub mod google;
pub mod http;
pub mod popular_times;

pub use error::ProviderError;
pub use google::GoogleMapsClient;
pub use popular_times::PopularTimesClient;
