pub mod air_quality;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod geoip;
pub mod normalize;

mod http;

pub use error::FetchError;
pub use http::DEFAULT_TIMEOUT;
