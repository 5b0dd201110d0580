pub mod twelve_data;

pub use twelve_data::TwelveDataClient;
