mod health;
mod signals;

pub use health::health_router;
pub use signals::signals_router;
