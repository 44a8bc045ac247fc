#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod host;
pub mod levels;
pub mod notice;
pub mod ticker;
pub mod view;

pub use play_core::Clock;

pub use catalog::{ContentSource, InMemoryCatalog, JsonCatalog};
pub use config::PlayConfig;
pub use error::{ConfigError, ContentSourceError, ServiceError};
pub use host::{SessionHost, SessionObserver, TracingObserver};
pub use levels::LevelTrack;
pub use notice::{Announce, Notice, Tone};
pub use ticker::Ticker;
