//! Run configuration, validated once at startup.

pub mod settings;

pub use settings::Config;
