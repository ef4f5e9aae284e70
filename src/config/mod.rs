pub mod settings;

pub use settings::{ChannelSettings, Settings, Variant};
