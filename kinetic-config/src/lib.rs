#[macro_use]
extern crate tracing;

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use miette::{Context as _, IntoDiagnostic as _};

#[macro_use]
mod macros;

pub mod debug;
pub mod gestures;
pub mod physics;
pub mod snap;
pub mod utils;

pub use crate::debug::Debug;
pub use crate::gestures::Gestures;
pub use crate::physics::Physics;
pub use crate::snap::Snap;
pub use crate::utils::Number;
use crate::utils::MergeWith;

/// Contents of the default config file, with every setting at its built-in value.
pub const DEFAULT_CONFIG: &str = include_str!("../../resources/default-config.kdl");

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Config {
    pub physics: Physics,
    pub snap: Snap,
    pub gestures: Gestures,
    pub debug: Debug,
}

#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq)]
pub struct ConfigPart {
    #[knuffel(child)]
    pub physics: Option<physics::PhysicsPart>,
    #[knuffel(child)]
    pub snap: Option<snap::SnapPart>,
    #[knuffel(child)]
    pub gestures: Option<gestures::GesturesPart>,
    #[knuffel(child)]
    pub debug: Option<debug::DebugPart>,
}

impl MergeWith<ConfigPart> for Config {
    fn merge_with(&mut self, part: &ConfigPart) {
        merge!((self, part), physics, snap, gestures, debug);
    }
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let config = Self::parse(
            path.file_name()
                .and_then(OsStr::to_str)
                .unwrap_or("config.kdl"),
            &contents,
        )
        .context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracy_client::span!("Config::parse");
        let part: ConfigPart = knuffel::parse(filename, text)?;
        Ok(Self::from_part(&part))
    }
}
