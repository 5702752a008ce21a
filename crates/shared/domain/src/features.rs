use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEMO: &str = "demo";
pub const OFFLINE: &str = "offline";
pub const HEALTH_CHECK: &str = "health_check";

bitflags! {
    /// Dashboard feature toggles as a set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    pub struct FeatureSet: u8 {
        const DEMO = 1 << 0;
        const OFFLINE = 1 << 1;
        const HEALTH_CHECK = 1 << 2;

        const ALL = Self::DEMO.bits() | Self::OFFLINE.bits() | Self::HEALTH_CHECK.bits();
    }
}

impl FeatureSet {
    /// Lowercase names of the enabled toggles, in declaration order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        [(Self::DEMO, DEMO), (Self::OFFLINE, OFFLINE), (Self::HEALTH_CHECK, HEALTH_CHECK)]
            .into_iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
            .collect()
    }
}

impl From<&str> for FeatureSet {
    fn from(s: &str) -> Self {
        match s {
            DEMO => Self::DEMO,
            OFFLINE => Self::OFFLINE,
            HEALTH_CHECK => Self::HEALTH_CHECK,
            "all" | "*" => Self::ALL,
            _ => Self::empty(),
        }
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.names();
        if names.is_empty() { f.write_str("none") } else { f.write_str(&names.join(", ")) }
    }
}
