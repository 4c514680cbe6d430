use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// 100ns intervals between 1601-01-01 and 1970-01-01.
const UNIX_EPOCH_AS_FILETIME: u64 = 116_444_736_000_000_000;

/// The build generation marker written into every document of a run.
///
/// Holds a Windows FILETIME: the number of 100ns intervals since 1601-01-01 UTC. It is
/// captured once by the caller and shared by every file converted in that run, so clients
/// can tell which resources came out of the same build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BuildStamp(u64);

impl BuildStamp {
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    pub fn from_system_time(time: SystemTime) -> Self {
        let ticks = match time.duration_since(UNIX_EPOCH) {
            Ok(since) => UNIX_EPOCH_AS_FILETIME.saturating_add(to_ticks(since.as_nanos())),
            Err(e) => UNIX_EPOCH_AS_FILETIME.saturating_sub(to_ticks(e.duration().as_nanos())),
        };

        Self(ticks)
    }

    pub const fn from_filetime(ticks: u64) -> Self {
        Self(ticks)
    }

    pub fn filetime(&self) -> u64 {
        self.0
    }
}

fn to_ticks(nanos: u128) -> u64 {
    u64::try_from(nanos / 100).unwrap_or(u64::MAX)
}
