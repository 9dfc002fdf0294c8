//! Identifier newtypes and the ledger-owned id allocator.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Location identifier, e.g. "hub-0" or "city-Berlin-3".
    LocationId
);
string_id!(
    /// Identifier of an owned truck.
    TruckId
);
string_id!(
    /// Identifier of an owned trailer.
    TrailerId
);
string_id!(
    /// Identifier of a driver or recruit.
    DriverId
);
string_id!(
    /// Identifier of a cargo job.
    JobId
);

/// Monotonic serial used to mint unique ids for every entity the game creates.
///
/// Lives inside the ledger so ids stay unique across save/load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    fn issue(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("{prefix}-{}", self.next)
    }

    pub fn truck(&mut self) -> TruckId {
        TruckId(self.issue("truck"))
    }

    pub fn trailer(&mut self) -> TrailerId {
        TrailerId(self.issue("trailer"))
    }

    pub fn driver(&mut self) -> DriverId {
        DriverId(self.issue("driver"))
    }

    pub fn recruit(&mut self) -> DriverId {
        DriverId(self.issue("recruit"))
    }

    /// Job ids carry the day they were posted for readability in logs.
    pub fn job(&mut self, day: u32) -> JobId {
        JobId(self.issue(&format!("job-{day}")))
    }

    pub fn event(&mut self) -> String {
        self.issue("evt")
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}
