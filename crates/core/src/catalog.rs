//! Enumerated catalog values: actor categories, reply-time bands and voice
//! genders.
//!
//! Each enum serializes as its display label, so the wire format matches the
//! values stored in the backend tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Defines a closed set of label-backed values.
///
/// Generates the enum, `ALL`, `label()`, `Display` and a `FromStr` that
/// accepts the exact label.
macro_rules! define_catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($what:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// Every value, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Label as shown to users and stored in the backend.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label() == trimmed)
                    .ok_or_else(|| {
                        let allowed: Vec<&str> = $name::ALL.iter().map(|v| v.label()).collect();
                        CoreError::Validation(format!(
                            "Unknown {} '{trimmed}'. Must be one of: {}",
                            $what,
                            allowed.join(", ")
                        ))
                    })
            }
        }
    };
}

define_catalog_enum! {
    /// Kind of voice work an actor offers or a job requires.
    Category ("category") {
        Animation = "Animation",
        Commercials = "Commercials",
        Audiobooks = "Audiobooks",
        ELearning = "E-Learning",
        Podcasts = "Podcasts",
    }
}

define_catalog_enum! {
    /// How quickly an actor usually answers a message.
    ReplyTime ("reply time") {
        UnderOneHour = "<1 hour",
        OneToTwoHours = "1-2 hours",
        OneDay = "1 day",
        TwoDaysPlus = "2+ days",
    }
}

define_catalog_enum! {
    /// Voice gender requested by a job.
    VoiceGender ("voice gender") {
        Male = "Male",
        Female = "Female",
        Any = "Any",
    }
}
