//! Closed status enums for every lifecycle-bearing entity.
//!
//! Each enum is stored as `TEXT` in the database and serialized as the same
//! snake_case string on the wire. Anything outside the listed values is
//! rejected, both when decoding a row and when deserializing a request body.

use crate::error::CoreError;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $val)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire and database representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $val ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $( $val => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        stringify!($name),
                        [$($val),+].join(", ")
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        Available = "available",
        Requested = "requested",
        Construction = "construction",
    }
}

define_status_enum! {
    /// Construction stage progress.
    StageStatus {
        Pending = "pending",
        InProgress = "in_progress",
        Completed = "completed",
    }
}

define_status_enum! {
    /// Review status of a document submitted during construction.
    DocumentStatus {
        Pending = "pending",
        UnderReview = "under_review",
        Approved = "approved",
        Rejected = "rejected",
    }
}

define_status_enum! {
    /// Signing status of a completion (final) document.
    FinalDocumentStatus {
        Pending = "pending",
        Signed = "signed",
        Rejected = "rejected",
    }
}
