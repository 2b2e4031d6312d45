//! Strongly-typed ID newtypes for domain entities.
//!
//! The backend issues opaque string identifiers. These newtype wrappers keep
//! them from being mixed up (e.g., passing a `ClassId` where a `StudentId` is
//! expected) without imposing any structure the backend never promised.
//!
//! # Example
//!
//! ```ignore
//! use maktab_models::ids::{ClassId, StudentId};
//!
//! fn assign(student: &StudentId, class: Option<&ClassId>) { /* ... */ }
//!
//! let student = StudentId::from("64a1f0");
//! let class = ClassId::from("9c2b11");
//!
//! assign(&student, Some(&class));
//! // assign(&class, None); // Compile error! Type mismatch.
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Macro to define a strongly-typed ID newtype over the backend's opaque
/// string identifiers.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Borrow the raw identifier.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Take the raw identifier.
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a registered student.
    StudentId
);

define_id!(
    /// Identifier of a parent record.
    ParentId
);

define_id!(
    /// Identifier of a class.
    ClassId
);

define_id!(
    /// Identifier of a teacher.
    TeacherId
);

define_id!(
    /// Identifier of an administrator account.
    AdminId
);
