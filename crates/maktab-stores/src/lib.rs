//! # Maktab Stores
//!
//! View-state stores mediating between the API client and whatever renders
//! the data. Each store is an explicit service object, constructed at
//! application start with a shared [`maktab_client::ApiClient`] and torn
//! down with the process. None of them are ambient globals, so tests stay
//! hermetic.
//!
//! - [`session`]: the authentication state machine (login, logout, debounced
//!   session restore, profile updates)
//! - [`classes`], [`teachers`], [`registrations`]: one store per backend
//!   resource family, each holding the last-fetched collection, a loading
//!   flag, and an error slot
//!
//! Fetches are sequenced: every fetch carries a monotonically increasing
//! number and responses that are no longer the latest issued are discarded,
//! so a slow early response can never clobber a later filter change.

pub mod classes;
pub mod registrations;
pub mod session;
pub mod teachers;

pub use classes::{ClassStore, ClassesSnapshot};
pub use registrations::{RegistrationStats, RegistrationStore, RegistrationsSnapshot};
pub use session::{SessionPhase, SessionSnapshot, SessionStore};
pub use teachers::{TeacherStore, TeachersSnapshot};
