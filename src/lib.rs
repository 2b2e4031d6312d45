//! # Maktab Admin Console
//!
//! The application shell around the Maktab client libraries: an admin
//! console for a Quran-school management backend. The heavy lifting lives in
//! the workspace crates; this package wires them together and drives them
//! from the command line:
//!
//! ```text
//! crates/
//! ├── maktab-core/      # errors, envelope, pagination, retry, routes
//! ├── maktab-config/    # environment-driven configuration
//! ├── maktab-models/    # domain models and DTOs
//! ├── maktab-client/    # token store + authenticated API client
//! └── maktab-stores/    # session store + domain view stores
//! src/
//! ├── context.rs        # service construction and wiring
//! ├── navigator.rs      # current location + redirect-on-session-loss
//! ├── gate.rs           # role-based control enablement
//! └── commands/         # clap subcommands per resource
//! ```
//!
//! The shell owns the two responsibilities the client crates deliberately
//! refuse: deciding where to navigate when the session is lost, and deciding
//! which destructive controls a given admin role may use.

pub mod commands;
pub mod context;
pub mod gate;
pub mod navigator;

pub use context::AppContext;
pub use navigator::Navigator;
