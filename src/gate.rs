//! Role-based control enablement.
//!
//! The role only decides which console controls are *offered*; the backend
//! re-checks authorization on every mutation. Disabling a control locally is
//! a courtesy, not a security boundary.

use anyhow::bail;

use maktab_models::admin::Admin;

/// Whether destructive controls (delete class/teacher, approve/reject
/// registrations, reassign classes) are enabled for this admin.
#[must_use]
pub fn destructive_controls_enabled(admin: &Admin) -> bool {
    admin.role.is_super_admin()
}

/// Refuses a destructive action for non-super admins, before any network
/// call is made.
pub fn require_super_admin(admin: &Admin) -> anyhow::Result<()> {
    if !destructive_controls_enabled(admin) {
        bail!(
            "this action requires the super_admin role (signed in as {} with role {:?})",
            admin.username,
            admin.role
        );
    }
    Ok(())
}
