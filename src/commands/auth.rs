//! Sign-in, sign-out, and profile commands.

use dialoguer::{Input, Password};

use maktab_core::routes::{self, RouteAction};
use maktab_models::admin::UpdateProfileRequest;

use crate::commands::require_admin;
use crate::context::AppContext;

pub async fn login(
    ctx: &AppContext,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let action = ctx
        .navigator
        .enter(routes::LOGIN_PATH, ctx.api.token().is_some());
    if action == RouteAction::RedirectToAdmin {
        // A persisted token bounced us past the login page; confirm it still
        // works before telling the operator they are signed in.
        ctx.session.check_auth().await;
        if let Some(admin) = ctx.session.admin() {
            println!("Already signed in as {} ({})", admin.username, admin.email);
            return Ok(());
        }
        // The token was stale; the failed check cleared it. Sign in afresh.
        ctx.navigator.navigate(routes::LOGIN_PATH);
    }

    let email = match email {
        Some(value) => value,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(value) => value,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let admin = ctx.session.login(&email, &password).await?;
    ctx.navigator.navigate(routes::ADMIN_SECTION);
    println!("✅ Signed in as {} ({:?})", admin.username, admin.role);
    Ok(())
}

pub fn logout(ctx: &AppContext) -> anyhow::Result<()> {
    ctx.session.logout();
    ctx.navigator.navigate("/");
    println!("Signed out");
    Ok(())
}

pub async fn profile(ctx: &AppContext) -> anyhow::Result<()> {
    let admin = require_admin(ctx).await?;
    println!("Username: {}", admin.username);
    println!("Email:    {}", admin.email);
    println!("Role:     {:?}", admin.role);
    println!("Active:   {}", admin.is_active);
    Ok(())
}

pub async fn update_profile(
    ctx: &AppContext,
    username: Option<String>,
    email: Option<String>,
) -> anyhow::Result<()> {
    require_admin(ctx).await?;
    if username.is_none() && email.is_none() {
        anyhow::bail!("nothing to update; pass --username and/or --email");
    }

    let request = UpdateProfileRequest { username, email };
    let admin = ctx.session.update_profile(&request).await?;
    println!("✅ Profile updated: {} <{}>", admin.username, admin.email);
    Ok(())
}
