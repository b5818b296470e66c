//! Admin account commands: create, reset-password.

use anyhow::Result;
use console::style;
use dialoguer::Password;

use clubsite_core::service::auth::SeedOutcome;

use crate::state::AppState;

/// Create an admin account. An existing username is left untouched.
///
/// # Examples
///
/// ```bash
/// # Secure prompt (recommended)
/// clubsite admin create ayse
///
/// # Script/automation mode
/// CLUBSITE_ADMIN_PASSWORD=... clubsite admin create ayse
/// ```
pub async fn create_admin(
    state: &AppState,
    username: &str,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let password = resolve_password(username, password)?;
    let outcome = state.auth.ensure_admin(username, &password).await?;

    let (created, admin) = match outcome {
        SeedOutcome::Created(admin) => (true, admin),
        SeedOutcome::AlreadyExists(admin) => (false, admin),
    };

    if json {
        println!(
            "{}",
            serde_json::json!({"created": created, "id": admin.id, "username": admin.username})
        );
    } else if created {
        println!(
            "  {} Admin '{}' created",
            style("✓").green().bold(),
            style(&admin.username).bold()
        );
    } else {
        println!(
            "  {} Admin '{}' already exists, password unchanged. Use {} to change it.",
            style("i").blue().bold(),
            style(&admin.username).bold(),
            style(format!("clubsite admin reset-password {}", admin.username)).yellow()
        );
    }
    Ok(())
}

/// Replace the password of an existing admin.
pub async fn reset_password(
    state: &AppState,
    username: &str,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let password = resolve_password(username, password)?;
    state.auth.reset_password(username, &password).await?;

    if json {
        println!("{}", serde_json::json!({"reset": true, "username": username}));
    } else {
        println!(
            "  {} Password for '{}' updated",
            style("✓").green().bold(),
            style(username).bold()
        );
    }
    Ok(())
}

fn resolve_password(username: &str, password: Option<String>) -> Result<String> {
    match password {
        Some(p) if !p.is_empty() => Ok(p),
        Some(_) => anyhow::bail!("password must not be empty"),
        None => Ok(Password::new()
            .with_prompt(format!("Password for {}", style(username).bold()))
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?),
    }
}
