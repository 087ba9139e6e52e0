//! Login, logout and status commands.

use std::time::Duration;

use dialoguer::{theme::ColorfulTheme, Input, Password};

use crate::auth::{validate_email, Credentials};
use crate::cli::{Cli, LoginArgs, OutputFormat};
use crate::error::{CatalogError, Result};
use crate::model::{DataSource, FlagKind};

use super::open_catalog;

/// Run the login command.
pub fn login(cli: &Cli, args: &LoginArgs) -> Result<()> {
    let catalog = open_catalog(cli)?;

    let email = match &args.email {
        Some(email) => email.clone(),
        None => prompt_email()?,
    };
    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompt_password()?,
    };

    let session = catalog
        .auth()
        .login(&Credentials::new(email, password))?;

    match cli.effective_output() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&session)?),
        _ => println!("Logged in as {}", session.email),
    }
    Ok(())
}

/// Run the logout command.
pub fn logout(cli: &Cli) -> Result<()> {
    let catalog = open_catalog(cli)?;
    catalog.auth().logout()?;
    if cli.effective_output() != OutputFormat::Json {
        println!("Logged out");
    }
    Ok(())
}

/// Run the status command.
pub fn status(cli: &Cli) -> Result<()> {
    let catalog = open_catalog(cli)?;
    let session = catalog.auth().current();
    let carts: Vec<(DataSource, usize)> = DataSource::ALL
        .into_iter()
        .map(|source| (source, catalog.cart_count(source)))
        .collect();

    match cli.effective_output() {
        OutputFormat::Json => {
            let cart: serde_json::Map<String, serde_json::Value> = carts
                .iter()
                .map(|(source, count)| (source.key().to_string(), (*count).into()))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "logged_in": session.is_some(),
                    "login_required": catalog.auth().is_required(),
                    "session": session,
                    "data_dir": catalog.data_dir(),
                    "flagged": catalog.flags().len(),
                    "cart": cart,
                }))?
            );
        }
        _ => {
            match &session {
                Some(session) => {
                    let age = session.age().to_std().unwrap_or(Duration::ZERO);
                    let age = Duration::from_secs(age.as_secs());
                    println!(
                        "Logged in as {} ({} ago)",
                        session.email,
                        humantime::format_duration(age)
                    );
                }
                None if catalog.auth().is_required() => println!("Not logged in"),
                None => println!("Not logged in (login not required)"),
            }
            println!("Data directory: {}", catalog.data_dir().display());
            println!("Flagged records: {}", catalog.flags().len());
            for (source, count) in carts {
                println!("Selected ({}): {count}", source.display_name());
            }
            let bookmarks = catalog.flagged(Some(FlagKind::Bookmark)).len();
            println!("Bookmarks: {bookmarks}");
        }
    }
    Ok(())
}

fn prompt_email() -> Result<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .validate_with(|input: &String| validate_email(input))
        .interact_text()
        .map_err(prompt_error)
}

fn prompt_password() -> Result<String> {
    Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()
        .map_err(prompt_error)
}

fn prompt_error(e: dialoguer::Error) -> CatalogError {
    CatalogError::io(
        "Failed to read from terminal",
        std::io::Error::other(e.to_string()),
    )
}
