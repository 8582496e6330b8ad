//! The `studyquiz signup`, `login`, and `logout` commands.

use std::path::Path;

use anyhow::Result;

use studyquiz_core::pages::{DashboardPage, LoginPage, SignupPage};

use super::{command_for, connect, page_failure};

pub async fn signup(
    config: Option<&Path>,
    email: String,
    password: String,
    full_name: Option<String>,
) -> Result<()> {
    let api = connect(config)?;
    let mut page = SignupPage::new(email, password, full_name);

    let Some(route) = page.submit(&api).await else {
        return Err(page_failure(page.error(), "Signup failed"));
    };

    println!("Account created for {}.", page.email.trim());
    println!("Next: {}", command_for(&route));
    Ok(())
}

pub async fn login(config: Option<&Path>, email: String, password: String) -> Result<()> {
    let api = connect(config)?;
    let mut page = LoginPage::new(email, password);

    let Some(route) = page.submit(&api).await else {
        return Err(page_failure(page.error(), "Login failed"));
    };

    println!("Logged in as {}.", page.email.trim());
    println!("Next: {}", command_for(&route));
    Ok(())
}

pub fn logout(config: Option<&Path>) -> Result<()> {
    let api = connect(config)?;
    let route = DashboardPage::new().logout(&api)?;

    println!("Logged out.");
    println!("Next: {}", command_for(&route));
    Ok(())
}
