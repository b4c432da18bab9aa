//! Login, registration and the stored session.

use anyhow::Result;
use dialoguer::{Input, Password};
use storefront_sdk::storefront_auth::{LoginCredentials, Registration};

use super::{read_image, user_error, LoginArgs, RegisterArgs};
use crate::context::Context;

/// Log in and store the session.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let email = match args.email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("Email").interact_text()?,
    };
    let password = match args.password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let shop = ctx.storefront()?;
    let credentials = LoginCredentials::new(email, password);

    let spinner = ctx.output.spinner("Signing in...");
    let result = shop.auth.login(&credentials).await;
    spinner.finish_and_clear();
    let user = result.map_err(|e| user_error(e, "Login failed"))?;

    if user.token.is_none() {
        ctx.output.warn("Server did not return a token; session not saved");
        return Ok(());
    }

    ctx.output.success(&format!("Logged in as {}", user.display_name()));
    if user.is_admin() {
        ctx.output.info("Admin commands are available: storefront admin --help");
    }
    Ok(())
}

/// Create an account and store the session.
pub async fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    let mut registration = Registration::new(args.name, args.email, password);
    if let Some(path) = &args.avatar {
        registration = registration.with_profile_image(read_image(ctx, path)?);
    }

    let shop = ctx.storefront()?;
    let spinner = ctx.output.spinner("Creating account...");
    let result = shop.auth.register(&registration).await;
    spinner.finish_and_clear();
    let user = result.map_err(|e| user_error(e, "Registration failed"))?;

    ctx.output.success(&format!("Welcome, {}", user.display_name()));
    Ok(())
}

/// Drop the stored session and the local cart.
pub async fn logout(ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    shop.auth.logout()?;
    shop.cart_mirror().clear_cart()?;
    ctx.output.success("Logged out");
    Ok(())
}

/// Show the stored session.
pub async fn whoami(ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let Some(user) = shop.auth.current_user()? else {
        ctx.output.info("Not logged in");
        return Ok(());
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "role": user.role.as_str(),
        }));
        return Ok(());
    }

    ctx.output.kv("name", user.display_name());
    ctx.output.kv("email", &user.email);
    ctx.output.kv("role", user.role.as_str());
    if let Some(id) = &user.id {
        ctx.output.kv("id", id.as_str());
    }
    Ok(())
}
