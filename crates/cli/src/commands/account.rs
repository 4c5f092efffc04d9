//! Sign-in and account commands.

use secrecy::SecretString;
use shopfront_client::models::{LoginRequest, RegisterRequest, User};

use super::{CliError, Context};

fn describe(user: &User) -> String {
    format!("{} <{}> ({})", user.name, user.email, user.role)
}

pub async fn login(ctx: &Context, email: String, password: String) -> Result<(), CliError> {
    let user = ctx
        .client
        .login(&LoginRequest {
            email,
            password: SecretString::from(password),
        })
        .await?;
    tracing::info!("Signed in as {}", describe(&user));
    Ok(())
}

pub async fn register(
    ctx: &Context,
    name: String,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<(), CliError> {
    let user = ctx
        .client
        .register(&RegisterRequest {
            name,
            email,
            password: SecretString::from(password),
            confirm_password: SecretString::from(confirm_password),
        })
        .await?;
    tracing::info!("Account created. Signed in as {}", describe(&user));
    Ok(())
}

pub async fn logout(ctx: &Context) {
    ctx.client.logout().await;
    tracing::info!("Signed out");
}

pub async fn whoami(ctx: &Context) -> Result<(), CliError> {
    if !ctx.client.is_authenticated().await {
        tracing::info!("Not signed in");
        return Ok(());
    }
    let user = ctx.client.me().await?;
    tracing::info!("{}", describe(&user));
    Ok(())
}
