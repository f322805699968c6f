//! Session commands: login, logout, whoami.

use std::io::Write;

use clap::Args;

use pomade_client::session::SessionState;
use pomade_client::token::Credential;
use pomade_core::Email;

use super::CommandResult;
use crate::App;

#[derive(Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Account password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

pub async fn login(app: &App, args: LoginArgs) -> CommandResult {
    let email: Email = args.email.parse()?;
    let password = match args.password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let response = app.auth.login(&email, &password).await?;
    // The role shown below comes from the identity endpoint, not from the
    // login response.
    let state = app.session.login(Credential::new(response.token)).await;

    match state {
        SessionState::Authenticated(user) => {
            println!("signed in as {} ({})", user.name, user.role);
            Ok(())
        }
        _ => Err("login succeeded but the session could not be established".into()),
    }
}

pub fn logout(app: &App) -> CommandResult {
    app.session.logout();
    println!("signed out");
    Ok(())
}

pub async fn whoami(app: &App) -> CommandResult {
    match app.session.initialize().await {
        SessionState::Authenticated(user) => {
            println!("{} <{}> role={}", user.name, user.email, user.role);
        }
        SessionState::Anonymous => println!("not signed in"),
        SessionState::Loading => println!("session still loading"),
    }
    Ok(())
}

fn prompt_password() -> Result<String, std::io::Error> {
    print!("password: ");
    std::io::stdout().flush()?;
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}
