use clap::Subcommand;
use serde_json::json;

use crate::auth::Route;
use crate::cli::utils::{output_error, output_success, value_or_prompt};
use crate::cli::{Context, OutputFormat};
use crate::controllers::{LoginController, LoginOutcome, RegisterController, RegisterOutcome};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Sign in and remember the session")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Forget the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Register new admin user")]
    Register {
        #[arg(help = "Display name")]
        name: String,
        #[arg(help = "Username")]
        username: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },
}

pub async fn handle(cmd: AuthCommands, ctx: &mut Context) -> anyhow::Result<()> {
    let output = ctx.output;

    match cmd {
        AuthCommands::Login { username, password } => {
            let password = value_or_prompt(password, "Password: ")?;

            let mut login = LoginController::new(&ctx.api);
            login.form.username = username;
            login.form.password = password;

            let outcome = login.submit(&mut ctx.session).await;
            match outcome {
                LoginOutcome::Navigate(route) => {
                    let name = ctx
                        .session
                        .current_user()
                        .map(|u| u.display_name())
                        .unwrap_or_default();
                    ctx.refresh_client();
                    output_success(
                        &output,
                        &format!("Signed in as {}", name),
                        Some(json!({ "next": route.path() })),
                    )
                }
                LoginOutcome::Stay => {
                    let message = login.form_error.clone().unwrap_or_else(|| "Login failed".into());
                    let errors = (!login.errors.is_empty()).then_some(&login.errors);
                    output_error(&output, &message, errors)?;
                    anyhow::bail!("{}", message)
                }
            }
        }
        AuthCommands::Logout => {
            ctx.session.logout()?;
            ctx.refresh_client();
            output_success(&output, "Signed out", Some(json!({ "next": Route::Login.path() })))
        }
        AuthCommands::Status => status(ctx, &output),
        AuthCommands::Register { name, username, email, password } => {
            let password = value_or_prompt(password, "Password: ")?;

            let mut register = RegisterController::new(&ctx.api);
            register.form.name = name;
            register.form.username = username;
            register.form.email = email;
            register.form.password = password;

            let outcome = register.submit().await;
            match outcome {
                RegisterOutcome::Navigate(route) => {
                    let message = match &register.registered {
                        Some(user) => format!("Registered {} (id {})", user.username, user.id),
                        None => "Registered successfully".to_string(),
                    };
                    output_success(
                        &output,
                        &message,
                        Some(json!({ "next": route.path(), "user": register.registered })),
                    )
                }
                RegisterOutcome::Stay => {
                    let message = register
                        .form_error
                        .clone()
                        .unwrap_or_else(|| "Registration failed".into());
                    let errors = (!register.errors.is_empty()).then_some(&register.errors);
                    output_error(&output, &message, errors)?;
                    anyhow::bail!("{}", message)
                }
            }
        }
    }
}

fn status(ctx: &Context, output: &OutputFormat) -> anyhow::Result<()> {
    let user = ctx.session.current_user();

    match output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "authenticated": user.is_some(),
                    "user": user.map(|u| u.as_value()),
                    "signed_in_at": ctx.session.signed_in_at(),
                    "api": ctx.api.base_url(),
                }))?
            );
        }
        OutputFormat::Text => match user {
            Some(identity) => {
                println!("Signed in as {}", identity.display_name());
                if let Some(at) = ctx.session.signed_in_at() {
                    println!("Since: {}", at.to_rfc3339());
                }
                println!("API: {}", ctx.api.base_url());
            }
            None => println!("Not signed in"),
        },
    }
    Ok(())
}
