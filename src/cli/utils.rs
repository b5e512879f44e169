use serde::Serialize;
use serde_json::{json, Value};
use std::io::{self, BufRead, Read, Write};

use crate::auth::{self, Guarded, Route};
use crate::cli::OutputFormat;
use crate::controllers::{Confirm, DeleteOutcome, FormState, SubmitOutcome};
use crate::models::Identity;
use crate::session::Session;
use crate::validation::FieldErrors;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    field_errors: Option<&FieldErrors>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(errors) = field_errors {
                response["field_errors"] = serde_json::to_value(errors)?;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
            for (field, msg) in field_errors.into_iter().flat_map(|e| e.iter()) {
                eprintln!("  {}: {}", field, msg);
            }
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: []
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

pub fn output_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run the authorization gate for a protected route
pub fn require_session(session: &Session, route: Route) -> anyhow::Result<Identity> {
    match auth::guard(session, Identity::clone) {
        Guarded::Render(identity) => Ok(identity),
        Guarded::Redirect(to) => Err(anyhow::anyhow!(
            "{} requires an active session; sign in first ({}: `blooms auth login <username>`)",
            route,
            to
        )),
    }
}

/// Turn a controller submit into CLI output; validation and server failures become errors
pub fn finish_submit<F>(
    output_format: &OutputFormat,
    entity: &str,
    outcome: SubmitOutcome,
    state: &FormState<F>,
) -> anyhow::Result<()> {
    match outcome {
        SubmitOutcome::Saved(operation) => output_success(
            output_format,
            &format!("{} saved", entity),
            Some(json!({ "operation": operation })),
        ),
        SubmitOutcome::Invalid => {
            output_error(output_format, "Validation failed", Some(&state.errors))?;
            anyhow::bail!("{} was not saved", entity)
        }
        SubmitOutcome::Failed | SubmitOutcome::Unauthenticated => {
            let message = state.form_error.as_deref().unwrap_or("Request failed");
            output_error(output_format, message, None)?;
            anyhow::bail!("{} was not saved", entity)
        }
    }
}

pub fn finish_delete(
    output_format: &OutputFormat,
    entity: &str,
    outcome: DeleteOutcome,
    list_error: Option<&str>,
) -> anyhow::Result<()> {
    match outcome {
        DeleteOutcome::Deleted => output_success(output_format, &format!("{} deleted", entity), None),
        DeleteOutcome::Cancelled => output_success(output_format, "Delete cancelled", None),
        DeleteOutcome::Failed => {
            let message = list_error.unwrap_or("Delete failed");
            output_error(output_format, message, None)?;
            anyhow::bail!("{} was not deleted", entity)
        }
    }
}

/// Surface a list-load banner as a command failure
pub fn ensure_loaded(output_format: &OutputFormat, loaded: bool, list_error: Option<&str>) -> anyhow::Result<()> {
    if loaded {
        return Ok(());
    }
    let message = list_error.unwrap_or("Failed to load data");
    output_error(output_format, message, None)?;
    anyhow::bail!("{}", message)
}

/// `[y/N]` prompt on the terminal
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        match prompt_line(&format!("{} [y/N] ", prompt)) {
            Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

pub fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    eprint!("{}", prompt);
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Use the provided value, or prompt for it when absent
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt_line(prompt),
    }
}

/// `-` means read the whole of stdin
pub fn read_text_arg(value: String) -> anyhow::Result<String> {
    if value == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(value)
    }
}
