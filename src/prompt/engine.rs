use crate::error::{Result, StencilError};
use crate::render::normalize_namespace;

/// Reject a candidate service name, with the message shown inline in the
/// prompt. Runs the same normalization generation will, so a name that
/// prompts cleanly cannot fail later.
fn name_problem(input: &str) -> Option<String> {
    let has_alphanumeric = regex_lite::Regex::new(r"[A-Za-z0-9]")
        .ok()
        .is_some_and(|re| re.is_match(input));
    if !has_alphanumeric {
        return Some("name needs at least one letter or digit".to_string());
    }
    normalize_namespace(input).err().map(|e| e.to_string())
}

/// Ask for the service name interactively.
pub fn prompt_service_name() -> Result<String> {
    let answer = inquire::Text::new("Service name:")
        .with_help_message("e.g. payment-service")
        .with_validator(|input: &str| match name_problem(input) {
            None => Ok(inquire::validator::Validation::Valid),
            Some(msg) => Ok(inquire::validator::Validation::Invalid(
                inquire::validator::ErrorMessage::Custom(msg),
            )),
        })
        .prompt()
        .map_err(|_| StencilError::PromptCancelled)?;

    Ok(answer.trim().to_string())
}
