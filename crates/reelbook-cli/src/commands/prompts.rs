use color_eyre::Result;
use dialoguer::{Confirm, Input, Select};
use movie_sync_models::Genre;

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default.filter(|d| !d.is_empty()) {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Pick one entry from a list; returns its index
pub fn prompt_select<T: ToString>(prompt: &str, items: &[T], default: usize) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}

/// Pick a genre; the current value is preselected when it names one
pub fn prompt_genre(current: &str) -> Result<String> {
    let names: Vec<&str> = Genre::ALL.iter().map(|g| g.as_str()).collect();
    let default = names.iter().position(|n| *n == current).unwrap_or(0);
    let index = prompt_select("Genre", &names, default)?;
    Ok(names[index].to_string())
}
