//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::Select;

/// Label for the "no weighting" choice
pub const NO_WEIGHT_CHOICE: &str = "None";

/// Options offered by the weight column prompt: "None" first, then every column
pub fn weight_choices(columns: &[String]) -> Vec<String> {
    std::iter::once(NO_WEIGHT_CHOICE.to_string())
        .chain(columns.iter().cloned())
        .collect()
}

/// Ask which column holds sample weights; `None` means plain means.
pub fn select_weight_column(columns: &[String]) -> Result<Option<String>> {
    let choices = weight_choices(columns);
    let selection = Select::new()
        .with_prompt("Select weight column (optional)")
        .items(&choices)
        .default(0)
        .interact()?;

    if selection == 0 {
        Ok(None)
    } else {
        Ok(Some(choices[selection].clone()))
    }
}
