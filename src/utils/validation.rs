use crate::domain::model::Tab;
use crate::utils::error::{PickerError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number<T>(field_name: &str, value: T, min_value: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min_value {
        return Err(PickerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_tabs(field_name: &str, tabs: &[Tab]) -> Result<()> {
    if tabs.is_empty() {
        return Err(PickerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "[]".to_string(),
            reason: "At least one tab must be shown".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for tab in tabs {
        if !seen.insert(tab) {
            return Err(PickerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: tab.as_str().to_string(),
                reason: "Tab listed more than once".to_string(),
            });
        }
    }

    Ok(())
}
