//! Shared form state: one flat field-name -> value map used by all modes.
//!
//! Switching modes never resets or forks this map; each mode reads and writes
//! the subset of names its schema declares, so values entered under one mode
//! are still there after switching away and back.

use std::collections::HashMap;

use crate::mode::{FieldKind, Mode};

pub struct FormState {
    values: HashMap<&'static str, String>,
}

impl FormState {
    /// Seed every field declared by any mode with its default value.
    pub fn new() -> Self {
        let mut values = HashMap::new();
        for mode in Mode::ALL {
            for field in mode.spec().fields {
                values.entry(field.name).or_insert_with(|| field.default.to_string());
            }
        }
        Self { values }
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.values.insert(name, value.into());
    }

    pub fn push_char(&mut self, name: &'static str, c: char) {
        if let Some(v) = self.values.get_mut(name) {
            v.push(c);
        }
    }

    pub fn pop_char(&mut self, name: &'static str) {
        if let Some(v) = self.values.get_mut(name) {
            v.pop();
        }
    }

    /// Check the submit preconditions for `mode`: required fields present and
    /// the integer fields holding an in-range number. Dispatch relies on this
    /// having passed; a malformed count is stopped here, never forwarded.
    pub fn validate(&self, mode: Mode) -> Result<(), String> {
        for field in mode.spec().fields {
            let raw = self.value(field.name);
            if field.required && raw.trim().is_empty() {
                return Err(format!("{} is required", field.label));
            }
            if let FieldKind::Integer { min, max } = field.kind {
                match raw.trim().parse::<u64>() {
                    Ok(n) if (min..=max).contains(&n) => {}
                    _ => {
                        return Err(format!(
                            "{} must be a number between {} and {}",
                            field.label, min, max
                        ))
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_seeded_from_registry() {
        let form = FormState::new();
        assert_eq!(form.value("platform"), "LinkedIn");
        assert_eq!(form.value("tone"), "Professional & Witty");
        assert_eq!(form.value("count"), "5");
        assert_eq!(form.value("platforms"), "LinkedIn, Twitter");
        assert_eq!(form.value("duration"), "1 Week");
        assert_eq!(form.value("topic"), "");
        assert_eq!(form.value("niche"), "");
    }

    #[test]
    fn test_values_shared_across_modes() {
        let mut form = FormState::new();
        form.set("niche", "Indie Hacking");

        // Ideas and Plan both read the same niche entry.
        assert_eq!(form.value("niche"), "Indie Hacking");
        assert!(form.validate(Mode::Ideas).is_ok());
        assert!(form.validate(Mode::Plan).is_ok());
    }

    #[test]
    fn test_missing_topic_blocks_post() {
        let form = FormState::new();
        let err = form.validate(Mode::Post).unwrap_err();
        assert!(err.contains("Topic"));
    }

    #[test]
    fn test_missing_niche_blocks_ideas_and_plan() {
        let form = FormState::new();
        assert!(form.validate(Mode::Ideas).is_err());
        assert!(form.validate(Mode::Plan).is_err());
    }

    #[test]
    fn test_whitespace_only_required_field_rejected() {
        let mut form = FormState::new();
        form.set("topic", "   ");
        assert!(form.validate(Mode::Post).is_err());
    }

    #[test]
    fn test_count_out_of_range_rejected() {
        let mut form = FormState::new();
        form.set("niche", "x");

        form.set("count", "0");
        assert!(form.validate(Mode::Ideas).is_err());
        form.set("count", "11");
        assert!(form.validate(Mode::Ideas).is_err());
        form.set("count", "10");
        assert!(form.validate(Mode::Ideas).is_ok());
    }

    #[test]
    fn test_non_numeric_count_rejected_before_dispatch() {
        let mut form = FormState::new();
        form.set("niche", "x");
        form.set("count", "five");
        let err = form.validate(Mode::Ideas).unwrap_err();
        assert!(err.contains("between 1 and 10"));
    }

    #[test]
    fn test_edit_helpers() {
        let mut form = FormState::new();
        form.push_char("topic", 'h');
        form.push_char("topic", 'i');
        assert_eq!(form.value("topic"), "hi");
        form.pop_char("topic");
        assert_eq!(form.value("topic"), "h");
    }
}
