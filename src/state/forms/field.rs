//! Form field value objects

/// Type-safe field values
#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(String),
    /// One of a fixed set of options
    Choice {
        options: Vec<String>,
        selected: Option<usize>,
    },
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: FieldValue,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(label: &str, is_multiline: bool) -> Self {
        Self {
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            is_multiline,
        }
    }

    /// Create a new choice field with no options yet
    pub fn choice(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: FieldValue::Choice {
                options: Vec::new(),
                selected: None,
            },
            is_multiline: false,
        }
    }

    /// Get the text value (returns empty string for choice fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Choice { .. } => "",
        }
    }

    /// Set the text value
    pub fn set_text(&mut self, value: impl Into<String>) {
        if let FieldValue::Text(s) = &mut self.value {
            *s = value.into();
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Replace the options of a choice field, selecting `preferred` when present
    pub fn set_options(&mut self, new_options: Vec<String>, preferred: Option<&str>) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            *selected = preferred
                .and_then(|p| new_options.iter().position(|o| o == p))
                .or(if new_options.is_empty() { None } else { Some(0) });
            *options = new_options;
        }
    }

    /// Currently selected option of a choice field
    pub fn selected_option(&self) -> Option<&str> {
        match &self.value {
            FieldValue::Choice { options, selected } => {
                selected.and_then(|i| options.get(i)).map(String::as_str)
            }
            FieldValue::Text(_) => None,
        }
    }

    /// Select the next option (wraps around)
    pub fn next_option(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = Some(selected.map_or(0, |i| (i + 1) % options.len()));
        }
    }

    /// Select the previous option (wraps around)
    pub fn prev_option(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            let len = options.len();
            *selected = Some(selected.map_or(len - 1, |i| (i + len - 1) % len));
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice { options, .. } if options.is_empty() => {
                "(no providers)".to_string()
            }
            FieldValue::Choice { .. } => self
                .selected_option()
                .map(|o| format!("◀ {} ▶", capitalize(o)))
                .unwrap_or_default(),
        }
    }
}

/// Upper-case the first character ("gemini" -> "Gemini")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn providers() -> Vec<String> {
        vec!["openai".into(), "anthropic".into(), "gemini".into()]
    }

    #[test]
    fn test_text_field_editing() {
        let mut field = FormField::text("Story ID", false);
        field.push_char('U');
        field.push_char('S');
        field.pop_char();
        assert_eq!(field.as_text(), "U");
        field.set_text("US001");
        assert_eq!(field.as_text(), "US001");
    }

    #[test]
    fn test_choice_ignores_text_input() {
        let mut field = FormField::choice("AI Provider");
        field.set_options(providers(), None);
        field.push_char('x');
        field.set_text("ignored");
        assert_eq!(field.as_text(), "");
        assert_eq!(field.selected_option(), Some("openai"));
    }

    #[test]
    fn test_set_options_selects_preferred() {
        let mut field = FormField::choice("AI Provider");
        field.set_options(providers(), Some("gemini"));
        assert_eq!(field.selected_option(), Some("gemini"));
    }

    #[test]
    fn test_set_options_unknown_preferred_falls_back_to_first() {
        let mut field = FormField::choice("AI Provider");
        field.set_options(providers(), Some("azure_openai"));
        assert_eq!(field.selected_option(), Some("openai"));
    }

    #[test]
    fn test_option_cycling_wraps() {
        let mut field = FormField::choice("AI Provider");
        field.set_options(providers(), Some("gemini"));
        field.next_option();
        assert_eq!(field.selected_option(), Some("openai"));
        field.prev_option();
        assert_eq!(field.selected_option(), Some("gemini"));
    }

    #[test]
    fn test_empty_choice_display() {
        let mut field = FormField::choice("AI Provider");
        field.next_option();
        assert_eq!(field.selected_option(), None);
        assert_eq!(field.display_value(), "(no providers)");
    }

    #[test]
    fn test_choice_display_is_capitalized() {
        let mut field = FormField::choice("AI Provider");
        field.set_options(providers(), Some("anthropic"));
        assert_eq!(field.display_value(), "◀ Anthropic ▶");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("gemini"), "Gemini");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("azure_openai"), "Azure_openai");
    }
}
