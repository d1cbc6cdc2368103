//! Generate form state

use super::field::FormField;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Values submitted to the generator, trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub user_story: String,
    pub acceptance_criteria: String,
    pub story_id: String,
    pub story_title: String,
    pub ai_provider: Option<String>,
}

/// The story entry form
#[derive(Debug, Clone)]
pub struct GenerateForm {
    pub story_id: FormField,
    pub story_title: FormField,
    pub user_story: FormField,
    pub acceptance_criteria: FormField,
    pub ai_provider: FormField,
    pub active_field_index: usize,
}

impl GenerateForm {
    pub const STORY_ID: usize = 0;
    pub const STORY_TITLE: usize = 1;
    pub const USER_STORY: usize = 2;
    pub const ACCEPTANCE_CRITERIA: usize = 3;
    pub const AI_PROVIDER: usize = 4;

    pub fn new() -> Self {
        Self {
            story_id: FormField::text("Story ID", false),
            story_title: FormField::text("Story Title", false),
            user_story: FormField::text("User Story", true),
            acceptance_criteria: FormField::text("Acceptance Criteria", true),
            ai_provider: FormField::choice("AI Provider"),
            active_field_index: Self::USER_STORY,
        }
    }

    /// Generate is allowed iff the user story has non-whitespace content
    pub fn can_generate(&self) -> bool {
        !self.user_story.as_text().trim().is_empty()
    }

    /// Snapshot of the current field values
    pub fn to_input(&self) -> FormInput {
        FormInput {
            user_story: self.user_story.as_text().trim().to_string(),
            acceptance_criteria: self.acceptance_criteria.as_text().trim().to_string(),
            story_id: self.story_id.as_text().trim().to_string(),
            story_title: self.story_title.as_text().trim().to_string(),
            ai_provider: self.ai_provider.selected_option().map(str::to_string),
        }
    }

    pub fn is_active_field_multiline(&self) -> bool {
        self.get_field(self.active_field_index)
            .is_some_and(|f| f.is_multiline)
    }

    pub fn is_provider_active(&self) -> bool {
        self.active_field_index == Self::AI_PROVIDER
    }
}

impl Default for GenerateForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for GenerateForm {
    fn field_count(&self) -> usize {
        5
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(Self::AI_PROVIDER);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            Self::STORY_ID => &mut self.story_id,
            Self::STORY_TITLE => &mut self.story_title,
            Self::USER_STORY => &mut self.user_story,
            Self::ACCEPTANCE_CRITERIA => &mut self.acceptance_criteria,
            _ => &mut self.ai_provider,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            Self::STORY_ID => Some(&self.story_id),
            Self::STORY_TITLE => Some(&self.story_title),
            Self::USER_STORY => Some(&self.user_story),
            Self::ACCEPTANCE_CRITERIA => Some(&self.acceptance_criteria),
            Self::AI_PROVIDER => Some(&self.ai_provider),
            _ => None,
        }
    }
}
