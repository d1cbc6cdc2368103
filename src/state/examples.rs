//! Example user stories and the picker modal

use serde::{Deserialize, Serialize};

const USER_STORY_LABEL: &str = "User Story:";
const ACCEPTANCE_CRITERIA_LABEL: &str = "Acceptance Criteria:";

/// Example story offered by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub id: String,
    pub title: String,
    pub story: String,
}

impl Example {
    /// First non-empty line of the story, used as the list preview
    pub fn preview(&self) -> &str {
        self.story
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("")
    }

    /// Split the story into (user story, acceptance criteria)
    pub fn split(&self) -> (String, String) {
        split_story(&self.story)
    }
}

/// Split example text on the "Acceptance Criteria:" line.
///
/// Everything after the marker line is acceptance criteria. Everything before
/// it, minus blank lines and the "User Story:" label, is the user story. Text
/// sharing a line with either label is kept.
pub fn split_story(story: &str) -> (String, String) {
    let mut user_story = String::new();
    let mut acceptance_criteria = String::new();
    let mut in_criteria = false;

    for line in story.lines() {
        if !in_criteria {
            if let Some(pos) = line.find(ACCEPTANCE_CRITERIA_LABEL) {
                in_criteria = true;
                let rest = line[pos + ACCEPTANCE_CRITERIA_LABEL.len()..].trim();
                if !rest.is_empty() {
                    acceptance_criteria.push_str(rest);
                    acceptance_criteria.push('\n');
                }
                continue;
            }
        }

        if in_criteria {
            acceptance_criteria.push_str(line);
            acceptance_criteria.push('\n');
            continue;
        }

        let content = match line.find(USER_STORY_LABEL) {
            Some(pos) => line[pos + USER_STORY_LABEL.len()..].trim(),
            None => line,
        };
        if !content.trim().is_empty() {
            user_story.push_str(content);
            user_story.push('\n');
        }
    }

    (
        user_story.trim().to_string(),
        acceptance_criteria.trim().to_string(),
    )
}

/// State of the example picker overlay
#[derive(Debug, Clone, Default)]
pub struct ExamplesModal {
    pub examples: Vec<Example>,
    pub selected: usize,
}

impl ExamplesModal {
    pub fn new(examples: Vec<Example>) -> Self {
        Self {
            examples,
            selected: 0,
        }
    }

    pub fn select_next(&mut self) {
        if !self.examples.is_empty() && self.selected + 1 < self.examples.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_example(&self) -> Option<&Example> {
        self.examples.get(self.selected)
    }
}
