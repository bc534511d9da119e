//! Published directives and their bounded history.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use urbanintel_types::{DirectiveItem, PolicyCategory};

/// Number of retired directives kept.
pub const DIRECTIVE_HISTORY_LIMIT: usize = 10;

/// The single directive currently shown to citizens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveDirective {
    pub id: String,
    pub text: String,
    pub category: PolicyCategory,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct DirectiveBoard {
    active: Option<ActiveDirective>,
    history: VecDeque<DirectiveItem>,
}

impl DirectiveBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `text` the active directive, retiring the previous one.
    ///
    /// The retired directive keeps its own id and category and is stamped
    /// with the time it was retired.
    pub fn publish(
        &mut self,
        text: impl Into<String>,
        category: PolicyCategory,
        at: DateTime<Utc>,
    ) -> &ActiveDirective {
        if let Some(previous) = self.active.take() {
            self.history.push_front(DirectiveItem {
                id: previous.id,
                text: previous.text,
                timestamp: at,
                is_active: false,
                category: Some(previous.category),
            });
            self.history.truncate(DIRECTIVE_HISTORY_LIMIT);
        }

        let directive = self.active.insert(ActiveDirective {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            category,
            published_at: at,
        });
        debug!(
            directive = %directive.id,
            category = directive.category.label(),
            retired = self.history.len(),
            "directive published"
        );
        directive
    }

    pub fn active(&self) -> Option<&ActiveDirective> {
        self.active.as_ref()
    }

    /// Retired directives, newest first.
    pub fn history(&self) -> impl Iterator<Item = &DirectiveItem> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
