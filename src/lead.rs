//! Lead records and the drafts inbox

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConsoleError, Result};

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_PERSON: &str = "Unknown Person";

/// One generated outreach draft with its supporting context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub person: Option<String>,
    #[serde(default)]
    pub email_subject: Option<String>,
    #[serde(default)]
    pub email_body: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub x_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub pain_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypothesis: Option<String>,
}

/// Outbound link attached to a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Website,
    X,
    LinkedIn,
}

impl LinkKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Website => "Visit Website ↗",
            Self::X => "Open X Profile ↗",
            Self::LinkedIn => "Open LinkedIn ↗",
        }
    }
}

/// Research fields come from LLM output and may arrive as `null`
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl LeadRecord {
    pub fn new(company: impl Into<String>, person: impl Into<String>) -> Self {
        Self {
            company: Some(company.into()),
            person: Some(person.into()),
            ..Self::default()
        }
    }

    pub fn company_or_default(&self) -> &str {
        non_empty(&self.company).unwrap_or(UNKNOWN_COMPANY)
    }

    pub fn person_or_default(&self) -> &str {
        non_empty(&self.person).unwrap_or(UNKNOWN_PERSON)
    }

    /// Avatar letter for the detail header
    pub fn initial(&self) -> char {
        match non_empty(&self.person) {
            Some(person) if person != "Unknown" => person.chars().next().unwrap_or('U'),
            _ => 'U',
        }
    }

    /// Email body split into display paragraphs (None when no draft)
    pub fn body_lines(&self) -> Option<Vec<&str>> {
        non_empty(&self.email_body).map(|body| body.split('\n').collect())
    }

    /// Links that are present, in display order
    pub fn links(&self) -> Vec<(LinkKind, &str)> {
        [
            (LinkKind::Website, &self.website),
            (LinkKind::X, &self.x_url),
            (LinkKind::LinkedIn, &self.linkedin_url),
        ]
        .into_iter()
        .filter_map(|(kind, url)| non_empty(url).map(|u| (kind, u)))
        .collect()
    }
}

/// Ordered drafts (history + live) and the current selection.
///
/// Selection is a position in the sequence, so two identical-looking records
/// stay distinguishable.
#[derive(Debug, Clone, Default)]
pub struct LeadStore {
    records: Vec<LeadRecord>,
    selected: Option<usize>,
}

impl LeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the sequence wholesale; selects the last record when non-empty
    pub fn load_history(&mut self, records: Vec<LeadRecord>) {
        self.selected = records.len().checked_sub(1);
        self.records = records;
    }

    /// Append a record and focus it
    pub fn append(&mut self, record: LeadRecord) -> usize {
        self.records.push(record);
        let index = self.records.len() - 1;
        self.selected = Some(index);
        index
    }

    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.records.len() {
            return Err(ConsoleError::UnknownLead {
                index,
                len: self.records.len(),
            });
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Move selection by `delta`, clamped to the sequence
    pub fn select_relative(&mut self, delta: isize) {
        if self.records.is_empty() {
            return;
        }
        let last = self.records.len() - 1;
        let next = match self.selected {
            Some(current) => current.saturating_add_signed(delta).min(last),
            None if delta < 0 => last,
            None => 0,
        };
        self.selected = Some(next);
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&LeadRecord> {
        self.selected.and_then(|i| self.records.get(i))
    }

    pub fn records(&self) -> &[LeadRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
