use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type TaskId = String;

pub const DUE_FORMAT: &str = "%Y-%m-%d";
const ID_LEN: usize = 8;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    #[default]
    Backlog,
    Progress,
    Review,
    Done,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::Backlog,
        Column::Progress,
        Column::Review,
        Column::Done,
    ];

    pub fn index(self) -> usize {
        match self {
            Column::Backlog => 0,
            Column::Progress => 1,
            Column::Review => 2,
            Column::Done => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Column> {
        Self::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Column::Backlog => "Backlog",
            Column::Progress => "In Progress",
            Column::Review => "Review",
            Column::Done => "Done",
        }
    }

    /// Column to the right, saturating at `Done`.
    pub fn next(self) -> Column {
        Self::from_index(self.index() + 1).unwrap_or(Column::Done)
    }

    /// Column to the left, saturating at `Backlog`.
    pub fn prev(self) -> Column {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(Column::Backlog)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Med,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Med => "med",
            Priority::High => "high",
        }
    }

    /// low -> med -> high -> low
    pub fn cycle(self) -> Priority {
        match self {
            Priority::Low => Priority::Med,
            Priority::Med => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "due_format")]
    pub due: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub col: Column,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
}

impl Task {
    /// Lower-cased `title desc tags...` used by the text filter.
    pub fn haystack(&self) -> String {
        format!("{} {} {}", self.title, self.desc, self.tags.join(" ")).to_lowercase()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Merges `patch` into this task. The id and creation time never change.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            let title = title.trim();
            if !title.is_empty() {
                self.title = title.to_string();
            }
        }
        if let Some(desc) = patch.desc {
            self.desc = desc;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due) = patch.due {
            self.due = due;
        }
        if let Some(col) = patch.col {
            self.col = col;
        }
        let tags = patch.tags.unwrap_or_else(|| self.tags.join(","));
        self.tags = parse_tags(&tags);
    }
}

/// Input for a new task. Tags arrive as the comma-joined text of the form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub desc: String,
    pub priority: Priority,
    pub due: Option<NaiveDate>,
    pub tags: String,
    pub col: Column,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn due(mut self, due: NaiveDate) -> Self {
        self.due = Some(due);
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn col(mut self, col: Column) -> Self {
        self.col = col;
        self
    }
}

/// Partial update. `None` leaves the field as is; `due: Some(None)` clears the date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub desc: Option<String>,
    pub priority: Option<Priority>,
    pub due: Option<Option<NaiveDate>>,
    pub tags: Option<String>,
    pub col: Option<Column>,
}

impl TaskPatch {
    /// The patch applied on drop: only the column changes.
    pub fn column(col: Column) -> Self {
        Self {
            col: Some(col),
            ..Self::default()
        }
    }
}

/// Splits a comma-joined tag string. Blank entries and repeats are dropped,
/// first-seen order is kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    parse_tags(&tags.join(","))
}

pub fn parse_due(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), DUE_FORMAT)
}

pub fn generate_id() -> TaskId {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

// `due` is "" when unset, matching boards exported by the web version.
mod due_format {
    use super::{parse_due, DUE_FORMAT};
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(due: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match due {
            Some(date) => serializer.serialize_str(&date.format(DUE_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse_due(s)
                .map(Some)
                .map_err(|err| de::Error::custom(format!("invalid due date `{s}`: {err}"))),
        }
    }
}
