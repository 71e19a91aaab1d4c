use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A record that lives in a [`crate::store::CollectionStore`] and receives its
/// id from the store on append.
pub trait Record {
    fn id(&self) -> u64;
    fn assign_id(&mut self, id: u64);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Closed,
}

impl TicketStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Closed => "Closed",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Open => "badge badge-open",
            Self::InProgress => "badge badge-in-progress",
            Self::Closed => "badge badge-closed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Normal,
    High,
    Critical,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Low => "badge badge-low",
            Self::Normal => "badge badge-normal",
            Self::High => "badge badge-high",
            Self::Critical => "badge badge-critical",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(default)]
    pub id: u64,
    pub title: String,
    pub status: TicketStatus,
    pub priority: Priority,
    pub assigned_to: String,
    pub date: NaiveDate,
}

impl Ticket {
    pub fn new(
        title: impl Into<String>,
        status: TicketStatus,
        priority: Priority,
        assigned_to: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            status,
            priority,
            assigned_to: assigned_to.into(),
            date,
        }
    }
}

impl Record for Ticket {
    fn id(&self) -> u64 {
        self.id
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Who wrote a chat message. Anything other than the two built-in roles is
/// carried as a free-form participant name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Participant {
    Support,
    You,
    Other(String),
}

impl Participant {
    pub fn label(&self) -> &str {
        match self {
            Self::Support => "Support",
            Self::You => "You",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Participant {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Support" => Self::Support,
            "You" => Self::You,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Participant {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Participant> for String {
    fn from(value: Participant) -> Self {
        match value {
            Participant::Other(name) => name,
            other => other.label().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: u64,
    pub sender: Participant,
    pub message: String,
    pub time: String,
}

impl ChatMessage {
    pub fn new(sender: Participant, message: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id: 0,
            sender,
            message: message.into(),
            time: time.into(),
        }
    }
}

impl Record for ChatMessage {
    fn id(&self) -> u64 {
        self.id
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Formats a wall-clock time the way chat bubbles show it, e.g. `10:02 AM`.
pub fn format_display_time(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
}

impl TicketStats {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        tickets.iter().fold(Self::default(), |mut stats, ticket| {
            stats.total += 1;
            match ticket.status {
                TicketStatus::Open => stats.open += 1,
                TicketStatus::InProgress => stats.in_progress += 1,
                TicketStatus::Closed => stats.closed += 1,
            }
            stats
        })
    }
}
