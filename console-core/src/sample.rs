//! Fixed demo data used until a real data service is wired in.

use crate::error::Result;
use crate::model::{ChatMessage, Participant, Priority, Ticket, TicketStatus};
use crate::service::DataService;
use async_trait::async_trait;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

pub fn tickets() -> Vec<Ticket> {
    vec![
        Ticket::new("Printer not working", TicketStatus::Open, Priority::High, "John Doe", date(2025, 7, 1)),
        Ticket::new(
            "Software installation request",
            TicketStatus::InProgress,
            Priority::Normal,
            "Jane Smith",
            date(2025, 6, 28),
        ),
        Ticket::new(
            "Network connectivity issue",
            TicketStatus::Open,
            Priority::Critical,
            "John Doe",
            date(2025, 7, 2),
        ),
        Ticket::new("Account lockout", TicketStatus::Closed, Priority::High, "Jane Smith", date(2025, 6, 25)),
        Ticket::new("New user onboarding", TicketStatus::Open, Priority::Low, "Admin", date(2025, 7, 3)),
    ]
}

pub fn messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::new(Participant::Support, "Hello! How can I help you today?", "10:00 AM"),
        ChatMessage::new(Participant::You, "Hi, I have an issue with my laptop.", "10:02 AM"),
        ChatMessage::new(Participant::Support, "Please describe the problem in detail.", "10:03 AM"),
    ]
}

/// Data service backed by the fixed sample sequences.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleData;

#[async_trait(?Send)]
impl DataService for SampleData {
    async fn tickets(&self) -> Result<Vec<Ticket>> {
        Ok(tickets())
    }

    async fn messages(&self) -> Result<Vec<ChatMessage>> {
        Ok(messages())
    }
}
