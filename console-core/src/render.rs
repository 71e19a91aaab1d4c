//! Pure projections from store snapshots to display trees.
//!
//! Every call builds the full subtree from scratch; the front end swaps the
//! container's content for [`Projection::html`] wholesale.

use crate::modal::ModalNotifier;
use crate::model::{ChatMessage, Participant, Ticket, TicketStats};
use std::fmt::Write;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewNode {
    Element {
        tag: &'static str,
        classes: Vec<String>,
        attrs: Vec<(&'static str, String)>,
        children: Vec<ViewNode>,
    },
    Text(String),
}

impl ViewNode {
    pub fn element(tag: &'static str) -> Self {
        Self::Element {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        if let Self::Element { classes, .. } = &mut self {
            classes.push(class.into());
        }
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Self::Element { attrs, .. } = &mut self {
            attrs.push((name, value.into()));
        }
        self
    }

    pub fn child(mut self, node: ViewNode) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    /// Concatenated text content of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Element { children, .. } => children.iter().map(Self::text_content).collect(),
        }
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(value) => out.push_str(&escape(value)),
            Self::Element {
                tag,
                classes,
                attrs,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                if !classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", escape(&classes.join(" ")));
                }
                for (name, value) in attrs {
                    let _ = write!(out, " {name}=\"{}\"", escape(value));
                }
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Where the container should scroll to after its content is replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAnchor {
    Preserve,
    Bottom,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projection {
    pub nodes: Vec<ViewNode>,
    pub scroll: ScrollAnchor,
}

impl Projection {
    pub fn html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_html(&mut out);
        }
        out
    }
}

fn cell(class: &str) -> ViewNode {
    ViewNode::element("td").class(class)
}

fn badge(class: &str, label: &str) -> ViewNode {
    ViewNode::element("span").class(class).child(ViewNode::text(label))
}

/// Rows for the tickets table body.
pub fn render_tickets(tickets: &[Ticket]) -> Projection {
    let rows = tickets.iter().map(|ticket| {
        ViewNode::element("tr")
            .attr("data-ticket-id", ticket.id.to_string())
            .child(
                cell("px-6 py-4 text-sm font-medium text-gray-900")
                    .child(ViewNode::text(&ticket.title)),
            )
            .child(cell("px-6 py-4").child(badge(ticket.status.badge_class(), ticket.status.label())))
            .child(
                cell("px-6 py-4")
                    .child(badge(ticket.priority.badge_class(), ticket.priority.label())),
            )
            .child(cell("px-6 py-4 text-sm text-gray-700").child(ViewNode::text(&ticket.assigned_to)))
            .child(
                cell("px-6 py-4 text-sm text-gray-400")
                    .child(ViewNode::text(ticket.date.format("%Y-%m-%d").to_string())),
            )
    });

    Projection {
        nodes: rows.collect(),
        scroll: ScrollAnchor::Preserve,
    }
}

/// Chat bubbles, aligned right for `viewer`'s own messages and left for
/// everyone else. Always anchors to the newest message.
pub fn render_chat(messages: &[ChatMessage], viewer: &Participant) -> Projection {
    let bubbles = messages.iter().map(|msg| {
        let own = &msg.sender == viewer;
        let (row, bubble, time) = if own {
            (
                "flex justify-end",
                "max-w-[80%] p-3 rounded-lg shadow-sm bg-sky-500 text-white rounded-br-none",
                "block text-xs mt-1 text-sky-100",
            )
        } else {
            (
                "flex justify-start",
                "max-w-[80%] p-3 rounded-lg shadow-sm bg-gray-100 text-gray-900 rounded-bl-none",
                "block text-xs mt-1 text-gray-500",
            )
        };

        ViewNode::element("div")
            .class(row)
            .attr("data-message-id", msg.id.to_string())
            .attr("data-sender", msg.sender.label())
            .child(
                ViewNode::element("div")
                    .class(bubble)
                    .child(
                        ViewNode::element("p")
                            .class("text-sm")
                            .child(ViewNode::text(&msg.message)),
                    )
                    .child(
                        ViewNode::element("span")
                            .class(time)
                            .child(ViewNode::text(&msg.time)),
                    ),
            )
    });

    Projection {
        nodes: bubbles.collect(),
        scroll: ScrollAnchor::Bottom,
    }
}

/// Summary cards shown above the tickets table.
pub fn render_ticket_stats(tickets: &[Ticket]) -> Projection {
    let stats = TicketStats::from_tickets(tickets);
    let cards = [
        ("Total", stats.total),
        ("Open", stats.open),
        ("In Progress", stats.in_progress),
        ("Closed", stats.closed),
    ]
    .into_iter()
    .map(|(label, count)| {
        ViewNode::element("div")
            .class("stat-card")
            .child(
                ViewNode::element("span")
                    .class("stat-label")
                    .child(ViewNode::text(label)),
            )
            .child(
                ViewNode::element("span")
                    .class("stat-value")
                    .child(ViewNode::text(count.to_string())),
            )
    });

    Projection {
        nodes: cards.collect(),
        scroll: ScrollAnchor::Preserve,
    }
}

/// The message dialog body, or nothing while it is hidden.
pub fn render_modal(modal: &ModalNotifier) -> Option<ViewNode> {
    let content = modal.content()?;
    Some(
        ViewNode::element("div")
            .class("bg-white rounded-lg shadow-xl p-6 max-w-sm w-full text-center")
            .child(
                ViewNode::element("h3")
                    .class("text-xl font-bold text-gray-900 mb-4")
                    .attr("id", "modal-title")
                    .child(ViewNode::text(&content.title)),
            )
            .child(
                ViewNode::element("p")
                    .class("text-gray-700 mb-6 whitespace-pre-line")
                    .attr("id", "modal-message")
                    .child(ViewNode::text(&content.message)),
            ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, TicketStatus};
    use crate::sample;
    use chrono::NaiveDate;

    #[test]
    fn ticket_rows_follow_snapshot_order() {
        let tickets = crate::store::CollectionStore::from_records("tickets", sample::tickets());
        let projection = render_tickets(tickets.snapshot());
        assert_eq!(projection.nodes.len(), 5);
        assert_eq!(projection.scroll, ScrollAnchor::Preserve);
        let first = projection.nodes[0].text_content();
        assert!(first.starts_with("Printer not working"));
        assert!(first.contains("Open"));
        assert!(first.ends_with("2025-07-01"));
    }

    #[test]
    fn rerender_is_structurally_identical() {
        let tickets = crate::store::CollectionStore::from_records("tickets", sample::tickets());
        let a = render_tickets(tickets.snapshot());
        let b = render_tickets(tickets.snapshot());
        assert_eq!(a, b);
        assert_eq!(a.html(), b.html());
    }

    #[test]
    fn badges_carry_enum_classes() {
        let ticket = Ticket::new(
            "VPN down",
            TicketStatus::InProgress,
            Priority::Critical,
            "Admin",
            NaiveDate::from_ymd_opt(2025, 7, 4).expect("date"),
        );
        let html = render_tickets(&[ticket]).html();
        assert!(html.contains(r#"<span class="badge badge-in-progress">In Progress</span>"#));
        assert!(html.contains(r#"<span class="badge badge-critical">Critical</span>"#));
    }

    #[test]
    fn chat_aligns_by_sender_and_scrolls_to_bottom() {
        let messages = crate::store::CollectionStore::from_records("chat", sample::messages());
        let projection = render_chat(messages.snapshot(), &Participant::You);
        assert_eq!(projection.scroll, ScrollAnchor::Bottom);
        let html = projection.html();
        assert!(html.starts_with(r#"<div class="flex justify-start" data-message-id="1" data-sender="Support">"#));
        assert!(projection.nodes[1].to_html().starts_with(r#"<div class="flex justify-end""#));
    }

    #[test]
    fn text_is_escaped() {
        let msg = ChatMessage::new(Participant::You, "<script>alert('x')</script>", "10:00 AM");
        let html = render_chat(&[msg], &Participant::You).html();
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn empty_snapshot_renders_nothing() {
        assert!(render_tickets(&[]).html().is_empty());
        assert!(render_chat(&[], &Participant::You).nodes.is_empty());
    }

    #[test]
    fn stats_cards_show_counts() {
        let tickets = sample::tickets();
        let projection = render_ticket_stats(&tickets);
        let texts: Vec<String> = projection.nodes.iter().map(ViewNode::text_content).collect();
        assert_eq!(texts, vec!["Total5", "Open3", "In Progress1", "Closed1"]);
    }

    #[test]
    fn modal_renders_only_while_visible() {
        let mut modal = ModalNotifier::default();
        assert!(render_modal(&modal).is_none());
        modal.show_message("Login Failed", "Invalid username or password.");
        let node = render_modal(&modal).expect("visible");
        assert_eq!(node.text_content(), "Login FailedInvalid username or password.");
        modal.close();
        assert!(render_modal(&modal).is_none());
    }
}
