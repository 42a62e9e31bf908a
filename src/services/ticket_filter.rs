use crate::domain::ticket::Ticket;

/// Criteria a ticket must meet to enter a metrics query. Unset criteria match
/// every ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub project: Option<String>,
    pub assignee: Option<String>,
    pub status: Option<String>,
    pub customer: Option<String>,
    pub label: Option<String>,
}

impl TicketFilter {
    pub fn matches(&self, ticket: &Ticket) -> bool {
        let project_matches = self
            .project
            .as_ref()
            .is_none_or(|project| ticket.project == *project);
        let assignee_matches = self
            .assignee
            .as_ref()
            .is_none_or(|assignee| ticket.assignee.as_ref() == Some(assignee));
        let status_matches = self
            .status
            .as_ref()
            .is_none_or(|status| ticket.status.eq_ignore_ascii_case(status));
        let customer_matches = self
            .customer
            .as_ref()
            .is_none_or(|customer| ticket.customer.as_ref() == Some(customer));
        let label_matches = self
            .label
            .as_ref()
            .is_none_or(|label| ticket.labels.contains(label));

        project_matches && assignee_matches && status_matches && customer_matches && label_matches
    }

    pub fn apply(&self, tickets: &[Ticket]) -> Vec<Ticket> {
        tickets
            .iter()
            .filter(|ticket| self.matches(ticket))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, build_open_ticket};

    fn labelled_ticket(id: &str, project: &str, labels: &[&str]) -> Ticket {
        let mut ticket = build_open_ticket(id, at(2024, 1, 1, 9));
        ticket.project = project.to_string();
        ticket.labels = labels.iter().map(|label| label.to_string()).collect();
        ticket
    }

    #[test]
    fn default_filter_matches_everything() {
        let tickets = vec![
            labelled_ticket("ABC-1", "ABC", &[]),
            labelled_ticket("XYZ-1", "XYZ", &["bug"]),
        ];
        assert_eq!(TicketFilter::default().apply(&tickets).len(), 2);
    }

    #[test]
    fn all_given_criteria_must_match() {
        let mut matching = labelled_ticket("ABC-1", "ABC", &["bug", "backend"]);
        matching.customer = Some("ACME".to_string());
        matching.assignee = Some("alice".to_string());
        let mut other_customer = matching.clone();
        other_customer.id = "ABC-2".to_string();
        other_customer.customer = Some("Globex".to_string());
        let other_label = labelled_ticket("ABC-3", "ABC", &["frontend"]);

        let filter = TicketFilter {
            project: Some("ABC".to_string()),
            assignee: Some("alice".to_string()),
            status: Some("to do".to_string()),
            customer: Some("ACME".to_string()),
            label: Some("bug".to_string()),
        };
        let filtered = filter.apply(&[matching, other_customer, other_label]);

        let ids: Vec<&str> = filtered.iter().map(|ticket| ticket.id.as_str()).collect();
        assert_eq!(ids, vec!["ABC-1"]);
    }
}
