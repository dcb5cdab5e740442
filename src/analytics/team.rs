//! Team queue/load rollups and per-agent workload rows

use crate::analytics::sla;
use crate::models::{Team, Ticket};
use serde::Serialize;
use strum::Display;

/// Backlog above this is a high load, above `MEDIUM_BACKLOG` a medium one
const HIGH_BACKLOG: usize = 20;
const MEDIUM_BACKLOG: usize = 10;

/// Assigned-ticket thresholds for agent workload classification
const HIGH_WORKLOAD: usize = 15;
const MEDIUM_WORKLOAD: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LoadLevel {
    Low,
    Medium,
    High,
}

/// Queue and responsiveness rollup for one team
#[derive(Debug, Clone, Serialize)]
pub struct TeamPerformance {
    pub team: Team,
    /// Open + in-progress tickets routed to the team
    pub queue_size: usize,
    pub load: LoadLevel,
    pub avg_first_response_hours: Option<f64>,
    pub avg_resolution_hours: Option<f64>,
}

/// Rollups for every routable team, in reporting order
pub fn team_performance(tickets: &[Ticket]) -> Vec<TeamPerformance> {
    Team::ALL
        .into_iter()
        .map(|team| {
            let routed: Vec<Ticket> = tickets
                .iter()
                .filter(|t| t.suggested_team == team)
                .cloned()
                .collect();

            let queue_size = routed.iter().filter(|t| t.is_open()).count();

            TeamPerformance {
                team,
                queue_size,
                load: backlog_load(queue_size),
                avg_first_response_hours: sla::mean_first_response_hours(&routed),
                avg_resolution_hours: sla::mean_resolution_hours(&routed),
            }
        })
        .collect()
}

fn backlog_load(backlog: usize) -> LoadLevel {
    if backlog > HIGH_BACKLOG {
        LoadLevel::High
    } else if backlog > MEDIUM_BACKLOG {
        LoadLevel::Medium
    } else {
        LoadLevel::Low
    }
}

/// Workload row for one agent
#[derive(Debug, Clone, Serialize)]
pub struct AgentPerformance {
    pub agent: String,
    pub assigned: usize,
    pub open: usize,
    pub resolved: usize,
    pub workload: LoadLevel,
    pub avg_resolution_hours: Option<f64>,
}

/// Workload rows for a roster of agent names. The roster is supplied by
/// the caller; the demo roster lives in [`crate::analytics::sample`].
pub fn agent_performance(tickets: &[Ticket], roster: &[String]) -> Vec<AgentPerformance> {
    roster
        .iter()
        .map(|agent| {
            let assigned: Vec<Ticket> = tickets
                .iter()
                .filter(|t| t.assignee.as_deref() == Some(agent.as_str()))
                .cloned()
                .collect();

            let open = assigned.iter().filter(|t| t.is_open()).count();
            let resolved = assigned.iter().filter(|t| t.is_resolved()).count();

            AgentPerformance {
                agent: agent.clone(),
                assigned: assigned.len(),
                open,
                resolved,
                workload: workload_level(assigned.len()),
                avg_resolution_hours: sla::mean_resolution_hours(&assigned),
            }
        })
        .collect()
}

fn workload_level(assigned: usize) -> LoadLevel {
    if assigned > HIGH_WORKLOAD {
        LoadLevel::High
    } else if assigned > MEDIUM_WORKLOAD {
        LoadLevel::Medium
    } else {
        LoadLevel::Low
    }
}

/// Distinct assignee names present in the ticket set, sorted; used as the
/// roster when no demo roster is configured
pub fn observed_roster(tickets: &[Ticket]) -> Vec<String> {
    let mut names: Vec<String> = tickets
        .iter()
        .filter_map(|t| t.assignee.clone())
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTicket, TicketStatus, TicketType};

    fn ticket(team: Team, assignee: Option<&str>) -> Ticket {
        Ticket::new(NewTicket {
            ticket_type: TicketType::Incident,
            title: "Test".to_string(),
            description: "Test".to_string(),
            owner_id: None,
            priority: None,
            suggested_team: Some(team),
            user_name: None,
            app_or_system: None,
            collected_details: None,
            assignee: assignee.map(str::to_string),
            source: None,
            asset_id: None,
        })
    }

    #[test]
    fn test_backlog_thresholds() {
        assert_eq!(backlog_load(10), LoadLevel::Low);
        assert_eq!(backlog_load(11), LoadLevel::Medium);
        assert_eq!(backlog_load(20), LoadLevel::Medium);
        assert_eq!(backlog_load(21), LoadLevel::High);
    }

    #[test]
    fn test_workload_thresholds() {
        assert_eq!(workload_level(8), LoadLevel::Low);
        assert_eq!(workload_level(9), LoadLevel::Medium);
        assert_eq!(workload_level(16), LoadLevel::High);
    }

    #[test]
    fn test_queue_excludes_terminal_tickets() {
        let mut resolved = ticket(Team::Network, None);
        resolved.status = TicketStatus::Resolved;

        let tickets = vec![ticket(Team::Network, None), resolved];
        let rows = team_performance(&tickets);

        let network = rows.iter().find(|r| r.team == Team::Network).unwrap();
        assert_eq!(network.queue_size, 1);
        assert_eq!(rows.len(), Team::ALL.len());
    }

    #[test]
    fn test_agent_rows_follow_roster() {
        let tickets = vec![
            ticket(Team::Iam, Some("maya.patel")),
            ticket(Team::Iam, Some("maya.patel")),
            ticket(Team::Iam, Some("someone.else")),
        ];

        let rows = agent_performance(&tickets, &["maya.patel".to_string()]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].assigned, 2);
        assert_eq!(rows[0].open, 2);
        assert_eq!(rows[0].workload, LoadLevel::Low);
    }

    #[test]
    fn test_observed_roster_dedupes() {
        let tickets = vec![
            ticket(Team::Iam, Some("b.agent")),
            ticket(Team::Iam, Some("a.agent")),
            ticket(Team::Iam, Some("b.agent")),
            ticket(Team::Iam, None),
        ];
        assert_eq!(observed_roster(&tickets), vec!["a.agent", "b.agent"]);
    }
}
