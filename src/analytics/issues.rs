//! Naive title-keyword clustering of recurring issues

use crate::analytics::round2;
use crate::models::Ticket;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Minimum tickets for a keyword group to count as a recurring issue
const MIN_GROUP_SIZE: usize = 2;

/// Words this short carry no signal for grouping
const MIN_WORD_LEN: usize = 5;

/// A cluster of tickets sharing a title-keyword group key
#[derive(Debug, Clone, Serialize)]
pub struct IssueCluster {
    pub key: String,
    pub count: usize,
    pub sample_title: String,
    /// `(recent-7-day count - older count) / older * 100`; an empty older
    /// bucket reports +100
    pub trend_pct: f64,
}

/// Group tickets by title keywords, keep groups of at least two, sort by
/// size descending and truncate to `limit`
pub fn top_issues(tickets: &[Ticket], limit: usize, now: DateTime<Utc>) -> Vec<IssueCluster> {
    let mut groups: HashMap<String, Vec<&Ticket>> = HashMap::new();
    for ticket in tickets {
        groups.entry(issue_key(&ticket.title)).or_default().push(ticket);
    }

    let cutoff = now - Duration::days(7);
    let mut clusters: Vec<IssueCluster> = groups
        .into_iter()
        .filter(|(_, members)| members.len() >= MIN_GROUP_SIZE)
        .map(|(key, members)| {
            let recent = members.iter().filter(|t| t.created_at > cutoff).count();
            let older = members.len() - recent;

            let trend_pct = if older == 0 {
                100.0
            } else {
                round2((recent as f64 - older as f64) / older as f64 * 100.0)
            };

            IssueCluster {
                key,
                count: members.len(),
                sample_title: members[0].title.clone(),
                trend_pct,
            }
        })
        .collect();

    clusters.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    clusters.truncate(limit);
    clusters
}

/// Group key: the first three words longer than 4 characters from the
/// lowercased title, falling back to the whole lowercased title
pub fn issue_key(title: &str) -> String {
    let lowered = title.to_lowercase();
    let words: Vec<&str> = lowered
        .split_whitespace()
        .filter(|word| word.len() >= MIN_WORD_LEN)
        .take(3)
        .collect();

    if words.is_empty() {
        lowered
    } else {
        words.join(" ")
    }
}
