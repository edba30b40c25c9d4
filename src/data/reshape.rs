//! Wide → long reshaping of a filtered slice.

use super::channels::Channel;
use super::filter::FilteredSlice;

/// One (entity, channel) observation.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    /// Agent name in compare mode, month string in evolution mode.
    pub entity: String,
    pub agent: String,
    pub pct: f64,
    pub qtd: i64,
    pub channel: Channel,
    pub text: String,
}

/// Segment label: percentage with one decimal, then the count.
pub fn format_label(pct: f64, qtd: i64) -> String {
    format!("{pct:.1}% ({qtd})")
}

/// One row per (channel, source row), channel-major.
///
/// Only `channels` are visited; a record lacking one of them (not expected
/// for a well-formed file) is skipped for that channel.
pub fn reshape(slice: &FilteredSlice<'_>, channels: &[Channel]) -> Vec<LongRow> {
    let mut out = Vec::with_capacity(channels.len() * slice.len());
    for &channel in channels {
        for record in slice.rows() {
            let Some(share) = record.share(channel) else {
                continue;
            };
            let (entity, agent) = match slice {
                FilteredSlice::Compare { .. } => (record.agent.clone(), record.agent.clone()),
                FilteredSlice::Evolution { agent, .. } => {
                    (record.month.as_str().to_string(), agent.clone())
                }
            };
            out.push(LongRow {
                entity,
                agent,
                pct: share.pct,
                qtd: share.qtd,
                channel,
                text: format_label(share.pct, share.qtd),
            });
        }
    }
    out
}
