#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use arrow_array::{ArrayRef, Float64Array, Int64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use channel_dash::data::dataset::{AggregatedRecord, ChannelShare, Dataset, MonthKey};
use channel_dash::Channel;
use parquet::arrow::arrow_writer::ArrowWriter;

/// (month, agent, [(channel, pct, qtd)])
pub type Row<'a> = (&'a str, &'a str, &'a [(Channel, f64, i64)]);

pub fn record(month: &str, agent: &str, shares: &[(Channel, f64, i64)]) -> AggregatedRecord {
    let channels: BTreeMap<Channel, ChannelShare> = shares
        .iter()
        .map(|(ch, pct, qtd)| (*ch, ChannelShare { pct: *pct, qtd: *qtd }))
        .collect();
    AggregatedRecord {
        month: MonthKey::parse(month).expect("valid month"),
        agent: agent.to_string(),
        channels,
    }
}

pub fn dataset(rows: &[Row<'_>]) -> Dataset {
    let mut channels = Vec::new();
    let records = rows
        .iter()
        .map(|(m, a, shares)| {
            channels.extend(shares.iter().map(|s| s.0));
            record(m, a, shares)
        })
        .collect();
    Dataset::new(records, channels)
}

/// Six agents over three months, two channels each.
pub fn sample_dataset() -> Dataset {
    let agents = ["Fabi", "Ana", "Eva", "Bea", "Dani", "Carla"];
    let months = ["2024-02", "2024-01", "2024-03"];
    let mut records = Vec::new();
    for (mi, m) in months.iter().enumerate() {
        for (ai, a) in agents.iter().enumerate() {
            let wa = 10.0 * (ai as f64 + 1.0) + mi as f64;
            records.push(record(
                m,
                a,
                &[
                    (Channel::WhatsApp, wa, (ai + mi) as i64 + 1),
                    (Channel::Site, 100.0 - wa, 3 * ai as i64 + 2),
                ],
            ));
        }
    }
    Dataset::new(records, vec![Channel::Site, Channel::WhatsApp])
}

/// Write a Parquet file with a text `ano_mes`, text agents, float `_pct` and
/// integer count columns for `channels`.
pub fn write_parquet(path: &Path, channels: &[Channel], rows: &[Row<'_>]) {
    let mut fields = vec![
        Field::new("ano_mes", DataType::Utf8, false),
        Field::new("vendedor_conclusao", DataType::Utf8, false),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(rows.iter().map(|r| r.0).collect::<Vec<_>>())),
        Arc::new(StringArray::from(rows.iter().map(|r| r.1).collect::<Vec<_>>())),
    ];
    for ch in channels {
        let find = |r: &Row<'_>| r.2.iter().find(|s| s.0 == *ch).copied();
        fields.push(Field::new(ch.pct_column(), DataType::Float64, true));
        columns.push(Arc::new(Float64Array::from(
            rows.iter().map(|r| find(r).map(|s| s.1)).collect::<Vec<_>>(),
        )));
        fields.push(Field::new(ch.count_column(), DataType::Int64, true));
        columns.push(Arc::new(Int64Array::from(
            rows.iter().map(|r| find(r).map(|s| s.2)).collect::<Vec<_>>(),
        )));
    }
    write_batch(path, fields, columns);
}

pub fn write_batch(path: &Path, fields: Vec<Field>, columns: Vec<ArrayRef>) {
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let file = std::fs::File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}
