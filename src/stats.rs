use crate::clock::CalendarDay;
use crate::models::{DailyRecitationPoint, JuzTally, RecitationRecord, RecitationSummary};
use crate::providers::JUZ_COUNT;
use std::collections::BTreeMap;

pub fn build_recitation_summary_at(today: CalendarDay, records: &[RecitationRecord]) -> RecitationSummary {
    let mut per_day: BTreeMap<CalendarDay, u64> = BTreeMap::new();
    let mut per_juz: BTreeMap<u8, u64> = BTreeMap::new();
    for record in records {
        *per_day.entry(record.date).or_default() += 1;
        if (1..=JUZ_COUNT).contains(&record.section_index) {
            *per_juz.entry(record.section_index).or_default() += 1;
        }
    }

    let mut last_7_days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today.days_before(offset);
        last_7_days.push(DailyRecitationPoint {
            date: date.to_string(),
            entries: per_day.get(&date).copied().unwrap_or(0),
        });
    }

    let by_juz = per_juz
        .into_iter()
        .map(|(section_index, entries)| JuzTally {
            section_index,
            entries,
        })
        .collect();

    RecitationSummary {
        last_7_days,
        by_juz,
        total_entries: records.len() as u64,
    }
}
