use crate::clock::CalendarDay;
use crate::models::RecitationRecord;
use crate::providers::JUZ_COUNT;

pub fn valid_juz(section_index: u8) -> bool {
    (1..=JUZ_COUNT).contains(&section_index)
}

pub fn record(
    records: &mut Vec<RecitationRecord>,
    today: CalendarDay,
    section_index: u8,
    amount: &str,
) -> Result<bool, String> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Ok(false);
    }
    if !valid_juz(section_index) {
        return Err(format!("juz must be between 1 and {JUZ_COUNT}"));
    }
    records.insert(
        0,
        RecitationRecord {
            date: today,
            section_index,
            amount: amount.to_string(),
        },
    );
    Ok(true)
}
