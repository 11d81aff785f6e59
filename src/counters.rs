use crate::models::TallyCounter;

#[derive(Debug, PartialEq, Eq)]
pub enum CounterError {
    NotFound(u64),
}

pub fn increment(counters: &mut [TallyCounter], id: u64) -> Result<&TallyCounter, CounterError> {
    let counter = find_mut(counters, id)?;
    counter.count = counter.count.saturating_add(1);
    Ok(counter)
}

pub fn reset(counters: &mut [TallyCounter], id: u64) -> Result<&TallyCounter, CounterError> {
    let counter = find_mut(counters, id)?;
    counter.count = 0;
    Ok(counter)
}

pub fn add(counters: &mut Vec<TallyCounter>, name: &str, target: Option<u64>) -> Option<u64> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let id = counters.iter().map(|c| c.id).max().unwrap_or(0) + 1;
    counters.push(TallyCounter {
        id,
        name: name.to_string(),
        count: 0,
        target,
    });
    Some(id)
}

pub fn delete(counters: &mut Vec<TallyCounter>, id: u64) -> Result<bool, CounterError> {
    if !counters.iter().any(|c| c.id == id) {
        return Err(CounterError::NotFound(id));
    }
    if counters.len() == 1 {
        return Ok(false);
    }
    counters.retain(|c| c.id != id);
    Ok(true)
}

fn find_mut(counters: &mut [TallyCounter], id: u64) -> Result<&mut TallyCounter, CounterError> {
    counters
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(CounterError::NotFound(id))
}
