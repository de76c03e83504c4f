use crate::common::get_current_time_or_zero;
use log::warn;
use parking_lot::Mutex;
use rand::rngs::OsRng;
use rand::Rng;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates candidate document identifiers.
///
/// A candidate is the current wall-clock time in milliseconds followed by a
/// base36 rendering of a random 64-bit value. Candidates are astronomically
/// unlikely to collide but are not guaranteed unique; the insert path detects
/// collisions with an exclusive create and retries with a fresh candidate.
///
/// The millis component is kept non-decreasing under a mutex so a backwards
/// clock step cannot produce identifiers that sort before already-issued ones.
pub struct IdGenerator {
    last_timestamp: Mutex<u128>,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator {
            last_timestamp: Mutex::new(0),
        }
    }

    /// Produces a fresh candidate identifier.
    pub fn next_id(&self) -> String {
        let timestamp = self.monotonic_millis();
        let suffix = OsRng.gen::<u64>();
        format!("{}{}", timestamp, to_base36(suffix))
    }

    fn monotonic_millis(&self) -> u128 {
        let mut last = self.last_timestamp.lock();
        let current = get_current_time_or_zero();

        // Handle clock moving backwards by reusing the last observed value
        let timestamp = if current < *last {
            warn!("Clock moved backwards, keeping timestamp {}", *last);
            *last
        } else {
            current
        };

        *last = timestamp;
        timestamp
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        IdGenerator::new()
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();

    // the alphabet is ASCII
    String::from_utf8(digits).expect("base36 digits are valid UTF-8")
}
