use std::time::Duration;

pub trait Pluralize {
    fn pluralize(&self, count: u32) -> String;
}

impl Pluralize for str {
    fn pluralize(&self, count: u32) -> String {
        if count == 1 {
            self.to_string()
        } else {
            format!("{}s", self)
        }
    }
}

/// `mm:ss`, truncating sub-second precision. Minutes keep growing past 99.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// How close a guess is on a 0..=100 scale, 100 being the secret itself.
pub fn proximity_percent(guess: u32, secret: u32, bound: u32) -> u8 {
    let max_distance = bound.saturating_sub(1).max(1) as f64;
    let distance = guess.abs_diff(secret) as f64;
    let percent = ((1.0 - distance / max_distance) * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}
