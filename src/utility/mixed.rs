
use regex::Regex;
use chrono::Duration;

use std::pin::Pin;
use std::future::Future;


pub type Result<T> = std::result::Result<T, String>;
pub type BoxedFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub fn string_distance(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).filter(|(a, b)| a != b).count()
}

pub struct RegexManager;

impl RegexManager {

    pub fn get_id_regex() -> Regex {
        Regex::new(r"\d{17,20}").unwrap()
    }

    pub fn get_role_regex() -> Regex {
        Regex::new(r"<@&\d{17,20}>").unwrap()
    }

}

// parses durations like "30m", "12h" or "7d"
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    if input.len() < 2 {
        return None;
    }
    let (amount, unit) = input.split_at(input.len() - 1);
    let amount = amount.parse::<i64>().ok()?;
    match unit {
        "s" => Some(Duration::seconds(amount)),
        "m" => Some(Duration::minutes(amount)),
        "h" => Some(Duration::hours(amount)),
        "d" => Some(Duration::days(amount)),
        "w" => Some(Duration::weeks(amount)),
        _   => None,
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn durations_parse_with_unit_suffix() {
        assert_eq!(parse_duration("30m"), Some(Duration::minutes(30)));
        assert_eq!(parse_duration("7d"), Some(Duration::days(7)));
        assert_eq!(parse_duration("soon"), None);
        assert_eq!(parse_duration("m"), None);
    }

}
