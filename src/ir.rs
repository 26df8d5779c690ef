use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("malformed timestamp `{0}`: expected HH:MM:SS.micros")]
    Malformed(String),
    #[error("timestamp component out of range in `{0}`")]
    OutOfRange(String),
}

/// Time of day with microsecond precision, as emitted by the trace logger.
/// Logs are assumed not to cross midnight; ordering is within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    micros: i64,
}

impl Timestamp {
    pub fn from_micros(micros: i64) -> Self {
        Self { micros }
    }

    pub fn as_micros(&self) -> i64 {
        self.micros
    }

    pub fn parse(text: &str) -> Result<Self, TimeParseError> {
        let malformed = || TimeParseError::Malformed(text.to_string());
        let (clock, frac) = text.split_once('.').ok_or_else(malformed)?;
        let fields: Vec<&str> = clock.split(':').collect();
        if fields.len() != 3 {
            return Err(malformed());
        }
        let hour: u32 = fields[0].parse().map_err(|_| malformed())?;
        let minute: u32 = fields[1].parse().map_err(|_| malformed())?;
        let second: u32 = fields[2].parse().map_err(|_| malformed())?;
        if frac.is_empty() || frac.len() > 6 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        if hour > 23 || minute > 59 || second > 59 {
            return Err(TimeParseError::OutOfRange(text.to_string()));
        }
        // Fractions shorter than six digits are left-aligned: ".5" is 500ms.
        let sub: i64 = frac.parse().map_err(|_| malformed())?;
        let sub = sub * 10_i64.pow(6 - frac.len() as u32);
        let seconds = i64::from(hour) * 3600 + i64::from(minute) * 60 + i64::from(second);
        Ok(Self {
            micros: seconds * 1_000_000 + sub,
        })
    }

    pub fn micros_since(&self, earlier: Timestamp) -> i64 {
        self.micros - earlier.micros
    }

    pub fn seconds_since(&self, earlier: Timestamp) -> f64 {
        self.micros_since(earlier) as f64 / 1_000_000.0
    }

    pub fn add_micros(&self, delta: i64) -> Timestamp {
        Timestamp {
            micros: self.micros + delta,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.micros.div_euclid(1_000_000);
        let sub = self.micros.rem_euclid(1_000_000);
        write!(
            f,
            "{:02}:{:02}:{:02}.{:06}",
            (seconds / 3600) % 24,
            (seconds / 60) % 60,
            seconds % 60,
            sub
        )
    }
}

#[derive(Debug, Clone)]
pub struct LogMessage {
    pub timestamp: Timestamp,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct LogSection {
    pub name: String,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub children: Vec<SectionChild>,
}

#[derive(Debug, Clone)]
pub enum SectionChild {
    Section(LogSection),
    Message(LogMessage),
}

impl LogSection {
    pub fn new(name: &str, start_time: Timestamp) -> Self {
        Self {
            name: name.to_string(),
            start_time,
            end_time: None,
            children: Vec::new(),
        }
    }

    pub fn duration_micros(&self) -> Option<i64> {
        self.end_time.map(|end| end.micros_since(self.start_time))
    }

    pub fn child_sections(&self) -> impl Iterator<Item = &LogSection> {
        self.children.iter().filter_map(|child| match child {
            SectionChild::Section(section) => Some(section),
            SectionChild::Message(_) => None,
        })
    }
}

impl SectionChild {
    /// Position on the time axis used when ordering mixed children:
    /// a message sits at its timestamp, a section at its start.
    pub fn anchor_time(&self) -> Timestamp {
        match self {
            SectionChild::Section(section) => section.start_time,
            SectionChild::Message(message) => message.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_precision() {
        let ts = Timestamp::parse("12:34:56.789012").unwrap();
        assert_eq!(
            ts.as_micros(),
            (12 * 3600 + 34 * 60 + 56) * 1_000_000 + 789_012
        );
    }

    #[test]
    fn parse_short_fraction_left_aligned() {
        let ts = Timestamp::parse("00:00:01.5").unwrap();
        assert_eq!(ts.as_micros(), 1_500_000);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            Timestamp::parse("not a time"),
            Err(TimeParseError::Malformed(_))
        ));
        assert!(matches!(
            Timestamp::parse("12:34:56"),
            Err(TimeParseError::Malformed(_))
        ));
        assert!(matches!(
            Timestamp::parse("12:34:56.1234567"),
            Err(TimeParseError::Malformed(_))
        ));
    }

    #[test]
    fn parse_rejects_out_of_range() {
        assert!(matches!(
            Timestamp::parse("24:00:00.000000"),
            Err(TimeParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Timestamp::parse("12:60:00.000000"),
            Err(TimeParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn display_round_trips() {
        let text = "09:08:07.000654";
        assert_eq!(Timestamp::parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn duration_requires_end() {
        let start = Timestamp::parse("10:00:00.000000").unwrap();
        let mut section = LogSection::new("work", start);
        assert_eq!(section.duration_micros(), None);
        section.end_time = Some(start.add_micros(2_500_000));
        assert_eq!(section.duration_micros(), Some(2_500_000));
    }

    #[test]
    fn anchor_time_by_variant() {
        let start = Timestamp::parse("10:00:00.000000").unwrap();
        let section = SectionChild::Section(LogSection::new("s", start));
        let message = SectionChild::Message(LogMessage {
            timestamp: start.add_micros(10),
            message: "m".to_string(),
        });
        assert_eq!(section.anchor_time(), start);
        assert_eq!(message.anchor_time(), start.add_micros(10));
    }
}
