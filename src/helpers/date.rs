use chrono::{DateTime, Utc};

/// Format used by the `x-date` header of the transit API.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Seconds since the unix epoch, always UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    seconds: i64,
}

impl Timestamp {
    pub fn new(seconds: i64) -> Self {
        Self { seconds }
    }

    pub fn now() -> Self {
        Self::new(Utc::now().timestamp())
    }

    /// Parses the decimal wire representation. Surrounding whitespace is not accepted.
    pub fn parse(value: &str) -> Option<Self> {
        value.parse::<i64>().ok().map(Self::new)
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn plus(&self, seconds: i64) -> Self {
        Self::new(self.seconds.saturating_add(seconds))
    }

    pub fn minus(&self, seconds: i64) -> Self {
        Self::new(self.seconds.saturating_sub(seconds))
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.seconds, 0).unwrap_or_default()
    }

    /// Renders the timestamp as `Thu, 12 Jul 2018 18:36:58 GMT`.
    /// Weekday and month names are fixed english abbreviations regardless of locale.
    pub fn to_http_date(&self) -> String {
        self.to_datetime().format(HTTP_DATE_FORMAT).to_string()
    }
}
