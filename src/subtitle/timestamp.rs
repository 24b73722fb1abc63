use crate::foundation::error::{EventkitError, EventkitResult};

/// SRT cue timestamp (`HH:MM:SS,mmm`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SrtTimestamp {
    pub hours: u32,
    pub minutes: u8,
    pub seconds: u8,
    pub millis: u16,
}

impl SrtTimestamp {
    pub fn new(hours: u32, minutes: u8, seconds: u8, millis: u16) -> EventkitResult<Self> {
        if minutes > 59 || seconds > 59 || millis > 999 {
            return Err(EventkitError::validation(format!(
                "timestamp field out of range: {hours}:{minutes}:{seconds},{millis}"
            )));
        }
        Ok(Self {
            hours,
            minutes,
            seconds,
            millis,
        })
    }

    /// Parse `HH:MM:SS,mmm`. A `.` fraction separator is accepted as well.
    pub fn parse(s: &str) -> EventkitResult<Self> {
        let bad = || EventkitError::validation(format!("invalid SRT timestamp '{s}'"));

        let (clock, frac) = s.trim().split_once([',', '.']).ok_or_else(bad)?;
        let mut parts = clock.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(bad());
        };

        let digits = |p: &str, len: Option<usize>| -> Option<u32> {
            if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            if len.is_some_and(|n| p.len() != n) {
                return None;
            }
            p.parse().ok()
        };

        let hours = digits(h, None).ok_or_else(bad)?;
        let minutes = digits(m, Some(2)).ok_or_else(bad)?;
        let seconds = digits(sec, Some(2)).ok_or_else(bad)?;
        let millis = digits(frac, Some(3)).ok_or_else(bad)?;

        Self::new(hours, minutes as u8, seconds as u8, millis as u16)
    }

    pub fn centiseconds(self) -> u16 {
        self.millis / 10
    }

    /// `H:MM:SS.cc`, centiseconds truncated from milliseconds.
    pub fn to_ass(self) -> String {
        format!(
            "{}:{:02}:{:02}.{:02}",
            self.hours,
            self.minutes,
            self.seconds,
            self.centiseconds()
        )
    }

    pub fn total_millis(self) -> u64 {
        ((u64::from(self.hours) * 60 + u64::from(self.minutes)) * 60 + u64::from(self.seconds))
            * 1000
            + u64::from(self.millis)
    }
}

impl std::fmt::Display for SrtTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

impl std::str::FromStr for SrtTimestamp {
    type Err = EventkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Reformat an `HH:MM:SS,mmm` string straight to ASS `H:MM:SS.cc`.
pub fn srt_to_ass_time(s: &str) -> EventkitResult<String> {
    Ok(SrtTimestamp::parse(s)?.to_ass())
}

#[cfg(test)]
#[path = "../../tests/unit/subtitle/timestamp.rs"]
mod tests;
