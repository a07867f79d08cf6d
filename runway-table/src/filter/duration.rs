//! Duration range units.
//!
//! Duration filters always store seconds; the unit only changes what the
//! editor shows and how typed numbers are scaled.

/// Display unit of a duration editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DurationUnit {
    #[default]
    Second,
    Minute,
    Hour,
    Day,
}

impl DurationUnit {
    /// All units in picker order.
    pub const ALL: [DurationUnit; 4] = [
        DurationUnit::Second,
        DurationUnit::Minute,
        DurationUnit::Hour,
        DurationUnit::Day,
    ];

    /// Seconds in one of this unit.
    pub fn seconds(self) -> f64 {
        match self {
            DurationUnit::Second => 1.0,
            DurationUnit::Minute => 60.0,
            DurationUnit::Hour => 3_600.0,
            DurationUnit::Day => 86_400.0,
        }
    }

    /// Picker label.
    pub fn label(self) -> &'static str {
        match self {
            DurationUnit::Second => "Seconds",
            DurationUnit::Minute => "Minutes",
            DurationUnit::Hour => "Hours",
            DurationUnit::Day => "Days",
        }
    }

    /// Converts stored seconds to a number shown in this unit.
    pub fn from_seconds(self, seconds: Option<f64>) -> Option<f64> {
        seconds.map(|s| s / self.seconds())
    }

    /// Converts a number typed in this unit to stored seconds.
    pub fn to_seconds(self, input: Option<f64>) -> Option<f64> {
        input.map(|v| v * self.seconds())
    }
}

/// Formats seconds as `1h 2m 3s`, dropping zero parts (`0s` for zero).
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let hours = total / 3_600;
    let minutes = (total % 3_600) / 60;
    let secs = total % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}
