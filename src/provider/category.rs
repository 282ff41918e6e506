//! Service categories: the closed set of locale-sensitive services.

use serde::Serialize;
use std::fmt;

/// A class of locale-sensitive service backed by pluggable adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCategory {
    BreakIterator,
    Collator,
    DateFormat,
    DateFormatSymbols,
    DecimalFormatSymbols,
    NumberFormat,
    CurrencyName,
    LocaleName,
    TimeZoneName,
    CalendarData,
}

impl ServiceCategory {
    /// Every category, in the order the cross-category aggregate visits them.
    pub const ALL: [ServiceCategory; 10] = [
        ServiceCategory::BreakIterator,
        ServiceCategory::Collator,
        ServiceCategory::DateFormat,
        ServiceCategory::DateFormatSymbols,
        ServiceCategory::DecimalFormatSymbols,
        ServiceCategory::NumberFormat,
        ServiceCategory::CurrencyName,
        ServiceCategory::LocaleName,
        ServiceCategory::TimeZoneName,
        ServiceCategory::CalendarData,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ServiceCategory::BreakIterator => "break-iterator",
            ServiceCategory::Collator => "collator",
            ServiceCategory::DateFormat => "date-format",
            ServiceCategory::DateFormatSymbols => "date-format-symbols",
            ServiceCategory::DecimalFormatSymbols => "decimal-format-symbols",
            ServiceCategory::NumberFormat => "number-format",
            ServiceCategory::CurrencyName => "currency-name",
            ServiceCategory::LocaleName => "locale-name",
            ServiceCategory::TimeZoneName => "time-zone-name",
            ServiceCategory::CalendarData => "calendar-data",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_is_complete_and_unique() {
        let unique: HashSet<_> = ServiceCategory::ALL.iter().collect();
        assert_eq!(unique.len(), ServiceCategory::ALL.len());
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(ServiceCategory::CurrencyName.to_string(), "currency-name");
        assert_eq!(ServiceCategory::BreakIterator.to_string(), "break-iterator");
    }

    #[test]
    fn test_serializes_as_name() {
        for category in ServiceCategory::ALL {
            let json = serde_json::to_value(category).expect("serialize");
            assert_eq!(json, category.name());
        }
    }
}
