//! Collapses the weekday / Saturday / Sunday opening hours reported by a
//! source into the shortest list of day ranges, e.g. `пн - сб с 09:00 до 21:00`.

const MONDAY: &str = "пн";
const FRIDAY: &str = "пт";
const SATURDAY: &str = "сб";
const SUNDAY: &str = "вс";

/// Opening hours of one day group as the source reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySchedule {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_day_off: bool,
}

/// A day group reduced to the only two states that matter for formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayHours<'a> {
    Open { start: &'a str, end: &'a str },
    Closed,
}

/// The three day groups tracked per location. Weekdays are assumed uniform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekSchedule {
    pub workdays: DaySchedule,
    pub saturday: Option<DaySchedule>,
    pub sunday: Option<DaySchedule>,
}

impl DaySchedule {
    pub fn open(start: &str, end: &str) -> Self {
        Self {
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            is_day_off: false,
        }
    }

    pub fn day_off() -> Self {
        Self {
            start_time: None,
            end_time: None,
            is_day_off: true,
        }
    }

    /// Missing or empty bounds count as closed, same as an explicit day off.
    pub fn hours(&self) -> DayHours<'_> {
        if self.is_day_off {
            return DayHours::Closed;
        }
        match (self.start_time.as_deref(), self.end_time.as_deref()) {
            (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => {
                DayHours::Open { start, end }
            }
            _ => DayHours::Closed,
        }
    }
}

impl<'a> DayHours<'a> {
    fn from_group(group: Option<&'a DaySchedule>) -> Self {
        group.map_or(DayHours::Closed, DaySchedule::hours)
    }

    /// True when open with exactly these bounds. Times compare as strings.
    fn matches(&self, start: &str, end: &str) -> bool {
        matches!(self, DayHours::Open { start: s, end: e } if *s == start && *e == end)
    }
}

impl WeekSchedule {
    pub fn working_hours(&self) -> Vec<String> {
        compress(
            self.workdays.hours(),
            DayHours::from_group(self.saturday.as_ref()),
            DayHours::from_group(self.sunday.as_ref()),
        )
    }
}

/// Format the week as ordered day ranges.
///
/// Saturday joins the weekday range when its hours are identical, and Sunday
/// joins only a range that already took Saturday. So `пн - пт` and `вс` with
/// equal hours stay separate whenever Saturday differs.
pub fn compress(weekday: DayHours<'_>, saturday: DayHours<'_>, sunday: DayHours<'_>) -> Vec<String> {
    let mut result = Vec::new();
    let mut saturday_merged = false;
    let mut sunday_merged = false;

    if let DayHours::Open { start, end } = weekday {
        let mut last_day = FRIDAY;
        if saturday.matches(start, end) {
            saturday_merged = true;
            last_day = SATURDAY;
            if sunday.matches(start, end) {
                sunday_merged = true;
                last_day = SUNDAY;
            }
        }
        result.push(format!("{MONDAY} - {last_day} с {start} до {end}"));
    }

    if let DayHours::Open { start, end } = saturday {
        if !saturday_merged {
            if sunday.matches(start, end) {
                sunday_merged = true;
                result.push(format!("{SATURDAY} - {SUNDAY} с {start} до {end}"));
            } else {
                result.push(format!("{SATURDAY} с {start} до {end}"));
            }
        }
    }

    if let DayHours::Open { start, end } = sunday {
        if !sunday_merged {
            result.push(format!("{SUNDAY} с {start} до {end}"));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(
        workdays: DaySchedule,
        saturday: Option<DaySchedule>,
        sunday: Option<DaySchedule>,
    ) -> Vec<String> {
        WeekSchedule {
            workdays,
            saturday,
            sunday,
        }
        .working_hours()
    }

    #[test]
    fn test_all_closed_is_empty() {
        assert!(week(DaySchedule::day_off(), None, None).is_empty());
        assert!(week(
            DaySchedule::day_off(),
            Some(DaySchedule::day_off()),
            Some(DaySchedule::default()),
        )
        .is_empty());
    }

    #[test]
    fn test_identical_week_collapses_to_one_range() {
        let hours = week(
            DaySchedule::open("10:00", "22:00"),
            Some(DaySchedule::open("10:00", "22:00")),
            Some(DaySchedule::open("10:00", "22:00")),
        );
        assert_eq!(hours, vec!["пн - вс с 10:00 до 22:00"]);
    }

    #[test]
    fn test_saturday_only() {
        let hours = week(
            DaySchedule::day_off(),
            Some(DaySchedule::open("10:00", "18:00")),
            Some(DaySchedule::day_off()),
        );
        assert_eq!(hours, vec!["сб с 10:00 до 18:00"]);
    }

    #[test]
    fn test_saturday_joins_weekdays() {
        let hours = week(
            DaySchedule::open("09:00", "21:00"),
            Some(DaySchedule::open("09:00", "21:00")),
            Some(DaySchedule::day_off()),
        );
        assert_eq!(hours, vec!["пн - сб с 09:00 до 21:00"]);
    }

    #[test]
    fn test_weekend_range_separate_from_weekdays() {
        let hours = week(
            DaySchedule::open("09:00", "21:00"),
            Some(DaySchedule::open("10:00", "20:00")),
            Some(DaySchedule::open("10:00", "20:00")),
        );
        assert_eq!(
            hours,
            vec!["пн - пт с 09:00 до 21:00", "сб - вс с 10:00 до 20:00"]
        );
    }

    #[test]
    fn test_sunday_never_skips_over_saturday() {
        let hours = week(
            DaySchedule::open("09:00", "21:00"),
            Some(DaySchedule::open("10:00", "18:00")),
            Some(DaySchedule::open("09:00", "21:00")),
        );
        assert_eq!(
            hours,
            vec![
                "пн - пт с 09:00 до 21:00",
                "сб с 10:00 до 18:00",
                "вс с 09:00 до 21:00",
            ]
        );
    }

    #[test]
    fn test_sunday_matching_weekdays_without_saturday() {
        let hours = week(
            DaySchedule::open("09:00", "21:00"),
            None,
            Some(DaySchedule::open("09:00", "21:00")),
        );
        assert_eq!(
            hours,
            vec!["пн - пт с 09:00 до 21:00", "вс с 09:00 до 21:00"]
        );
    }

    #[test]
    fn test_weekend_only_range() {
        let hours = week(
            DaySchedule::day_off(),
            Some(DaySchedule::open("11:00", "17:00")),
            Some(DaySchedule::open("11:00", "17:00")),
        );
        assert_eq!(hours, vec!["сб - вс с 11:00 до 17:00"]);
    }

    #[test]
    fn test_day_off_flag_wins_over_times() {
        let mut saturday = DaySchedule::open("09:00", "21:00");
        saturday.is_day_off = true;
        let hours = week(DaySchedule::open("09:00", "21:00"), Some(saturday), None);
        assert_eq!(hours, vec!["пн - пт с 09:00 до 21:00"]);
    }

    #[test]
    fn test_missing_or_empty_bound_is_closed() {
        let half_open = DaySchedule {
            start_time: Some("09:00".into()),
            end_time: None,
            is_day_off: false,
        };
        assert_eq!(half_open.hours(), DayHours::Closed);

        let empty_end = DaySchedule {
            start_time: Some("09:00".into()),
            end_time: Some(String::new()),
            is_day_off: false,
        };
        assert_eq!(empty_end.hours(), DayHours::Closed);
        assert_eq!(
            week(half_open, None, Some(DaySchedule::open("10:00", "16:00"))),
            vec!["вс с 10:00 до 16:00"]
        );
    }

    #[test]
    fn test_times_compare_as_strings() {
        let hours = week(
            DaySchedule::open("9:00", "21:00"),
            Some(DaySchedule::open("09:00", "21:00")),
            None,
        );
        assert_eq!(
            hours,
            vec!["пн - пт с 9:00 до 21:00", "сб с 09:00 до 21:00"]
        );
    }
}
