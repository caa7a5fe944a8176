//! Ad hoc event selection for listings.

use crate::category::Category;
use crate::event::Event;
use crate::parser::ParsedLog;
use crate::types::{DayQuery, LogDate};

/// Criteria for an event listing. Unset fields match everything; set fields
/// must all match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub day: Option<DayQuery>,
    pub category: Option<Category>,
    /// Description must contain this.
    pub include: Option<String>,
    /// Description must not contain this.
    pub exclude: Option<String>,
}

/// Day criterion after resolving [`DayQuery::Latest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayFilter {
    Any,
    On(LogDate),
    /// `Latest` over an empty log.
    Never,
}

impl DayFilter {
    fn resolve(query: Option<DayQuery>, events: &[Event]) -> Self {
        match query {
            None => Self::Any,
            Some(DayQuery::Date(date)) => Self::On(date),
            Some(DayQuery::Latest) => events.last().map_or(Self::Never, |e| Self::On(e.date)),
        }
    }

    fn matches(self, date: LogDate) -> bool {
        match self {
            Self::Any => true,
            Self::On(wanted) => wanted == date,
            Self::Never => false,
        }
    }
}

impl EventQuery {
    fn matches(&self, day: DayFilter, event: &Event) -> bool {
        day.matches(event.date)
            && self.category.is_none_or(|c| c == event.category)
            && self.include.as_deref().is_none_or(|s| event.mentions(s))
            && self.exclude.as_deref().is_none_or(|s| !event.mentions(s))
    }
}

/// Lazily yields matching events and sums their durations as it goes.
///
/// The first match is yielded but left out of [`Selection::total`], the same
/// way the table leaves out each day's wake-up entry.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    events: std::slice::Iter<'a, Event>,
    query: &'a EventQuery,
    day: DayFilter,
    matched: usize,
    total: f64,
}

impl Selection<'_> {
    /// Hours of every match yielded so far except the first.
    pub const fn total(&self) -> f64 {
        self.total
    }

    /// Number of matches yielded so far.
    pub const fn matched(&self) -> usize {
        self.matched
    }

    /// Resolved day filter, if the query restricted the day.
    pub const fn day(&self) -> Option<LogDate> {
        match self.day {
            DayFilter::On(date) => Some(date),
            DayFilter::Any | DayFilter::Never => None,
        }
    }
}

impl<'a> Iterator for Selection<'a> {
    type Item = &'a Event;

    fn next(&mut self) -> Option<Self::Item> {
        let (query, day) = (self.query, self.day);
        let event = self.events.find(|e| query.matches(day, e))?;
        if self.matched > 0 {
            self.total += event.duration;
        }
        self.matched += 1;
        Some(event)
    }
}

/// Selects the events matching `query`, in log order.
pub fn select<'a>(events: &'a [Event], query: &'a EventQuery) -> Selection<'a> {
    Selection {
        events: events.iter(),
        query,
        day: DayFilter::resolve(query.day, events),
        matched: 0,
        total: 0.0,
    }
}

impl ParsedLog {
    /// Selects this log's events matching `query`.
    pub fn select<'a>(&'a self, query: &'a EventQuery) -> Selection<'a> {
        select(&self.events, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    const EPS: f64 = 1e-9;

    const LOG: &str = "\
$ May 2015
# Fri 1
700 wake_fff
900 plan orgz_t
1000 email_t
1200 refactor orgz_tt
# Sat 2
800 wake_fff
930 sort papers orgz_f
1000 call mom_b
";

    fn descriptions<'a>(selection: impl Iterator<Item = &'a Event>) -> Vec<&'a str> {
        selection.map(|e| e.description.as_str()).collect()
    }

    #[test]
    fn empty_query_selects_everything() {
        let log = parse_str(LOG).unwrap();
        let query = EventQuery::default();
        assert_eq!(log.select(&query).count(), log.events.len());
    }

    #[test]
    fn include_keeps_matching_descriptions() {
        let log = parse_str(LOG).unwrap();
        let query = EventQuery {
            include: Some("orgz".into()),
            ..EventQuery::default()
        };
        let mut selection = log.select(&query);
        let found = descriptions(selection.by_ref());

        assert_eq!(found, vec!["plan orgz", "refactor orgz", "sort papers orgz"]);
        // First match (2h) shown but not summed: 2h + 1.5h.
        assert!((selection.total() - 3.5).abs() < EPS);
        assert_eq!(selection.matched(), 3);
    }

    #[test]
    fn exclude_drops_matching_descriptions() {
        let log = parse_str(LOG).unwrap();
        let query = EventQuery {
            exclude: Some("orgz".into()),
            ..EventQuery::default()
        };
        assert_eq!(
            descriptions(log.select(&query)),
            vec!["wake", "email", "wake", "call mom"]
        );
    }

    #[test]
    fn category_and_day_combine() {
        let log = parse_str(LOG).unwrap();
        let query = EventQuery {
            day: Some(DayQuery::Date(LogDate::new(5, 1).unwrap())),
            category: Some(Category::Task1),
            ..EventQuery::default()
        };
        let mut selection = log.select(&query);
        assert_eq!(descriptions(selection.by_ref()), vec!["plan orgz", "email"]);
        assert!((selection.total() - 1.0).abs() < EPS);
    }

    #[test]
    fn latest_resolves_to_last_event_day() {
        let log = parse_str(LOG).unwrap();
        let query = EventQuery {
            day: Some(DayQuery::Latest),
            ..EventQuery::default()
        };
        let mut selection = log.select(&query);
        assert_eq!(selection.day(), LogDate::new(5, 2).ok());
        assert_eq!(
            descriptions(selection.by_ref()),
            vec!["wake", "sort papers orgz", "call mom"]
        );
        // Wake-up listed, total is 1.5h + 0.5h.
        assert!((selection.total() - 2.0).abs() < EPS);
    }

    #[test]
    fn latest_on_empty_log_matches_nothing() {
        let query = EventQuery {
            day: Some(DayQuery::Latest),
            ..EventQuery::default()
        };
        let mut selection = select(&[], &query);
        assert!(selection.next().is_none());
        assert_eq!(selection.day(), None);
        assert!(selection.total().abs() < EPS);
    }

    #[test]
    fn single_match_has_zero_total() {
        let log = parse_str(LOG).unwrap();
        let query = EventQuery {
            include: Some("mom".into()),
            ..EventQuery::default()
        };
        let mut selection = log.select(&query);
        assert_eq!(selection.by_ref().count(), 1);
        assert!(selection.total().abs() < EPS);
    }

    #[test]
    fn total_grows_as_selection_is_consumed() {
        let log = parse_str(LOG).unwrap();
        let query = EventQuery::default();
        let mut selection = log.select(&query);
        selection.next();
        assert!(selection.total().abs() < EPS);
        selection.next();
        assert!((selection.total() - 2.0).abs() < EPS);
    }
}
