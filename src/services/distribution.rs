use crate::models::{CommitEvent, RepositorySummary};
use crate::utils::timezone::ReportTimezone;
use chrono::Weekday;
use std::collections::HashMap;
use std::hash::Hash;

/// Bucket counts plus the key that first reached the highest count.
#[derive(Clone, Debug)]
pub struct Distribution<K> {
    counts: HashMap<K, u64>,
    total: u64,
    leader: Option<(K, u64)>,
}

impl<K: Eq + Hash + Clone> Default for Distribution<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            total: 0,
            leader: None,
        }
    }
}

impl<K: Eq + Hash + Clone> Distribution<K> {
    /// Count one event. Only a strictly greater count takes over the lead, so
    /// ties stay with whichever key got there first.
    pub fn record(&mut self, key: K) {
        let count = self.counts.entry(key.clone()).or_insert(0);
        *count += 1;
        self.total += 1;

        let current = *count;
        let leading = self.leader.as_ref().map_or(0, |(_, best)| *best);
        if current > leading {
            self.leader = Some((key, current));
        }
    }

    pub fn count(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn leader(&self) -> Option<&K> {
        self.leader.as_ref().map(|(key, _)| key)
    }

    /// Fraction of all recorded events that landed in `key`; 0 when empty.
    pub fn share(&self, key: &K) -> f64 {
        ratio(self.count(key), self.total)
    }
}

impl<K: Eq + Hash + Clone + Ord> Distribution<K> {
    pub fn sorted_keys(&self) -> Vec<&K> {
        let mut keys: Vec<&K> = self.counts.keys().collect();
        keys.sort();
        keys
    }
}

pub fn ratio(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeBucket {
    Night,
    Morning,
    Daytime,
    Evening,
}

impl TimeBucket {
    /// Rendering order, which intentionally starts at Morning.
    pub const DISPLAY_ORDER: [TimeBucket; 4] = [
        TimeBucket::Morning,
        TimeBucket::Daytime,
        TimeBucket::Evening,
        TimeBucket::Night,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeBucket::Night,
            6..=11 => TimeBucket::Morning,
            12..=17 => TimeBucket::Daytime,
            _ => TimeBucket::Evening,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeBucket::Night => "Night",
            TimeBucket::Morning => "Morning",
            TimeBucket::Daytime => "Daytime",
            TimeBucket::Evening => "Evening",
        }
    }
}

pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// The three commit distributions, built in one pass over the same events.
#[derive(Clone, Debug, Default)]
pub struct CommitDistributions {
    pub by_time: Distribution<TimeBucket>,
    pub by_weekday: Distribution<Weekday>,
    pub by_repository: Distribution<String>,
}

impl CommitDistributions {
    pub fn from_events(events: &[CommitEvent], timezone: &ReportTimezone) -> Self {
        let mut distributions = Self::default();

        for event in events {
            let (hour, weekday) = timezone.hour_and_weekday(event.timestamp);
            distributions.by_time.record(TimeBucket::from_hour(hour));
            distributions.by_weekday.record(weekday);
            distributions
                .by_repository
                .record(event.repository_name.clone());
        }

        distributions
    }

    pub fn total(&self) -> u64 {
        self.by_time.total()
    }
}

#[derive(Clone, Debug, Default)]
pub struct LanguageDistribution {
    pub languages: Distribution<String>,
    pub public_repositories: u64,
    pub private_repositories: u64,
}

impl LanguageDistribution {
    pub fn from_repositories(repositories: &[RepositorySummary]) -> Self {
        let mut distribution = Self::default();

        for repo in repositories {
            distribution
                .languages
                .record(repo.display_language().to_string());
            if repo.is_private {
                distribution.private_repositories += 1;
            } else {
                distribution.public_repositories += 1;
            }
        }

        distribution
    }
}
