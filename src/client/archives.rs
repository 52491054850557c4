use anyhow::Result;
use std::collections::HashMap;
use std::future::Future;

use crate::domain::WeeklyArchive;

/// Anything that can fetch one archived week's leaderboard
pub trait LeaderboardSource {
    fn fetch_week(
        &self,
        week_start: &str,
    ) -> impl Future<Output = Result<Vec<WeeklyArchive>>> + Send;
}

#[derive(Debug, Default)]
struct WeekPanel {
    expanded: bool,
    leaderboard: Option<Vec<WeeklyArchive>>,
}

/// Expand/collapse state for archived-week panels with per-week
/// memoization: a week's leaderboard is fetched at most once, on the
/// first expand, and kept for every expand after that. Collapsing is
/// always reversible and never drops fetched data.
#[derive(Debug, Default)]
pub struct ArchiveBrowser {
    panels: HashMap<String, WeekPanel>,
}

impl ArchiveBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a week's panel. The first expand fetches through `source`;
    /// a failed fetch leaves the panel collapsed and surfaces the error.
    /// Returns whether the panel is expanded afterwards.
    pub async fn toggle<S: LeaderboardSource>(
        &mut self,
        source: &S,
        week_start: &str,
    ) -> Result<bool> {
        if self.is_expanded(week_start) {
            if let Some(panel) = self.panels.get_mut(week_start) {
                panel.expanded = false;
            }
            return Ok(false);
        }

        if self.leaderboard(week_start).is_none() {
            let rows = source.fetch_week(week_start).await?;
            self.panels
                .entry(week_start.to_string())
                .or_default()
                .leaderboard = Some(rows);
        }

        let panel = self.panels.entry(week_start.to_string()).or_default();
        panel.expanded = true;
        Ok(true)
    }

    pub fn is_expanded(&self, week_start: &str) -> bool {
        self.panels
            .get(week_start)
            .map(|p| p.expanded)
            .unwrap_or(false)
    }

    /// The memoized leaderboard for a week, if it has ever been fetched
    pub fn leaderboard(&self, week_start: &str) -> Option<&[WeeklyArchive]> {
        self.panels
            .get(week_start)?
            .leaderboard
            .as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl LeaderboardSource for CountingSource {
        async fn fetch_week(&self, week_start: &str) -> Result<Vec<WeeklyArchive>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("No archived data found for week starting {}", week_start);
            }
            Ok(vec![WeeklyArchive {
                id: 1,
                week_start: week_start.to_string(),
                week_end: "2025-01-11T23:59:59".to_string(),
                winner_id: 1,
                player_id: 1,
                player_name: "Ada".to_string(),
                wins: 2,
                losses: 0,
                points: 6,
                rank: 1,
            }])
        }
    }

    const WEEK: &str = "2025-01-05T00:00:00";

    #[tokio::test]
    async fn first_expand_fetches_once() {
        let source = CountingSource::new(false);
        let mut browser = ArchiveBrowser::new();

        assert!(!browser.is_expanded(WEEK));
        assert!(browser.toggle(&source, WEEK).await.unwrap());
        assert!(browser.is_expanded(WEEK));
        assert_eq!(source.calls(), 1);
        assert_eq!(browser.leaderboard(WEEK).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reexpanding_uses_the_memoized_leaderboard() {
        let source = CountingSource::new(false);
        let mut browser = ArchiveBrowser::new();

        browser.toggle(&source, WEEK).await.unwrap();
        assert!(!browser.toggle(&source, WEEK).await.unwrap());
        assert!(!browser.is_expanded(WEEK));
        // Data survives the collapse
        assert!(browser.leaderboard(WEEK).is_some());

        assert!(browser.toggle(&source, WEEK).await.unwrap());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn weeks_are_memoized_independently() {
        let source = CountingSource::new(false);
        let mut browser = ArchiveBrowser::new();

        browser.toggle(&source, WEEK).await.unwrap();
        browser.toggle(&source, "2025-01-12T00:00:00").await.unwrap();

        assert_eq!(source.calls(), 2);
        assert!(browser.is_expanded(WEEK));
        assert!(browser.is_expanded("2025-01-12T00:00:00"));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_panel_collapsed() {
        let source = CountingSource::new(true);
        let mut browser = ArchiveBrowser::new();

        let err = browser.toggle(&source, WEEK).await.unwrap_err();
        assert!(err.to_string().contains("No archived data"));
        assert!(!browser.is_expanded(WEEK));
        assert!(browser.leaderboard(WEEK).is_none());

        // A later toggle retries the fetch; failure is not memoized
        let _ = browser.toggle(&source, WEEK).await;
        assert_eq!(source.calls(), 2);
    }
}
