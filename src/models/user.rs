use serde::{Deserialize, Serialize};

/// A registered account. Stored as a full JSON body in the `users`
/// collection (cloud mode) or in the local user list (offline mode).
///
/// The password is stored and compared in clear text. That is a deliberate,
/// documented shortcut of this demo system, not an oversight; anything
/// production-facing must hash credentials instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned in cloud mode, synthesized in offline mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Anime ids, insertion-ordered. Membership is what matters.
    #[serde(default)]
    pub watchlist: Vec<String>,
    /// Append-ordered, at most one entry per anime id.
    #[serde(default)]
    pub watch_history: Vec<WatchEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchEntry {
    pub anime_id: String,
    pub episode_id: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl User {
    /// Records a watch event, keeping at most one history entry per anime.
    ///
    /// Any prior entry for the same anime is dropped before the new one is
    /// appended, so the history always holds the last-watched episode per
    /// series. Re-recording the episode that is already the most recent
    /// entry for that anime is a no-op (the original timestamp survives).
    pub fn record_watch(&mut self, anime_id: &str, episode_id: &str, timestamp: i64) {
        if let Some(last) = self.watch_history.last()
            && last.anime_id == anime_id
            && last.episode_id == episode_id
        {
            return;
        }

        self.watch_history.retain(|h| h.anime_id != anime_id);
        self.watch_history.push(WatchEntry {
            anime_id: anime_id.to_string(),
            episode_id: episode_id.to_string(),
            timestamp,
        });
    }

    /// Adds the anime to the watchlist if absent, removes it if present.
    /// Returns the new membership state.
    pub fn toggle_watchlist(&mut self, anime_id: &str) -> bool {
        if let Some(pos) = self.watchlist.iter().position(|id| id == anime_id) {
            self.watchlist.remove(pos);
            false
        } else {
            self.watchlist.push(anime_id.to_string());
            true
        }
    }

    /// The continue-watching entry for a series, if any.
    #[must_use]
    pub fn last_watched(&self, anime_id: &str) -> Option<&WatchEntry> {
        self.watch_history.iter().find(|h| h.anime_id == anime_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: None,
            name: "Viewer".to_string(),
            email: "viewer@example.com".to_string(),
            password: "secret".to_string(),
            is_admin: false,
            watchlist: vec![],
            watch_history: vec![],
        }
    }

    #[test]
    fn record_watch_keeps_one_entry_per_anime() {
        let mut u = user();
        u.record_watch("a1", "ep-1", 100);
        u.record_watch("a1", "ep-2", 200);

        assert_eq!(u.watch_history.len(), 1);
        assert_eq!(u.watch_history[0].episode_id, "ep-2");
        assert_eq!(u.watch_history[0].timestamp, 200);
    }

    #[test]
    fn record_watch_preserves_other_series() {
        let mut u = user();
        u.record_watch("a1", "ep-1", 100);
        u.record_watch("a2", "ep-9", 150);
        u.record_watch("a1", "ep-3", 200);

        assert_eq!(u.watch_history.len(), 2);
        // The re-watched series moves to the tail.
        assert_eq!(u.watch_history[0].anime_id, "a2");
        assert_eq!(u.watch_history[1].anime_id, "a1");
        assert_eq!(u.last_watched("a1").unwrap().episode_id, "ep-3");
    }

    #[test]
    fn record_watch_same_episode_twice_is_a_noop() {
        let mut u = user();
        u.record_watch("a1", "ep-1", 100);
        u.record_watch("a1", "ep-1", 999);

        assert_eq!(u.watch_history.len(), 1);
        assert_eq!(u.watch_history[0].timestamp, 100);
    }

    #[test]
    fn toggle_watchlist_round_trips() {
        let mut u = user();
        assert!(u.toggle_watchlist("a1"));
        assert_eq!(u.watchlist, vec!["a1".to_string()]);

        assert!(!u.toggle_watchlist("a1"));
        assert!(u.watchlist.is_empty());
    }

    #[test]
    fn toggle_watchlist_never_duplicates() {
        let mut u = user();
        u.toggle_watchlist("a1");
        u.toggle_watchlist("a2");
        u.toggle_watchlist("a1");
        u.toggle_watchlist("a1");

        assert_eq!(u.watchlist.iter().filter(|id| *id == "a1").count(), 1);
    }
}
