use super::PostId;

/// Largest number of posts a single feed query may request.
pub const FEED_WINDOW_MAX: usize = 50;

/// Returns true if `count` is an acceptable feed window (1 to 50).
pub fn feed_window_is_valid(count: usize) -> bool {
    (1..=FEED_WINDOW_MAX).contains(&count)
}

/// Compute the ids of the latest posts, newest first, given a dense id space
/// 1..=`total_posts`. Returns at most `count` ids; fewer when the ledger
/// holds fewer posts than requested.
pub fn latest_post_ids(total_posts: u64, count: usize) -> Vec<PostId> {
    (1..=total_posts).rev().take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_window_bounds() {
        assert!(!feed_window_is_valid(0));
        assert!(feed_window_is_valid(1));
        assert!(feed_window_is_valid(FEED_WINDOW_MAX));
        assert!(!feed_window_is_valid(FEED_WINDOW_MAX + 1));
    }

    #[test]
    fn test_latest_ids_newest_first() {
        assert_eq!(latest_post_ids(5, 3), vec![5, 4, 3]);
    }

    #[test]
    fn test_latest_ids_under_supply() {
        // Fewer posts than requested: return them all, never pad
        assert_eq!(latest_post_ids(2, 50), vec![2, 1]);
    }

    #[test]
    fn test_latest_ids_empty_ledger() {
        assert!(latest_post_ids(0, 10).is_empty());
    }

    #[test]
    fn test_latest_ids_exact_window() {
        assert_eq!(latest_post_ids(3, 3), vec![3, 2, 1]);
    }
}
