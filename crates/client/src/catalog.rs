//! Offset-pagination accumulation for incremental catalog loading.
//!
//! The consumer claims a fetch, requests the page at the offset handed out,
//! and feeds the result back. The pager tracks the cumulative fetched count,
//! starts the next page at that offset, and stops handing out offsets once
//! the cumulative count reaches the reported total. A boolean in-flight flag
//! prevents duplicate concurrent requests for one trigger.

/// Tracks offset accumulation across the pages of one filtered listing.
#[derive(Debug, Clone)]
pub struct Pager {
    limit: u32,
    fetched: u64,
    total: Option<u64>,
    in_flight: bool,
}

impl Pager {
    /// A pager that requests pages of `limit` products.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self {
            limit,
            fetched: 0,
            total: None,
            in_flight: false,
        }
    }

    /// Page size for every request.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Offset the next page starts at: the cumulative fetched count.
    #[must_use]
    pub const fn next_skip(&self) -> u64 {
        self.fetched
    }

    /// Whether another page remains. `true` before the first fetch, since no
    /// total has been reported yet.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.total.is_none_or(|total| self.fetched < total)
    }

    /// Claim the next fetch. Returns the offset to request, or `None` when a
    /// fetch is already in flight or no page remains.
    pub fn begin_fetch(&mut self) -> Option<u64> {
        if self.in_flight || !self.has_more() {
            return None;
        }
        self.in_flight = true;
        Some(self.fetched)
    }

    /// Record a completed page: how many products it carried and the total
    /// the response reported.
    pub fn complete_fetch(&mut self, fetched: usize, total: u64) {
        self.in_flight = false;
        self.fetched += fetched as u64;
        self.total = Some(total);
    }

    /// Release the in-flight claim after a failed fetch, without advancing.
    pub fn abort_fetch(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_accumulate_until_total_reached() {
        // total=25 with pages of 12 gives offsets 0, 12, 24, then stop.
        let mut pager = Pager::new(12);
        let mut offsets = Vec::new();

        while let Some(skip) = pager.begin_fetch() {
            offsets.push(skip);
            let fetched = if skip + 12 <= 25 { 12 } else { 1 };
            pager.complete_fetch(fetched, 25);
        }

        assert_eq!(offsets, vec![0, 12, 24]);
        assert!(!pager.has_more());
    }

    #[test]
    fn test_has_more_before_first_fetch() {
        let pager = Pager::new(12);
        assert!(pager.has_more());
        assert_eq!(pager.next_skip(), 0);
    }

    #[test]
    fn test_duplicate_begin_blocked_while_in_flight() {
        let mut pager = Pager::new(12);
        assert_eq!(pager.begin_fetch(), Some(0));
        // A second trigger before the first completes claims nothing.
        assert_eq!(pager.begin_fetch(), None);

        pager.complete_fetch(12, 25);
        assert_eq!(pager.begin_fetch(), Some(12));
    }

    #[test]
    fn test_abort_releases_claim_without_advancing() {
        let mut pager = Pager::new(12);
        assert_eq!(pager.begin_fetch(), Some(0));
        pager.abort_fetch();

        assert_eq!(pager.begin_fetch(), Some(0));
    }

    #[test]
    fn test_empty_listing_stops_immediately() {
        let mut pager = Pager::new(12);
        let skip = pager.begin_fetch().unwrap();
        pager.complete_fetch(0, 0);

        assert_eq!(skip, 0);
        assert!(!pager.has_more());
        assert_eq!(pager.begin_fetch(), None);
    }

    #[test]
    fn test_exact_page_boundary_stops() {
        // total=24 with pages of 12 is exactly two pages.
        let mut pager = Pager::new(12);
        assert_eq!(pager.begin_fetch(), Some(0));
        pager.complete_fetch(12, 24);
        assert_eq!(pager.begin_fetch(), Some(12));
        pager.complete_fetch(12, 24);

        assert_eq!(pager.begin_fetch(), None);
    }
}
