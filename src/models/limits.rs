use chrono::NaiveDate;
use serde::Deserialize;

/// Bounds for a per-user project listing: at most `count` projects whose
/// deadline falls on or before `due_by`.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub count: u32,
    pub due_by: NaiveDate,
}

impl Limits {
    pub fn new(count: u32, due_by: NaiveDate) -> Self {
        Self { count, due_by }
    }

    /// Postgres `LIMIT` takes a bigint.
    pub(crate) fn sql_limit(&self) -> i64 {
        i64::from(self.count)
    }

    pub fn admits(&self, deadline: NaiveDate) -> bool {
        deadline <= self.due_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_by_is_inclusive() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let limits = Limits::new(5, day);
        assert!(limits.admits(day));
        assert!(limits.admits(day.pred_opt().unwrap()));
        assert!(!limits.admits(day.succ_opt().unwrap()));
    }

    #[test]
    fn count_widens_to_bigint() {
        let limits = Limits::new(u32::MAX, NaiveDate::MAX);
        assert_eq!(limits.sql_limit(), 4_294_967_295);
    }
}
