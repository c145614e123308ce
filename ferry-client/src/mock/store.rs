//! Bounded job registry for the simulation
//!
//! Entries expire `ttl` after creation and the oldest entry is evicted when
//! the store is full, so a long-lived mock session cannot grow without bound.
//! An evicted job is indistinguishable from one that was never issued.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use ferry_core::domain::job::JobRecord;

use super::simulation::SimulatedJob;

pub struct JobStore {
    capacity: usize,
    ttl: Duration,
    entries: HashMap<String, SimulatedJob>,
}

impl JobStore {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, job: SimulatedJob, now: DateTime<Utc>) {
        self.expire(now);
        if self.entries.len() >= self.capacity {
            if let Some(victim) = self
                .entries
                .values()
                .min_by_key(|job| (job.created_at(), job.seq))
                .map(|job| job.job_id().to_string())
            {
                tracing::debug!("Job store full, evicting {}", victim);
                self.entries.remove(&victim);
            }
        }
        self.entries.insert(job.job_id().to_string(), job);
    }

    /// Looks a job up and returns its state as of `now`
    pub fn get(&mut self, job_id: &str, now: DateTime<Utc>) -> Option<JobRecord> {
        self.expire(now);
        let job = self.entries.get_mut(job_id)?;
        job.advance(now);
        Some(job.snapshot())
    }

    /// State of every live job as of `now`
    pub fn snapshots(&mut self, now: DateTime<Utc>) -> Vec<JobRecord> {
        self.expire(now);
        self.entries
            .values_mut()
            .map(|job| {
                job.advance(now);
                job.snapshot()
            })
            .collect()
    }

    fn expire(&mut self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        self.entries.retain(|_, job| now - job.created_at() < ttl);
    }
}

#[cfg(test)]
impl JobStore {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::simulation::Outcome;
    use ferry_core::domain::job::JobStatus;

    fn job(seq: u64, created_at: DateTime<Utc>) -> SimulatedJob {
        SimulatedJob::new(
            seq,
            format!("JOB-{}", 1000 + seq),
            "Invoice".to_string(),
            created_at,
            Outcome::Faulted,
        )
    }

    #[test]
    fn test_get_advances_state() {
        let now = Utc::now();
        let mut store = JobStore::new(10, Duration::hours(1));
        store.insert(job(1, now), now);

        let found = store.get("JOB-1001", now + Duration::seconds(3)).unwrap();
        assert_eq!(found.status, JobStatus::Running);
        assert!(store.get("JOB-9999", now).is_none());
    }

    #[test]
    fn test_full_store_evicts_oldest() {
        let now = Utc::now();
        let mut store = JobStore::new(2, Duration::hours(1));
        store.insert(job(1, now), now);
        store.insert(job(2, now), now);
        store.insert(job(3, now + Duration::seconds(1)), now + Duration::seconds(1));

        assert_eq!(store.len(), 2);
        assert!(store.get("JOB-1001", now).is_none());
        assert!(store.get("JOB-1002", now).is_some());
        assert!(store.get("JOB-1003", now).is_some());
    }

    #[test]
    fn test_expired_jobs_are_dropped() {
        let now = Utc::now();
        let mut store = JobStore::new(10, Duration::seconds(60));
        store.insert(job(1, now), now);

        assert!(store.get("JOB-1001", now + Duration::seconds(59)).is_some());
        assert!(store.get("JOB-1001", now + Duration::seconds(60)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_snapshots_return_every_live_job() {
        let now = Utc::now();
        let mut store = JobStore::new(10, Duration::hours(1));
        store.insert(job(1, now), now);
        store.insert(job(2, now), now);

        let statuses: Vec<JobStatus> = store
            .snapshots(now + Duration::seconds(10))
            .into_iter()
            .map(|job| job.status)
            .collect();
        assert_eq!(statuses, vec![JobStatus::Faulted, JobStatus::Faulted]);
    }
}
