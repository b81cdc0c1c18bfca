//! Shared fixtures for task unit tests.

use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

use crate::task::{adapters::memory::InMemoryBlobStore, services::TaskRepository};

/// Clock that advances one second on every reading.
#[derive(Debug)]
pub struct SteppingClock {
    next_second: AtomicI64,
}

impl SteppingClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next_second: AtomicI64::new(start.timestamp()),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let second = self.next_second.fetch_add(1, Ordering::SeqCst);
        Utc.timestamp_opt(second, 0)
            .single()
            .expect("timestamp within chrono range")
    }
}

pub type TestRepository = TaskRepository<InMemoryBlobStore, SteppingClock>;

pub struct RepositoryHarness {
    pub store: InMemoryBlobStore,
    pub repository: TestRepository,
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0)
        .single()
        .expect("valid start timestamp")
}

#[fixture]
pub fn harness() -> RepositoryHarness {
    let store = InMemoryBlobStore::new();
    let repository = TaskRepository::new(
        Arc::new(store.clone()),
        Arc::new(SteppingClock::starting_at(epoch())),
    );
    RepositoryHarness { store, repository }
}
