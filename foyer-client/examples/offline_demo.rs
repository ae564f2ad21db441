//! Offline-first flow, end to end: point the client at an unreachable
//! remote, register a couple of parties, and read the day back purely
//! from the on-device cache.
//!
//! ```bash
//! cargo run -p foyer-client --example offline_demo
//! ```

use std::sync::Arc;

use foyer_client::{
    HttpRemoteStore, LocalCache, PhoneResolver, RemoteConfig, RemoteCredentials,
    SequenceAllocator, SyncCoordinator, TableZone, VisitorDraft, VisitorRecord, export,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let dir = tempfile::tempdir()?;
    let cache = LocalCache::open(dir.path().join("cache.redb"))?;

    // Nothing listens here; every remote call will fail and the cache
    // carries the day.
    let config = RemoteConfig::new(RemoteCredentials {
        base_url: "http://127.0.0.1:9".to_string(),
        access_token: "demo".to_string(),
    })
    .with_timeout(2);
    let remote = Arc::new(HttpRemoteStore::new(config)?);

    let coordinator = SyncCoordinator::new(remote, cache);
    let day = shared::util::today_key();

    for (surname, rank, phone, zone, table) in [
        ("Nikolaou", "Captain", "6900000001", TableZone::DiningRoom, Some(4)),
        ("Ioannou", "Member", "6900000002", TableZone::Terrace, Some(11)),
    ] {
        let sequence = SequenceAllocator::new(&coordinator)
            .next_for_day(&day)
            .await?;
        let record = coordinator
            .create(VisitorRecord::from_draft(
                VisitorDraft {
                    phone: phone.to_string(),
                    surname: surname.to_string(),
                    rank: rank.to_string(),
                    zone,
                    table_number: table,
                    person_count: 2,
                },
                &day,
                sequence,
            ))
            .await?;
        PhoneResolver::new(&coordinator)
            .record_visitor(&record)
            .await?;
    }

    let records = coordinator.read_day(&day).await?;
    println!("{}", export::day_log_text(&records, &day));

    let found = PhoneResolver::new(&coordinator)
        .find("6900000001")
        .await?
        .expect("identity cached locally");
    println!("repeat guest 6900000001 -> {} ({})", found.surname, found.rank);

    Ok(())
}
