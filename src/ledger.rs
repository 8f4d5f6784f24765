//! In-memory coin ledger with a JSON snapshot on disk.
//!
//! Balances only ever grow. Same-user increments are serialized by a
//! per-account atomic; the outer map lock is taken for writing only when an
//! account is created on first credit, so unrelated users never contend.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serenity::model::id::UserId;
use tokio::sync::RwLock;

use crate::error::SnapshotError;

/// On-disk snapshot shape.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    saved_at: DateTime<Utc>,
    balances: BTreeMap<u64, u64>,
}

#[derive(Debug, Default)]
pub struct Ledger {
    accounts: RwLock<AHashMap<u64, Arc<AtomicU64>>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` (>= 1) coins to `user`, returning the new balance.
    pub async fn increment(&self, user: UserId, amount: u64) -> u64 {
        debug_assert!(amount >= 1, "increment amount must be positive");
        let id = user.get();
        {
            let accounts = self.accounts.read().await;
            if let Some(account) = accounts.get(&id) {
                return account.fetch_add(amount, Ordering::Relaxed) + amount;
            }
        }
        let mut accounts = self.accounts.write().await;
        let account = accounts.entry(id).or_insert_with(|| Arc::new(AtomicU64::new(0)));
        account.fetch_add(amount, Ordering::Relaxed) + amount
    }

    /// Current balance. Unknown users read as 0; no account is created.
    pub async fn read(&self, user: UserId) -> u64 {
        self.accounts
            .read()
            .await
            .get(&user.get())
            .map(|account| account.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Number of accounts that have received at least one credit.
    pub async fn accounts(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Top `n` balances, highest first; ties break on the lower user id.
    pub async fn top(&self, n: usize) -> Vec<(u64, u64)> {
        let mut rows: Vec<(u64, u64)> = self
            .accounts
            .read()
            .await
            .iter()
            .map(|(id, account)| (*id, account.load(Ordering::Relaxed)))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        rows.truncate(n);
        rows
    }

    pub async fn snapshot(&self) -> BTreeMap<u64, u64> {
        self.accounts
            .read()
            .await
            .iter()
            .map(|(id, account)| (*id, account.load(Ordering::Relaxed)))
            .collect()
    }

    /// Read a snapshot file. A missing file yields an empty ledger; a corrupt
    /// or unreadable one is an error.
    pub fn load_from(path: &Path) -> Result<Self, SnapshotError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(e.into()),
        };
        let file: SnapshotFile = serde_json::from_str(&text)?;
        let accounts = file
            .balances
            .into_iter()
            .map(|(id, balance)| (id, Arc::new(AtomicU64::new(balance))))
            .collect();
        Ok(Self {
            accounts: RwLock::new(accounts),
        })
    }

    /// Write the snapshot file, replacing any previous one.
    pub async fn save_to(&self, path: &Path) -> Result<(), SnapshotError> {
        let file = SnapshotFile {
            saved_at: Utc::now(),
            balances: self.snapshot().await,
        };
        let text = serde_json::to_string_pretty(&file)?;
        std::fs::write(path, text).map_err(SnapshotError::Io)
    }
}
