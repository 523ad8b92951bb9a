//! JSON-lines store
//!
//! Each record is one line in `leads.jsonl`, `chats.jsonl` or `orders.jsonl`.
//! Counters are rebuilt from the files when the store is opened; lines that
//! do not parse are skipped and not counted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::{ChatLog, Lead, Order, Store, StoreCounts};
use crate::error::{AppError, Result};

const LEADS_FILE: &str = "leads.jsonl";
const CHATS_FILE: &str = "chats.jsonl";
const ORDERS_FILE: &str = "orders.jsonl";

pub struct FileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
    lead_times: RwLock<Vec<DateTime<Utc>>>,
    chat_count: AtomicU64,
    order_count: AtomicU64,
}

impl FileStore {
    /// Open (or create) a store rooted at `dir`
    pub async fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;

        let lead_times: Vec<DateTime<Utc>> = read_records::<Lead>(&dir.join(LEADS_FILE))
            .await?
            .into_iter()
            .map(|lead| lead.created_at)
            .collect();
        let chat_count = read_records::<ChatLog>(&dir.join(CHATS_FILE)).await?.len() as u64;
        let order_count = read_records::<Order>(&dir.join(ORDERS_FILE)).await?.len() as u64;

        info!(
            path = %dir.display(),
            leads = lead_times.len(),
            chats = chat_count,
            orders = order_count,
            "Opened file store"
        );

        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
            lead_times: RwLock::new(lead_times),
            chat_count: AtomicU64::new(chat_count),
            order_count: AtomicU64::new(order_count),
        })
    }

    async fn append<T: Serialize>(&self, file: &str, record: &T) -> Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        let mut handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join(file))
            .await?;
        handle.write_all(&line).await?;
        handle.flush().await?;
        Ok(())
    }
}

async fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(line) {
            Ok(record) => records.push(record),
            Err(e) => warn!(
                file = %path.display(),
                line = index + 1,
                error = %e,
                "Skipping unreadable record"
            ),
        }
    }
    Ok(records)
}

#[async_trait]
impl Store for FileStore {
    fn kind(&self) -> &'static str {
        "file"
    }

    async fn insert_lead(&self, lead: &Lead) -> Result<()> {
        self.append(LEADS_FILE, lead).await?;
        self.lead_times.write().push(lead.created_at);
        Ok(())
    }

    async fn insert_chat(&self, log: &ChatLog) -> Result<()> {
        self.append(CHATS_FILE, log).await?;
        self.chat_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn insert_order(&self, order: &Order) -> Result<()> {
        self.append(ORDERS_FILE, order).await?;
        self.order_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn counts(&self, since: DateTime<Utc>) -> Result<StoreCounts> {
        let lead_times = self.lead_times.read();
        Ok(StoreCounts {
            total_leads: lead_times.len() as u64,
            total_chats: self.chat_count.load(Ordering::Relaxed),
            total_orders: self.order_count.load(Ordering::Relaxed),
            recent_leads: lead_times.iter().filter(|t| **t >= since).count() as u64,
        })
    }

    async fn ping(&self) -> Result<()> {
        let metadata = fs::metadata(&self.dir)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        if !metadata.is_dir() {
            return Err(AppError::StoreUnavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }
        Ok(())
    }
}
