use std::{
    collections::BTreeMap,
    fs, io,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use chrono::{Local, NaiveDate};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::{api::public, client::ApiClient, models::ShortageRow};

/// Chips shown when the caller does not ask for a specific count.
pub const DEFAULT_MAX_ITEMS: usize = 8;

/// Blood types in the order chips are collected.
pub const TICKER_ORDER: [&str; 8] = ["A+", "A-", "B+", "B-", "O+", "O-", "AB+", "AB-"];

/// ShortageItem
///
/// One chip of the ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortageItem {
    pub district: String,
    pub blood: String,
    pub score: f64,
}

// Everything `encodeURIComponent` escapes.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

impl ShortageItem {
    /// Where the chip links to: the public request list narrowed to this shortage.
    pub fn link(&self) -> String {
        format!(
            "/donation-requests?blood={}&district={}&sort=urgency",
            utf8_percent_encode(&self.blood, QUERY_COMPONENT),
            utf8_percent_encode(&self.district, QUERY_COMPONENT),
        )
    }
}

/// flatten_shortages
///
/// Every `(district, blood, score)` with a positive score, highest first. Ties keep
/// row order, then blood-type order. At most `max_items` are returned.
pub fn flatten_shortages(rows: &[ShortageRow], max_items: usize) -> Vec<ShortageItem> {
    let mut combos: Vec<ShortageItem> = rows
        .iter()
        .flat_map(|row| {
            TICKER_ORDER.iter().filter_map(move |blood| {
                let score = row.scores.get(*blood).copied().unwrap_or(0.0);
                (score > 0.0).then(|| ShortageItem {
                    district: row.district.clone(),
                    blood: (*blood).to_string(),
                    score,
                })
            })
        })
        .collect();

    // sort_by is stable.
    combos.sort_by(|a, b| b.score.total_cmp(&a.score));
    combos.truncate(max_items);
    combos
}

/// Built-in rows shown when the shortage stats cannot be fetched.
pub fn demo_rows() -> Vec<ShortageRow> {
    let row = |district: &str, scores: &[(&str, f64)]| ShortageRow {
        district: district.to_string(),
        scores: scores
            .iter()
            .map(|(blood, score)| (blood.to_string(), *score))
            .collect::<BTreeMap<_, _>>(),
    };
    vec![
        row("Dhaka", &[("O+", 92.0), ("A-", 64.0), ("B+", 40.0), ("AB-", 25.0)]),
        row("Chattogram", &[("O+", 76.0), ("A-", 55.0), ("AB-", 20.0)]),
        row("Khulna", &[("O-", 84.0), ("A+", 35.0)]),
        row("Sylhet", &[("B+", 58.0), ("AB+", 22.0)]),
    ]
}

/// Fetches the shortage stats and flattens them, falling back to the demo rows on
/// any failure.
pub async fn load_ticker(client: &ApiClient, max_items: usize) -> Vec<ShortageItem> {
    let rows = match public::get_blood_shortage_stats(client).await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!("shortage stats unavailable, showing demo data: {}", err);
            demo_rows()
        }
    };
    flatten_shortages(&rows, max_items)
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DismissalRecord {
    dismissed_on: NaiveDate,
}

/// DismissalStore
///
/// Remembers the day the ticker was dismissed. This is the only state the client
/// persists locally.
#[derive(Clone, Debug)]
pub enum DismissalStore {
    InMemory(Arc<Mutex<Option<NaiveDate>>>),
    File(PathBuf),
}

impl DismissalStore {
    pub fn in_memory() -> Self {
        DismissalStore::InMemory(Arc::new(Mutex::new(None)))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        DismissalStore::File(path.into())
    }

    /// The stored dismissal day. An unreadable or missing record counts as never.
    pub fn dismissed_on(&self) -> Option<NaiveDate> {
        match self {
            DismissalStore::InMemory(day) => day.lock().ok().and_then(|day| *day),
            DismissalStore::File(path) => {
                let raw = fs::read_to_string(path).ok()?;
                serde_json::from_str::<DismissalRecord>(&raw)
                    .map(|record| record.dismissed_on)
                    .ok()
            }
        }
    }

    pub fn dismiss(&self, today: NaiveDate) -> io::Result<()> {
        match self {
            DismissalStore::InMemory(day) => {
                if let Ok(mut day) = day.lock() {
                    *day = Some(today);
                }
                Ok(())
            }
            DismissalStore::File(path) => {
                let raw = serde_json::to_string(&DismissalRecord { dismissed_on: today })
                    .map_err(io::Error::other)?;
                fs::write(path, raw)?;
                tracing::debug!(path = %path.display(), %today, "ticker dismissed");
                Ok(())
            }
        }
    }

    pub fn dismiss_today(&self) -> io::Result<()> {
        self.dismiss(Local::now().date_naive())
    }

    /// Hidden only on the day it was dismissed.
    pub fn should_show(&self, today: NaiveDate) -> bool {
        self.dismissed_on() != Some(today)
    }

    pub fn should_show_today(&self) -> bool {
        self.should_show(Local::now().date_naive())
    }
}
