use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use loto_store::{KeyValueStore, StoreError};
use loto_types::{DrawNumber, Ticket};
use tracing::{debug, info, warn};

use crate::entry::DrawEntry;
use crate::error::{LedgerError, LedgerResult};
use crate::export;
use crate::verify::{verify, Verification};

/// Storage key holding the serialized history.
pub const HISTORY_KEY: &str = "lottoHistory";

/// Fewest draws against which a ticket may be verified.
pub const MIN_DRAWS_FOR_VERIFY: usize = 5;

/// Timestamp layout used when none is configured (`14:05:09 19/10/2026`).
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%H:%M:%S %d/%m/%Y";

/// Source of entry timestamps.
pub type Clock = Box<dyn Fn() -> String + Send + Sync>;

/// Build a local-time clock for a strftime-style format.
///
/// The format is checked up front, since chrono only reports a bad format
/// when rendering.
pub fn timestamp_clock(format: &str) -> LedgerResult<Clock> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(LedgerError::InvalidTimestampFormat(format.to_string()));
    }
    let format = format.to_string();
    Ok(Box::new(move || Local::now().format(&format).to_string()))
}

/// What [`DrawLedger::restore`] found in the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RestoreReport {
    /// Nothing stored under the key.
    Empty,
    /// History loaded.
    Loaded { count: usize },
    /// Stored data was unreadable and the ledger was reset to empty.
    Corrupt { reason: String },
}

/// The ordered history of drawn numbers.
///
/// Entries are kept in draw order (oldest first). Every successful mutation
/// is written through to the store before the call returns; a failed write
/// leaves the in-memory history untouched.
pub struct DrawLedger<S: KeyValueStore> {
    store: S,
    key: String,
    entries: Vec<DrawEntry>,
    current: Option<DrawNumber>,
    clock: Clock,
}

impl<S: KeyValueStore> DrawLedger<S> {
    /// Create an empty ledger over `store`. Nothing is read until
    /// [`restore`](Self::restore) is called.
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: HISTORY_KEY.to_string(),
            entries: Vec::new(),
            current: None,
            clock: Box::new(|| Local::now().format(DEFAULT_TIMESTAMP_FORMAT).to_string()),
        }
    }

    /// Create a ledger and load whatever history the store holds.
    pub fn open(store: S) -> LedgerResult<Self> {
        let mut ledger = Self::new(store);
        ledger.restore()?;
        Ok(ledger)
    }

    /// Use a different storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ---- Mutations ----

    /// Record a newly drawn number.
    ///
    /// Rejects input that is not an integer in `1..=90` and numbers already
    /// present anywhere in the history.
    pub fn append(&mut self, raw: &str) -> LedgerResult<DrawEntry> {
        let number = DrawNumber::parse(raw).inspect_err(|_| {
            debug!(raw, "append rejected: invalid number");
        })?;
        self.append_number(number)
    }

    /// [`append`](Self::append) for an already validated number.
    pub fn append_number(&mut self, number: DrawNumber) -> LedgerResult<DrawEntry> {
        if let Some(index) = self.position_of(number) {
            debug!(%number, index, "append rejected: duplicate");
            return Err(LedgerError::DuplicateNumber { number, index });
        }

        let entry = DrawEntry::new(number, (self.clock)());
        let mut next = self.entries.clone();
        next.push(entry.clone());
        self.write(&next)?;

        self.entries = next;
        self.current = Some(number);
        debug!(%number, count = self.entries.len(), "number appended");
        Ok(entry)
    }

    /// Change the number recorded at draw-order position `index` (0-based).
    ///
    /// The duplicate check skips `index` itself, so re-entering the same
    /// value succeeds. Only the number changes; the timestamp and the
    /// current number are left alone.
    pub fn edit_at(&mut self, index: usize, raw: &str) -> LedgerResult<DrawEntry> {
        let number = DrawNumber::parse(raw).inspect_err(|_| {
            debug!(raw, index, "edit rejected: invalid number");
        })?;

        if index >= self.entries.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }

        let clash = self
            .entries
            .iter()
            .enumerate()
            .find(|(i, e)| *i != index && e.number == number)
            .map(|(i, _)| i);
        if let Some(other) = clash {
            debug!(%number, index, other, "edit rejected: duplicate");
            return Err(LedgerError::DuplicateNumber { number, index: other });
        }

        let mut next = self.entries.clone();
        let previous = next[index].number;
        next[index].number = number;
        self.write(&next)?;

        self.entries = next;
        debug!(index, from = %previous, to = %number, "entry edited");
        Ok(self.entries[index].clone())
    }

    /// Drop the whole history. Returns how many entries were removed.
    pub fn clear(&mut self) -> LedgerResult<usize> {
        self.write(&[])?;
        let removed = self.entries.len();
        self.entries.clear();
        self.current = None;
        info!(removed, "history cleared");
        Ok(removed)
    }

    /// Override the displayed current number without touching the history.
    ///
    /// The override lives in memory only; [`restore`](Self::restore) sets the
    /// current number back to the last entry.
    pub fn set_current(&mut self, raw: &str) -> LedgerResult<DrawNumber> {
        let number = DrawNumber::parse(raw).inspect_err(|_| {
            debug!(raw, "current override rejected: invalid number");
        })?;
        debug!(from = ?self.current, to = %number, "current number overridden");
        self.current = Some(number);
        Ok(number)
    }

    // ---- Persistence ----

    /// Write the current history to the store.
    pub fn persist(&self) -> LedgerResult<()> {
        self.write(&self.entries)
    }

    /// Replace the in-memory history with what the store holds.
    ///
    /// Unreadable data is not an error: the ledger is reset to empty and the
    /// problem is reported in the returned [`RestoreReport`]. A stored value
    /// that is not UTF-8 counts as unreadable. Any other store failure is
    /// returned as `Err`.
    pub fn restore(&mut self) -> LedgerResult<RestoreReport> {
        let decoded = match self.store.get(&self.key) {
            Ok(raw) => raw.as_deref().map(decode_entries),
            Err(StoreError::NotUtf8 { key }) => Some(Err(LedgerError::CorruptState(format!(
                "value under {key:?} is not valid UTF-8"
            )))),
            Err(e) => return Err(e.into()),
        };
        let report = match decoded {
            None => {
                self.entries.clear();
                RestoreReport::Empty
            }
            Some(Ok(entries)) => {
                let count = entries.len();
                self.entries = entries;
                RestoreReport::Loaded { count }
            }
            Some(Err(err)) => {
                warn!(key = %self.key, error = %err, "discarding unreadable history");
                self.entries.clear();
                RestoreReport::Corrupt {
                    reason: err.to_string(),
                }
            }
        };
        self.current = self.entries.last().map(|e| e.number);
        info!(key = %self.key, count = self.entries.len(), "history restored");
        Ok(report)
    }

    fn write(&self, entries: &[DrawEntry]) -> LedgerResult<()> {
        let json =
            serde_json::to_string(entries).map_err(|e| LedgerError::Serialization(e.to_string()))?;
        self.store.put(&self.key, &json)?;
        debug!(key = %self.key, count = entries.len(), "history persisted");
        Ok(())
    }

    // ---- Queries ----

    /// All drawn numbers in draw order.
    pub fn snapshot(&self) -> Vec<DrawNumber> {
        self.entries.iter().map(|e| e.number).collect()
    }

    pub fn entries(&self) -> &[DrawEntry] {
        &self.entries
    }

    /// Entries most recent first, each paired with its draw-order index.
    pub fn recent_first(&self) -> impl Iterator<Item = (usize, &DrawEntry)> {
        self.entries.iter().enumerate().rev()
    }

    /// The last drawn number, if any.
    pub fn current(&self) -> Option<DrawNumber> {
        self.current
    }

    pub fn position_of(&self, number: DrawNumber) -> Option<usize> {
        self.entries.iter().position(|e| e.number == number)
    }

    pub fn contains(&self, number: DrawNumber) -> bool {
        self.position_of(number).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Verify a ticket against the full history.
    ///
    /// Refuses with [`LedgerError::InsufficientHistory`] until at least
    /// [`MIN_DRAWS_FOR_VERIFY`] numbers have been drawn.
    pub fn verify_ticket(&self, ticket: &Ticket) -> LedgerResult<Verification> {
        if self.entries.len() < MIN_DRAWS_FOR_VERIFY {
            return Err(LedgerError::InsufficientHistory {
                required: MIN_DRAWS_FOR_VERIFY,
                available: self.entries.len(),
            });
        }
        let verification = verify(ticket.numbers(), &self.snapshot());
        debug!(
            ticket = %ticket,
            matches = verification.match_count(),
            winner = verification.is_winner,
            "ticket verified"
        );
        Ok(verification)
    }

    /// History rendered as CSV.
    pub fn export_csv(&self) -> String {
        export::to_csv(&self.entries)
    }
}

impl<S: KeyValueStore + std::fmt::Debug> std::fmt::Debug for DrawLedger<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawLedger")
            .field("store", &self.store)
            .field("key", &self.key)
            .field("entries", &self.entries)
            .field("current", &self.current)
            .finish()
    }
}

fn decode_entries(raw: &str) -> LedgerResult<Vec<DrawEntry>> {
    serde_json::from_str(raw).map_err(|e| LedgerError::CorruptState(e.to_string()))
}
