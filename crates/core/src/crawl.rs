//! Bulk download of every entry into an [`Archive`].
//!
//! Entries are fetched one at a time with a random pause after each saved
//! page so the wiki is not hammered.

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::archive::Archive;
use crate::entry_number::{EntryNumber, MAX_ENTRY_NUMBER};
use crate::reader::Reader;
use crate::{Result, ScpError};

/// Range and pacing of a crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// First entry number, inclusive.
    pub first: u32,
    /// Last entry number, inclusive.
    pub last: u32,
    /// Shortest pause after a saved entry.
    pub min_delay: Duration,
    /// Longest pause after a saved entry.
    pub max_delay: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self { first: 1, last: MAX_ENTRY_NUMBER, min_delay: Duration::from_secs(5), max_delay: Duration::from_secs(15) }
    }
}

impl CrawlConfig {
    /// Entry numbers the crawl visits, clamped to the published range.
    pub fn numbers(&self) -> RangeInclusive<u32> {
        self.first.max(1)..=self.last.min(MAX_ENTRY_NUMBER)
    }

    /// A random pause in `[min_delay, max_delay]`.
    pub fn pause(&self) -> Duration {
        if self.max_delay <= self.min_delay {
            return self.min_delay;
        }
        let millis = rand::rng().random_range(self.min_delay.as_millis()..=self.max_delay.as_millis());
        Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
    }
}

/// Whether a crawl should move on to the next entry after this error.
fn is_skippable(err: &ScpError) -> bool {
    !matches!(err, ScpError::Io(_))
}

/// Downloads every entry in the configured range into `archive`.
///
/// Missing pages and failed requests are skipped; archive write failures end
/// the crawl. `on_saved` is called with each entry number and written path.
/// Returns the number of saved entries.
pub async fn download_all<F>(reader: &Reader, archive: &Archive, config: &CrawlConfig, mut on_saved: F) -> Result<usize>
where
    F: FnMut(EntryNumber, &std::path::Path),
{
    archive.ensure_dir()?;

    let mut count = 0;
    for n in config.numbers() {
        let number = EntryNumber::new(n)?;

        let entry = match reader.fetch(number).await {
            Ok(entry) => entry,
            Err(e @ (ScpError::NotFound { .. } | ScpError::MissingPage | ScpError::NoContent)) => {
                debug!(%number, error = %e, "skipping entry without contents");
                continue;
            }
            Err(e) if is_skippable(&e) => {
                warn!(%number, error = %e, "skipping entry");
                continue;
            }
            Err(e) => return Err(e),
        };

        let path = match archive.save(entry.text()) {
            Ok(path) => path,
            Err(ScpError::NoEntryNumber) => archive.save_as(number, entry.text())?,
            Err(e) => return Err(e),
        };

        count += 1;
        on_saved(number, &path);

        tokio::time::sleep(config.pause()).await;
    }

    info!(count, "crawl finished");
    Ok(count)
}
