pub mod archive;
pub mod classify;
#[cfg(feature = "fetch")]
pub mod crawl;
pub mod entry;
pub mod entry_number;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod normalize;
pub mod parse;
pub mod reader;

pub use archive::Archive;
pub use classify::{BlockKind, EXCLUDED_REGIONS, ExcludedRegion, RegionExt, classify};
#[cfg(feature = "fetch")]
pub use crawl::{CrawlConfig, download_all};
pub use entry::{Entry, Footnote, Fragment, render_fragments};
pub use entry_number::{DEFAULT_BASE_URL, EntryNumber, MAX_ENTRY_NUMBER, extract_number};
pub use error::{Result, ScpError};
pub use extract::{ExtractConfig, extract_content, extract_fragments};
pub use fetch::{FetchConfig, fetch_file};
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use formatters::{TextConfig, centered_margin, create_frame, indent, wrap_lines};
pub use normalize::{normalize_block, visible_text};
pub use parse::{Document, Element};
pub use reader::{Reader, ReaderConfig, ReaderConfigBuilder};
