// src/constants.rs
//! Domain constants that define the operational boundaries of the backup.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! these should tell you how the crawl talks to the platform, how deep it
//! renders and where it writes.

// ---------------------------------------------------------------------------
// Platform boundaries
// ---------------------------------------------------------------------------

/// Default root of the open platform API.
pub const DEFAULT_API_BASE_URL: &str = "https://open.feishu.cn/open-apis";

/// Page size requested from endpoints that accept `page_size`.
///
/// The calendar and docx endpoints accept up to 500; the wiki endpoints cap
/// lower and silently clamp, which is harmless.
pub const API_PAGE_SIZE: u32 = 500;

/// Page size for wiki space and node listings.
pub const WIKI_PAGE_SIZE: u32 = 50;

/// Safety valve against a server that keeps answering `has_more: true`.
pub const MAX_PAGES_PER_LISTING: u32 = 10_000;

/// Attempts made for a request that fails at the transport level.
pub const TRANSPORT_RETRY_ATTEMPTS: u32 = 3;

/// First delay of the transport retry backoff, in milliseconds.
pub const TRANSPORT_RETRY_INITIAL_DELAY_MS: u64 = 500;

/// Upper bound of the transport retry backoff, in milliseconds.
pub const TRANSPORT_RETRY_MAX_DELAY_MS: u64 = 8_000;

/// Default timeout of a single HTTP request, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Callback listener
// ---------------------------------------------------------------------------

/// Port the OAuth redirect is sent to.
pub const DEFAULT_CALLBACK_PORT: u16 = 8888;

/// Path of the OAuth redirect.
pub const CALLBACK_PATH: &str = "/backup";

/// `state` parameter sent with the authorization request.
pub const OAUTH_STATE: &str = "backup";

/// Longest request head the callback listener will read.
pub const CALLBACK_MAX_REQUEST_BYTES: usize = 16 * 1024;

// ---------------------------------------------------------------------------
// Formatting boundaries
// ---------------------------------------------------------------------------

/// Maximum nesting depth when recursively rendering blocks.
///
/// Legacy documents nest paragraphs inside table cells inside tables; real
/// documents stay in single digits.
pub const BLOCK_MAX_RENDER_DEPTH: usize = 64;

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 128;

// ---------------------------------------------------------------------------
// Output layout
// ---------------------------------------------------------------------------

/// Directory, below the backup root, holding all wiki spaces.
pub const WIKI_ROOT_DIR: &str = "知识库";

/// Directory, below the backup root, holding calendar events.
pub const CALENDAR_DIR: &str = "calendar";

/// Extension given to every downloaded image.
pub const IMAGE_EXTENSION: &str = "png";

/// `PRODID` written into every iCalendar file.
pub const ICALENDAR_PRODID: &str = "-//feishu-backup//feishu-backup v1.0//EN";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
