//! Manifest discovery, loading and upstream format access.
//!
//! ## Responsibilities
//!
//! - Find the manifest files of a data directory
//! - Derive participant identities and resolve the host
//! - Parse documents and validate the minimal structural shape
//!
//! ## Non-Responsibilities
//!
//! - Projecting entries onto records (handled by `normalize`)
//! - Duplicate detection (handled by `dedup`)

pub mod format;
pub mod loader;

pub use format::{locate_mod_table, DEFAULT_GAME_KEY, MOD_TABLE_POSITION};
pub use loader::{discover_manifest_paths, load_manifests, resolve_host, LoadedManifests};
