//! Analysis report cache
//!
//! SQLite-backed cache of finished reports, keyed by a deterministic hash of
//! the analysis request. The cache sits at the orchestration boundary as an
//! explicit decorator; nothing below the service facade knows it exists.

use std::path::Path;

use rusqlite::{params, Connection};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use pulse_core::{AnalysisReport, AnalysisRequest};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisCacheError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// SQLite-backed report cache
pub struct AnalysisCache {
    db_path: String,
}

impl AnalysisCache {
    /// Create a new cache, initialising the schema if needed
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, AnalysisCacheError> {
        let db_path = db_path.as_ref().to_string_lossy().to_string();

        // Ensure parent directory exists
        if let Some(parent) = Path::new(&db_path).parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let cache = Self { db_path };
        cache.init_db()?;

        info!("Initialized analysis cache at: {}", cache.db_path);
        Ok(cache)
    }

    fn init_db(&self) -> Result<(), AnalysisCacheError> {
        let conn = self.get_connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS analysis_reports (
                cache_key TEXT PRIMARY KEY,
                query TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                data JSON NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    fn get_connection(&self) -> Result<Connection, AnalysisCacheError> {
        Ok(Connection::open(&self.db_path)?)
    }

    /// Deterministic cache key for a request
    ///
    /// Hashes the canonical request encoding; the cache toggle itself is
    /// excluded, so toggling it off and on hits the same entry.
    pub fn cache_key(request: &AnalysisRequest) -> String {
        let mut hasher = Sha256::new();
        hasher.update(request.canonical_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Look up a cached report for this request
    pub fn get_report(
        &self,
        request: &AnalysisRequest,
    ) -> Result<Option<AnalysisReport>, AnalysisCacheError> {
        let key = Self::cache_key(request);
        let conn = self.get_connection()?;

        let mut stmt =
            conn.prepare("SELECT data FROM analysis_reports WHERE cache_key = ?1")?;
        let mut rows = stmt.query(params![key])?;

        match rows.next()? {
            Some(row) => {
                let data: String = row.get(0)?;
                let report: AnalysisReport = serde_json::from_str(&data)?;
                debug!("Cache hit for query '{}'", request.query());
                Ok(Some(report))
            }
            None => Ok(None),
        }
    }

    /// Store (or overwrite) the report for this request
    pub fn store_report(
        &self,
        request: &AnalysisRequest,
        report: &AnalysisReport,
    ) -> Result<(), AnalysisCacheError> {
        let key = Self::cache_key(request);
        let data = serde_json::to_string(report)?;
        let conn = self.get_connection()?;

        conn.execute(
            "INSERT OR REPLACE INTO analysis_reports (cache_key, query, created_at, data)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                key,
                request.query(),
                chrono::Utc::now().timestamp(),
                data
            ],
        )?;

        debug!("Cached report for query '{}'", request.query());
        Ok(())
    }

    /// Number of cached reports
    pub fn len(&self) -> Result<usize, AnalysisCacheError> {
        let conn = self.get_connection()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM analysis_reports", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Whether the cache holds no reports
    pub fn is_empty(&self) -> Result<bool, AnalysisCacheError> {
        Ok(self.len()? == 0)
    }
}
