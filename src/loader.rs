use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::aggregate::build_dataset;
use crate::columns::{disambiguate_headers, resolve, Field, RawRow};
use crate::error::LoadError;
use crate::models::Dataset;
use crate::transform::transform_rows;

const HEADER_MARKERS: [&str; 2] = ["NOME", "EMPRESA"];

const REPEATED_HEADER_NAME: &str = "NOME";

#[async_trait]
pub trait CsvSource: Send + Sync {
    async fn fetch(&self) -> Result<String, LoadError>;

    fn describe(&self) -> String;
}

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CsvSource for HttpSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CsvSource for FileSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// `http://` and `https://` locations are fetched, anything else is read from disk.
pub fn source_for(location: &str) -> Box<dyn CsvSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Concurrent first loads are not coalesced; the last one to finish owns the cache.
pub struct DataLoader {
    source: Box<dyn CsvSource>,
    cache: RwLock<Option<Arc<Dataset>>>,
}

impl DataLoader {
    pub fn new(source: impl CsvSource + 'static) -> Self {
        Self::from_boxed(Box::new(source))
    }

    pub fn from_boxed(source: Box<dyn CsvSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(None),
        }
    }

    pub async fn load(&self) -> Result<Arc<Dataset>, LoadError> {
        if let Some(dataset) = self.cache.read().await.as_ref() {
            debug!("serving cached dataset");
            return Ok(Arc::clone(dataset));
        }
        self.fetch_and_store().await
    }

    /// Fetches again. A failed reload leaves the previous dataset cached.
    pub async fn reload(&self) -> Result<Arc<Dataset>, LoadError> {
        self.fetch_and_store().await
    }

    pub async fn invalidate(&self) {
        self.cache.write().await.take();
    }

    pub async fn cached(&self) -> Option<Arc<Dataset>> {
        self.cache.read().await.clone()
    }

    async fn fetch_and_store(&self) -> Result<Arc<Dataset>, LoadError> {
        debug!(source = %self.source.describe(), "fetching internship sheet");
        let text = self.source.fetch().await?;
        let dataset = Arc::new(parse_dataset(&text)?);
        *self.cache.write().await = Some(Arc::clone(&dataset));
        Ok(dataset)
    }
}

pub fn find_header_row(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|line| {
        let upper = line.to_uppercase();
        HEADER_MARKERS.iter().all(|marker| upper.contains(marker))
    })
}

/// Drops the lines above the header, then reads every record keyed by header.
/// Headers and cells are trimmed; unreadable records are logged and skipped.
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>, LoadError> {
    let lines: Vec<&str> = text.lines().collect();
    let header_index = find_header_row(&lines).ok_or(LoadError::HeaderNotFound)?;
    debug!(header_index, "located header row");

    let body = lines[header_index..].join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());
    let headers = disambiguate_headers(reader.headers()?.iter());

    let mut rows = Vec::new();
    for (position, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                warn!(position, %error, "skipping unreadable CSV record");
                continue;
            }
        };

        rows.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.clone(), value.trim().to_string()))
                .collect(),
        );
    }

    Ok(rows)
}

pub fn is_data_row(row: &RawRow) -> bool {
    matches!(resolve(row, Field::Nome.headers()), Some(name) if name != REPEATED_HEADER_NAME)
}

pub fn parse_dataset(text: &str) -> Result<Dataset, LoadError> {
    let rows = parse_rows(text)?;
    let raw_count = rows.len();
    let internships = transform_rows(rows.iter().filter(|row| is_data_row(row)));
    let dataset = build_dataset(internships);

    info!(
        rows = raw_count,
        internships = dataset.internships.len(),
        companies = dataset.companies.len(),
        advisors = dataset.advisors.len(),
        "internship sheet loaded"
    );
    Ok(dataset)
}
