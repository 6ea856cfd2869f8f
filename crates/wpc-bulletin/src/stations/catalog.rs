//! THREDDS catalog of hourly METAR collections.

use chrono::{DateTime, NaiveDate, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;

use crate::error::{BulletinError, Result};

pub const METAR_CATALOG_URL: &str =
    "https://thredds.ucar.edu/thredds/catalog/noaaport/text/metar/catalog.xml";

/// Collection time embedded in dataset names, e.g. `metar_20230619_1500.txt`.
const NAME_TIME_PATTERN: &str = r"(\d{4})(\d{2})(\d{2})_(\d{2})(\d{2})";

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogDataset {
    pub name: String,
    pub url_path: String,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct MetarCatalog {
    /// Base path of the `HTTPServer` service.
    pub http_base: Option<String>,
    pub datasets: Vec<CatalogDataset>,
}

impl MetarCatalog {
    /// Parse catalog XML. Datasets without a `urlPath` or a time in their
    /// name are ignored.
    pub fn parse(xml: &str) -> Result<Self> {
        let time_pattern = Regex::new(NAME_TIME_PATTERN)?;
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut catalog = MetarCatalog::default();
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"service" => {
                        if attribute(&e, b"serviceType")?.as_deref() == Some("HTTPServer") {
                            catalog.http_base = attribute(&e, b"base")?;
                        }
                    }
                    b"dataset" => {
                        let name = attribute(&e, b"name")?;
                        let url_path = attribute(&e, b"urlPath")?;
                        if let (Some(name), Some(url_path)) = (name, url_path) {
                            if let Some(time) = name_time(&time_pattern, &name) {
                                catalog.datasets.push(CatalogDataset {
                                    name,
                                    url_path,
                                    time,
                                });
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(BulletinError::Catalog(format!(
                        "XML error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
            buf.clear();
        }
        Ok(catalog)
    }

    /// Dataset whose collection time is closest to `time`.
    pub fn nearest(&self, time: DateTime<Utc>) -> Option<&CatalogDataset> {
        self.datasets
            .iter()
            .min_by_key(|d| (d.time - time).num_seconds().abs())
    }

    /// Download URL of `dataset` on the catalog's host.
    pub fn download_url(&self, catalog_url: &str, dataset: &CatalogDataset) -> String {
        let base = self.http_base.as_deref().unwrap_or("/thredds/fileServer/");
        format!("{}{}{}", host_of(catalog_url), base, dataset.url_path)
    }
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| BulletinError::Catalog(e.to_string()))?;
        if attr.key.as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|e| BulletinError::Catalog(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn name_time(pattern: &Regex, name: &str) -> Option<DateTime<Utc>> {
    let caps = pattern.captures(name)?;
    let n = |i: usize| caps[i].parse::<u32>().ok();
    NaiveDate::from_ymd_opt(caps[1].parse().ok()?, n(2)?, n(3)?)?
        .and_hms_opt(n(4)?, n(5)?, 0)
        .map(|t| t.and_utc())
}

/// `scheme://host` part of a URL.
fn host_of(url: &str) -> &str {
    let after_scheme = url.find("://").map(|i| i + 3).unwrap_or(0);
    match url[after_scheme..].find('/') {
        Some(i) => &url[..after_scheme + i],
        None => url,
    }
}
