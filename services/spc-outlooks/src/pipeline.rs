//! The outlook run: one issue time, eight days of convective and fire
//! outlooks, every hazard fanned out to its product directories.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use basemap::Basemap;
use chrono::{DateTime, Utc};
use ingestion::HttpFetcher;
use spc_outlook::bundle::file_name;
use spc_outlook::hazard::DRY_LIGHTNING_MARKER;
use spc_outlook::{
    fetch_issue_time, layout_from_shapefile, render_outlook, HazardType, OutlookBundle,
    OutlookSource, ValidityWindow, ALL_DESTINATIONS,
};
use storage::{IdempotencyGate, ProductMetadata};
use tracing::{debug, info};
use wx_common::CONUS_EXTENT;

use crate::config::Settings;

/// Refresh interval advertised for every outlook image.
pub const REFRESH_INTERVAL_SECONDS: u64 = 3600;

pub const DAYS: std::ops::RangeInclusive<u8> = 1..=8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    AlreadyProduced,
    Rendered { images: usize },
}

/// Hazard a bundle's shapefile renders as, or `None` to skip it.
pub fn classify(source: OutlookSource, file_name: &str) -> spc_outlook::Result<Option<HazardType>> {
    match source {
        OutlookSource::Convective => HazardType::from_file_name(file_name),
        OutlookSource::Fire if file_name.contains(DRY_LIGHTNING_MARKER) => Ok(None),
        OutlookSource::Fire => Ok(Some(HazardType::FireWeather)),
    }
}

pub fn image_filename(day: u8) -> String {
    format!("day{day}.png")
}

pub struct OutlookPipeline {
    fetcher: HttpFetcher,
    settings: Settings,
}

impl OutlookPipeline {
    pub fn new(fetcher: HttpFetcher, settings: Settings) -> Self {
        Self { fetcher, settings }
    }

    fn input_dir(&self) -> PathBuf {
        self.settings.base_path.join("input")
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let issue_time = fetch_issue_time(&self.fetcher)
            .await
            .context("Failed to read the outlook issue time")?;
        info!(issue_time = %issue_time, "Found outlook issue time");

        let gate =
            IdempotencyGate::for_destinations(&self.settings.base_path, &ALL_DESTINATIONS, issue_time);
        if gate.already_produced() {
            info!(issue_time = %issue_time, "Outlooks already produced");
            return Ok(RunOutcome::AlreadyProduced);
        }

        let basemap = Basemap::load(&self.fetcher, &self.settings.cache_dir, &CONUS_EXTENT)
            .await
            .context("Failed to load the base map")?;

        let mut images = 0;
        for source in [OutlookSource::Convective, OutlookSource::Fire] {
            for day in DAYS {
                images += self.run_day(source, day, issue_time, &basemap).await?;
            }
        }

        let input = self.input_dir();
        if input.exists() {
            std::fs::remove_dir_all(&input)
                .with_context(|| format!("Failed to remove {}", input.display()))?;
        }

        info!(images, "Outlook run complete");
        Ok(RunOutcome::Rendered { images })
    }

    async fn run_day(
        &self,
        source: OutlookSource,
        day: u8,
        issue_time: DateTime<Utc>,
        basemap: &Basemap,
    ) -> Result<usize> {
        let url = source.bundle_url(day);
        let dir = self.input_dir().join(source.scratch_name(day));
        let bundle = OutlookBundle::fetch(&self.fetcher, &url, &dir)
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        let mut images = 0;
        for shapefile in &bundle.shapefiles {
            let name = file_name(shapefile);
            let Some(hazard) = classify(source, &name)? else {
                debug!(file = %name, "Skipping shapefile");
                continue;
            };
            images += self.publish(hazard, day, &bundle.window, issue_time, shapefile, basemap)?;
        }
        Ok(images)
    }

    /// Render one hazard and write it to every destination for `day`.
    fn publish(
        &self,
        hazard: HazardType,
        day: u8,
        window: &ValidityWindow,
        issue_time: DateTime<Utc>,
        shapefile: &Path,
        basemap: &Basemap,
    ) -> Result<usize> {
        let layout = layout_from_shapefile(shapefile, hazard)
            .with_context(|| format!("Failed to read {}", shapefile.display()))?;
        let mut image = render_outlook(&layout, Some(basemap), &self.settings.font)?;

        let sink = &self.settings.sink;
        sink.dress(&mut image, &hazard.product_title(day), window.begin, Some(window.end));

        let filename = image_filename(day);
        let destinations = hazard.destinations(day);
        for dest in &destinations {
            let metadata = ProductMetadata::new(
                dest.id,
                issue_time,
                filename.as_str(),
                window.end,
                ProductMetadata::empty_corners(),
                REFRESH_INTERVAL_SECONDS,
            );
            sink.write_metadata(&self.settings.base_path, &metadata)?;
            let path = dest.run_dir(&self.settings.base_path, issue_time).join(&filename);
            sink.save(&image, &path)?;
        }

        info!(
            day,
            hazard = %hazard,
            areas = layout.geometries.len(),
            products = destinations.len(),
            "Published outlook"
        );
        Ok(destinations.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use chrono::TimeZone;
    use renderer::FontBook;
    use storage::{PlainSink, ProductRunRecord, ProductSink, SinkMode};
    use test_utils::{write_outlook_shapefile, OutlookFeature};

    #[test]
    fn test_classify_convective() {
        assert_eq!(
            classify(OutlookSource::Convective, "day1otlk_cat.shp").unwrap(),
            Some(HazardType::Categorical)
        );
        assert_eq!(classify(OutlookSource::Convective, "day1otlk_sigtorn.shp").unwrap(), None);
        assert!(classify(OutlookSource::Convective, "day1otlk_cigtorn.shp").is_err());
    }

    #[test]
    fn test_classify_fire() {
        assert_eq!(
            classify(OutlookSource::Fire, "day1fw_windrh.shp").unwrap(),
            Some(HazardType::FireWeather)
        );
        assert_eq!(classify(OutlookSource::Fire, "day1fw_dryltg.shp").unwrap(), None);
    }

    #[test]
    fn test_image_filename() {
        assert_eq!(image_filename(3), "day3.png");
    }

    fn pipeline(base_path: &Path, sink: Box<dyn ProductSink>) -> OutlookPipeline {
        let settings = Settings {
            base_path: base_path.to_path_buf(),
            cache_dir: base_path.join("cache"),
            font: Rc::new(FontBook::embedded().unwrap()),
            sink,
        };
        OutlookPipeline::new(HttpFetcher::new().unwrap(), settings)
    }

    fn day1_categorical(dir: &Path) -> PathBuf {
        let path = dir.join("day1otlk_cat.shp");
        write_outlook_shapefile(
            &path,
            &[
                OutlookFeature::square(0, "No Risk", "#FFFFFF", "#FFFFFF", (-125.0, 25.0), 30.0),
                OutlookFeature::square(2, "Slight Risk", "#FFE066", "#DDAA00", (-100.0, 32.0), 6.0),
            ],
        );
        path
    }

    fn window() -> ValidityWindow {
        ValidityWindow {
            begin: Utc.with_ymd_and_hms(2023, 6, 18, 16, 30, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2023, 6, 19, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_publish_categorical_fans_out() {
        let base = tempfile::tempdir().unwrap();
        let shapefile = day1_categorical(base.path());
        let issue_time = Utc.with_ymd_and_hms(2023, 6, 18, 16, 5, 0).unwrap();

        let written = pipeline(base.path(), Box::new(PlainSink))
            .publish(
                HazardType::Categorical,
                1,
                &window(),
                issue_time,
                &shapefile,
                &Basemap::default(),
            )
            .unwrap();

        assert_eq!(written, 2);
        for family in ["catout", "LRout"] {
            let png = base
                .path()
                .join("output/products/noaa/spc")
                .join(family)
                .join("2023/06/18/1600/day1.png");
            assert!(png.is_file(), "missing {}", png.display());
        }
        assert!(!base.path().join("output/metadata").exists());

        let gate = IdempotencyGate::for_destinations(
            base.path(),
            &HazardType::Categorical.destinations(1),
            issue_time,
        );
        assert!(gate.already_produced());
    }

    #[test]
    fn test_publish_writes_one_record_per_product() {
        let base = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(base.path().join("output/metadata")).unwrap();
        let shapefile = day1_categorical(base.path());
        let issue_time = Utc.with_ymd_and_hms(2023, 6, 18, 16, 5, 0).unwrap();
        let font = Rc::new(FontBook::embedded().unwrap());
        let sink = SinkMode::Auto.build(base.path(), font);

        pipeline(base.path(), sink)
            .publish(
                HazardType::Categorical,
                1,
                &window(),
                issue_time,
                &shapefile,
                &Basemap::default(),
            )
            .unwrap();

        for id in [1203, 1205] {
            let path = base
                .path()
                .join(format!("output/metadata/products/{id}/202306181600.json"));
            let record = ProductRunRecord::read(&path).unwrap();
            assert_eq!(record.refresh_interval_seconds, REFRESH_INTERVAL_SECONDS);
            assert_eq!(record.frames.len(), 1);
            assert_eq!(record.frames[0].image_filename, "day1.png");
            assert_eq!(record.frames[0].valid_until, window().end);
        }
    }
}
