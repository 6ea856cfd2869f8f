//! The bulletin run: fetch, gate on the valid time, then render the
//! geo-referenced overlay and the static analysis.

use anyhow::{Context, Result};
use basemap::Basemap;
use ingestion::HttpFetcher;
use storage::{IdempotencyGate, ProductMetadata};
use tracing::{info, warn};
use wpc_bulletin::{
    fetch_bulletin, fetch_station_layer, image_filename, render_gis, render_static,
    SurfaceBulletin, GIS_DESTINATION, PRODUCT_TITLE, REFRESH_INTERVAL_SECONDS, STATIC_DESTINATION,
};
use wx_common::{ProductDestination, CONUS_EXTENT};

use crate::config::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    AlreadyProduced,
    Rendered { images: usize },
}

/// Destinations written by one run.
pub fn destinations(include_gis: bool) -> Vec<ProductDestination> {
    if include_gis {
        vec![GIS_DESTINATION, STATIC_DESTINATION]
    } else {
        vec![STATIC_DESTINATION]
    }
}

pub struct SurfacePipeline {
    fetcher: HttpFetcher,
    settings: Settings,
    include_gis: bool,
    year: Option<i32>,
}

impl SurfacePipeline {
    pub fn new(fetcher: HttpFetcher, settings: Settings, include_gis: bool, year: Option<i32>) -> Self {
        Self {
            fetcher,
            settings,
            include_gis,
            year,
        }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let bulletin = fetch_bulletin(&self.fetcher, self.year)
            .await
            .context("Failed to read the surface bulletin")?;
        let valid = bulletin.valid_time;

        let gate = IdempotencyGate::for_destinations(
            &self.settings.base_path,
            &destinations(self.include_gis),
            valid,
        );
        if gate.already_produced() {
            info!(valid = %valid, "Surface analysis already produced");
            return Ok(RunOutcome::AlreadyProduced);
        }

        let mut images = 0;
        if self.include_gis {
            self.publish_gis(&bulletin)?;
            images += 1;
        }
        self.publish_static(&bulletin).await?;
        images += 1;

        info!(images, valid = %valid, "Surface analysis run complete");
        Ok(RunOutcome::Rendered { images })
    }

    fn publish_gis(&self, bulletin: &SurfaceBulletin) -> Result<()> {
        let valid = bulletin.valid_time;
        let filename = image_filename(valid);
        let (image, corners) = render_gis(bulletin, &self.settings.font)?;

        let sink = &self.settings.sink;
        let metadata = ProductMetadata::new(
            GIS_DESTINATION.id,
            valid,
            filename.as_str(),
            valid,
            corners,
            REFRESH_INTERVAL_SECONDS,
        );
        sink.write_metadata(&self.settings.base_path, &metadata)?;
        let path = GIS_DESTINATION.run_dir(&self.settings.base_path, valid).join(&filename);
        sink.save(&image, &path)?;

        info!(path = %path.display(), "Published geo-referenced analysis");
        Ok(())
    }

    async fn publish_static(&self, bulletin: &SurfaceBulletin) -> Result<()> {
        let valid = bulletin.valid_time;
        let cache_dir = &self.settings.cache_dir;

        let basemap = Basemap::load(&self.fetcher, cache_dir, &CONUS_EXTENT)
            .await
            .context("Failed to load the base map")?;
        let stations = match fetch_station_layer(&self.fetcher, cache_dir, valid).await {
            Ok(stations) => stations,
            Err(e) => {
                warn!(error = %e, "Station observations unavailable, plotting without them");
                Vec::new()
            }
        };

        let mut image = render_static(bulletin, Some(&basemap), &stations, &self.settings.font)?;

        let filename = image_filename(valid);
        let sink = &self.settings.sink;
        let metadata = ProductMetadata::new(
            STATIC_DESTINATION.id,
            valid,
            filename.as_str(),
            valid,
            ProductMetadata::empty_corners(),
            REFRESH_INTERVAL_SECONDS,
        );
        sink.write_metadata(&self.settings.base_path, &metadata)?;
        sink.dress(&mut image, PRODUCT_TITLE, valid, None);
        let path = STATIC_DESTINATION.run_dir(&self.settings.base_path, valid).join(&filename);
        sink.save(&image, &path)?;

        info!(path = %path.display(), stations = stations.len(), "Published static analysis");
        Ok(())
    }
}
