//! SPC convective and fire weather outlooks.
//!
//! Bundles are fetched as zipped shapefiles, classified by hazard, grouped by
//! category and drawn on a static CONUS map with a legend.
//!
//! ```text
//! bundle zip -> OutlookBundle -> load_records -> group_by_category
//!            -> OutlookLayout -> render_outlook -> RgbaImage
//! ```

pub mod bundle;
pub mod error;
pub mod hazard;
pub mod info;
pub mod issue;
pub mod labels;
pub mod layout;
pub mod record;
pub mod render;
pub mod shapes;

pub use bundle::OutlookBundle;
pub use error::{OutlookError, Result};
pub use hazard::{HazardType, OutlookSource, ALL_DESTINATIONS};
pub use info::ValidityWindow;
pub use issue::{fetch_issue_time, parse_issue_time};
pub use layout::{OutlookLayout, PolygonStyle, StyledGeometry};
pub use record::{group_by_category, CategoryGroup, OutlookRecord};
pub use render::render_outlook;
pub use shapes::load_records;

use std::path::Path;

/// Load, group and style one outlook shapefile.
pub fn layout_from_shapefile(path: &Path, hazard: HazardType) -> Result<OutlookLayout> {
    let records = load_records(path)?;
    let groups = group_by_category(records)?;
    OutlookLayout::build(hazard, &groups)
}
