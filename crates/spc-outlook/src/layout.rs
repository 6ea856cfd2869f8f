//! Styling decisions for one outlook image: legend rows and polygon styles.

use renderer::color::{parse_color, Rgba};
use renderer::{LegendEntry, LineStyle};

use crate::error::{OutlookError, Result};
use crate::hazard::HazardType;
use crate::labels::{is_significant, prettify};
use crate::record::{CategoryGroup, Rings};

/// Outline width of filled categories.
pub const FILLED_LINE_WIDTH: f32 = 0.75;
/// Outline and hatch width of significant categories.
pub const HATCHED_LINE_WIDTH: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum PolygonStyle {
    Filled { fill: Rgba, stroke: Rgba },
    /// Outline plus `/` hatching, no fill.
    Hatched { stroke: Rgba },
}

impl PolygonStyle {
    pub fn outline(&self) -> LineStyle {
        match self {
            PolygonStyle::Filled { stroke, .. } => LineStyle::solid(*stroke, FILLED_LINE_WIDTH),
            PolygonStyle::Hatched { stroke } => LineStyle::solid(*stroke, HATCHED_LINE_WIDTH),
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, PolygonStyle::Filled { .. })
    }
}

/// One category's polygons and how to draw them.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledGeometry {
    pub code: i64,
    pub polygons: Vec<Rings>,
    pub style: PolygonStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlookLayout {
    pub hazard: HazardType,
    pub legend: Vec<LegendEntry>,
    pub geometries: Vec<StyledGeometry>,
}

impl OutlookLayout {
    /// Style grouped categories for `hazard`.
    pub fn build(hazard: HazardType, groups: &[CategoryGroup]) -> Result<Self> {
        let mut legend = vec![LegendEntry::header(hazard.legend_header())];
        let mut geometries = Vec::with_capacity(groups.len());

        for group in groups {
            let fill = color(&group.fill_color)?;
            let stroke = color(&group.stroke_color)?;
            let label = prettify(&group.label);

            let style = if is_significant(&label) {
                legend.push(LegendEntry::hatched(
                    significant_label(hazard, &group.label, &label),
                    stroke,
                ));
                PolygonStyle::Hatched { stroke }
            } else {
                legend.push(LegendEntry::filled(label, fill, stroke));
                PolygonStyle::Filled { fill, stroke }
            };

            geometries.push(StyledGeometry {
                code: group.code,
                polygons: group.polygons.clone(),
                style,
            });
        }

        Ok(Self {
            hazard,
            legend,
            geometries,
        })
    }

    /// Only the header row: the map carries a "No areas" note instead of a
    /// legend box.
    pub fn has_no_areas(&self) -> bool {
        self.legend.len() == 1
    }
}

/// Legend text of a significant category, e.g. `Tornado (EF2 or stronger)`.
fn significant_label(hazard: HazardType, raw_label: &str, clean_label: &str) -> String {
    let named = [HazardType::Tornado, HazardType::Hail, HazardType::Wind]
        .into_iter()
        .find(|h| raw_label.contains(h.title()));
    let (subject, suffix) = match named {
        Some(named) => (named.title().to_string(), named.severity_suffix()),
        None => (clean_label.to_string(), hazard.severity_suffix()),
    };
    if suffix.is_empty() {
        subject
    } else {
        format!("{} {}", subject, suffix)
    }
}

fn color(value: &str) -> Result<Rgba> {
    parse_color(value).map_err(|_| OutlookError::InvalidColor(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::Swatch;

    fn group(code: i64, label: &str) -> CategoryGroup {
        CategoryGroup {
            code,
            fill_color: "#FFE066".to_string(),
            stroke_color: "#DDAA00".to_string(),
            label: label.to_string(),
            polygons: vec![vec![vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]]],
        }
    }

    #[test]
    fn test_empty_layout_has_no_areas() {
        let layout = OutlookLayout::build(HazardType::Hail, &[]).unwrap();
        assert!(layout.has_no_areas());
        assert_eq!(layout.legend[0].swatch, Swatch::None);
    }

    #[test]
    fn test_significant_hail_suffix() {
        let layout = OutlookLayout::build(
            HazardType::Hail,
            &[group(5, "5% Hail Risk"), group(10, "Significant Hail Risk")],
        )
        .unwrap();
        assert_eq!(layout.legend[1].label, "5%");
        assert_eq!(layout.legend[2].label, "Hail (2\" or larger)");
        assert!(!layout.geometries[1].style.is_filled());
    }

    #[test]
    fn test_significant_fire_has_no_trailing_space() {
        let layout =
            OutlookLayout::build(HazardType::FireWeather, &[group(8, "Significant Fire Risk")])
                .unwrap();
        assert_eq!(layout.legend[1].label, "Significant");
    }

    #[test]
    fn test_invalid_color() {
        let mut bad = group(2, "Marginal Risk");
        bad.fill_color = "mauve-ish".to_string();
        assert!(matches!(
            OutlookLayout::build(HazardType::Categorical, &[bad]),
            Err(OutlookError::InvalidColor(_))
        ));
    }
}
