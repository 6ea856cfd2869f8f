//! Outlook polygons and their grouping by category.

use crate::error::{OutlookError, Result};

/// Polygon as outer/inner rings of (lon, lat) points.
pub type Rings = Vec<Vec<(f64, f64)>>;

/// One outlook polygon with its SPC attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlookRecord {
    /// `DN` column; 0 is "no risk".
    pub category_code: i64,
    pub fill_color: String,
    pub stroke_color: String,
    /// `LABEL2` column, e.g. `"Slight Risk"`.
    pub label: String,
    pub rings: Rings,
}

/// All polygons sharing one category code and its single style.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub code: i64,
    pub fill_color: String,
    pub stroke_color: String,
    pub label: String,
    pub polygons: Vec<Rings>,
}

impl CategoryGroup {
    fn same_style(&self, record: &OutlookRecord) -> bool {
        self.fill_color == record.fill_color
            && self.stroke_color == record.stroke_color
            && self.label == record.label
    }
}

/// Group records by category code in first-appearance order.
///
/// Code 0 is dropped. Records sharing a code must share fill, stroke and
/// label.
pub fn group_by_category(records: Vec<OutlookRecord>) -> Result<Vec<CategoryGroup>> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for record in records {
        if record.category_code == 0 {
            continue;
        }
        match groups.iter_mut().find(|g| g.code == record.category_code) {
            Some(group) => {
                if !group.same_style(&record) {
                    return Err(OutlookError::ConflictingStyles { code: group.code });
                }
                group.polygons.push(record.rings);
            }
            None => groups.push(CategoryGroup {
                code: record.category_code,
                fill_color: record.fill_color,
                stroke_color: record.stroke_color,
                label: record.label,
                polygons: vec![record.rings],
            }),
        }
    }
    Ok(groups)
}
