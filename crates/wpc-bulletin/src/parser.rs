//! Decoder for the WPC coded surface bulletin (`CODSUS`).
//!
//! The bulletin is line oriented. A line starting with a digit or
//! whitespace continues the previous line. Recognized groups:
//!
//! ```text
//! VALID 061915Z                     month, day, hour (UTC)
//! HIGHS 1022 4151074 1021 3380899   pressure, then the positions it applies to
//! LOWS  1009 3661042
//! COLD  4751178 4681167 ...         positions, optional leading intensity
//! OCFNT WK 4861207 4781196
//! ```
//!
//! Positions split at half their length into latitude and west longitude
//! with implied decimals: `4151074` is 41.5N 107.4W, `47093` is 47N 93W.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use tracing::debug;

use crate::error::{BulletinError, Result};
use crate::feature::{BulletinFeature, FeatureType, Geometry, SurfaceBulletin};

/// Decode a bulletin.
///
/// `reference` resolves the year missing from `VALID` stamps: the year that
/// puts the stamp closest to `reference` wins unless `year` is given.
pub fn parse_bulletin(
    text: &str,
    reference: DateTime<Utc>,
    year: Option<i32>,
) -> Result<SurfaceBulletin> {
    let mut valid: Option<DateTime<Utc>> = None;
    let mut first_valid: Option<DateTime<Utc>> = None;
    let mut features = Vec::new();

    for group in regroup_lines(text) {
        let Some((&keyword, rest)) = group.split_first() else {
            continue;
        };

        if keyword == "VALID" {
            let stamp = rest
                .first()
                .ok_or_else(|| BulletinError::InvalidValidTime(String::new()))?;
            let time = parse_valid_stamp(stamp, reference, year)?;
            first_valid.get_or_insert(time);
            valid = Some(time);
            continue;
        }

        let pressure_type = match keyword {
            "HIGHS" => Some(FeatureType::High),
            "LOWS" => Some(FeatureType::Low),
            _ => None,
        };
        let boundary_type = FeatureType::from_boundary_keyword(keyword);
        if pressure_type.is_none() && boundary_type.is_none() {
            continue;
        }
        let valid = valid.ok_or(BulletinError::MissingValidTime)?;

        if let Some(feature_type) = pressure_type {
            parse_pressure_centers(feature_type, rest, valid, &mut features)?;
        } else if let Some(feature_type) = boundary_type {
            features.push(parse_boundary(feature_type, rest, valid)?);
        }
    }

    let valid_time = first_valid.ok_or(BulletinError::MissingValidTime)?;
    debug!(valid = %valid_time, features = features.len(), "Parsed surface bulletin");
    Ok(SurfaceBulletin {
        valid_time,
        features,
    })
}

/// Walk HIGHS/LOWS tokens. A pressure token sets the strength for every
/// position that follows it until the next pressure.
fn parse_pressure_centers(
    feature_type: FeatureType,
    tokens: &[&str],
    valid: DateTime<Utc>,
    features: &mut Vec<BulletinFeature>,
) -> Result<()> {
    let mut strength: Option<f64> = None;
    for &token in tokens {
        if is_pressure_token(token) {
            let value = token
                .parse::<f64>()
                .map_err(|_| BulletinError::InvalidPressure(token.to_string()))?;
            strength = Some(value);
            continue;
        }
        features.push(BulletinFeature {
            feature_type,
            geometry: Geometry::Point(decode_coordinate(token)?),
            strength,
            intensity: None,
            valid,
        });
    }
    Ok(())
}

/// Central pressures are at most four digits, 8xx to 1xxx hPa.
fn is_pressure_token(token: &str) -> bool {
    token.len() <= 4 && token.starts_with(['8', '9', '1'])
}

/// Join continuation lines onto the line they continue and split on
/// whitespace.
fn regroup_lines(text: &str) -> Vec<Vec<&str>> {
    let mut groups: Vec<Vec<&str>> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let continuation = line.starts_with(|c: char| c.is_ascii_digit() || c.is_whitespace());
        if continuation {
            if let Some(last) = groups.last_mut() {
                last.extend(line.split_whitespace());
                continue;
            }
        }
        groups.push(line.split_whitespace().collect());
    }
    groups
}

fn parse_boundary(
    feature_type: FeatureType,
    tokens: &[&str],
    valid: DateTime<Utc>,
) -> Result<BulletinFeature> {
    let (intensity, positions) = match tokens.split_first() {
        Some((first, rest)) if first.chars().all(|c| c.is_ascii_alphabetic()) => {
            (Some(first.to_string()), rest)
        }
        _ => (None, tokens),
    };

    let mut points = positions
        .iter()
        .map(|p| decode_coordinate(p))
        .collect::<Result<Vec<_>>>()?;
    let geometry = match points.len() {
        0 => {
            return Err(BulletinError::EmptyBoundary {
                kind: feature_type.code(),
            })
        }
        1 => Geometry::Point(points.remove(0)),
        _ => Geometry::Line(points),
    };

    Ok(BulletinFeature {
        feature_type,
        geometry,
        strength: None,
        intensity,
        valid,
    })
}

/// Decode a position group into (lon, lat).
pub fn decode_coordinate(group: &str) -> Result<(f64, f64)> {
    if group.len() < 4 || !group.chars().all(|c| c.is_ascii_digit()) {
        return Err(BulletinError::InvalidCoordinate(group.to_string()));
    }
    let (lat, lon) = group.split_at(group.len() / 2);
    let lat = implied_decimal(lat, 2).ok_or_else(|| BulletinError::InvalidCoordinate(group.to_string()))?;
    let lon = implied_decimal(lon, 3).ok_or_else(|| BulletinError::InvalidCoordinate(group.to_string()))?;
    Ok((-lon, lat))
}

fn implied_decimal(digits: &str, whole: usize) -> Option<f64> {
    if digits.len() <= whole {
        digits.parse().ok()
    } else {
        format!("{}.{}", &digits[..whole], &digits[whole..]).parse().ok()
    }
}

/// Parse `MMDDHHZ` with the year resolved against `reference`.
pub fn parse_valid_stamp(
    stamp: &str,
    reference: DateTime<Utc>,
    year: Option<i32>,
) -> Result<DateTime<Utc>> {
    let invalid = || BulletinError::InvalidValidTime(stamp.to_string());
    let digits = stamp.strip_suffix('Z').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let field = |range: std::ops::Range<usize>| digits[range].parse::<u32>().map_err(|_| invalid());
    let (month, day, hour) = (field(0..2)?, field(2..4)?, field(4..6)?);

    let at = |y: i32| Utc.with_ymd_and_hms(y, month, day, hour, 0, 0).single();
    let candidates: Vec<DateTime<Utc>> = match year {
        Some(y) => at(y).into_iter().collect(),
        None => (reference.year() - 1..=reference.year() + 1)
            .filter_map(at)
            .collect(),
    };

    candidates
        .into_iter()
        .min_by_key(|t| (*t - reference).num_seconds().abs())
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hires_coordinate() {
        let (lon, lat) = decode_coordinate("4151074").unwrap();
        assert!((lat - 41.5).abs() < 1e-9);
        assert!((lon + 107.4).abs() < 1e-9);
    }

    #[test]
    fn test_decode_lowres_coordinate() {
        assert_eq!(decode_coordinate("47093").unwrap(), (-93.0, 47.0));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_coordinate("12").is_err());
        assert!(decode_coordinate("41A1074").is_err());
    }

    #[test]
    fn test_valid_year_closest_to_reference() {
        let reference = Utc.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap();
        let t = parse_valid_stamp("123121Z", reference, None).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2023, 12, 31, 21, 0, 0).unwrap());

        let t = parse_valid_stamp("123121Z", reference, Some(2020)).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2020, 12, 31, 21, 0, 0).unwrap());
    }

    #[test]
    fn test_valid_stamp_rejects_bad_dates() {
        let reference = Utc.with_ymd_and_hms(2023, 6, 19, 16, 0, 0).unwrap();
        assert!(parse_valid_stamp("061915", reference, None).is_err());
        assert!(parse_valid_stamp("133015Z", reference, None).is_err());
    }

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, 19, 16, 0, 0).unwrap()
    }

    #[test]
    fn test_pressure_shared_by_positions() {
        let text = "VALID 061915Z\nHIGHS 1022 4151074 4201080 1018 3380899\n";
        let bulletin = parse_bulletin(text, reference(), None).unwrap();
        let highs: Vec<_> = bulletin.of_type(FeatureType::High).collect();
        assert_eq!(highs.len(), 3);
        assert_eq!(highs[0].strength, Some(1022.0));
        assert_eq!(highs[1].strength, Some(1022.0));
        assert_eq!(highs[1].geometry, Geometry::Point((-108.0, 42.0)));
        assert_eq!(highs[2].strength, Some(1018.0));
        assert_eq!(highs[2].geometry, Geometry::Point((-89.9, 33.8)));
    }

    #[test]
    fn test_trailing_position_keeps_last_pressure() {
        let text = "VALID 061915Z\nLOWS 998 4151074 3380899\n";
        let bulletin = parse_bulletin(text, reference(), None).unwrap();
        let lows: Vec<_> = bulletin.of_type(FeatureType::Low).collect();
        assert_eq!(lows.len(), 2);
        assert!(lows.iter().all(|l| l.strength == Some(998.0)));
    }

    #[test]
    fn test_position_before_pressure_has_no_strength() {
        let text = "VALID 061915Z\nHIGHS 4151074 1030 3380899\n";
        let bulletin = parse_bulletin(text, reference(), None).unwrap();
        let highs: Vec<_> = bulletin.of_type(FeatureType::High).collect();
        assert_eq!(highs[0].strength, None);
        assert_eq!(highs[1].strength, Some(1030.0));
    }

    #[test]
    fn test_continuation_lines() {
        let groups = regroup_lines("COLD 4751178 4681167\n 3951097\n3841085\nWARM 4721185 4671167\n");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 5);
    }
}
