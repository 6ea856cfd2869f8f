//! Minimal METAR decoding for station plots.
//!
//! Only the groups a surface station model shows are decoded: wind,
//! cloud layers, temperature/dewpoint and the sea-level pressure remark.

use renderer::sky::SkyCover;

const KNOTS_PER_MPS: f64 = 1.943_844;

#[derive(Debug, Clone, PartialEq)]
pub struct MetarReport {
    pub station_id: String,
    /// Degrees true the wind blows from; `None` for variable winds.
    pub wind_direction: Option<f64>,
    pub wind_speed_kt: Option<f64>,
    /// Most opaque reported layer.
    pub sky_cover: Option<SkyCover>,
    pub temperature_c: Option<f64>,
    pub dewpoint_c: Option<f64>,
    pub sea_level_pressure_hpa: Option<f64>,
}

/// Decode every report in a collection. Reports end with `=`; bulletin
/// headers between them are skipped.
pub fn parse_metar_collection(text: &str) -> Vec<MetarReport> {
    text.split('=').filter_map(parse_report).collect()
}

/// Decode one report, or `None` when no `CCCC DDHHMMZ` header is found.
pub fn parse_report(text: &str) -> Option<MetarReport> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let start = tokens
        .windows(2)
        .position(|w| is_station_id(w[0]) && is_report_time(w[1]))?;

    let mut report = MetarReport {
        station_id: tokens[start].to_string(),
        wind_direction: None,
        wind_speed_kt: None,
        sky_cover: None,
        temperature_c: None,
        dewpoint_c: None,
        sea_level_pressure_hpa: None,
    };

    let mut in_remarks = false;
    for token in &tokens[start + 2..] {
        if *token == "RMK" {
            in_remarks = true;
            continue;
        }
        if in_remarks {
            if let Some(slp) = parse_sea_level_pressure(token) {
                report.sea_level_pressure_hpa = Some(slp);
            }
            continue;
        }

        if report.wind_speed_kt.is_none() {
            if let Some((direction, speed)) = parse_wind(token) {
                report.wind_direction = direction;
                report.wind_speed_kt = Some(speed);
                continue;
            }
        }
        if let Some(cover) = parse_cloud_layer(token) {
            report.sky_cover = Some(report.sky_cover.map_or(cover, |c| c.max(cover)));
            continue;
        }
        if report.temperature_c.is_none() {
            if let Some((temperature, dewpoint)) = parse_temperature(token) {
                report.temperature_c = Some(temperature);
                report.dewpoint_c = dewpoint;
            }
        }
    }
    Some(report)
}

fn is_station_id(token: &str) -> bool {
    token.len() == 4
        && token.starts_with(|c: char| c.is_ascii_uppercase())
        && token.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

fn is_report_time(token: &str) -> bool {
    token.len() == 7
        && token.ends_with('Z')
        && token
            .get(..6)
            .is_some_and(|stamp| stamp.chars().all(|c| c.is_ascii_digit()))
}

/// `dddffKT`, `dddffGggKT`, `VRBffKT` or the `MPS` equivalents.
fn parse_wind(token: &str) -> Option<(Option<f64>, f64)> {
    let (body, factor) = if let Some(body) = token.strip_suffix("KT") {
        (body, 1.0)
    } else if let Some(body) = token.strip_suffix("MPS") {
        (body, KNOTS_PER_MPS)
    } else {
        return None;
    };
    if body.len() < 5 {
        return None;
    }

    let (direction, rest) = (body.get(..3)?, body.get(3..)?);
    let direction = match direction {
        "VRB" => None,
        digits => Some(digits.parse::<f64>().ok()?),
    };
    let sustained = rest.split('G').next()?;
    if sustained.len() < 2 || sustained.len() > 3 {
        return None;
    }
    let speed = sustained.parse::<f64>().ok()? * factor;
    Some((direction, speed))
}

fn parse_cloud_layer(token: &str) -> Option<SkyCover> {
    if let Some(cover) = SkyCover::from_metar(token) {
        return Some(cover);
    }
    let code = if token.starts_with("VV") { "VV" } else { token.get(..3)? };
    let height = token.get(code.len()..)?.get(..3)?;
    let height_ok = height.chars().all(|c| c.is_ascii_digit()) || height == "///";
    if height_ok {
        SkyCover::from_metar(code)
    } else {
        None
    }
}

/// `TT/DD` with `M` marking negative values; the dewpoint may be missing.
fn parse_temperature(token: &str) -> Option<(f64, Option<f64>)> {
    let (t, d) = token.split_once('/')?;
    let temperature = parse_signed(t)?;
    let dewpoint = if d.is_empty() { None } else { Some(parse_signed(d)?) };
    Some((temperature, dewpoint))
}

fn parse_signed(value: &str) -> Option<f64> {
    let (sign, digits) = match value.strip_prefix('M') {
        Some(rest) => (-1.0, rest),
        None => (1.0, value),
    };
    if digits.len() != 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(sign * digits.parse::<f64>().ok()?)
}

/// `SLPppp` in tenths of hPa with the leading 9 or 10 dropped.
fn parse_sea_level_pressure(token: &str) -> Option<f64> {
    let digits = token.strip_prefix("SLP")?;
    if digits.len() != 3 {
        return None;
    }
    let tenths = digits.parse::<f64>().ok()? / 10.0;
    Some(if tenths < 50.0 { 1000.0 + tenths } else { 900.0 + tenths })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_report() {
        let report =
            parse_report("KDFW 191453Z 17012KT 10SM FEW045 SCT250 31/21 A2990 RMK AO2 SLP117")
                .unwrap();
        assert_eq!(report.station_id, "KDFW");
        assert_eq!(report.wind_direction, Some(170.0));
        assert_eq!(report.wind_speed_kt, Some(12.0));
        assert_eq!(report.sky_cover, Some(SkyCover::Scattered));
        assert_eq!(report.temperature_c, Some(31.0));
        assert_eq!(report.dewpoint_c, Some(21.0));
        assert!((report.sea_level_pressure_hpa.unwrap() - 1011.7).abs() < 1e-9);
    }

    #[test]
    fn test_gusts_negative_temps_and_high_pressure() {
        let report =
            parse_report("SPECI KMSP 191511Z 29010G22KT 3SM -RA BR OVC008 M01/M03 A3010 RMK SLP995")
                .unwrap();
        assert_eq!(report.station_id, "KMSP");
        assert_eq!(report.wind_speed_kt, Some(10.0));
        assert_eq!(report.sky_cover, Some(SkyCover::Overcast));
        assert_eq!(report.temperature_c, Some(-1.0));
        assert_eq!(report.dewpoint_c, Some(-3.0));
        assert!((report.sea_level_pressure_hpa.unwrap() - 999.5).abs() < 1e-9);
    }

    #[test]
    fn test_replacement_characters_are_skipped() {
        let reports = parse_metar_collection(
            "KDFW 191553Z 12\u{FFFD}34KT 10SM SC\u{FFFD}045 BKN\u{FFFD}50 31/21 RMK SLP117=\n\
             KOKC 191553Z 18010KT 10SM OVC020 28/20 RMK SLP121=",
        );
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].station_id, "KDFW");
        assert_eq!(reports[0].wind_speed_kt, None);
        assert_eq!(reports[0].sky_cover, None);
        assert_eq!(reports[0].temperature_c, Some(31.0));
        assert_eq!(reports[1].wind_speed_kt, Some(10.0));
        assert_eq!(reports[1].sky_cover, Some(SkyCover::Overcast));
    }

    #[test]
    fn test_non_ascii_report_time_is_not_a_header() {
        assert!(!is_report_time("\u{FFFD}\u{FFFD}Z"));
        assert!(parse_report("KDFW 19\u{FFFD}3Z 17012KT").is_none());
    }

    #[test]
    fn test_variable_wind_and_missing_slp() {
        let report = parse_report("KAUS 191451Z VRB03KT 10SM CLR 30/22 A2991 RMK AO2").unwrap();
        assert_eq!(report.wind_direction, None);
        assert_eq!(report.wind_speed_kt, Some(3.0));
        assert_eq!(report.sky_cover, Some(SkyCover::Clear));
        assert_eq!(report.sea_level_pressure_hpa, None);
    }

    #[test]
    fn test_collection_skips_headers() {
        let reports = parse_metar_collection(test_utils::SAMPLE_METARS);
        let ids: Vec<&str> = reports.iter().map(|r| r.station_id.as_str()).collect();
        assert_eq!(ids, vec!["KDFW", "KOKC", "KIAH", "KAUS", "KDFW", "KXYZ", "KMSP"]);
    }

    #[test]
    fn test_header_only_chunk() {
        assert!(parse_report("001\nSAUS70 KWBC 191500\nMETAR\n").is_none());
    }
}
