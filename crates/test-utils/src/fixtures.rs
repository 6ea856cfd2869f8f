//! Canned source documents for parser and pipeline tests.
//!
//! Each fixture mirrors the layout of the live upstream product closely
//! enough to exercise the real parsing paths.

/// High-resolution WPC coded surface bulletin, valid 19 June 15Z.
///
/// Contains two highs, three lows, one of each boundary type, a wrapped
/// cold front, an occluded front with an intensity word and a single-point
/// trough that must not be drawn.
pub const SAMPLE_BULLETIN: &str = "\
CODSUS
CODED SURFACE FRONTAL POSITIONS
NWS WEATHER PREDICTION CENTER COLLEGE PARK MD
1052 AM EDT MON JUN 19 2023

VALID 061915Z
HIGHS 1022 4151074 1021 3380899
LOWS 1009 3661042 1003 4721185 1007 2961114
COLD 4751178 4681167 4581154 4441143 4311133 4181121 4061109
 3951097 3841085
WARM 4721185 4671167 4631149
STNRY 3651051 3611034 3551017 3491000
OCFNT WK 4861207 4781196 4721185
TROF 2941170 2841155 2741140
TROF 3001000

$$
";

/// Low-resolution bulletin using 5-digit coordinates.
pub const SAMPLE_BULLETIN_LOWRES: &str = "\
VALID 122100Z
HIGHS 1030 42102
LOWS 998 47093
COLD 47093 42095 38100
";

/// `.info` descriptor shipped inside every SPC shapefile bundle.
pub const SAMPLE_INFO: &str = "\
Product Valid Time Begin: 2023-06-18 16:30:00+00:00
Product Valid Time End: 2023-06-19 12:00:00+00:00
Product Issue Time: 2023-06-18 16:12:00+00:00
";

/// Fragment of the SPC outlook index page carrying the update stamp.
pub const SAMPLE_OUTLOOK_INDEX: &str = r#"<table><tr><td class="zz">
<b>Updated:</b>&nbsp;Updated: Sun Jun 18 16:12:03 UTC 2023<script>document.write("")</script>
</td></tr></table>"#;

/// THREDDS catalog listing hourly METAR collections.
pub const SAMPLE_METAR_CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalog xmlns="http://www.unidata.ucar.edu/namespaces/thredds/InvCatalog/v1.0" xmlns:xlink="http://www.w3.org/1999/xlink" name="METAR" version="1.0.6">
  <service name="all" serviceType="Compound" base="">
    <service name="HTTPServer" serviceType="HTTPServer" base="/thredds/fileServer/" />
  </service>
  <dataset name="METAR" ID="noaaport/text/metar">
    <metadata inherited="true">
      <serviceName>all</serviceName>
    </metadata>
    <dataset name="metar_20230619_1600.txt" ID="noaaport/text/metar/metar_20230619_1600.txt" urlPath="noaaport/text/metar/metar_20230619_1600.txt">
      <dataSize units="Kbytes">912.4</dataSize>
      <date type="modified">2023-06-19T16:59:58Z</date>
    </dataset>
    <dataset name="metar_20230619_1500.txt" ID="noaaport/text/metar/metar_20230619_1500.txt" urlPath="noaaport/text/metar/metar_20230619_1500.txt">
      <dataSize units="Kbytes">1024.0</dataSize>
      <date type="modified">2023-06-19T15:59:58Z</date>
    </dataset>
    <dataset name="metar_20230619_1400.txt" ID="noaaport/text/metar/metar_20230619_1400.txt" urlPath="noaaport/text/metar/metar_20230619_1400.txt" />
  </dataset>
</catalog>
"#;

/// NOAAPort METAR collection excerpt, including a duplicate, a report
/// without sea-level pressure and a non-airport station.
pub const SAMPLE_METARS: &str = "\
001
SAUS70 KWBC 191500
METAR
KDFW 191453Z 17012KT 10SM FEW045 SCT250 31/21 A2990 RMK AO2 SLP117 T03110211=
KOKC 191452Z 18015G24KT 10SM BKN030 29/19 A2986 RMK AO2 SLP098 T02890194=
KIAH 191453Z 16008KT 10SM SCT035 32/23 A2992 RMK AO2 SLP125=
KAUS 191451Z VRB03KT 10SM CLR 30/22 A2991 RMK AO2=
KDFW 191500Z 18014KT 10SM FEW045 32/21 A2989 RMK AO2 SLP114=
KXYZ 191453Z 00000KT 10SM OVC008 18/17 A3001 RMK AO2 SLP161=
SPECI KMSP 191511Z 29010KT 3SM -RA BR OVC008 M01/M03 A3010 RMK AO2 SLP195=
";

/// Airport table excerpt in the Unidata/MetPy `airport-codes.csv` layout.
pub const SAMPLE_AIRPORTS_CSV: &str = "\
ident,type,name,elevation_ft,continent,iso_country,iso_region,municipality,gps_code,iata_code,local_code,coordinates
KDFW,large_airport,Dallas Fort Worth International Airport,607,NA,US,US-TX,Dallas-Fort Worth,KDFW,DFW,DFW,\"-97.038002, 32.896801\"
KOKC,large_airport,Will Rogers World Airport,1295,NA,US,US-OK,Oklahoma City,KOKC,OKC,OKC,\"-97.600700, 35.393101\"
KIAH,large_airport,George Bush Intercontinental Houston Airport,97,NA,US,US-TX,Houston,KIAH,IAH,IAH,\"-95.341400, 29.984400\"
KAUS,large_airport,Austin Bergstrom International Airport,542,NA,US,US-TX,Austin,KAUS,AUS,AUS,\"-97.669899, 30.194500\"
KMSP,large_airport,Minneapolis-St Paul International Airport,841,NA,US,US-MN,Minneapolis,KMSP,MSP,MSP,\"-93.221802, 44.882000\"
KXYZ,heliport,Example Heliport,100,NA,US,US-TX,Nowhere,KXYZ,,XYZ,\"-96.0, 31.0\"
";
