//! # G1000 Flight Data Log Format
//!
//! Garmin G1000 units record one comma-separated row per second. Every cell
//! is right-justified to a fixed width and the file starts with three header
//! lines:
//!
//! 1. `#airframe_info, ...` metadata
//! 2. Unit labels
//! 3. Column names
//!
//! ```text
//! #airframe_info, log_version="1.00", airframe_name="Beechcraft A36/G36", ...
//! #yyy-mm-dd, hh:mm:ss,   hh:mm,  ident,      degrees,      degrees, ft Baro, inch, ...
//!   Lcl Date, Lcl Time, UTCOfst, AtvWpt,     Latitude,    Longitude,    AltB, BaroA, ...
//! ```
//!
//! ## Columns
//!
//! The column table [`G1000_COLUMNS`] maps each column to a [`Property`],
//! its unit label, width and formatter. A property missing from a sample
//! produces a blank cell. A value whose type the formatter cannot handle
//! drops the whole row.

use tracing::warn;

use super::LogFormat;
use crate::property::Property;
use crate::sample::{PropValue, Sample};

/// Renders a value into cell text, or `None` if the value has the wrong type
pub type Formatter = fn(&PropValue) -> Option<String>;

/// Separator between cells
pub const SEPARATOR: &str = ", ";

/// Airframe written into the metadata line unless configured otherwise
pub const DEFAULT_AIRFRAME_NAME: &str = "Beechcraft A36/G36";

/// Definition of one log column
#[derive(Clone, Copy)]
pub struct Column {
    /// Column name shown in the third header line
    pub name: &'static str,
    /// Property rendered in this column
    pub property: Property,
    /// Unit label shown in the second header line
    pub unit: &'static str,
    /// Minimum cell width; cells are right-justified to it
    pub width: usize,
    /// Formatter; text values are passed through when absent
    pub formatter: Option<Formatter>,
}

impl Column {
    const fn new(
        name: &'static str,
        property: Property,
        unit: &'static str,
        width: usize,
        formatter: Option<Formatter>,
    ) -> Self {
        Self {
            name,
            property,
            unit,
            width,
            formatter,
        }
    }

    /// Render a value into cell text without padding
    pub fn render(&self, value: &PropValue) -> Option<String> {
        self.formatter.unwrap_or(text)(value)
    }

    /// Right-justify text to this column's width
    pub fn pad(&self, text: &str) -> String {
        format!("{:>width$}", text, width = self.width)
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("property", &self.property)
            .field("unit", &self.unit)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

fn text(v: &PropValue) -> Option<String> {
    v.as_text().map(str::to_string)
}

fn fixed1(v: &PropValue) -> Option<String> {
    v.as_f64().map(|x| format!("{:.1}", x))
}

fn fixed2(v: &PropValue) -> Option<String> {
    v.as_f64().map(|x| format!("{:.2}", x))
}

fn fixed3(v: &PropValue) -> Option<String> {
    v.as_f64().map(|x| format!("{:.3}", x))
}

fn coordinate(v: &PropValue) -> Option<String> {
    v.as_f64().map(|x| format!("{:12.7}", x))
}

fn truncated(v: &PropValue) -> Option<String> {
    v.as_f64().map(|x| format!("{}", x.trunc() as i64))
}

fn flag(v: &PropValue) -> Option<String> {
    let on = match v {
        PropValue::Bool(b) => *b,
        PropValue::Number(n) => *n != 0.0,
        PropValue::Text(_) => return None,
    };
    Some(if on { "1" } else { "0" }.to_string())
}

/// Columns of a G1000 log, in file order
#[rustfmt::skip]
pub const G1000_COLUMNS: &[Column] = &[
    Column::new("Lcl Date",  Property::LocalDate,    "#yyy-mm-dd", 10, None),
    Column::new("Lcl Time",  Property::LocalTime,    "hh:mm:ss",    8, None),
    Column::new("UTCOfst",   Property::UtcOffset,    "hh:mm",       7, None),
    Column::new("AtvWpt",    Property::NextWp,       "ident",       6, None),
    Column::new("Latitude",  Property::Lat,          "degrees",    12, Some(coordinate)),
    Column::new("Longitude", Property::Lon,          "degrees",    12, Some(coordinate)),
    Column::new("AltB",      Property::AltIndicated, "ft Baro",     7, Some(fixed2)),
    Column::new("BaroA",     Property::Baro,         "inch",        5, Some(fixed2)),
    Column::new("AltMSL",    Property::AltMsl,       "ft msl",      7, Some(fixed1)),
    Column::new("OAT",       Property::Oat,          "deg C",       5, Some(fixed1)),
    Column::new("IAS",       Property::Ias,          "kt",          6, Some(fixed2)),
    Column::new("GndSpd",    Property::Gs,           "kt",          6, Some(fixed2)),
    Column::new("VSpd",      Property::Vs,           "fpm",         7, Some(fixed2)),
    Column::new("Pitch",     Property::Pitch,        "deg",         6, Some(fixed2)),
    Column::new("Roll",      Property::Roll,         "deg",         6, Some(fixed2)),
    Column::new("LatAc",     Property::Latg,         "G",           6, Some(fixed2)),
    Column::new("NormAc",    Property::Vertg,        "G",           6, Some(fixed2)),
    Column::new("HDG",       Property::Hdg,          "deg",         5, Some(fixed1)),
    Column::new("TRK",       Property::Trk,          "deg",         5, Some(fixed1)),
    Column::new("volt1",     Property::Volts,        "volts",       5, Some(fixed1)),
    Column::new("FQtyL",     Property::FuelL,        "gals",        6, Some(fixed2)),
    Column::new("FQtyR",     Property::FuelR,        "gals",        6, Some(fixed2)),
    Column::new("E1 FFlow",  Property::Eng1Gph,      "gph",         8, Some(fixed2)),
    Column::new("E1 OilT",   Property::Eng1OilTemp,  "deg F",       8, Some(fixed2)),
    Column::new("E1 OilP",   Property::Eng1OilPress, "psi",         8, Some(fixed2)),
    Column::new("E1 MAP",    Property::Eng1Map,      "Hg",          6, Some(fixed2)),
    Column::new("E1 RPM",    Property::Eng1Rpm,      "rpm",         6, Some(fixed1)),
    Column::new("E1 CHT1",   Property::Eng1Cht,      "deg F",       7, Some(fixed2)),
    Column::new("E1 EGT1",   Property::Eng1Egt,      "deg F",       7, Some(fixed2)),
    Column::new("AltGPS",    Property::AltGps,       "ft wgs",      7, Some(fixed1)),
    Column::new("TAS",       Property::Tas,          "kt",          3, Some(truncated)),
    Column::new("HSIS",      Property::HsiSource,    "enum",        4, None),
    Column::new("CRS",       Property::Course,       "deg",         7, Some(fixed1)),
    Column::new("HCDI",      Property::Hcdi,         "fsd",         6, Some(fixed3)),
    Column::new("VCDI",      Property::Vcdi,         "fsd",         6, Some(fixed3)),
    Column::new("WndSpd",    Property::WindSpd,      "kt",          6, Some(fixed2)),
    Column::new("WndDr",     Property::WindDir,      "deg",         6, Some(fixed1)),
    Column::new("WptDst",    Property::WpDist,       "nm",          6, Some(fixed1)),
    Column::new("WptBRG",    Property::WpBrg,        "deg",         6, Some(fixed1)),
    Column::new("MagVar",    Property::Magvar,       "deg",         6, Some(fixed1)),
    Column::new("AfcsOn",    Property::ApMaster,     "bool",        6, Some(flag)),
    Column::new("RollM",     Property::RollMode,     "enum",        5, None),
    Column::new("PitchM",    Property::PitchMode,    "enum",        6, None),
    Column::new("RollC",     Property::ApRollCmd,    "deg",         5, Some(fixed1)),
    Column::new("PitchC",    Property::ApPitchCmd,   "deg",         6, Some(fixed1)),
];

/// G1000 CSV flight data log format
#[derive(Debug, Clone)]
pub struct G1000 {
    airframe_name: String,
}

impl Default for G1000 {
    fn default() -> Self {
        Self::new(DEFAULT_AIRFRAME_NAME)
    }
}

impl G1000 {
    pub fn new(airframe_name: impl Into<String>) -> Self {
        Self {
            airframe_name: airframe_name.into(),
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        G1000_COLUMNS
    }

    /// First header line describing the unit that produced the log
    pub fn metadata_line(&self) -> String {
        format!(
            "#airframe_info, log_version=\"1.00\", airframe_name=\"{}\", \
             unit_software_part_number=\"006-B0319-9C\", unit_software_version=\"11.12\", \
             system_software_part_number=\"006-B0858-08\", system_id=\"\", mode=NORMAL,",
            self.airframe_name
        )
    }

    /// Second header line: unit labels
    pub fn unit_line(&self) -> String {
        join_cells(G1000_COLUMNS.iter().map(|c| c.pad(c.unit)))
    }

    /// Third header line: column names
    pub fn name_line(&self) -> String {
        join_cells(G1000_COLUMNS.iter().map(|c| c.pad(c.name)))
    }
}

impl LogFormat for G1000 {
    fn properties(&self) -> Vec<Property> {
        G1000_COLUMNS.iter().map(|c| c.property).collect()
    }

    fn header(&self) -> String {
        format!("{}\n{}\n{}", self.metadata_line(), self.unit_line(), self.name_line())
    }

    fn format(&self, sample: &Sample) -> Option<String> {
        let mut cells = Vec::with_capacity(G1000_COLUMNS.len());

        for column in G1000_COLUMNS {
            let cell = match sample.value(column.property) {
                None => column.pad(""),
                Some(value) => match column.render(value) {
                    Some(text) => column.pad(&text),
                    None => {
                        warn!(
                            "Skipping row due to error in {} (={} {})",
                            column.property,
                            value.kind(),
                            value
                        );
                        return None;
                    }
                },
            };
            cells.push(cell);
        }

        Some(join_cells(cells.into_iter()))
    }
}

fn join_cells<I: Iterator<Item = String>>(cells: I) -> String {
    cells.collect::<Vec<_>>().join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Reader;
    use crate::simulator::SyntheticSimulator;

    fn cells(line: &str) -> Vec<&str> {
        line.split(SEPARATOR).collect()
    }

    fn full_sample() -> Sample {
        Reader::new(SyntheticSimulator::new()).sample().unwrap()
    }

    #[test]
    fn test_header_has_three_lines() {
        let header = G1000::default().header();
        let lines: Vec<_> = header.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#airframe_info, log_version=\"1.00\""));
        assert!(lines[0].contains("airframe_name=\"Beechcraft A36/G36\""));
        assert!(lines[0].ends_with("mode=NORMAL,"));
    }

    #[test]
    fn test_custom_airframe_name() {
        let header = G1000::new("Cessna 172S").header();
        assert!(header.contains("airframe_name=\"Cessna 172S\""));
    }

    #[test]
    fn test_header_order_matches_table() {
        let format = G1000::default();
        let line = format.name_line();
        let names: Vec<_> = cells(&line).iter().map(|c| c.trim()).collect();
        let expected: Vec<_> = G1000_COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(names, expected);

        let props = format.properties();
        assert_eq!(props.len(), G1000_COLUMNS.len());
        assert_eq!(props[0], Property::LocalDate);
        assert_eq!(props[props.len() - 1], Property::ApPitchCmd);
    }

    #[test]
    fn test_header_cells_match_widths() {
        let format = G1000::default();
        for line in [format.unit_line(), format.name_line()] {
            for (cell, column) in cells(&line).iter().zip(G1000_COLUMNS) {
                assert_eq!(cell.len(), column.width, "{} header cell", column.name);
            }
        }
    }

    #[test]
    fn test_row_cells_have_declared_width() {
        let line = G1000::default().format(&full_sample()).unwrap();
        let row = cells(&line);
        assert_eq!(row.len(), G1000_COLUMNS.len());
        for (cell, column) in row.iter().zip(G1000_COLUMNS) {
            assert_eq!(cell.len(), column.width, "{} = {:?}", column.name, cell);
        }
    }

    #[test]
    fn test_missing_values_are_blank() {
        let mut sample = Sample::new().with(Property::Ias, 98.766);
        sample.insert(Property::AltMsl, None);

        let line = G1000::default().format(&sample).unwrap();
        let row = cells(&line);
        let ias = G1000_COLUMNS.iter().position(|c| c.property == Property::Ias).unwrap();
        let alt = G1000_COLUMNS.iter().position(|c| c.property == Property::AltMsl).unwrap();

        assert_eq!(row[ias], " 98.77");
        assert_eq!(row[alt], "       ");
        assert_eq!(row[0], " ".repeat(10));
    }

    #[test]
    fn test_type_mismatch_drops_row() {
        let sample = Sample::new()
            .with(Property::Ias, 120.0)
            .with(Property::AltMsl, "high");
        assert!(G1000::default().format(&sample).is_none());

        let sample = Sample::new().with(Property::NextWp, 42.0);
        assert!(G1000::default().format(&sample).is_none());
    }

    #[test]
    fn test_formatters() {
        assert_eq!(coordinate(&PropValue::Number(39.9088)).unwrap(), "  39.9088000");
        assert_eq!(coordinate(&PropValue::Number(-104.5)).unwrap(), "-104.5000000");
        assert_eq!(fixed1(&PropValue::Number(2399.96)).unwrap(), "2400.0");
        assert_eq!(fixed2(&PropValue::Number(-1.234)).unwrap(), "-1.23");
        assert_eq!(fixed3(&PropValue::Number(0.0944)).unwrap(), "0.094");
        assert_eq!(truncated(&PropValue::Number(163.9)).unwrap(), "163");
        assert_eq!(flag(&PropValue::Bool(true)).unwrap(), "1");
        assert_eq!(flag(&PropValue::Number(0.0)).unwrap(), "0");
        assert!(flag(&PropValue::Text("on".to_string())).is_none());
        assert!(fixed2(&PropValue::Bool(true)).is_none());
        assert_eq!(text(&PropValue::Text("KBJC".to_string())).unwrap(), "KBJC");
    }

    #[test]
    fn test_text_columns_pad() {
        let sample = Sample::new()
            .with(Property::HsiSource, "GPS")
            .with(Property::RollMode, "")
            .with(Property::UtcOffset, "-06:00");
        let line = G1000::default().format(&sample).unwrap();
        let row = cells(&line);
        let find = |p| G1000_COLUMNS.iter().position(|c| c.property == p).unwrap();

        assert_eq!(row[find(Property::HsiSource)], " GPS");
        assert_eq!(row[find(Property::RollMode)], "     ");
        assert_eq!(row[find(Property::UtcOffset)], " -06:00");
    }

    #[test]
    fn test_extra_properties_ignored() {
        let sample = Sample::new()
            .with(Property::Eng2Rpm, 2400.0)
            .with(Property::Com1, 118.5);
        let line = G1000::default().format(&sample).unwrap();
        assert!(line.trim_matches(|c| c == ' ' || c == ',').is_empty());
    }
}
