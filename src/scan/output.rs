//! Scan results and their serialization
//!
//! `ScanOutput` keeps locations and values as two parallel sequences; every
//! operation here moves or drops entries from both at once.

use std::fs::File;
use std::io::{BufWriter, Write};

use log::info;

use crate::raster::{Element, ElementType};
use crate::scan::errors::{ScanError, ScanResult};
use crate::scan::location::Location;
use crate::scan::values::ElementValues;

/// Locations and values found by a scan
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutput {
    /// Element type of the scanned raster
    pub element_type: ElementType,
    /// Raster-global locations
    pub locations: Vec<Location>,
    /// Values in the same order as `locations`
    pub values: ElementValues,
    /// False when the scan was cancelled before every region ran
    pub complete: bool,
}

impl ScanOutput {
    /// Empty, complete output for the given type
    pub fn empty(element_type: ElementType) -> Self {
        ScanOutput {
            element_type,
            locations: Vec::new(),
            values: ElementValues::empty(element_type),
            complete: true,
        }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Iterate `(location, value as f64)` pairs
    pub fn samples_f64(&self) -> impl Iterator<Item = (Location, f64)> + '_ {
        self.locations
            .iter()
            .enumerate()
            .filter_map(move |(i, loc)| self.values.get_f64(i).map(|v| (*loc, v)))
    }

    /// Unwrap into typed vectors
    ///
    /// # Returns
    /// `ElementTypeMismatch` if `T` is not the scanned raster's element type
    pub fn into_typed<T: Element>(self) -> ScanResult<(Vec<Location>, Vec<T>)> {
        let expected = self.values.element_type();
        match T::from_values(self.values) {
            Some(values) => Ok((self.locations, values)),
            None => Err(ScanError::ElementTypeMismatch {
                expected,
                actual: T::ELEMENT_TYPE,
            }),
        }
    }

    /// Sort samples into row-major order (row, then column)
    pub fn sort_row_major(&mut self) {
        let mut order: Vec<usize> = (0..self.locations.len()).collect();
        order.sort_by_key(|&i| self.locations[i]);

        self.locations = order.iter().map(|&i| self.locations[i]).collect();
        self.values.permute(&order);
    }

    /// Keep only samples whose value lies in `[min, max]`
    pub fn retain_in_range(&mut self, min: f64, max: f64) {
        let keep: Vec<bool> = (0..self.locations.len())
            .map(|i| self.values.get_f64(i).map_or(false, |v| v >= min && v <= max))
            .collect();

        let mut flags = keep.iter();
        self.locations.retain(|_| flags.next().copied().unwrap_or(false));
        self.values.retain_mask(&keep);
    }

    /// Short human-readable description
    pub fn summary(&self) -> String {
        let mut result = format!("{} non-zero {} samples", self.len(), self.element_type);
        if !self.complete {
            result.push_str(" (scan cancelled, partial)");
        }
        result
    }

    /// Save the samples to a file in the specified format
    ///
    /// # Arguments
    /// * `path` - Path to save the file
    /// * `format` - Format to use ("csv", "json")
    pub fn save_to_file(&self, path: &str, format: &str) -> ScanResult<()> {
        info!("Writing {} samples to {} as {}", self.len(), path, format);

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, format)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the samples to any writer in the specified format
    pub fn write_to<W: Write>(&self, writer: &mut W, format: &str) -> ScanResult<()> {
        match format.to_lowercase().as_str() {
            "csv" => self.write_csv(writer),
            "json" => self.write_json(writer),
            _ => Err(ScanError::GenericError(format!("Unsupported output format: {}", format))),
        }
    }

    fn write_csv<W: Write>(&self, writer: &mut W) -> ScanResult<()> {
        writeln!(writer, "x,y,value")?;
        for (i, loc) in self.locations.iter().enumerate() {
            let value = self.values.format_value(i).unwrap_or_default();
            writeln!(writer, "{},{},{}", loc.x, loc.y, value)?;
        }
        Ok(())
    }

    fn write_json<W: Write>(&self, writer: &mut W) -> ScanResult<()> {
        writeln!(writer, "{{")?;
        writeln!(writer, "  \"element_type\": \"{}\",", self.element_type)?;
        writeln!(writer, "  \"complete\": {},", self.complete)?;
        writeln!(writer, "  \"count\": {},", self.len())?;
        writeln!(writer, "  \"samples\": [")?;

        for (i, loc) in self.locations.iter().enumerate() {
            // JSON has no NaN or infinity literals
            let value = match self.values.get_f64(i) {
                Some(v) if v.is_finite() => self.values.format_value(i).unwrap_or_default(),
                _ => "null".to_string(),
            };
            let separator = if i + 1 < self.locations.len() { "," } else { "" };
            writeln!(writer, "    {{\"x\": {}, \"y\": {}, \"value\": {}}}{}", loc.x, loc.y, value, separator)?;
        }

        writeln!(writer, "  ]")?;
        writeln!(writer, "}}")?;
        Ok(())
    }
}
