// 🏗️ Row Sources - spreadsheet rows as plain cell text
// Workbooks (xlsx/xls/ods) through calamine, CSV through the csv crate

use crate::error::{MigrationError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// ROW LAYOUT
// ============================================================================

/// Column holding the port number (text, parsed later)
pub const PORT_COLUMN: usize = 0;
/// Column holding the protocol title
pub const PROTOCOL_COLUMN: usize = 1;
/// Column holding the model title
pub const MODEL_COLUMN: usize = 2;
/// Column holding the brand title
pub const BRAND_COLUMN: usize = 3;

// ============================================================================
// CORE TYPES
// ============================================================================

/// SourceFormat - which reader handles a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    Xlsx,
    Xls,
    Ods,
    Csv,
}

impl SourceFormat {
    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            SourceFormat::Xlsx => "Excel workbook",
            SourceFormat::Xls => "Excel 97-2003 workbook",
            SourceFormat::Ods => "OpenDocument spreadsheet",
            SourceFormat::Csv => "CSV file",
        }
    }

    /// Whether this format is read through calamine
    pub fn is_workbook(&self) -> bool {
        !matches!(self, SourceFormat::Csv)
    }
}

/// One spreadsheet row: position in the sheet + cell text in column order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    /// 0-based row in the sheet, or line in the file for CSV. Blank
    /// rows the reader drops still count.
    pub index: usize,
    pub cells: Vec<String>,
}

impl SheetRow {
    pub fn new(index: usize, cells: Vec<String>) -> Self {
        SheetRow { index, cells }
    }

    /// Cell text, empty when the row is shorter than `column`
    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn port(&self) -> &str {
        self.cell(PORT_COLUMN)
    }

    pub fn protocol(&self) -> &str {
        self.cell(PROTOCOL_COLUMN)
    }

    pub fn model(&self) -> &str {
        self.cell(MODEL_COLUMN)
    }

    pub fn brand(&self) -> &str {
        self.cell(BRAND_COLUMN)
    }

    /// 1-based row number, as a spreadsheet user would see it
    pub fn line_number(&self) -> usize {
        self.index + 1
    }

    /// Number of cells that hold any text
    pub fn populated(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// End-of-data sentinel: exactly one populated cell
    pub fn is_terminator(&self) -> bool {
        self.populated() == 1
    }

    pub fn is_blank(&self) -> bool {
        self.populated() == 0
    }
}

/// The data window both passes walk over.
///
/// Skips the header (first row), stops at the first sentinel row even if
/// more rows follow, and ignores rows with no populated cell at all.
pub fn data_rows(rows: &[SheetRow]) -> impl Iterator<Item = &SheetRow> {
    rows.iter()
        .skip(1)
        .take_while(|row| !row.is_terminator())
        .filter(|row| !row.is_blank())
}

// ============================================================================
// ROW SOURCE TRAIT
// ============================================================================

/// RowSource - anything that can produce the ordered rows of one sheet
pub trait RowSource {
    /// Read every row of the selected sheet, header included
    fn read_rows(&self) -> Result<Vec<SheetRow>>;

    /// Format this source reads
    fn format(&self) -> SourceFormat;

    /// Short description for logs and the import report
    fn describe(&self) -> String;
}

// ============================================================================
// WORKBOOK SOURCE (calamine)
// ============================================================================

/// Reads one worksheet of an xlsx/xlsm/xlsb/xls/ods workbook
pub struct WorkbookSource {
    path: PathBuf,
    format: SourceFormat,
    /// Worksheet name; `None` = first worksheet
    sheet: Option<String>,
}

impl WorkbookSource {
    pub fn new(path: impl Into<PathBuf>, format: SourceFormat, sheet: Option<String>) -> Self {
        WorkbookSource {
            path: path.into(),
            format,
            sheet,
        }
    }
}

impl RowSource for WorkbookSource {
    fn read_rows(&self) -> Result<Vec<SheetRow>> {
        let mut workbook =
            open_workbook_auto(&self.path).map_err(|e| MigrationError::OpenSource {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = match &self.sheet {
            Some(name) if sheet_names.contains(name) => name.clone(),
            Some(name) => {
                return Err(MigrationError::SheetNotFound { name: name.clone() });
            }
            None => sheet_names
                .first()
                .cloned()
                .ok_or_else(|| MigrationError::EmptyWorkbook {
                    path: self.path.clone(),
                })?,
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| MigrationError::ReadSource {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        // calamine trims leading empty rows and columns; pad the columns
        // back so the fixed layout lines up, and shift the row index so it
        // still names the sheet row
        let (row_offset, column_offset) = range
            .start()
            .map(|(row, col)| (row as usize, col as usize))
            .unwrap_or((0, 0));

        let rows = range
            .rows()
            .enumerate()
            .map(|(index, row)| {
                let mut cells = vec![String::new(); column_offset];
                cells.extend(row.iter().map(cell_text));
                SheetRow::new(row_offset + index, cells)
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            path = %self.path.display(),
            sheet = %sheet_name,
            rows = rows.len(),
            "read worksheet"
        );

        Ok(rows)
    }

    fn format(&self) -> SourceFormat {
        self.format
    }

    fn describe(&self) -> String {
        match &self.sheet {
            Some(sheet) => format!("{} [{}]", self.path.display(), sheet),
            None => self.path.display().to_string(),
        }
    }
}

/// Render a workbook cell as the text a spreadsheet user would see
fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        // Whole numbers come back as floats from most writers: 80.0 → "80"
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERROR: {e:?}"),
    }
}

// ============================================================================
// CSV SOURCE
// ============================================================================

/// Reads a CSV file; every record is a row, the first one is the header
pub struct CsvSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvSource {
            path: path.into(),
            delimiter: b',',
        }
    }

    /// Builder pattern: use another delimiter (e.g. b';' or b'\t')
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl RowSource for CsvSource {
    fn read_rows(&self) -> Result<Vec<SheetRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(&self.path)
            .map_err(|e| MigrationError::OpenSource {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| MigrationError::ReadSource {
                path: self.path.clone(),
                message: format!("line {}: {}", index + 1, e),
            })?;
            // Blank lines are skipped by the reader; keep the file line
            let line = record
                .position()
                .map(|p| (p.line() as usize).saturating_sub(1))
                .unwrap_or(index);
            rows.push(SheetRow::new(
                line,
                record.iter().map(str::to_string).collect(),
            ));
        }

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "read csv");

        Ok(rows)
    }

    fn format(&self) -> SourceFormat {
        SourceFormat::Csv
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// FACTORY FUNCTIONS
// ============================================================================

/// Detect the source format from the file extension (case-insensitive)
pub fn detect_format(path: &Path) -> Result<SourceFormat> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" => Ok(SourceFormat::Xlsx),
        "xls" => Ok(SourceFormat::Xls),
        "ods" => Ok(SourceFormat::Ods),
        "csv" => Ok(SourceFormat::Csv),
        _ => Err(MigrationError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Get the row source for a file
///
/// `sheet` selects a worksheet by name; it is ignored for CSV input.
pub fn open_source(path: &Path, sheet: Option<String>) -> Result<Box<dyn RowSource>> {
    let format = detect_format(path)?;

    if !path.exists() {
        return Err(MigrationError::OpenSource {
            path: path.to_path_buf(),
            message: "file does not exist".to_string(),
        });
    }

    if format.is_workbook() {
        Ok(Box::new(WorkbookSource::new(path, format, sheet)))
    } else {
        if let Some(sheet) = sheet {
            tracing::warn!(sheet = %sheet, "worksheet selection ignored for csv input");
        }
        Ok(Box::new(CsvSource::new(path)))
    }
}

/// Build rows from literal cell values (row index = position)
pub fn rows_from_cells<R, C>(records: R) -> Vec<SheetRow>
where
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Into<String>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(index, cells)| SheetRow::new(index, cells.into_iter().map(Into::into).collect()))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
