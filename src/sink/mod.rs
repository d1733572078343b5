//! Tabular artifact sinks
//!
//! Exporters append projected rows to a persistent artifact: a CSV file
//! or a multi-sheet workbook. Sinks buffer in memory and persist on
//! `checkpoint`, which the pipeline invokes at a bounded page interval
//! so a crash loses at most one interval of work without paying a full
//! file rewrite per page.

use std::fs::File;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;

use crate::error::{Error, Result};

/// A fixed-width row that can cross the sink boundary.
pub trait TabularRow {
    /// Column headers, written once per artifact (or per sheet).
    const HEADERS: &'static [&'static str];

    /// Cell values, one per header, placeholders already substituted.
    fn cells(&self) -> Vec<String>;
}

/// Append-only destination for projected rows.
pub trait RowSink<R> {
    /// Append rows to the artifact buffer.
    fn append(&mut self, rows: &[R]) -> Result<()>;

    /// Persist buffered progress to disk.
    fn checkpoint(&mut self) -> Result<()>;

    /// Persist and close the artifact.
    fn finalize(&mut self) -> Result<()>;
}

/// CSV sink: header row written exactly once at creation.
pub struct CsvSink<R: TabularRow> {
    writer: csv::Writer<File>,
    _marker: PhantomData<R>,
}

impl<R: TabularRow> CsvSink<R> {
    /// Create the file and write the header row.
    pub fn create(path: &Path) -> Result<Self> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(R::HEADERS)?;
        Ok(Self {
            writer,
            _marker: PhantomData,
        })
    }
}

impl<R: TabularRow> RowSink<R> for CsvSink<R> {
    fn append(&mut self, rows: &[R]) -> Result<()> {
        for row in rows {
            self.writer.write_record(row.cells())?;
        }
        Ok(())
    }

    fn checkpoint(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Multi-sheet workbook sink.
///
/// The workbook lives in memory; `add_sheet` opens a new named sheet
/// without touching earlier ones, so multi-provider reports accumulate
/// one sheet per fetch cycle. Each `checkpoint` rewrites the whole file
/// (the format has no incremental append), which is why checkpointing
/// is interval-based rather than per page.
pub struct WorkbookSink {
    workbook: Workbook,
    path: PathBuf,
    current_sheet: Option<usize>,
    next_row: u32,
    sheet_count: usize,
}

impl WorkbookSink {
    pub fn create(path: &Path) -> Self {
        Self {
            workbook: Workbook::new(),
            path: path.to_path_buf(),
            current_sheet: None,
            next_row: 0,
            sheet_count: 0,
        }
    }

    /// Start a new sheet with `R`'s header row; subsequent appends land
    /// on this sheet.
    pub fn add_sheet<R: TabularRow>(&mut self, name: &str) -> Result<()> {
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(name)?;
        for (col, header) in R::HEADERS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
        }
        self.current_sheet = Some(self.sheet_count);
        self.sheet_count += 1;
        self.next_row = 1;
        Ok(())
    }

    /// Names of all sheets added so far, in order.
    pub fn sheet_count(&self) -> usize {
        self.sheet_count
    }

    fn append_cells(&mut self, rows: &[Vec<String>]) -> Result<()> {
        let index = self
            .current_sheet
            .ok_or_else(|| Error::Other("workbook sink has no active sheet".to_string()))?;
        let worksheet = self.workbook.worksheet_from_index(index)?;
        for cells in rows {
            for (col, cell) in cells.iter().enumerate() {
                worksheet.write_string(self.next_row, col as u16, cell)?;
            }
            self.next_row += 1;
        }
        Ok(())
    }
}

impl<R: TabularRow> RowSink<R> for WorkbookSink {
    fn append(&mut self, rows: &[R]) -> Result<()> {
        let cells: Vec<Vec<String>> = rows.iter().map(TabularRow::cells).collect();
        self.append_cells(&cells)
    }

    fn checkpoint(&mut self) -> Result<()> {
        self.workbook.save(&self.path)?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.workbook.save(&self.path)?;
        Ok(())
    }
}

/// In-memory sink for pipeline unit tests.
#[cfg(test)]
pub struct MemorySink<R> {
    pub rows: Vec<R>,
    pub checkpoints: usize,
}

#[cfg(test)]
impl<R> Default for MemorySink<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            checkpoints: 0,
        }
    }
}

#[cfg(test)]
impl<R: Clone> RowSink<R> for MemorySink<R> {
    fn append(&mut self, rows: &[R]) -> Result<()> {
        self.rows.extend_from_slice(rows);
        Ok(())
    }

    fn checkpoint(&mut self) -> Result<()> {
        self.checkpoints += 1;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }
}
