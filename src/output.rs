// src/output.rs
use anyhow::{Context, Result};
use csv::WriterBuilder;
use rust_xlsxwriter::Workbook;
use serde_json::Value;
use std::{
    fs::{self, File},
    io::{Cursor, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::mapping::SheetRow;
use crate::pipeline::UploadSheets;

/// Default name of the bundle holding all five sheets.
pub const ARCHIVE_NAME: &str = "Investran Uploads Reformatted.zip";

/// Worksheet name inside every generated workbook.
pub const WORKSHEET_NAME: &str = "Sheet1";

/// Shown to the operator after every successful run.
pub const MANUAL_STEP_REMINDER: &str = "Reminder: Contact ID fields must be filled manually after importing into Investran. These fields are in sheets 2 and 3.";

/// Serialize one sheet as CSV. The header row is always written, even for an
/// empty sheet.
pub fn write_sheet<T: SheetRow, W: Write>(rows: &[T], out: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(T::HEADERS)
        .with_context(|| format!("writing header of {}", T::SHEET))?;
    for (idx, row) in rows.iter().enumerate() {
        wtr.serialize(row)
            .with_context(|| format!("writing row {} of {}", idx, T::SHEET))?;
    }
    wtr.flush().with_context(|| format!("flushing {}", T::SHEET))?;
    Ok(())
}

/// Render one sheet as an xlsx workbook with a single worksheet: the header
/// row, then one row per record. Missing values are left as empty cells and
/// numbers are written as numbers.
pub fn sheet_workbook<T: SheetRow>(rows: &[T]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(WORKSHEET_NAME)
        .with_context(|| format!("naming worksheet of {}", T::SHEET))?;

    for (col, header) in T::HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .with_context(|| format!("writing header of {}", T::SHEET))?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let record = serde_json::to_value(row)
            .with_context(|| format!("serializing row {} of {}", idx, T::SHEET))?;
        let xlsx_row = u32::try_from(idx + 1)
            .with_context(|| format!("{} has too many rows", T::SHEET))?;
        for (col, header) in T::HEADERS.iter().enumerate() {
            let col = col as u16;
            let written = match record.get(*header) {
                Some(Value::String(s)) => worksheet.write_string(xlsx_row, col, s.as_str()).map(|_| ()),
                Some(Value::Number(n)) => match n.as_f64() {
                    Some(v) => worksheet.write_number(xlsx_row, col, v).map(|_| ()),
                    None => Ok(()),
                },
                Some(Value::Bool(b)) => worksheet.write_boolean(xlsx_row, col, *b).map(|_| ()),
                _ => Ok(()),
            };
            written.with_context(|| format!("writing row {} of {}", idx, T::SHEET))?;
        }
    }

    workbook
        .save_to_buffer()
        .with_context(|| format!("saving workbook {}", T::SHEET))
}

fn sheet_csv<T: SheetRow>(rows: &[T]) -> Result<(String, Vec<u8>)> {
    let mut buf = Vec::new();
    write_sheet(rows, &mut buf)?;
    Ok((format!("{}.csv", T::SHEET), buf))
}

fn sheet_xlsx<T: SheetRow>(rows: &[T]) -> Result<(String, Vec<u8>)> {
    Ok((format!("{}.xlsx", T::SHEET), sheet_workbook(rows)?))
}

/// `(file name, CSV bytes)` for every sheet, in sheet order.
pub fn render_csv(sheets: &UploadSheets) -> Result<Vec<(String, Vec<u8>)>> {
    Ok(vec![
        sheet_csv(&sheets.contact_upload)?,
        sheet_csv(&sheets.contact_details)?,
        sheet_csv(&sheets.investor_upload)?,
        sheet_csv(&sheets.specific_investors)?,
        sheet_csv(&sheets.commitments)?,
    ])
}

/// `(file name, xlsx bytes)` for every sheet, in sheet order.
pub fn render_xlsx(sheets: &UploadSheets) -> Result<Vec<(String, Vec<u8>)>> {
    Ok(vec![
        sheet_xlsx(&sheets.contact_upload)?,
        sheet_xlsx(&sheets.contact_details)?,
        sheet_xlsx(&sheets.investor_upload)?,
        sheet_xlsx(&sheets.specific_investors)?,
        sheet_xlsx(&sheets.commitments)?,
    ])
}

/// Write each sheet as its own CSV file under `dir`.
#[instrument(level = "info", skip(sheets), fields(dir = %dir.display()))]
pub fn write_dir(sheets: &UploadSheets, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut written = Vec::with_capacity(5);
    for (name, bytes) in render_csv(sheets)? {
        let path = dir.join(&name);
        fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        debug!(path = %path.display(), "wrote sheet");
        written.push(path);
    }
    info!(files = written.len(), "wrote sheets");
    Ok(written)
}

/// Bundle the five sheet workbooks into one in-memory ZIP.
pub fn archive_bytes(sheets: &UploadSheets) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buf));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, bytes) in render_xlsx(sheets)? {
            zip.start_file(name.as_str(), options)
                .with_context(|| format!("adding {} to archive", name))?;
            zip.write_all(&bytes)?;
        }
        zip.finish().context("finishing archive")?;
    }
    Ok(buf)
}

/// Write the ZIP bundle to `path`.
#[instrument(level = "info", skip(sheets), fields(path = %path.display()))]
pub fn write_archive(sheets: &UploadSheets, path: &Path) -> Result<()> {
    let bytes = archive_bytes(sheets)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    file.write_all(&bytes)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(bytes = bytes.len(), "wrote archive");
    Ok(())
}
