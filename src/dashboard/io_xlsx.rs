// Primitives for reading Excel submission files, as exported by online
// spreadsheet tools.

use calamine::{open_workbook, Reader, Xlsx};

use crate::dashboard::{
    io_common::{resolve_columns, row_to_parsed},
    *,
};

pub fn read_excel_rows(path: &str, source: &FileSource) -> DashResult<Vec<ParsedRow>> {
    let p = path.to_string();
    let mut workbook: Xlsx<_> = open_workbook(p).context(OpeningExcelSnafu { path })?;
    let wrange = match &source.excel_worksheet_name {
        Some(name) => workbook
            .worksheet_range(name.as_str())
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };

    let mut iter = wrange.rows();
    let header: Vec<String> = match iter.next() {
        Some(row) => decode_cells(row, 1)?,
        None => Vec::new(),
    };
    debug!("read_excel_rows: header: {:?}", header);
    let cols = resolve_columns(&header, path)?;

    let mut res: Vec<ParsedRow> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        let cells = decode_cells(row, lineno)?;
        res.push(row_to_parsed(lineno, &cells, &cols));
    }
    Ok(res)
}

fn decode_cells(row: &[calamine::DataType], lineno: usize) -> DashResult<Vec<String>> {
    let mut res: Vec<String> = Vec::new();
    for cell in row.iter() {
        res.push(decode_cell(cell, lineno)?);
    }
    Ok(res)
}

// Everything goes through the textual representation: the row validation
// does the typing, exactly as for CSV input.
fn decode_cell(cell: &calamine::DataType, lineno: usize) -> DashResult<String> {
    match cell {
        calamine::DataType::String(s) => Ok(s.clone()),
        calamine::DataType::Float(f) => Ok(f.to_string()),
        calamine::DataType::Int(i) => Ok(i.to_string()),
        calamine::DataType::Bool(b) => Ok(b.to_string()),
        calamine::DataType::Empty => Ok("".to_string()),
        _ => whatever!(
            "line {}: could not understand cell {:?}",
            lineno,
            cell
        ),
    }
}
