// Primitives for reading CSV submission files.

use crate::dashboard::{
    io_common::{resolve_columns, row_to_parsed},
    *,
};

pub fn read_csv_rows(path: &str) -> DashResult<Vec<ParsedRow>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;
    let mut records = rdr.into_records();

    // The first row carries the column names.
    let header: Vec<String> = match records.next() {
        Some(line_r) => line_r
            .context(CsvLineSnafu { lineno: 1usize })?
            .iter()
            .map(|s| s.to_string())
            .collect(),
        None => Vec::new(),
    };
    let cols = resolve_columns(&header, path)?;

    let mut res: Vec<ParsedRow> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineSnafu { lineno })?;
        let cells: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        debug!("read_csv_rows: lineno: {:?} row: {:?}", lineno, cells);
        res.push(row_to_parsed(lineno, &cells, &cols));
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> String {
        let mut p: PathBuf = std::env::temp_dir();
        p.push(format!("posterdash-{}-{}", std::process::id(), name));
        fs::write(&p, contents).unwrap();
        p.display().to_string()
    }

    #[test]
    fn reads_rows_with_spanish_headers() {
        let path = write_temp(
            "read.csv",
            "Id,Nombres,Apellidos,Título,Institución,País,Eje,Calificativo\n\
             1,Ana,Quispe,Soil carbon dynamics,UNALM,Peru,E1,97\n\
             2,Luis,Rojas,Erosion mapping,UNU,Brazil,E2,\n",
        );
        let rows = read_csv_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].lineno, 2);
        assert_eq!(rows[0].id.as_deref(), Some("1"));
        assert_eq!(rows[0].raw_score.as_deref(), Some("97"));
        assert_eq!(rows[1].raw_score.as_deref(), Some(""));
        assert_eq!(rows[1].notes, None);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_columns_fail_the_load() {
        let path = write_temp("missing.csv", "Id,Nombres\n1,Ana\n");
        let res = read_csv_rows(&path);
        assert!(matches!(res, Err(DashError::MissingColumns { .. })));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_fails_the_load() {
        let res = read_csv_rows("/nonexistent/bd_congreso.csv");
        assert!(matches!(res, Err(DashError::OpeningCsv { .. })));
    }
}
