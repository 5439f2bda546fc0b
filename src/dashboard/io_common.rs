// Helpers shared by the tabular readers.

use crate::dashboard::{DashResult, MissingColumnsSnafu, ParsedRow};

use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Positions of the record fields in the header row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColumnMap {
    pub id: usize,
    pub first_name: usize,
    pub last_name: usize,
    pub title: usize,
    pub institution: usize,
    pub institution_abbr: Option<usize>,
    pub origin: Option<usize>,
    pub site: Option<usize>,
    pub country: usize,
    pub axis: usize,
    pub oral: Option<usize>,
    pub presented: Option<usize>,
    pub evaluate: Option<usize>,
    pub raw_score: Option<usize>,
    pub notes: Option<usize>,
}

// Accepted header spellings, lowercased. The Spanish names are the
// historical columns of the congress dataset.
const ID: &[&str] = &["id"];
const FIRST_NAME: &[&str] = &["first name", "first_name", "nombres"];
const LAST_NAME: &[&str] = &["last name", "last_name", "apellidos"];
const TITLE: &[&str] = &["title", "título", "titulo"];
const INSTITUTION: &[&str] = &["institution", "institución", "institucion"];
const INSTITUTION_ABBR: &[&str] = &["abbreviation", "abreviatura"];
const ORIGIN: &[&str] = &["origin", "origen"];
const SITE: &[&str] = &["site", "sitio"];
const COUNTRY: &[&str] = &["country", "país", "pais"];
const AXIS: &[&str] = &["axis", "eje"];
const ORAL: &[&str] = &["oral", "ponencia"];
const PRESENTED: &[&str] = &["presented", "presentó", "presento"];
const EVALUATE: &[&str] = &["evaluate", "evaluar"];
const RAW_SCORE: &[&str] = &["raw score", "raw_score", "calificativo"];
const NOTES: &[&str] = &["notes", "notas"];

fn find_column(header: &[String], aliases: &[&str]) -> Option<usize> {
    header
        .iter()
        .position(|h| aliases.contains(&h.trim().to_lowercase().as_str()))
}

/// Maps the header row to field positions. Missing required columns fail
/// the load, listing every absent column at once.
pub fn resolve_columns(header: &[String], path: &str) -> DashResult<ColumnMap> {
    let mut missing: Vec<String> = Vec::new();
    let mut required = |aliases: &[&str], name: &str| -> usize {
        match find_column(header, aliases) {
            Some(idx) => idx,
            None => {
                missing.push(name.to_string());
                0
            }
        }
    };

    let cols = ColumnMap {
        id: required(ID, "id"),
        first_name: required(FIRST_NAME, "first name"),
        last_name: required(LAST_NAME, "last name"),
        title: required(TITLE, "title"),
        institution: required(INSTITUTION, "institution"),
        country: required(COUNTRY, "country"),
        axis: required(AXIS, "axis"),
        institution_abbr: find_column(header, INSTITUTION_ABBR),
        origin: find_column(header, ORIGIN),
        site: find_column(header, SITE),
        oral: find_column(header, ORAL),
        presented: find_column(header, PRESENTED),
        evaluate: find_column(header, EVALUATE),
        raw_score: find_column(header, RAW_SCORE),
        notes: find_column(header, NOTES),
    };

    if !missing.is_empty() {
        return MissingColumnsSnafu {
            path: path.to_string(),
            columns: missing,
        }
        .fail();
    }
    Ok(cols)
}

fn cell(cells: &[String], idx: usize) -> Option<String> {
    cells.get(idx).map(|s| s.to_string())
}

fn opt_cell(cells: &[String], idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| cell(cells, i))
}

/// Assembles a parsed row from one line of cells.
pub fn row_to_parsed(lineno: usize, cells: &[String], cols: &ColumnMap) -> ParsedRow {
    ParsedRow {
        lineno,
        id: cell(cells, cols.id),
        first_name: cell(cells, cols.first_name),
        last_name: cell(cells, cols.last_name),
        title: cell(cells, cols.title),
        institution: cell(cells, cols.institution),
        institution_abbr: opt_cell(cells, cols.institution_abbr),
        origin: opt_cell(cells, cols.origin),
        site: opt_cell(cells, cols.site),
        country: cell(cells, cols.country),
        axis: cell(cells, cols.axis),
        oral: opt_cell(cells, cols.oral),
        presented: opt_cell(cells, cols.presented),
        evaluate: opt_cell(cells, cols.evaluate),
        raw_score: opt_cell(cells, cols.raw_score),
        notes: opt_cell(cells, cols.notes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashError;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_historical_spanish_headers() {
        let cols = resolve_columns(
            &header(&[
                "Id",
                "Nombres",
                "Apellidos",
                "Título",
                "Institución",
                "País",
                "Eje",
                "Calificativo",
            ]),
            "bd.csv",
        )
        .unwrap();
        assert_eq!(cols.id, 0);
        assert_eq!(cols.axis, 6);
        assert_eq!(cols.raw_score, Some(7));
        assert_eq!(cols.notes, None);
    }

    #[test]
    fn resolves_english_headers_case_insensitively() {
        let cols = resolve_columns(
            &header(&[
                "ID",
                "First Name",
                "Last Name",
                "Title",
                "Institution",
                "Country",
                "Axis",
            ]),
            "data.csv",
        )
        .unwrap();
        assert_eq!(cols.country, 5);
    }

    #[test]
    fn missing_required_columns_fail_with_all_names() {
        let res = resolve_columns(&header(&["Id", "Nombres", "Apellidos"]), "bad.csv");
        match res {
            Err(DashError::MissingColumns { columns, .. }) => {
                assert_eq!(columns, vec!["title", "institution", "country", "axis"]);
            }
            x => panic!("unexpected result: {:?}", x),
        }
    }

    #[test]
    fn simplifies_file_names() {
        assert_eq!(simplify_file_name("data/bd_congreso.csv"), "bd_congreso.csv");
        assert_eq!(simplify_file_name("bd.csv"), "bd.csv");
    }
}
