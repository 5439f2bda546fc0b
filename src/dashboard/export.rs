// Re-serializes a (possibly filtered) derived record set as delimited text.

use crate::dashboard::*;

const EXPORT_HEADER: [&str; 16] = [
    "id",
    "first name",
    "last name",
    "title",
    "institution",
    "abbreviation",
    "origin",
    "site",
    "country",
    "axis",
    "oral",
    "presented",
    "evaluate",
    "raw score",
    "score",
    "rank",
];

fn flag_cell(flag: Option<bool>) -> String {
    match flag {
        Some(true) => "yes".to_string(),
        Some(false) => "no".to_string(),
        None => "".to_string(),
    }
}

pub fn write_csv_export(path: &str, records: &[DerivedRecord]) -> DashResult<()> {
    let mut wtr = csv::Writer::from_path(path).context(WritingExportSnafu { path })?;
    wtr.write_record(EXPORT_HEADER)
        .context(WritingExportSnafu { path })?;
    for dr in records.iter() {
        let r = &dr.record;
        let row: [String; 16] = [
            r.id.to_string(),
            r.first_name.clone(),
            r.last_name.clone(),
            r.title.clone(),
            r.institution.clone(),
            r.institution_abbr.clone().unwrap_or_default(),
            r.origin.clone().unwrap_or_default(),
            r.site.clone().unwrap_or_default(),
            r.country.clone(),
            r.axis.as_str().to_string(),
            flag_cell(r.oral),
            flag_cell(r.presented),
            flag_cell(r.evaluate),
            r.raw_score.map(|s| s.to_string()).unwrap_or_default(),
            dr.score.map(|s| format!("{:.2}", s)).unwrap_or_default(),
            dr.rank.map(|s| s.to_string()).unwrap_or_default(),
        ];
        wtr.write_record(&row).context(WritingExportSnafu { path })?;
    }
    wtr.flush().context(FlushingExportSnafu { path })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_derived_columns() {
        let mut a = Record::simple(1, "Ana", "Quispe", "Soil carbon", "UNALM", "Peru", TopicAxis::E1);
        a.raw_score = Some(97);
        a.presented = Some(true);
        let b = Record::simple(2, "Luis", "Rojas", "Erosion", "UNU", "Brazil", TopicAxis::E2);
        let derived = run_derivation(&[a, b], &DeriveOptions::DEFAULT_OPTIONS).unwrap();

        let mut p = std::env::temp_dir();
        p.push(format!("posterdash-export-{}.csv", std::process::id()));
        let path = p.display().to_string();
        write_csv_export(&path, &derived).unwrap();

        let contents = fs::read_to_string(&p).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,first name,last name"));
        assert!(lines[1].contains("0.97"));
        assert!(lines[1].contains("yes"));
        assert!(lines[1].ends_with(",1"));
        assert!(lines[2].ends_with(",,"));
        fs::remove_file(&p).unwrap();
    }
}
