/*!

This is the long-form manual for `poster_analytics` and `posterdash`.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values with a header row
* `xlsx` Excel workbooks, as exported by online spreadsheet tools

### Columns

The first row of the input names the columns. Column matching is
case-insensitive and accepts both the canonical names below and the
historical names of the congress dataset (in parentheses).

Required columns:

| column | content |
|-------------|----------|
| `id` (`Id`) | unique integer identifier |
| `first name` (`Nombres`) | given names |
| `last name` (`Apellidos`) | family names |
| `title` (`Título`) | poster title |
| `institution` (`Institución`) | affiliation |
| `country` (`País`) | country of the affiliation |
| `axis` (`Eje`) | one of `E1` .. `E7` |

A missing required column fails the load and names the missing columns.

Optional columns:

| column | content |
|-------------|----------|
| `abbreviation` (`Abreviatura`) | short institution name |
| `origin` (`Origen`) | origin city or region |
| `site` (`Sitio`) | presentation venue |
| `oral` (`Ponencia`) | oral-presentation flag, yes/no |
| `presented` (`Presentó`) | attendance flag, yes/no |
| `evaluate` (`Evaluar`) | opt-in to scoring, yes/no |
| `raw score` (`Calificativo`) | integer rating in `[0, 100]` |
| `notes` (`Notas`) | free text |

Flags accept `yes`/`no`, `si`/`no` and `true`/`false` in any casing.

## Derived columns

Two columns are computed on every load, never read from the file:
* `score`: the raw score divided by 100, in `[0, 1]`.
* `rank`: a dense rank over descending score. The best score gets rank 1,
  tied scores share a rank and the next distinct score continues
  sequentially, without gaps.

Records without a usable raw score (or with `evaluate` set to no) keep both
columns empty and do not take part in the ranking.

## Validation policy

The `validation` configuration key controls how bad values are treated:
* `lenient` (default): out-of-range or non-numeric raw scores are dropped
  with a warning and the record stays unscored; rows with a bad identifier,
  a missing required value or an unknown axis label are skipped with a
  warning.
* `strict`: any of the above fails the load.

Missing source files and missing required columns always fail the load.

## Configuration

The `--config` flag takes a JSON file:

```json
{
  "outputSettings": {
    "datasetName": "Soils Congress 2025",
    "outputPath": "summary.json",
    "topN": 10
  },
  "sourceFiles": [
    { "provider": "csv", "filePath": "bd_congreso.csv" },
    { "provider": "xlsx", "filePath": "late_submissions.xlsx",
      "excelWorksheetName": "Sheet1" }
  ],
  "validation": "lenient",
  "axisColors": [
    { "axis": "E1", "color": "#1f77b4" }
  ]
}
```

* `sourceFiles` are loaded in order and concatenated.
* `axisColors` overrides entries of the default palette; the mapping is
  echoed in the summary JSON for the presentation layer.
* Paths are resolved relative to the configuration file.

## Summary output

The summary JSON contains the dataset configuration, the totals, the
per-axis statistics, the top-N ranking table (with ISO country codes), the
duplicate-name report and the axis color mapping. The `--reference` flag
compares the produced summary against a stored one and fails with a printed
diff when they differ, which is useful to catch regressions when updating
the dataset pipeline.

*/
