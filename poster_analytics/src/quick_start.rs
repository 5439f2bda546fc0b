/*!

# Quick start

This example runs the data backend end to end over a submissions file. The
dataset is expected as a CSV export of the submissions table, one row per
poster, with a header row (see the [manual](crate::manual) for the exact
column names):

```text
Id,Nombres,Apellidos,Título,Institución,País,Eje,Calificativo
1,Ana,Quispe,Soil carbon dynamics,UNALM,Peru,E1,97
2,Luis,Rojas,Erosion mapping,UNU,Brazil,E2,96
3,Marta,Silva,Water retention,UFPR,Brazil,E2,96
4,Pedro,Campos,Nutrient cycling,UNAS,Peru,E3,94
```

Run `posterdash` against it:

```bash
posterdash -i submissions.csv
```

The derived table is computed on the fly and the summary is printed as
JSON. The ranking section shows the dense ranks: 97 ranks first, the two
96s share rank 2, and 94 gets rank 3.

To write the summary to a file and export the derived table back to CSV:

```bash
posterdash -i submissions.csv -o summary.json -e derived.csv
```

Filters restrict the exported subset without touching the summary:

```bash
posterdash -i submissions.csv --axis E2 --min-score 0.95 -e top_e2.csv
```

For repeated runs over the same dataset, move the options to a JSON
configuration file and pass `--config` instead; see the
[manual](crate::manual) for the configuration reference.

Embedding callers can skip the files entirely and use the
[builder](crate::builder::Builder) API:

```
pub use poster_analytics::builder::Builder;
pub use poster_analytics::{run_derivation, DeriveOptions, Record, TopicAxis};
# use poster_analytics::AnalyticsErrors;

let mut builder = Builder::new(&DeriveOptions::DEFAULT_OPTIONS)?;
builder.add_record_simple(1, "Ana", "Quispe", "Soil carbon dynamics",
    "UNALM", "Peru", TopicAxis::E1)?;
let derived = builder.derive()?;
# Ok::<(), AnalyticsErrors>(())
```

*/
