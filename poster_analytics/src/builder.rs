use std::collections::HashSet;

pub use crate::config::*;

/// A builder for assembling a record set before derivation.
///
/// It is meant for callers embedding the library directly, without going
/// through a tabular file.
///
/// ```
/// pub use poster_analytics::builder::Builder;
/// pub use poster_analytics::{DeriveOptions, Record, TopicAxis};
/// # use poster_analytics::AnalyticsErrors;
///
/// let mut builder = Builder::new(&DeriveOptions::DEFAULT_OPTIONS)?;
/// builder.add_record(&Record::simple(
///     1, "Ana", "Quispe", "Soil carbon dynamics", "UNALM", "Peru", TopicAxis::E1,
/// ))?;
///
/// let derived = builder.derive()?;
/// assert_eq!(derived.len(), 1);
/// # Ok::<(), AnalyticsErrors>(())
/// ```
pub struct Builder {
    pub(crate) _options: DeriveOptions,
    pub(crate) _records: Vec<Record>,
    pub(crate) _seen_ids: HashSet<u64>,
}

impl Builder {
    pub fn new(options: &DeriveOptions) -> Result<Builder, AnalyticsErrors> {
        Ok(Builder {
            _options: options.clone(),
            _records: Vec::new(),
            _seen_ids: HashSet::new(),
        })
    }

    /// Adds a record to the builder.
    ///
    /// Identifiers must be unique across the whole set.
    pub fn add_record(&mut self, record: &Record) -> Result<(), AnalyticsErrors> {
        if !self._seen_ids.insert(record.id) {
            return Err(AnalyticsErrors::DuplicateId { id: record.id });
        }
        self._records.push(record.clone());
        Ok(())
    }

    /// Adds a record with only the required fields filled in.
    ///
    /// It is the simplest use case for most callers.
    pub fn add_record_simple(
        &mut self,
        id: u64,
        first_name: &str,
        last_name: &str,
        title: &str,
        institution: &str,
        country: &str,
        axis: TopicAxis,
    ) -> Result<(), AnalyticsErrors> {
        self.add_record(&Record::simple(
            id,
            first_name,
            last_name,
            title,
            institution,
            country,
            axis,
        ))
    }

    pub fn records(&self) -> &[Record] {
        &self._records
    }

    /// Runs the derivation over the collected records.
    pub fn derive(&self) -> Result<Vec<DerivedRecord>, AnalyticsErrors> {
        crate::run_derivation(&self._records, &self._options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_identifiers() {
        let mut builder = Builder::new(&DeriveOptions::DEFAULT_OPTIONS).unwrap();
        builder
            .add_record_simple(1, "Ana", "Quispe", "T", "UNALM", "Peru", TopicAxis::E1)
            .unwrap();
        let res = builder.add_record_simple(1, "Luis", "Rojas", "T", "UNU", "Brazil", TopicAxis::E2);
        assert_eq!(res, Err(AnalyticsErrors::DuplicateId { id: 1 }));
        assert_eq!(builder.records().len(), 1);
    }

    #[test]
    fn derives_collected_records() {
        let mut builder = Builder::new(&DeriveOptions::DEFAULT_OPTIONS).unwrap();
        let mut record = Record::simple(1, "Ana", "Quispe", "T", "UNALM", "Peru", TopicAxis::E1);
        record.raw_score = Some(88);
        builder.add_record(&record).unwrap();
        let derived = builder.derive().unwrap();
        assert_eq!(derived[0].score, Some(0.88));
        assert_eq!(derived[0].rank, Some(1));
    }
}
