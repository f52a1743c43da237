use crate::domain::debt::Debt;
use crate::error::{PayoffError, Result};
use std::io::Read;

/// Reads debts from a CSV source with the header
/// `id,name,balance,apr,min_payment`.
///
/// Wraps `csv::Reader`, trimming whitespace and accepting flexible record
/// lengths. Every row is validated as it is read.
pub struct DebtReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> DebtReader<R> {
    /// Creates a new `DebtReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator of parsed and validated debts.
    ///
    /// A row that fails yields an error and the iterator moves on to the next
    /// row, so callers can report and skip bad rows.
    pub fn debts(self) -> impl Iterator<Item = Result<Debt>> {
        self.reader.into_deserialize().map(|result| {
            let raw: Debt = result.map_err(PayoffError::from)?;
            Debt::new(raw.id.as_str(), &raw.name, raw.balance, raw.apr, raw.min_payment)
                .map_err(|e| match e {
                    PayoffError::ValidationError(msg) => {
                        PayoffError::ValidationError(format!("debt '{}': {}", raw.id, msg))
                    }
                    other => other,
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "id, name, balance, apr, min_payment\n1, Credit Card, 10000, 22.9, 250\n2, Car Loan, 15000, 4.5, 400";
        let reader = DebtReader::new(data.as_bytes());
        let results: Vec<Result<Debt>> = reader.debts().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.id, "1");
        assert_eq!(first.balance, dec!(10000));
        assert_eq!(results[1].as_ref().unwrap().name, "Car Loan");
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "id, name, balance, apr, min_payment\n1, Card, lots, 22.9, 250\n2, Loan, 500, 3, 50";
        let reader = DebtReader::new(data.as_bytes());
        let results: Vec<Result<Debt>> = reader.debts().collect();

        assert!(matches!(results[0], Err(PayoffError::CsvError(_))));
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_reader_rejects_invalid_debt() {
        let data = "id, name, balance, apr, min_payment\n7, Card, 100, 10, 150";
        let reader = DebtReader::new(data.as_bytes());
        let results: Vec<Result<Debt>> = reader.debts().collect();

        match &results[0] {
            Err(PayoffError::ValidationError(msg)) => assert_eq!(
                msg,
                "debt '7': Minimum payment cannot be greater than the balance."
            ),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
