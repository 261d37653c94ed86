use crate::domain::authorization::AuthorizationSummary;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

const HEADER: [&str; 7] = [
    "reference",
    "id",
    "amount",
    "currency",
    "captured",
    "balance",
    "void",
];

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    reference: &'a str,
    id: &'a str,
    amount: Decimal,
    currency: &'a str,
    captured: Decimal,
    balance: Decimal,
    void: bool,
}

/// Writes the final state of authorizations as CSV.
pub struct AuthorizationWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AuthorizationWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(sink),
        }
    }

    /// Writes the header, then one row per `(reference, summary)` pair, in the given order.
    pub fn write_authorizations<'a, I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a AuthorizationSummary)>,
    {
        self.writer.write_record(HEADER)?;
        for (reference, summary) in rows {
            self.writer.serialize(ReportRow {
                reference,
                id: &summary.id,
                amount: summary.amount.normalize(),
                currency: &summary.currency,
                captured: summary.captured.normalize(),
                balance: summary.balance.normalize(),
                void: summary.void,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
