//! Conversion of raw source records into typed models
//!
//! This is the single validation boundary of the crate: shape problems
//! (missing ids, wrong field types, missing required fields) fail here, and
//! everything past this point works with typed, unwrapped values.

use tracing::warn;

use super::records::RawRecord;
use crate::error::{SubsplitError, SubsplitResult};
use crate::models::{ChangeLogEntry, Member, MemberId, Money, Service, Transaction};

/// Field names used by the source tables
pub mod fields {
    pub const NAME: &str = "Name";
    pub const PRICE: &str = "price";
    pub const DATE: &str = "date";
    pub const SERVICE: &str = "service";
    pub const MEMBERS: &str = "members";
    pub const START_DATE: &str = "start date";
    pub const END_DATE: &str = "end date";
    pub const OWNER: &str = "owner";
    pub const AMOUNT: &str = "amount";
    pub const TRANSACTION_IDS: &str = "transaction_ids";
    pub const CHANGE_LOG: &str = "subscription change log";
}

fn money(table: &str, record: &RawRecord, field: &str, value: f64) -> SubsplitResult<Money> {
    Money::from_f64(value).ok_or_else(|| {
        SubsplitError::ingest(
            table,
            record.id.clone(),
            format!("field '{}' is not a finite amount within range", field),
        )
    })
}

/// Convert a service record
pub fn service_from_record(table: &str, record: &RawRecord) -> SubsplitResult<Service> {
    let reader = record.reader(table);
    let name = reader.required_str(fields::NAME)?;
    let price = money(table, record, fields::PRICE, reader.required_number(fields::PRICE)?)?;
    let billing_anchor = reader.optional_date(fields::DATE)?;

    if billing_anchor.is_none() {
        warn!(service = %name, "service has no billing date; projections use today's day");
    }

    Ok(Service {
        id: record.id.as_str().into(),
        name,
        price,
        billing_anchor,
    })
}

/// Convert a member record
pub fn member_from_record(table: &str, record: &RawRecord) -> SubsplitResult<Member> {
    let reader = record.reader(table);

    Ok(Member {
        id: record.id.as_str().into(),
        name: reader.required_str(fields::NAME)?,
        transaction_ids: reader
            .id_list(fields::TRANSACTION_IDS)?
            .into_iter()
            .map(Into::into)
            .collect(),
        change_log_ids: reader
            .id_list(fields::CHANGE_LOG)?
            .into_iter()
            .map(Into::into)
            .collect(),
    })
}

/// Convert a subscription change log record
pub fn change_log_from_record(table: &str, record: &RawRecord) -> SubsplitResult<ChangeLogEntry> {
    let reader = record.reader(table);

    let members: Vec<MemberId> = reader
        .required_id_list(fields::MEMBERS)?
        .into_iter()
        .map(Into::into)
        .collect();
    if members.is_empty() {
        return Err(SubsplitError::ingest(
            table,
            record.id.clone(),
            "membership interval has no members",
        ));
    }

    Ok(ChangeLogEntry {
        id: record.id.as_str().into(),
        service_id: reader.single_reference(fields::SERVICE)?.map(Into::into),
        members,
        start_date: reader.required_date(fields::START_DATE)?,
        end_date: reader.optional_date(fields::END_DATE)?,
    })
}

/// Convert a transaction record
pub fn transaction_from_record(table: &str, record: &RawRecord) -> SubsplitResult<Transaction> {
    let reader = record.reader(table);

    let amount = match reader.optional_number(fields::AMOUNT)? {
        Some(value) => Some(money(table, record, fields::AMOUNT, value)?),
        None => None,
    };

    Ok(Transaction {
        id: record.id.as_str().into(),
        payer: reader.single_reference(fields::OWNER)?.map(Into::into),
        service: reader.single_reference(fields::SERVICE)?,
        amount,
        date: reader.optional_date(fields::DATE)?,
    })
}

/// Convert every record of a table, failing on the first malformed one
pub fn ingest_all<T>(
    table: &str,
    records: &[RawRecord],
    convert: fn(&str, &RawRecord) -> SubsplitResult<T>,
) -> SubsplitResult<Vec<T>> {
    records.iter().map(|record| convert(table, record)).collect()
}
