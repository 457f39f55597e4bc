use std::collections::HashSet;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::{AnswerSet, Error, ENGINE};

/// One respondent's answers from a bulk file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRow {
    pub respondent: String,
    pub answers: AnswerSet,
}

/// Read survey answers for many respondents from CSV.
///
/// The first column must be headed `id` and holds the respondent id. The
/// remaining column headers are question ids (`q1`..`q20`, any order, any
/// subset, each at most once). Cells hold option labels;
/// an empty cell leaves that question unanswered.
///
/// ```text
/// id,q1,q2,q3
/// alice,Never,Always,Sometimes
/// bob,Often,,Usually
/// ```
///
/// Each row is validated on its own, so one bad row does not stop the rest.
pub fn read_bulk<R: Read>(
    reader: R,
) -> Result<impl Iterator<Item = Result<BulkRow, Error>>, Error> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();
    check_headers(&headers)?;
    debug!(columns = headers.len(), "reading bulk answers");
    Ok(reader
        .into_records()
        .map(move |record| -> Result<BulkRow, Error> { to_row(&headers, &record?) }))
}

fn check_headers(headers: &StringRecord) -> Result<(), Error> {
    let first = headers.get(0).unwrap_or_default();
    if first != "id" {
        return Err(Error::MissingIdColumn(first.to_owned()));
    }
    let mut seen = HashSet::new();
    for id in headers.iter().skip(1) {
        if ENGINE.questions().iter().all(|q| q.id != id) {
            return Err(Error::UnknownQuestion(id.to_owned()));
        }
        if !seen.insert(id) {
            return Err(Error::DuplicateQuestion(id.to_owned()));
        }
    }
    Ok(())
}

fn to_row(headers: &StringRecord, record: &StringRecord) -> Result<BulkRow, Error> {
    let respondent = record.get(0).unwrap_or_default().to_owned();
    let answers = headers
        .iter()
        .zip(record.iter())
        .skip(1)
        .filter(|(_, label)| !label.is_empty())
        .try_fold(AnswerSet::new(), |answers, (question_id, label)| {
            ENGINE.record_answer(answers, question_id, label)
        })?;
    Ok(BulkRow {
        respondent,
        answers,
    })
}
