use crate::codec;
use crate::crypto::elgamal::Message;
use crate::errors::{Error, Result};
use crate::schema::SubmittedBallotRecord;

/// One encrypted selection of a submitted ballot, with its ciphertext
/// decoded into group elements.
#[derive(Debug, Clone)]
pub struct Selection {
    pub object_id: String,
    pub message: Message,
}

#[derive(Debug, Clone)]
pub struct Contest {
    pub object_id: String,
    pub selections: Vec<Selection>,
}

/// An encrypted ballot after structural validation.  Beyond well-formed
/// ids and in-range ciphertext values this layer does not interpret it;
/// the selections are handed to the share computation as-is.
#[derive(Debug, Clone)]
pub struct SubmittedBallot {
    pub ballot_id: String,
    pub style_id: String,
    pub contests: Vec<Contest>,
}

/// Decode a batch of wire ballots, preserving input order: position `i`
/// of the input maps to position `i` of the output.  An empty batch is
/// valid.  Any malformed ballot rejects the whole batch, so a response
/// can never silently cover fewer ballots than were submitted.
pub fn load_batch(records: &[SubmittedBallotRecord]) -> Result<Vec<SubmittedBallot>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            load_one(record).map_err(|reason| Error::MalformedBallot {
                index,
                ballot_id: record.object_id.clone(),
                reason,
            })
        })
        .collect()
}

fn load_one(record: &SubmittedBallotRecord) -> std::result::Result<SubmittedBallot, String> {
    if record.object_id.is_empty() {
        return Err("object_id must not be empty".to_owned());
    }

    let contests = record
        .contests
        .iter()
        .map(|contest| {
            let selections = contest
                .ballot_selections
                .iter()
                .map(|selection| {
                    Ok(Selection {
                        object_id: selection.object_id.clone(),
                        message: Message {
                            public_key: codec::decode_mod_p(
                                "ballot.ciphertext.pad",
                                &selection.ciphertext.pad,
                            )
                            .map_err(|err| err.to_string())?,
                            ciphertext: codec::decode_mod_p(
                                "ballot.ciphertext.data",
                                &selection.ciphertext.data,
                            )
                            .map_err(|err| err.to_string())?,
                        },
                    })
                })
                .collect::<std::result::Result<Vec<_>, String>>()?;

            Ok(Contest {
                object_id: contest.object_id.clone(),
                selections,
            })
        })
        .collect::<std::result::Result<Vec<_>, String>>()?;

    Ok(SubmittedBallot {
        ballot_id: record.object_id.clone(),
        style_id: record.style_id.clone(),
        contests,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schema::{ContestRecord, ElGamalCiphertextRecord, SelectionRecord};

    fn wire_ballot(id: &str) -> SubmittedBallotRecord {
        SubmittedBallotRecord {
            object_id: id.to_owned(),
            style_id: "style-1".to_owned(),
            contests: vec![ContestRecord {
                object_id: "contest-1".to_owned(),
                ballot_selections: vec![SelectionRecord {
                    object_id: "selection-1".to_owned(),
                    ciphertext: ElGamalCiphertextRecord {
                        pad: "1033".to_owned(),
                        data: "2066".to_owned(),
                    },
                }],
            }],
        }
    }

    #[test]
    fn empty_batch_is_valid() {
        assert!(load_batch(&[]).unwrap().is_empty());
    }

    #[test]
    fn batch_preserves_order() {
        let records = vec![
            wire_ballot("ballot-a"),
            wire_ballot("ballot-b"),
            wire_ballot("ballot-c"),
        ];
        let ballots = load_batch(&records).unwrap();
        let ids: Vec<&str> = ballots.iter().map(|b| b.ballot_id.as_str()).collect();
        assert_eq!(ids, ["ballot-a", "ballot-b", "ballot-c"]);
    }

    #[test]
    fn one_bad_ballot_rejects_the_whole_batch() {
        let mut records = vec![
            wire_ballot("ballot-0"),
            wire_ballot("ballot-1"),
            wire_ballot("ballot-2"),
            wire_ballot("ballot-3"),
            wire_ballot("ballot-4"),
        ];
        records[3].contests[0].ballot_selections[0].ciphertext.pad = "garbage".to_owned();

        match load_batch(&records) {
            Err(Error::MalformedBallot {
                index, ballot_id, ..
            }) => {
                assert_eq!(index, 3);
                assert_eq!(ballot_id, "ballot-3");
            }
            other => panic!("expected MalformedBallot, got {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn rejects_out_of_range_ciphertext() {
        let mut record = wire_ballot("ballot-0");
        record.contests[0].ballot_selections[0].ciphertext.data =
            crate::crypto::group::prime().to_str_radix(10);
        assert!(matches!(
            load_batch(&[record]),
            Err(Error::MalformedBallot { index: 0, .. })
        ));
    }
}
