use std::fs;
use std::io::{ErrorKind, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding::all::ISO_8859_1;
use encoding::{DecoderTrap, Encoding};

use crate::recipient::Recipient;
use crate::recipient::error::RecipientError::{MissingFile, Unreadable};
use crate::recipient::error::{RecipientError, RowRejection};

type Result<T, E = RecipientError> = std::result::Result<T, E>;

const HEADER_CELLS: [&str; 2] = ["name", "email"];
const UTF8_BOM: char = '\u{feff}';

/// Load recipients from a `name,email[,group]` CSV file.
/// Invalid rows are logged and left out, they never abort the load.
pub fn load_recipients(path: &Path) -> Result<Vec<Recipient>> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => MissingFile(path.to_path_buf()),
        _ => Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let content = decode(bytes)?;

    Ok(parse_recipients(content.trim_start_matches(UTF8_BOM).as_bytes()))
}

/// Spreadsheets tend to export as Latin-1, hence the fallback when the file isn't valid UTF-8.
fn decode(bytes: Vec<u8>) -> Result<String> {
    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(e) => {
            debug!("Recipients file isn't valid UTF-8, decoding it as ISO-8859-1.");
            Ok(ISO_8859_1.decode(e.as_bytes(), DecoderTrap::Strict)?)
        }
    }
}

pub fn parse_recipients<R: Read>(reader: R) -> Vec<Recipient> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut recipients = vec![];
    let mut first_row = true;
    for (index, record) in reader.records().enumerate() {
        let line = record
            .as_ref()
            .ok()
            .and_then(StringRecord::position)
            .map(|position| position.line())
            .unwrap_or(index as u64 + 1);
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping row {line}: {}", RowRejection::Malformed(e.to_string()));
                continue;
            }
        };
        if is_blank(&record) {
            continue;
        }
        if first_row {
            first_row = false;
            if is_header(&record) {
                debug!("Skipping header row {line}.");
                continue;
            }
        }

        match parse_row(&record) {
            Ok(recipient) => recipients.push(recipient),
            Err(rejection) => {
                warn!("Skipping row {line} ({rejection}): {record:?}");
                println!("Skipping invalid row {line} ({rejection}): {}", join(&record));
            }
        }
    }

    recipients
}

fn parse_row(record: &StringRecord) -> Result<Recipient, RowRejection> {
    match (record.get(0), record.get(1)) {
        (Some(name), Some(email)) => Recipient::try_new(name, email, record.get(2)),
        _ => Err(RowRejection::TooFewFields(record.len())),
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

fn is_header(record: &StringRecord) -> bool {
    record
        .iter()
        .any(|cell| HEADER_CELLS.contains(&cell.trim().to_lowercase().as_str()))
}

fn join(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test::tests::temp_dir;

    fn names(recipients: &[Recipient]) -> Vec<&str> {
        recipients.iter().map(|recipient| recipient.name().as_str()).collect()
    }

    mod parse_recipients {
        use super::*;
        use parameterized::{ide, parameterized};

        ide!();

        #[test]
        fn should_skip_header_and_empty_name() {
            let csv = "name,email\nAlice Smith,alice@example.com\n,bob@example.com\n";

            let recipients = parse_recipients(csv.as_bytes());

            assert_eq!(
                vec![Recipient::try_new("Alice Smith", "alice@example.com", None).unwrap()],
                recipients
            );
        }

        #[parameterized(
            header = {"Name,Email", "NAME, EMAIL, GROUP", " name ,mail", "full name,email"}
        )]
        fn should_detect_header(header: &str) {
            let csv = format!("{header}\nAlice,alice@example.com\n");

            let recipients = parse_recipients(csv.as_bytes());

            assert_eq!(vec!["Alice"], names(&recipients));
        }

        #[test]
        fn should_keep_first_row_without_header() {
            let csv = "Alice,alice@example.com\nBob,bob@example.com\n";

            let recipients = parse_recipients(csv.as_bytes());

            assert_eq!(vec!["Alice", "Bob"], names(&recipients));
        }

        #[test]
        fn should_only_consider_first_row_as_header() {
            let csv = "Alice,alice@example.com\nname,email\n";

            let recipients = parse_recipients(csv.as_bytes());

            assert_eq!(vec!["Alice", "name"], names(&recipients));
        }

        #[test]
        fn should_skip_blank_rows() {
            let csv = "\n , \nAlice,alice@example.com\n\n,,\nBob,bob@example.com\n";

            let recipients = parse_recipients(csv.as_bytes());

            assert_eq!(vec!["Alice", "Bob"], names(&recipients));
        }

        #[test]
        fn should_skip_invalid_rows_and_preserve_order() {
            let csv = "Carol,carol@example.com\nlonely\nAlice,\n,\"\"\nBob,bob@example.com\n";

            let recipients = parse_recipients(csv.as_bytes());

            assert_eq!(vec!["Carol", "Bob"], names(&recipients));
        }

        #[test]
        fn should_read_group() {
            let csv = "Alice,alice@example.com,speakers\n\
                       Bob,bob@example.com,\n\
                       Carol,carol@example.com\n";

            let recipients = parse_recipients(csv.as_bytes());

            let groups: Vec<_> = recipients.iter().map(Recipient::group_key).collect();
            assert_eq!(vec![Some("speakers"), None, None], groups);
        }

        #[test]
        fn should_handle_quoted_names() {
            let csv = "\"Smith, Alice\",alice@example.com\n";

            let recipients = parse_recipients(csv.as_bytes());

            assert_eq!(vec!["Smith, Alice"], names(&recipients));
        }
    }

    mod load_recipients {
        use super::*;

        #[test]
        fn should_load_recipients_from_file() {
            let folder = temp_dir();
            let path = folder.join("data.csv");
            fs::write(&path, "\u{feff}name,email\nAlice Smith,alice@example.com\n").unwrap();

            let recipients = load_recipients(&path).unwrap();

            assert_eq!(vec!["Alice Smith"], names(&recipients));
        }

        #[test]
        fn should_decode_latin1_file() {
            let folder = temp_dir();
            let path = folder.join("data.csv");
            let content = ISO_8859_1
                .encode("Zoé Müller,zoe@example.com\n", encoding::EncoderTrap::Strict)
                .unwrap();
            fs::write(&path, content).unwrap();

            let recipients = load_recipients(&path).unwrap();

            assert_eq!(vec!["Zoé Müller"], names(&recipients));
        }

        #[test]
        fn should_fail_when_file_is_missing() {
            let path = temp_dir().join("missing.csv");

            let result = load_recipients(&path);

            match result {
                Err(MissingFile(missing_path)) => assert_eq!(path, missing_path),
                _ => panic!("Unexpected result: {result:?}"),
            }
        }
    }
}
