use contact_import::ImportError;
use contact_import::ingestion::csv::{parse_csv_bytes, parse_csv_str};
use contact_import::ingestion::{parse_table, SourceFile};

fn big_csv(rows: usize) -> String {
    let mut text = String::from("id,phone,email\n");
    for i in 0..rows {
        text.push_str(&format!("{i},+1555{i:07},user{i}@example.com\n"));
    }
    text
}

#[test]
fn parse_csv_happy_path() {
    let table = parse_csv_str("Phone,First Name\n+1555,Ada\n+1666,Grace\n", None).unwrap();

    assert_eq!(table.headers, vec!["Phone", "First Name"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows[1], vec!["+1666", "Grace"]);
}

#[test]
fn row_cap_is_exact_on_large_files() {
    let text = big_csv(1_000);

    let capped = parse_csv_str(&text, Some(20)).unwrap();
    assert_eq!(capped.row_count(), 20);
    assert_eq!(capped.rows[19][0], "19");

    let all = parse_csv_str(&text, None).unwrap();
    assert_eq!(all.row_count(), 1_000);
}

#[test]
fn row_cap_larger_than_file_returns_every_row() {
    let table = parse_csv_str(&big_csv(7), Some(20)).unwrap();
    assert_eq!(table.row_count(), 7);
}

#[test]
fn ragged_rows_are_zipped_to_headers() {
    let table = parse_csv_str("a,b,c\n1\n1,2,3,4,5\n", None).unwrap();
    assert_eq!(table.rows[0], vec!["1", "", ""]);
    assert_eq!(table.rows[1], vec!["1", "2", "3"]);
}

#[test]
fn semicolon_detection_uses_first_line_only() {
    // The header has no semicolon, so commas split every line.
    let table = parse_csv_str("name,note\nAda,\"x;y\"\n", None).unwrap();
    assert_eq!(table.rows[0], vec!["Ada", "x;y"]);

    let table = parse_csv_str("name;note\nDoe, Jane;hi\n", None).unwrap();
    assert_eq!(table.rows[0], vec!["Doe, Jane", "hi"]);
}

#[test]
fn invalid_utf8_is_replaced_not_rejected() {
    let table = parse_csv_bytes(b"name,phone\nJos\xE9,1\n", None).unwrap();
    assert_eq!(table.rows[0][1], "1");
    assert!(table.rows[0][0].starts_with("Jos"));
}

#[test]
fn empty_and_unsupported_files() {
    let err = parse_table(&SourceFile::new("empty.csv", Vec::new()), None).unwrap_err();
    assert!(matches!(err, ImportError::EmptyFile));
    assert!(err.to_string().contains("empty file"));

    let err = parse_table(&SourceFile::new("notes.txt", b"a,b\n".to_vec()), None).unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat { .. }));
}

#[test]
fn records_follow_header_order() {
    let table = parse_csv_str("Email,Phone\na@x.com,+1\n", None).unwrap();
    let rec = table.record(0).unwrap();
    let keys: Vec<&String> = rec.keys().collect();
    assert_eq!(keys, vec!["Email", "Phone"]);
}
