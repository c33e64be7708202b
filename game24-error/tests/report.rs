use ariadne::Fmt;
use game24_attrs::ErrorKind;
use game24_error::{Error, ErrorKind, EXPR};

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected an operand",
    labels = [format!("add a {} here", "number".fg(EXPR))],
    help = format!("the rest of the input was `{}`", remainder),
)]
struct MissingThing {
    remainder: String,
}

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "something broke", labels = ["here", "and here"])]
struct TwoPlaces;

/// Renders the error to a string with the color codes removed.
fn render(err: &Error, input: &str) -> String {
    let mut buf = Vec::new();
    err.write_report("input", input, &mut buf).unwrap();
    String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
}

#[test]
fn report_contains_message_and_help() {
    let err = Error::new(vec![4..5], MissingThing { remainder: String::from("+ )") });
    let report = render(&err, "3 + + )");

    assert!(report.contains("expected an operand"));
    assert!(report.contains("add a number here"));
    assert!(report.contains("the rest of the input was `+ )`"));
}

#[test]
fn report_labels_every_span() {
    let err = Error::new(vec![0..1, 4..5], TwoPlaces);
    let report = render(&err, "( 3 )");

    assert!(report.contains("something broke"));
    assert!(report.contains("and here"));
}

#[test]
fn downcast_to_concrete_kind() {
    let err = Error::new(vec![0..0], MissingThing { remainder: String::new() });

    assert!(err.is::<MissingThing>());
    assert!(!err.is::<TwoPlaces>());
    assert_eq!(
        err.downcast_ref::<MissingThing>(),
        Some(&MissingThing { remainder: String::new() }),
    );
}
