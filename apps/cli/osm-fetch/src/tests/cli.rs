// Unit tests for argument parsing

use crate::cli::{Cli, Command};

use clap::Parser;

/// **VALUE**: Verifies a bbox starting with a negative longitude is accepted as a value.
///
/// **BUG THIS CATCHES**: Without `allow_hyphen_values`, clap reads `-0.1,...` as an unknown
/// flag, so every bbox west of Greenwich fails to parse.
#[test]
fn given_negative_bbox_when_parsing_map_then_keeps_value() {
    // GIVEN/WHEN: Parsing a western bbox
    let cli = Cli::try_parse_from(["osm-fetch", "map", "-0.1,51.5,-0.09,51.51"])
        .expect("bbox should parse");

    // THEN: The value is passed through untouched
    assert_eq!(
        cli.command,
        Command::Map {
            bbox: String::from("-0.1,51.5,-0.09,51.51")
        }
    );
}

#[test]
fn given_history_flags_when_parsing_then_sets_changesets_and_globals() {
    let cli = Cli::try_parse_from([
        "osm-fetch",
        "history",
        "way/42",
        "--changesets",
        "--verbose",
        "--config-dir",
        "/tmp/osm",
    ])
    .expect("history should parse");

    assert!(cli.verbose);
    assert_eq!(cli.config_dir.as_deref(), Some(std::path::Path::new("/tmp/osm")));
    assert_eq!(
        cli.command,
        Command::History {
            id: String::from("way/42"),
            changesets: true
        }
    );
}

#[test]
fn given_comma_separated_ids_when_parsing_changesets_then_splits() {
    let cli = Cli::try_parse_from(["osm-fetch", "changesets", "100,200", "300"])
        .expect("changesets should parse");

    assert_eq!(
        cli.command,
        Command::Changesets {
            ids: vec![
                String::from("100"),
                String::from("200"),
                String::from("300")
            ]
        }
    );
}

#[test]
fn given_changesets_without_ids_when_parsing_then_fails() {
    assert!(Cli::try_parse_from(["osm-fetch", "changesets"]).is_err());
}
