//! Tests for SolverService

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use bstsum::application::services::{InputSource, SolverOptions, SolverService};
use bstsum::application::{ApplicationError, InputError, InputFormat};
use bstsum::domain::DomainError;
use bstsum::infrastructure::traits::{RealFileSystem, StaticStdin};

fn service_with_stdin(stdin: &str) -> SolverService {
    SolverService::new(
        Arc::new(RealFileSystem),
        Arc::new(StaticStdin(stdin.to_string())),
    )
}

fn create_input_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write input file");
    path
}

#[test]
fn given_counted_file_when_solving_then_returns_best_sum() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_input_file(
        &temp,
        "tree.txt",
        "15\n1 4 3 2 4 2 5 -1 -1 -1 -1 -1 -1 -1 -1\n",
    );
    let service = service_with_stdin("");

    // Act
    let solution = service
        .solve(&InputSource::File(path), &SolverOptions::default())
        .unwrap();

    // Assert
    assert_eq!(solution.answer, 10);
    assert_eq!(solution.node_count, 7);
    assert_eq!(solution.depth, 3);
    let best = solution.best.unwrap();
    assert_eq!(best.value, 3);
    assert_eq!(best.size, 3);
}

#[test]
fn given_stdin_when_solving_then_reads_stdin() {
    // Arrange
    let service = service_with_stdin("3\n-4 -2 -5\n");

    // Act
    let solution = service
        .solve(&InputSource::Stdin, &SolverOptions::default())
        .unwrap();

    // Assert
    assert_eq!(solution.answer, -2);
}

#[test]
fn given_bare_format_when_solving_then_parses_list() {
    let service = service_with_stdin("");
    let options = SolverOptions {
        format: InputFormat::Bare,
        ..SolverOptions::default()
    };

    let solution = service.solve_str("[2, 1, 3]", &options).unwrap();

    assert_eq!(solution.answer, 6);
    assert_eq!(solution.bst_count, 3);
}

#[test]
fn given_empty_tree_when_solving_then_uses_configured_answer() {
    // Arrange
    let service = service_with_stdin("");
    let options = SolverOptions {
        empty_tree_answer: -1,
        ..SolverOptions::default()
    };

    // Act
    let solution = service.solve_str("0\n", &options).unwrap();

    // Assert
    assert_eq!(solution.answer, -1);
    assert!(solution.best.is_none());
    assert_eq!(solution.node_count, 0);
}

#[test]
fn given_custom_sentinel_when_solving_then_minus_one_is_a_node() {
    // Arrange: with sentinel 0, -1 is a real left child of 5
    let service = service_with_stdin("");
    let options = SolverOptions {
        sentinel: 0,
        ..SolverOptions::default()
    };

    // Act
    let solution = service.solve_str("3\n5 -1 0\n", &options).unwrap();

    // Assert
    assert_eq!(solution.answer, 4);
    assert_eq!(solution.node_count, 2);
}

#[test]
fn given_missing_file_when_solving_then_fails_with_not_found() {
    let temp = TempDir::new().unwrap();
    let service = service_with_stdin("");

    let err = service
        .solve(
            &InputSource::File(temp.path().join("absent.txt")),
            &SolverOptions::default(),
        )
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("absent.txt"));
}

#[test]
fn given_truncated_input_when_solving_then_input_error() {
    let service = service_with_stdin("");

    let err = service
        .solve_str("4\n1 2\n", &SolverOptions::default())
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Input(InputError::Truncated {
            expected: 4,
            found: 2
        })
    ));
}

#[test]
fn given_unplaceable_value_when_solving_then_domain_error() {
    let service = service_with_stdin("");

    let err = service
        .solve_str("4\n1 -1 -1 3\n", &SolverOptions::default())
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::UnreachableValue { value: 3, .. })
    ));
}

#[test]
fn given_annotate_when_rendering_then_marks_best_subtree() {
    // Arrange
    let service = service_with_stdin("7 1 4 3 2 4 2 5");

    // Act
    let plain = service
        .render(&InputSource::Stdin, &SolverOptions::default(), false)
        .unwrap();
    let annotated = service
        .render(&InputSource::Stdin, &SolverOptions::default(), true)
        .unwrap();

    // Assert
    assert_eq!(plain.lines().next(), Some("1"));
    assert!(!plain.contains("bst"));
    assert!(annotated.contains("3 [bst sum=10] *"));
    assert!(annotated.lines().next().unwrap().starts_with('1'));
}

#[test]
fn given_deep_chain_when_rendering_then_refuses_but_solves() {
    // Arrange: right-leaning chain 1 -> 2 -> ... -> n, counted format
    let n = 100_000;
    let mut text = format!("{} 1", 2 * n - 1);
    for v in 2..=n {
        text.push_str(&format!(" -1 {v}"));
    }
    let service = service_with_stdin(&text);

    // Act
    let rendered = service.render(&InputSource::Stdin, &SolverOptions::default(), false);
    let solution = service
        .solve(&InputSource::Stdin, &SolverOptions::default())
        .unwrap();

    // Assert
    assert!(matches!(
        rendered,
        Err(ApplicationError::Domain(DomainError::TooDeepToRender { depth: 100_000, .. }))
    ));
    assert_eq!(solution.answer, 5_000_050_000);
    assert_eq!(solution.depth, 100_000);
}

#[test]
fn given_dash_or_nothing_when_choosing_source_then_stdin() {
    assert_eq!(InputSource::from_arg(None), InputSource::Stdin);
    assert_eq!(
        InputSource::from_arg(Some(std::path::Path::new("-"))),
        InputSource::Stdin
    );
    assert_eq!(
        InputSource::from_arg(Some(std::path::Path::new("t.txt"))),
        InputSource::File(PathBuf::from("t.txt"))
    );
}
