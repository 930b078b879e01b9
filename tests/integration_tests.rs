use small_library::app::views;
use small_library::utils::error::{ErrorCategory, LibraryError};
use small_library::utils::validation::parse_id;
use small_library::{CirculationError, Library};

#[test]
fn test_issue_on_empty_library_changes_nothing() {
    let mut library = Library::new();
    assert_eq!(
        library.issue_book(99, 1),
        Err(CirculationError::BookNotAvailable(99))
    );
    assert!(library.is_empty());
}

#[test]
fn test_bad_ids_are_input_errors_before_any_call() {
    let err = parse_id("book_id", "twelve").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Input);
    assert!(err.user_friendly_message().contains("book_id"));
}

#[test]
fn test_rejected_return_maps_to_circulation_error() {
    let mut library = Library::new();
    library.add_book("Dune", "Herbert");
    library.add_member("Alice");

    let err: LibraryError = library.return_book(1, 1).unwrap_err().into();
    assert_eq!(err.category(), ErrorCategory::Circulation);
    assert_eq!(library.return_history().len(), 0);
}

#[test]
fn test_full_day_at_the_desk() {
    let mut library = Library::new();
    library.add_book("Dune", "Herbert");
    library.add_book("Emma", "Austen");
    library.add_member("Alice");
    library.add_member("Bob");

    library.issue_book(1, 1).unwrap();
    library.issue_book(2, 2).unwrap();
    library.return_book(1, 1).unwrap();
    library.issue_book(1, 2).unwrap();

    assert_eq!(views::render_available(&library), "");
    assert_eq!(
        views::render_members(&library),
        "ID: 1 | Name: Alice | Issued Books: None\nID: 2 | Name: Bob | Issued Books: Emma, Dune"
    );
    assert_eq!(
        views::render_history(&library),
        "Book ID 1 (Dune) returned by Member ID 1"
    );

    let all = views::render_all(&library);
    assert!(all.contains("== Issued Books ==\n1. Dune by Herbert\n2. Emma by Austen"));
}
