use crate::domain::model::{Book, Library, MemberSummary};

fn book_line(book: &Book) -> String {
    format!("{}. {} by {}", book.id, book.title, book.author)
}

fn member_line(summary: &MemberSummary) -> String {
    let issued = if summary.issued_titles.is_empty() {
        "None".to_string()
    } else {
        summary.issued_titles.join(", ")
    };
    format!(
        "ID: {} | Name: {} | Issued Books: {}",
        summary.id, summary.name, issued
    )
}

pub fn render_available(library: &Library) -> String {
    library
        .available_books()
        .map(book_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_issued(library: &Library) -> String {
    library
        .issued_books()
        .map(book_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_history(library: &Library) -> String {
    library.return_history().join("\n")
}

pub fn render_members(library: &Library) -> String {
    library
        .member_summaries()
        .iter()
        .map(member_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every view under its own heading, as a full refresh would show it.
pub fn render_all(library: &Library) -> String {
    let sections = [
        ("Available Books", render_available(library)),
        ("Issued Books", render_issued(library)),
        ("Return History", render_history(library)),
        ("Members", render_members(library)),
    ];

    sections
        .iter()
        .map(|(heading, body)| {
            if body.is_empty() {
                format!("== {} ==\n(empty)", heading)
            } else {
                format!("== {} ==\n{}", heading, body)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
