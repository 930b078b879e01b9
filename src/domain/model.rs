use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type BookId = u32;
pub type MemberId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub issued: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    /// Held books, in the order they were issued.
    #[serde(default)]
    pub issued_book_ids: Vec<BookId>,
}

impl Member {
    pub fn holds(&self, book_id: BookId) -> bool {
        self.issued_book_ids.contains(&book_id)
    }
}

/// A member together with the titles of the books they currently hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSummary {
    pub id: MemberId,
    pub name: String,
    pub issued_titles: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CirculationError {
    #[error("Book ID {0} is not available for issue")]
    BookNotAvailable(BookId),

    #[error("Book ID {0} is not currently issued")]
    BookNotIssued(BookId),

    #[error("Member ID {0} does not exist")]
    MemberNotFound(MemberId),

    #[error("Book ID {book_id} is not held by Member ID {member_id}")]
    NotHeldByMember { book_id: BookId, member_id: MemberId },
}

/// The aggregate root: every book, member and return record lives here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    books: Vec<Book>,
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    return_history: Vec<String>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_book(&mut self, title: impl Into<String>, author: impl Into<String>) -> &Book {
        let book = Book {
            id: next_id(self.books.len()),
            title: title.into(),
            author: author.into(),
            issued: false,
        };
        self.books.push(book);
        &self.books[self.books.len() - 1]
    }

    pub fn add_member(&mut self, name: impl Into<String>) -> &Member {
        let member = Member {
            id: next_id(self.members.len()),
            name: name.into(),
            issued_book_ids: Vec::new(),
        };
        self.members.push(member);
        &self.members[self.members.len() - 1]
    }

    /// Checks a book out to a member. Both ids are resolved before either
    /// entity is touched, so a rejected call leaves the library unchanged.
    pub fn issue_book(
        &mut self,
        book_id: BookId,
        member_id: MemberId,
    ) -> Result<(), CirculationError> {
        let book_idx = self
            .books
            .iter()
            .position(|b| b.id == book_id && !b.issued)
            .ok_or(CirculationError::BookNotAvailable(book_id))?;
        let member_idx = self
            .member_index(member_id)
            .ok_or(CirculationError::MemberNotFound(member_id))?;

        self.books[book_idx].issued = true;
        self.members[member_idx].issued_book_ids.push(book_id);
        tracing::debug!(book_id, member_id, "Book issued");
        Ok(())
    }

    pub fn return_book(
        &mut self,
        book_id: BookId,
        member_id: MemberId,
    ) -> Result<(), CirculationError> {
        let book_idx = self
            .books
            .iter()
            .position(|b| b.id == book_id && b.issued)
            .ok_or(CirculationError::BookNotIssued(book_id))?;
        let member_idx = self
            .member_index(member_id)
            .ok_or(CirculationError::MemberNotFound(member_id))?;
        let held_idx = self.members[member_idx]
            .issued_book_ids
            .iter()
            .position(|&id| id == book_id)
            .ok_or(CirculationError::NotHeldByMember { book_id, member_id })?;

        let book = &mut self.books[book_idx];
        book.issued = false;
        self.members[member_idx].issued_book_ids.remove(held_idx);
        self.return_history.push(format!(
            "Book ID {} ({}) returned by Member ID {}",
            book.id, book.title, member_id
        ));
        tracing::debug!(book_id, member_id, "Book returned");
        Ok(())
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn return_history(&self) -> &[String] {
        &self.return_history
    }

    pub fn find_book(&self, book_id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == book_id)
    }

    pub fn find_member(&self, member_id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }

    pub fn available_books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().filter(|b| !b.issued)
    }

    pub fn issued_books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().filter(|b| b.issued)
    }

    pub fn member_summaries(&self) -> Vec<MemberSummary> {
        self.members
            .iter()
            .map(|m| MemberSummary {
                id: m.id,
                name: m.name.clone(),
                issued_titles: m
                    .issued_book_ids
                    .iter()
                    .filter_map(|&id| self.find_book(id))
                    .map(|b| b.title.clone())
                    .collect(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.members.is_empty() && self.return_history.is_empty()
    }

    fn member_index(&self, member_id: MemberId) -> Option<usize> {
        self.members.iter().position(|m| m.id == member_id)
    }
}

fn next_id(len: usize) -> u32 {
    u32::try_from(len + 1).unwrap_or(u32::MAX)
}
