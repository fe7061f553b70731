//! Paging and sorting for book listings.

use super::book::Book;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("No property '{0}' found for type Book")]
    UnknownSortField(String),

    #[error("Invalid sort direction '{0}'; expected asc or desc")]
    InvalidDirection(String),
}

/// A property books can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    Title,
    Author,
    PublicationDate,
    Publisher,
    Pages,
}

impl SortField {
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Author => "author",
            Self::PublicationDate => "publicationDate",
            Self::Publisher => "publisher",
            Self::Pages => "pages",
        }
    }

    fn compare(self, a: &Book, b: &Book) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Title => a.fields.title.cmp(&b.fields.title),
            Self::Author => a.fields.author.cmp(&b.fields.author),
            Self::PublicationDate => a.fields.publication_date.cmp(&b.fields.publication_date),
            Self::Publisher => a.fields.publisher.cmp(&b.fields.publisher),
            Self::Pages => a.fields.pages.cmp(&b.fields.pages),
        }
    }
}

impl FromStr for SortField {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::Id,
            Self::Title,
            Self::Author,
            Self::PublicationDate,
            Self::Publisher,
            Self::Pages,
        ]
        .into_iter()
        .find(|field| field.name() == s)
        .ok_or_else(|| PageError::UnknownSortField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// A sort specification in `property[,asc|desc]` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }

    /// Compare two books; ties are broken by ascending id.
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        let by_field = match self.direction {
            Direction::Asc => self.field.compare(a, b),
            Direction::Desc => self.field.compare(b, a),
        };
        by_field.then_with(|| a.id.cmp(&b.id))
    }
}

impl FromStr for SortOrder {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',');
        let field: SortField = parts.next().unwrap_or_default().trim().parse()?;
        let direction = match parts.next().map(str::trim) {
            None => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => Direction::Desc,
            Some(d) => return Err(PageError::InvalidDirection(d.to_string())),
        };
        Ok(Self { field, direction })
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        write!(f, "{},{}", self.field.name(), direction)
    }
}

/// Which page of a listing to return. Pages are numbered from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: Option<SortOrder>,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub first: bool,
    pub last: bool,
    pub number_of_elements: usize,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: usize) -> Self {
        let total_pages = if request.size == 0 {
            1
        } else {
            total_elements.div_ceil(request.size)
        };
        Self {
            number_of_elements: content.len(),
            content,
            number: request.page,
            size: request.size,
            total_elements,
            total_pages,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
            number_of_elements: self.number_of_elements,
        }
    }
}
