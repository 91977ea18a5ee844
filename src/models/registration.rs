use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Anchored matric number pattern: faculty/department/2-4 digit year/3-6 digit
/// serial, e.g. LCU/CS/2023/001 or LCU/UG/23/25792. Letter case is not
/// significant.
static MATRIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]+/[A-Za-z]+/\d{2,4}/\d{3,6}$").expect("Invalid matric number regex")
});

/// Check whether a matric number is well-formed
pub fn is_valid_matric(matric: &str) -> bool {
    MATRIC_RE.is_match(matric)
}

/// Validation failures for a registration draft
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required.")]
    AllFieldsRequired,

    #[error("Invalid format. Use LCU/CS/2023/001 or LCU/UG/23/25792")]
    InvalidMatric,
}

/// Lookup and removal failures on the registration book
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("No registration with id {0}")]
    NotFound(u64),

    #[error("Position {index} is out of range ({len} registrations)")]
    OutOfRange { index: usize, len: usize },
}

/// A registered course with its stable identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registration {
    /// Unique identifier (monotonic counter, never reused within a book)
    pub id: u64,
    pub student_name: String,
    pub matric_number: String,
    pub course_code: String,
    pub course_title: String,
}

/// Raw form input for a registration, before validation
///
/// Fields hold the text exactly as entered; [`RegistrationDraft::validate`]
/// works on trimmed values and the book trims again on insert, so callers
/// don't need to pre-clean input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub student_name: String,
    pub matric_number: String,
    pub course_code: String,
    pub course_title: String,
}

impl RegistrationDraft {
    pub fn new(
        student_name: impl Into<String>,
        matric_number: impl Into<String>,
        course_code: impl Into<String>,
        course_title: impl Into<String>,
    ) -> Self {
        RegistrationDraft {
            student_name: student_name.into(),
            matric_number: matric_number.into(),
            course_code: course_code.into(),
            course_title: course_title.into(),
        }
    }

    /// Validate the draft: presence of all four fields first, then the matric
    /// number format. The format error is only reported once presence passes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let all_present = [
            &self.student_name,
            &self.matric_number,
            &self.course_code,
            &self.course_title,
        ]
        .iter()
        .all(|field| !field.trim().is_empty());

        if !all_present {
            return Err(ValidationError::AllFieldsRequired);
        }

        if !is_valid_matric(self.matric_number.trim()) {
            return Err(ValidationError::InvalidMatric);
        }

        Ok(())
    }
}

/// Ordered collection of course registrations
///
/// Insertion order is preserved and duplicates are permitted; there is no
/// uniqueness constraint across records. Each entry gets a stable id at
/// creation so delete operates by lookup rather than list position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationBook {
    /// All registrations in insertion order
    entries: Vec<Registration>,
    /// Next ID to assign (monotonic counter, rebuilt after deserialization)
    #[serde(skip)]
    next_id: u64,
}

impl RegistrationBook {
    /// Create a new empty book
    pub fn new() -> Self {
        RegistrationBook {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild the id counter (called after deserialization)
    pub fn rebuild_next_id(&mut self) {
        self.next_id = self.entries.iter().map(|r| r.id).max().unwrap_or(0) + 1;
    }

    /// Append a registration built from a draft and return its assigned id
    ///
    /// The caller is expected to have validated the draft already; field
    /// values are stored trimmed.
    pub fn add(&mut self, draft: RegistrationDraft) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.entries.push(Registration {
            id,
            student_name: draft.student_name.trim().to_string(),
            matric_number: draft.matric_number.trim().to_string(),
            course_code: draft.course_code.trim().to_string(),
            course_title: draft.course_title.trim().to_string(),
        });

        id
    }

    /// Look up a registration by id
    pub fn get(&self, id: u64) -> Option<&Registration> {
        self.entries.iter().find(|r| r.id == id)
    }

    /// Remove a registration by id, preserving the relative order of the rest
    pub fn remove(&mut self, id: u64) -> Result<Registration, BookError> {
        let pos = self
            .entries
            .iter()
            .position(|r| r.id == id)
            .ok_or(BookError::NotFound(id))?;

        Ok(self.entries.remove(pos))
    }

    /// Remove the registration at a 0-based list position
    ///
    /// Out-of-range positions are an explicit error, never a silent no-op.
    pub fn remove_at(&mut self, index: usize) -> Result<Registration, BookError> {
        if index >= self.entries.len() {
            return Err(BookError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }

        Ok(self.entries.remove(index))
    }

    /// Remove every registration
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All registrations in insertion order
    pub fn entries(&self) -> &[Registration] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RegistrationBook {
    fn default() -> Self {
        Self::new()
    }
}
