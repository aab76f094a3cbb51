//! The permitted statement shapes and the pieces captured from them.

use smol_str::SmolStr;
use std::fmt;

/// One of the four permitted full-statement templates.
///
/// Every shape starts with `collection('<name>')` and ends with `);`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementShape {
    /// `collection('c').document('d').set({...});`
    Set,
    /// `collection('c').add({...});`
    Add,
    /// `collection('c').document('d').update({...});`
    Update,
    /// `collection('c').document('d').delete();`
    Delete,
}

impl StatementShape {
    /// All shapes in the order they are tried.
    pub const ALL: [StatementShape; 4] = [
        StatementShape::Set,
        StatementShape::Add,
        StatementShape::Update,
        StatementShape::Delete,
    ];

    /// The method word that follows the collection or document selector.
    pub fn method(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Whether a `.document('<name>')` selector sits between the
    /// collection and the method.
    pub fn has_document(self) -> bool {
        !matches!(self, Self::Add)
    }

    /// Whether the method takes a `{...}` body argument.
    pub fn has_body(self) -> bool {
        !matches!(self, Self::Delete)
    }
}

impl fmt::Display for StatementShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// A statement that matched one of the permitted shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Which of the four shapes matched.
    pub shape: StatementShape,
    /// Collection name as written.
    pub collection: SmolStr,
    /// Document name, present for every shape except `add`.
    pub document: Option<SmolStr>,
    /// Text between `({` and the closing `});`, absent for `delete`.
    pub body: Option<String>,
}
