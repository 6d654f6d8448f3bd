//! Sections of a file and the ordered tables of elements built from them.
//!
//! A file may repeat a section header; elements of every occurrence land in
//! one logical table and remember which section they were written under so
//! the dumper can put them back in place.

use crate::base::ElementId;
use crate::parser::kinds::SectionKind;
use crate::parser::token::RobotLine;

/// Identity of one section occurrence within a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(pub(crate) u32);

/// One header-delimited section of a file
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub kind: SectionKind,
    /// Header line; `None` only for the preamble
    pub header: Option<RobotLine>,
    /// Whole body of verbatim sections, otherwise the blank and comment
    /// lines preceding the first element
    pub lines: Vec<RobotLine>,
}

impl Section {
    pub fn new(id: SectionId, kind: SectionKind, header: Option<RobotLine>) -> Self {
        Self {
            id,
            kind,
            header,
            lines: Vec::new(),
        }
    }

    /// First column carrying element data in this section
    pub fn data_column(&self) -> usize {
        if self.kind.holder_kind().is_some() { 1 } else { 0 }
    }

    /// Text of the header cell
    pub fn header_text(&self) -> Option<&str> {
        self.header
            .as_ref()
            .and_then(RobotLine::first_token)
            .map(|t| t.text())
    }
}

/// Element stored in a [`Table`]
pub trait TableElement {
    fn id(&self) -> ElementId;
    fn section(&self) -> SectionId;
    fn set_section(&mut self, section: SectionId);
    /// Physical lines in dump order
    fn lines(&self) -> Vec<&RobotLine>;
    fn lines_mut(&mut self) -> Vec<&mut RobotLine>;
}

/// Ordered elements of one logical table
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    elements: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

impl<T: TableElement> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.elements.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.elements.iter_mut()
    }

    pub fn last(&self) -> Option<&T> {
        self.elements.last()
    }

    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn find(&self, id: ElementId) -> Option<&T> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut T> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Last element written under `section`, if it is the table's last
    pub(crate) fn last_in_mut(&mut self, section: SectionId) -> Option<&mut T> {
        self.elements.last_mut().filter(|e| e.section() == section)
    }

    pub(crate) fn push(&mut self, element: T) {
        self.elements.push(element);
    }

    /// Section a new element at `index` belongs to: that of its predecessor,
    /// else of its successor
    pub fn section_for_insert(&self, index: usize) -> Option<SectionId> {
        index
            .checked_sub(1)
            .and_then(|i| self.elements.get(i))
            .or_else(|| self.elements.first())
            .map(TableElement::section)
    }

    /// Insert `element` at `index` (clamped to the table length)
    pub fn insert(&mut self, index: usize, element: T) {
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.elements.len()).then(|| self.elements.remove(index))
    }

    /// Swap the element at `index` with its neighbor above.
    ///
    /// An element crossing a section boundary adopts the section of the
    /// position it moves into.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.elements.len() {
            return false;
        }
        let above = self.elements[index - 1].section();
        let below = self.elements[index].section();
        self.elements.swap(index - 1, index);
        self.elements[index - 1].set_section(above);
        self.elements[index].set_section(below);
        true
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        index + 1 < self.elements.len() && self.move_up(index + 1)
    }

    /// Elements written under `section`, in order
    pub fn in_section(&self, section: SectionId) -> impl Iterator<Item = &T> {
        self.elements.iter().filter(move |e| e.section() == section)
    }

    pub fn in_section_mut(&mut self, section: SectionId) -> impl Iterator<Item = &mut T> {
        self.elements.iter_mut().filter(move |e| e.section() == section)
    }
}

impl<'a, T> IntoIterator for &'a Table<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
