//! Declarative table descriptors and pagination
//!
//! Pages describe their columns once; [`Table::build`] turns the current
//! snapshot into a [`TableModel`] any renderer can draw. Cells see the
//! page's lookup list (`L`) so they can resolve references such as site ids.

use crate::controller::{Entity, InFlight};

/// One column: a title and a cell formatter
pub struct Column<E, L = ()> {
    pub title: &'static str,
    pub cell: fn(&E, &L) -> String,
}

impl<E, L> Column<E, L> {
    pub const fn new(title: &'static str, cell: fn(&E, &L) -> String) -> Self {
        Self { title, cell }
    }
}

/// Client-side pagination over a fully loaded list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number, clamped to the last page
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl Pagination {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page_size = page_size.max(1);
        let mut p = Self {
            page: page.max(1),
            page_size,
            total,
        };
        p.page = p.page.min(p.page_count());
        p
    }

    /// At least one page, even when empty
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    /// Index range of the current page
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    /// Footer text, e.g. "Total 3 customers"
    pub fn footer(&self, noun: &str) -> String {
        format!("Total {} {}", self.total, noun)
    }
}

/// A rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct RowModel {
    pub key: String,
    pub cells: Vec<String>,
    /// Row action in progress: show a spinner, disable the controls
    pub busy: bool,
}

/// Everything a renderer needs to draw one page of a table
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub headers: Vec<&'static str>,
    pub rows: Vec<RowModel>,
    pub pagination: Pagination,
    pub footer: String,
}

/// Column set for one entity type
pub struct Table<E, L = ()> {
    columns: Vec<Column<E, L>>,
    noun: &'static str,
}

impl<E: Entity, L> Table<E, L> {
    pub fn new(noun: &'static str, columns: Vec<Column<E, L>>) -> Self {
        Self { columns, noun }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.title).collect()
    }

    pub fn build(
        &self,
        items: &[E],
        lookup: &L,
        page: usize,
        page_size: usize,
        in_flight: &InFlight<E::Id>,
    ) -> TableModel {
        let pagination = Pagination::new(page, page_size, items.len());
        let rows = items[pagination.range()]
            .iter()
            .map(|item| RowModel {
                key: item.id().to_string(),
                cells: self.columns.iter().map(|c| (c.cell)(item, lookup)).collect(),
                busy: in_flight.contains(&item.id()),
            })
            .collect();

        TableModel {
            headers: self.headers(),
            rows,
            footer: pagination.footer(self.noun),
            pagination,
        }
    }
}
