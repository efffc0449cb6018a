use super::columns::ColumnCount;
use crate::ReportError;
use log::debug;

/// Decides which records land on which page, and in which column.
///
/// A plan only knows how many records there are, so it can answer questions about any
/// page without walking the ones before it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PaginationPlan {
    total: usize,
    per_page: usize,
    columns: ColumnCount,
}

impl PaginationPlan {
    pub fn new(
        total: usize,
        per_page: usize,
        columns: ColumnCount,
    ) -> Result<PaginationPlan, ReportError> {
        if per_page == 0 {
            return Err(ReportError::InvalidConfig(
                "records per page must be at least 1".to_string(),
            ));
        }
        let plan = PaginationPlan {
            total,
            per_page,
            columns,
        };
        debug!(
            "pagination: {} records, {} per page, {} column(s), {} page(s)",
            total,
            per_page,
            columns.count(),
            plan.page_count()
        );
        Ok(plan)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn columns(&self) -> ColumnCount {
        self.columns
    }

    /// Zero exactly when there are no records
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.per_page)
    }

    /// How many records the left column of a full page holds. This is fixed by the
    /// page size, not by how many records a page actually gets, so the last page of a
    /// two-column section can have a short or empty right column.
    pub fn column_capacity(&self) -> usize {
        match self.columns {
            ColumnCount::Single => self.per_page,
            ColumnCount::Double => self.per_page.div_ceil(2),
        }
    }

    /// Records `start..end` of the whole list that belong on page `page`
    fn page_bounds(&self, page: usize) -> Option<(usize, usize)> {
        if page >= self.page_count() {
            return None;
        }
        let start = page * self.per_page;
        Some((start, (start + self.per_page).min(self.total)))
    }

    /// The records of page `page`, split into columns. `records` must be the list the
    /// plan was made for.
    pub fn group<'r, T>(&self, records: &'r [T], page: usize) -> Option<PageGroup<'r, T>> {
        debug_assert_eq!(records.len(), self.total);
        let (start, end) = self.page_bounds(page)?;
        let slice = records.get(start..end)?;

        let columns = match self.columns {
            ColumnCount::Single => vec![ColumnSlice {
                column: 0,
                first_index: start,
                local_offset: 0,
                records: slice,
            }],
            ColumnCount::Double => {
                let half = self.column_capacity().min(slice.len());
                let (left, right) = slice.split_at(half);
                vec![
                    ColumnSlice {
                        column: 0,
                        first_index: start,
                        local_offset: 0,
                        records: left,
                    },
                    ColumnSlice {
                        column: 1,
                        first_index: start + half,
                        local_offset: half,
                        records: right,
                    },
                ]
            }
        };

        Some(PageGroup {
            page_index: page,
            page_count: self.page_count(),
            first_index: start,
            records: slice,
            columns,
        })
    }

    /// Every page of `records`, in order
    pub fn groups<'p, 'r, T>(&'p self, records: &'r [T]) -> PageGroups<'p, 'r, T> {
        PageGroups {
            plan: self,
            records,
            next: 0,
        }
    }
}

/// Split `records` into pages of at most `per_page`, each divided into `columns`
/// columns.
pub fn paginate<T>(
    records: &[T],
    per_page: usize,
    columns: ColumnCount,
) -> Result<Vec<PageGroup<'_, T>>, ReportError> {
    let plan = PaginationPlan::new(records.len(), per_page, columns)?;
    Ok(plan.groups(records).collect())
}

/// Iterator over the pages of a [PaginationPlan]
#[derive(Debug)]
pub struct PageGroups<'p, 'r, T> {
    plan: &'p PaginationPlan,
    records: &'r [T],
    next: usize,
}

impl<'p, 'r, T> Iterator for PageGroups<'p, 'r, T> {
    type Item = PageGroup<'r, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let group = self.plan.group(self.records, self.next)?;
        self.next += 1;
        Some(group)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.plan.page_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for PageGroups<'_, '_, T> {}

/// The records assigned to one page
#[derive(Debug)]
pub struct PageGroup<'r, T> {
    pub page_index: usize,
    pub page_count: usize,
    /// Position of this page's first record in the whole list
    pub first_index: usize,
    pub records: &'r [T],
    /// One entry per column, left to right. The right column may be empty.
    pub columns: Vec<ColumnSlice<'r, T>>,
}

impl<'r, T> PageGroup<'r, T> {
    pub fn is_last(&self) -> bool {
        self.page_index + 1 == self.page_count
    }

    /// Every record on the page with its placement, left column first
    pub fn slots(&self) -> impl Iterator<Item = RecordSlot<'r, T>> + '_ {
        self.columns.iter().flat_map(|column| column.slots())
    }
}

/// The records of one column of a page
#[derive(Debug)]
pub struct ColumnSlice<'r, T> {
    pub column: usize,
    /// Position of this column's first record in the whole list
    pub first_index: usize,
    /// Position of this column's first record within the page
    pub local_offset: usize,
    pub records: &'r [T],
}

impl<'r, T> ColumnSlice<'r, T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn slots(&self) -> impl Iterator<Item = RecordSlot<'r, T>> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(move |(i, record)| RecordSlot {
                record,
                column: self.column,
                local_index: self.local_offset + i,
                display_index: self.first_index + i + 1,
            })
    }
}

/// One record with the place it was given on its page
#[derive(Debug)]
pub struct RecordSlot<'r, T> {
    pub record: &'r T,
    pub column: usize,
    /// Position within the page, counting the left column first
    pub local_index: usize,
    /// The 1-based number shown to readers; it keeps counting across pages
    pub display_index: usize,
}

impl<T> Clone for RecordSlot<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RecordSlot<'_, T> {}
