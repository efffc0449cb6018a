//! The DNI report: a general data page followed by one paginated section per
//! non-empty list in the lookup response.
//!
//! Pages are produced lazily by [Report::pages], so only the page being composed is
//! held in memory unless the caller keeps them.

mod general;
mod sections;
mod summary;

pub use general::*;
pub use sections::*;
pub use summary::*;

use crate::{
    canvas::{Canvas, CanvasProvider},
    compose::PageComposer,
    font::TextMeasurer,
    page::FinishedPage,
    record::Record,
    ReportError,
};
use log::info;

/// One page of a report with its place in the table of contents
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPage<O> {
    /// 1-based position in the report
    pub number: usize,
    pub description: String,
    pub page: FinishedPage<O>,
}

/// A report for one person, ready to be composed
pub struct Report<'a, P: CanvasProvider, M: TextMeasurer> {
    composer: &'a PageComposer<P, M>,
    dni: String,
    data: &'a Record,
    sections: Vec<(ListSection, Vec<Record>)>,
}

impl<'a, P: CanvasProvider, M: TextMeasurer> Report<'a, P, M> {
    /// Empty list sections are left out of the report entirely
    pub fn new<S: ToString>(composer: &'a PageComposer<P, M>, dni: S, data: &'a Record) -> Self {
        let sections = ListSection::ALL
            .into_iter()
            .map(|section| (section, data.list(section.key())))
            .filter(|(_, records)| !records.is_empty())
            .collect();
        Report {
            composer,
            dni: dni.to_string(),
            data,
            sections,
        }
    }

    pub fn dni(&self) -> &str {
        &self.dni
    }

    /// The list sections that will get pages, with their records
    pub fn sections(&self) -> &[(ListSection, Vec<Record>)] {
        &self.sections
    }

    /// How many pages [Report::pages] will yield
    pub fn page_count(&self) -> Result<usize, ReportError> {
        let style = self.composer.style();
        self.sections
            .iter()
            .try_fold(1, |count, (section, records)| {
                Ok(count + section.config(style).plan(records.len())?.page_count())
            })
    }

    /// Compose the report's pages in order. The iterator stops after the first error.
    pub fn pages(&self) -> ReportPages<'_, 'a, P, M> {
        ReportPages {
            report: self,
            stage: Stage::General,
            number: 0,
        }
    }

    /// The plain text summary of the report's data
    pub fn summary(&self) -> String {
        legacy_summary(self.data)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Stage {
    General,
    Section { index: usize, page: usize },
    Done,
}

/// Iterator over the pages of a [Report]
pub struct ReportPages<'r, 'a, P: CanvasProvider, M: TextMeasurer> {
    report: &'r Report<'a, P, M>,
    stage: Stage,
    number: usize,
}

type PageResult<P> =
    Result<ReportPage<<<P as CanvasProvider>::Canvas as Canvas>::Output>, ReportError>;

impl<P: CanvasProvider, M: TextMeasurer> ReportPages<'_, '_, P, M> {
    fn general(&mut self) -> PageResult<P> {
        let report = self.report;
        let composer = report.composer;
        let page = composer.compose_page(
            &general_title(&report.dni),
            &general_config(composer.style()),
            |ctx| draw_general(ctx, report.data),
        )?;
        Ok(ReportPage {
            number: self.number,
            description: "Datos Generales, Familia y Ubicación".to_string(),
            page,
        })
    }

    /// The next page of section `index`, or [None] once the section is exhausted
    fn section_page(&mut self, index: usize, page: usize) -> Option<PageResult<P>> {
        let report = self.report;
        let composer = report.composer;
        let (section, records) = report.sections.get(index)?;
        let config = section.config(composer.style());
        let plan = match config.plan(records.len()) {
            Ok(plan) => plan,
            Err(e) => return Some(Err(e)),
        };
        let Some(group) = plan.group(records, page) else {
            info!(
                "{}: {} {} records on {} pages",
                report.dni,
                section.name(),
                records.len(),
                plan.page_count()
            );
            return None;
        };

        let number = self.number + 1;
        let title = format!(
            "FICHA {} - {} - Pág {}/{} - {}",
            number,
            section.name(),
            page + 1,
            group.page_count,
            report.dni
        );
        let heading = format!("{} ({} registros)", section.heading(), records.len());
        let result = composer
            .compose_group(&title, &config, &heading, &group, |ctx, slot| {
                section.draw_record(ctx, slot)
            })
            .map(|page_out| ReportPage {
                number,
                description: format!("{} - Parte {}", section.description(), page + 1),
                page: page_out,
            });
        Some(result)
    }
}

impl<P: CanvasProvider, M: TextMeasurer> Iterator for ReportPages<'_, '_, P, M> {
    type Item = PageResult<P>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let result = match self.stage {
                Stage::Done => return None,
                Stage::General => {
                    self.number = 1;
                    self.stage = Stage::Section { index: 0, page: 0 };
                    self.general()
                }
                Stage::Section { index, page } => {
                    if index >= self.report.sections.len() {
                        self.stage = Stage::Done;
                        return None;
                    }
                    match self.section_page(index, page) {
                        Some(result) => {
                            self.number += 1;
                            self.stage = Stage::Section {
                                index,
                                page: page + 1,
                            };
                            result
                        }
                        None => {
                            self.stage = Stage::Section {
                                index: index + 1,
                                page: 0,
                            };
                            continue;
                        }
                    }
                }
            };

            if result.is_err() {
                self.stage = Stage::Done;
            }
            return Some(result);
        }
    }
}
