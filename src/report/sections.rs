use crate::{
    canvas::Canvas,
    compose::{LayoutContext, ReportStyle, SectionConfig},
    font::TextMeasurer,
    layout::{ColumnCount, RecordSlot, RightColumnStart},
    record::Record,
    units::Px,
    ReportError,
};

/// Space above the title line of a work or company record
const RECORD_GAP: Px = Px(10.0);
/// Advance of the title line of a work or company record
const TITLE_ADVANCE: Px = Px(36.0);
/// Advance of the number line of a phone record
const PHONE_ADVANCE: Px = Px(28.0);
/// Space between the last field of a work or company record and its rule
const RULE_GAP: Px = Px(18.0);

/// The paginated lists of a report, in the order they're printed
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ListSection {
    Familiares,
    Laboral,
    Telefonos,
    Cargos,
}

impl ListSection {
    pub const ALL: [ListSection; 4] = [
        ListSection::Familiares,
        ListSection::Laboral,
        ListSection::Telefonos,
        ListSection::Cargos,
    ];

    /// Key of the section's array in the lookup response
    pub fn key(self) -> &'static str {
        match self {
            ListSection::Familiares => "familiares",
            ListSection::Laboral => "infoLaboral",
            ListSection::Telefonos => "telefonos",
            ListSection::Cargos => "cargos",
        }
    }

    /// Name used in page titles
    pub fn name(self) -> &'static str {
        match self {
            ListSection::Familiares => "FAMILIARES",
            ListSection::Laboral => "HISTORIAL LABORAL",
            ListSection::Telefonos => "TELÉFONOS",
            ListSection::Cargos => "CARGOS / EMPRESAS",
        }
    }

    /// Heading printed at the top of each page of the section
    pub fn heading(self) -> &'static str {
        match self {
            ListSection::Familiares => "Familiares y Vínculos",
            ListSection::Laboral => "Historial Laboral",
            ListSection::Telefonos => "Contactos y Teléfonos",
            ListSection::Cargos => "Cargos y Vínculos Empresariales",
        }
    }

    /// Name used in the table of contents
    pub fn description(self) -> &'static str {
        match self {
            ListSection::Familiares => "Familiares",
            ListSection::Laboral => "Historial Laboral",
            ListSection::Telefonos => "Teléfonos",
            ListSection::Cargos => "Cargos / Empresas",
        }
    }

    /// Height of one record whose values each fit on one line
    pub fn record_height(self, style: &ReportStyle) -> Px {
        let field = style.line_height + style.field_spacing;
        match self {
            ListSection::Familiares => {
                self.name_line_height(style) + field * 3.0 + style.record_spacing
            }
            ListSection::Telefonos => PHONE_ADVANCE + field * 3.0 + style.record_spacing,
            ListSection::Laboral => RECORD_GAP + TITLE_ADVANCE + field * 4.0 + RULE_GAP,
            ListSection::Cargos => RECORD_GAP + TITLE_ADVANCE + field * 3.0 + RULE_GAP,
        }
    }

    fn name_line_height(self, style: &ReportStyle) -> Px {
        style.heading_spacing - Px(10.0)
    }

    /// Page layout of the section. Two-column lists start their right column below the
    /// section heading. A full page always ends above the footer.
    pub fn config(self, style: &ReportStyle) -> SectionConfig {
        let (per_page, columns, label_width) = match self {
            ListSection::Familiares => (16, ColumnCount::Double, Px(120.0)),
            ListSection::Laboral => (6, ColumnCount::Single, Px(200.0)),
            ListSection::Telefonos => (12, ColumnCount::Double, Px(120.0)),
            ListSection::Cargos => (7, ColumnCount::Single, Px(200.0)),
        };
        let right_start = match columns {
            ColumnCount::Single => RightColumnStart::Top,
            ColumnCount::Double => RightColumnStart::AfterLeftBlock,
        };
        SectionConfig::new(per_page, columns, label_width, style.line_height)
            .with_right_column_start(right_start)
            .starting_at(style.y_start - Px(20.0))
            .with_record_height(self.record_height(style))
    }

    /// Draw one record of the section at its column's cursor
    pub fn draw_record<C: Canvas, M: TextMeasurer>(
        self,
        ctx: &mut LayoutContext<'_, C, M>,
        slot: RecordSlot<'_, Record>,
    ) -> Result<(), ReportError> {
        let col = slot.column;
        let n = slot.display_index;
        let r = slot.record;
        let style = ctx.style();
        let (heading, label, record_title) = (style.heading, style.label, style.record_title);
        let (name_line, record_spacing) = (self.name_line_height(style), style.record_spacing);
        let or_dash = |key: &str| r.text(key).unwrap_or_else(|| "-".to_string());

        match self {
            ListSection::Familiares => {
                let name = r.text("NOMBRE").unwrap_or_else(|| "N/D".to_string());
                ctx.print_block(col, &heading, &format!("{n}. {name}"), name_line)?;
                ctx.print_field(col, "DNI", r.text("DNI").as_deref())?;
                ctx.print_field(col, "Vínculo", r.text("VINCULO").as_deref())?;
                ctx.print_field(col, "Tipo", r.text("TIPO").as_deref())?;
                ctx.space(col, record_spacing)?;
            }
            ListSection::Telefonos => {
                let number = format!("{n}. TEL: {}", or_dash("TELEFONO"));
                ctx.line(col, &label, &number, PHONE_ADVANCE)?;
                ctx.print_field(col, "Plan", r.text("PLAN").as_deref())?;
                ctx.print_field(col, "Fuente", r.text("FUENTE").as_deref())?;
                ctx.print_field(col, "Periodo", r.text("PERIODO").as_deref())?;
                ctx.space(col, record_spacing)?;
            }
            ListSection::Laboral => {
                ctx.space(col, RECORD_GAP)?;
                let title = format!("{n}. PERIODO: {}", or_dash("PERIODO"));
                ctx.line(col, &record_title, &title, TITLE_ADVANCE)?;
                ctx.print_field(col, "Empresa", r.text("EMPRESA").as_deref())?;
                ctx.print_field(col, "RUC", r.text("RUC").as_deref())?;
                ctx.print_field(col, "Sueldo", r.text("SUELDO").as_deref())?;
                ctx.print_field(col, "Situación", r.text("SITUACION").as_deref())?;
                ctx.space(col, RULE_GAP)?;
                ctx.rule(col)?;
            }
            ListSection::Cargos => {
                ctx.space(col, RECORD_GAP)?;
                let title = format!("{n}. RUC: {}", or_dash("RUC"));
                ctx.line(col, &record_title, &title, TITLE_ADVANCE)?;
                ctx.print_field(col, "Razón Social", r.text("RAZON_SOCIAL").as_deref())?;
                ctx.print_field(col, "Cargo", r.text("CARGO").as_deref())?;
                ctx.print_field(col, "Desde", r.text("DESDE").as_deref())?;
                ctx.space(col, RULE_GAP)?;
                ctx.rule(col)?;
            }
        }
        Ok(())
    }
}
