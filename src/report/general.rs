use crate::{
    canvas::Canvas,
    compose::{LayoutContext, ReportStyle, SectionConfig},
    font::TextMeasurer,
    image::RasterImage,
    layout::{ColumnCount, RightColumnStart},
    record::Record,
    units::Px,
    ReportError,
};
use log::warn;

const LEFT: usize = 0;
const RIGHT: usize = 1;

/// Width of the box the photo is scaled to fit
pub const PHOTO_WIDTH: u32 = 360;
/// Height of the box the photo is scaled to fit
pub const PHOTO_HEIGHT: u32 = 480;
/// Room kept for the photo even when it is shorter or missing
const PHOTO_MIN_HEIGHT: Px = Px(360.0);
const PHOTO_GAP: Px = Px(20.0);

pub fn general_title(dni: &str) -> String {
    format!("FICHA 1 - DATOS GENERALES - {dni}")
}

/// The general page has two columns that both start at the top and never wait for
/// each other.
pub fn general_config(style: &ReportStyle) -> SectionConfig {
    SectionConfig::new(1, ColumnCount::Double, Px(240.0), style.line_height)
        .with_right_column_start(RightColumnStart::Top)
}

/// Draw the general data page for the person in `data`: personal data, dates and
/// address on the left; the photo, other data and registered certificates on the
/// right.
///
/// A photo that can't be decoded is skipped.
pub fn draw_general<C: Canvas, M: TextMeasurer>(
    ctx: &mut LayoutContext<'_, C, M>,
    d: &Record,
) -> Result<(), ReportError> {
    let photo_y = ctx.style().y_start - Px(20.0);
    ctx.column_separator()?;

    let mut photo_bottom = photo_y + PHOTO_MIN_HEIGHT;
    if let Some(photo) = d.path(&["imagenes", "foto"]) {
        match RasterImage::from_base64(&photo) {
            Ok(photo) => {
                let photo = photo.resized_to_fit(PHOTO_WIDTH, PHOTO_HEIGHT);
                let bottom = ctx.image_centred(RIGHT, &photo, photo_y)?;
                photo_bottom = photo_bottom.max(bottom);
            }
            Err(e) => warn!("skipping undecodable photo: {e}"),
        }
    }

    ctx.columns_mut()
        .column_mut(RIGHT)?
        .advance_to(photo_bottom + PHOTO_GAP);
    ctx.heading(RIGHT, "Otros Datos")?;
    ctx.print_field(RIGHT, "País", d.text("pais").as_deref())?;
    ctx.print_field(RIGHT, "Grupo Votación", d.text("gpVotacion").as_deref())?;
    ctx.print_field(RIGHT, "Multas Electorales", d.text("multasElectorales").as_deref())?;
    ctx.print_field(RIGHT, "Multa Admin", d.text("multaAdmin").as_deref())?;
    ctx.print_field(RIGHT, "Fecha Actualización", d.text("feActualizacion").as_deref())?;
    ctx.print_field(RIGHT, "Cancelación", d.text("cancelacion").as_deref())?;

    ctx.heading(RIGHT, "Actas Registradas")?;
    for (label, key) in [
        ("Matrimonio", "MATRIMONIO"),
        ("Nacimiento", "NACIMIENTO"),
        ("Defunción", "DEFUNCION"),
    ] {
        let count = d
            .path(&["actasRegistradas", key])
            .unwrap_or_else(|| "0".to_string());
        ctx.print_field(RIGHT, label, Some(count.as_str()))?;
    }

    ctx.heading(LEFT, "Datos Personales")?;
    ctx.print_field(LEFT, "DNI", d.text("nuDni").as_deref())?;
    ctx.print_field(
        LEFT,
        "Apellidos",
        d.join(&["apePaterno", "apeMaterno", "apCasada"], " ").as_deref(),
    )?;
    ctx.print_field(LEFT, "Prenombres", d.text("preNombres").as_deref())?;
    ctx.print_field(LEFT, "Género", d.text("sexo").as_deref())?;
    ctx.print_field(LEFT, "Fecha Nac.", d.text("feNacimiento").as_deref())?;
    let birthplace = ["depaNacimiento", "provNacimiento", "distNacimiento"]
        .iter()
        .map(|key| d.text(key).unwrap_or_else(|| "-".to_string()))
        .collect::<Vec<_>>()
        .join(" / ");
    ctx.print_field(LEFT, "Lugar (Dpto/Prov/Dist)", Some(birthplace.as_str()))?;
    ctx.print_field(LEFT, "Estado Civil", d.text("estadoCivil").as_deref())?;
    ctx.print_field(LEFT, "Grado Instrucción", d.text("gradoInstruccion").as_deref())?;
    let height = d.text("estatura").map(|h| format!("{h} cm"));
    ctx.print_field(LEFT, "Estatura", height.as_deref())?;
    let restriction = d.text("deRestriccion").unwrap_or_else(|| "NINGUNA".to_string());
    ctx.print_field(LEFT, "Restricción", Some(restriction.as_str()))?;

    ctx.heading(LEFT, "Fechas y Familia")?;
    ctx.print_field(LEFT, "Fecha Inscripción", d.text("feInscripcion").as_deref())?;
    ctx.print_field(LEFT, "Fecha Emisión", d.text("feEmision").as_deref())?;
    ctx.print_field(LEFT, "Fecha Caducidad", d.text("feCaducidad").as_deref())?;
    ctx.print_field(LEFT, "Fecha Fallecimiento", d.text("feFallecimiento").as_deref())?;
    ctx.print_field(LEFT, "Padre", d.text("nomPadre").as_deref())?;
    ctx.print_field(LEFT, "Madre", d.text("nomMadre").as_deref())?;

    ctx.heading(LEFT, "Dirección / Ubicación")?;
    ctx.print_field(LEFT, "Dirección", d.text("desDireccion").as_deref())?;
    ctx.print_field(LEFT, "Departamento (Dir)", d.text("depaDireccion").as_deref())?;
    ctx.print_field(LEFT, "Provincia (Dir)", d.text("provDireccion").as_deref())?;
    ctx.print_field(LEFT, "Distrito (Dir)", d.text("distDireccion").as_deref())?;
    ctx.print_field(LEFT, "Ubigeo RENIEC", d.path(&["ubicacion", "ubigeo_reniec"]).as_deref())?;
    ctx.print_field(LEFT, "Ubigeo INEI", d.path(&["ubicacion", "ubigeo_inei"]).as_deref())?;
    ctx.print_field(LEFT, "Ubigeo SUNAT", d.path(&["ubicacion", "ubigeo_sunat"]).as_deref())?;
    ctx.print_field(LEFT, "Código Postal", d.path(&["ubicacion", "codigo_postal"]).as_deref())?;

    Ok(())
}
