use base64::Engine;
use ficha_gen::report::{ListSection, Report, PHOTO_HEIGHT};
use ficha_gen::{
    colours, Canvas, CanvasProvider, Document, DrawOp, FixedMetrics, FontBook, Info,
    PageComposer, Px, RasterProvider, Record, RecordingProvider, Rect, ReportStyle,
};
use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use serde_json::json;
use std::io::Cursor;

fn composer() -> PageComposer<RecordingProvider, FixedMetrics> {
    let font = FontBook::new().fonts.next_id();
    PageComposer::new(
        RecordingProvider,
        FixedMetrics::default(),
        ReportStyle::new(font, font),
    )
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([120, 90, 60, 255]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut out, ImageOutputFormat::Png)
        .expect("can encode png");
    out.into_inner()
}

fn response() -> Vec<u8> {
    let family: Vec<_> = (1..=20)
        .map(|i| {
            json!({
                "NOMBRE": format!("FAMILIAR {i}"),
                "DNI": format!("{i:08}"),
                "VINCULO": "HERMANO"
            })
        })
        .collect();
    let jobs: Vec<_> = (1..=10)
        .map(|i| {
            json!({ "PERIODO": format!("2020-{i:02}"), "EMPRESA": "ACME SAC", "SUELDO": 1500 })
        })
        .collect();
    let phones: Vec<_> = (1..=13)
        .map(|i| json!({ "TELEFONO": format!("9{i:08}"), "PLAN": "PREPAGO" }))
        .collect();
    let body = json!({
        "result": {
            "nuDni": "12345678",
            "apePaterno": "QUISPE",
            "apeMaterno": "MAMANI",
            "preNombres": "ROSA ELENA",
            "imagenes": {
                "foto": base64::engine::general_purpose::STANDARD.encode(png(4, 6))
            },
            "familiares": family,
            "infoLaboral": jobs,
            "telefonos": phones,
            "cargos": []
        }
    });
    serde_json::to_vec(&body).unwrap()
}

#[test]
fn full_report_page_sequence() {
    let body = response();
    let data = Record::from_response(&body).unwrap().unwrap();
    let composer = composer();
    let report = Report::new(&composer, "12345678", &data);

    let sections: Vec<(ListSection, usize)> = report
        .sections()
        .iter()
        .map(|(section, records)| (*section, records.len()))
        .collect();
    assert_eq!(
        sections,
        vec![
            (ListSection::Familiares, 20),
            (ListSection::Laboral, 10),
            (ListSection::Telefonos, 13),
        ]
    );
    assert_eq!(report.page_count().unwrap(), 7);

    let pages: Vec<_> = report.pages().collect::<Result<_, _>>().unwrap();
    let titles: Vec<&str> = pages.iter().map(|p| p.page.title()).collect();
    assert_eq!(
        titles,
        vec![
            "FICHA 1 - DATOS GENERALES - 12345678",
            "FICHA 2 - FAMILIARES - Pág 1/2 - 12345678",
            "FICHA 3 - FAMILIARES - Pág 2/2 - 12345678",
            "FICHA 4 - HISTORIAL LABORAL - Pág 1/2 - 12345678",
            "FICHA 5 - HISTORIAL LABORAL - Pág 2/2 - 12345678",
            "FICHA 6 - TELÉFONOS - Pág 1/2 - 12345678",
            "FICHA 7 - TELÉFONOS - Pág 2/2 - 12345678",
        ]
    );
    let numbers: Vec<usize> = pages.iter().map(|p| p.number).collect();
    assert_eq!(numbers, (1..=7).collect::<Vec<_>>());
    assert_eq!(pages[4].description, "Historial Laboral - Parte 2");

    // numbering continues across pages of a section
    let family_2 = pages[2].page.output();
    assert_eq!(family_2.position_of("17. FAMILIAR 17"), Some((Px(48.0), Px(318.0))));
    assert_eq!(
        family_2.position_of("Familiares y Vínculos (20 registros)"),
        Some((Px(48.0), Px(260.0)))
    );
    // six jobs per page, each 232px tall
    let jobs_2 = pages[4].page.output();
    assert_eq!(jobs_2.position_of("7. PERIODO: 2020-07"), Some((Px(48.0), Px(328.0))));
    assert_eq!(
        jobs_2.position_of("10. PERIODO: 2020-10"),
        Some((Px(48.0), Px(328.0 + 3.0 * 232.0)))
    );
    assert!(jobs_2.texts().any(|t| t == "1500"));

    // 13 phones at 12 per page: the last page only has the left column
    let phones_2 = pages[6].page.output();
    assert_eq!(phones_2.position_of("13. TEL: 900000013"), Some((Px(48.0), Px(318.0))));
}

#[test]
fn photo_is_centred_over_the_right_column() {
    let body = response();
    let data = Record::from_response(&body).unwrap().unwrap();
    let composer = composer();
    let report = Report::new(&composer, "12345678", &data);

    let general = report.pages().next().unwrap().unwrap();
    let images: Vec<_> = general
        .page
        .output()
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Image { x, y, width, height, .. } => Some((*x, *y, *width, *height)),
            _ => None,
        })
        .collect();
    // a 4x6 photo fills the height of its 360x480 box
    assert_eq!(images, vec![(Px(638.0), Px(260.0), 320, PHOTO_HEIGHT)]);
    let (_, other_data) = general.page.output().position_of("Otros Datos").unwrap();
    assert!(other_data >= Px(260.0) + Px::from(PHOTO_HEIGHT));

    let texts: Vec<&str> = general.page.output().texts().collect();
    assert!(texts.contains(&"QUISPE MAMANI"));
    assert!(texts.contains(&"ROSA ELENA"));
}

#[test]
fn empty_lookups_have_no_result() {
    assert_eq!(Record::from_response(br#"{"result": null}"#).unwrap(), None);
    assert!(Record::from_response(b"not json").is_err());
}

#[test]
fn summary_follows_the_data() {
    let body = response();
    let data = Record::from_response(&body).unwrap().unwrap();
    let composer = composer();
    let summary = Report::new(&composer, "12345678", &data).summary();
    assert!(summary.starts_with("DNI : 12345678\nAPELLIDOS : QUISPE MAMANI\nNOMBRES : ROSA ELENA"));
    assert!(summary.contains("--- FAMILIARES (20) ---"));
    assert!(summary.contains("--- TELEFONOS (13) ---"));
    assert!(!summary.contains("CARGOS"));
}

#[test]
fn raster_pages_embed_in_a_pdf() {
    let fonts = FontBook::new();
    let provider = RasterProvider::new(&fonts);
    let mut canvas = provider
        .create_canvas(Px(108.0), Px(192.0), colours::DEEP_TEAL)
        .unwrap();
    canvas
        .draw_rect(Rect::from_xywh(Px(54.0), Px(22.0), Px(2.0), Px(160.0)), colours::WHITE)
        .unwrap();
    let png = canvas.finish().unwrap();

    let mut doc = Document::new();
    doc.set_info(Info::for_report("12345678"));
    doc.add_png(&png.0).unwrap();
    doc.add_png(&png.0).unwrap();

    let mut out = Vec::new();
    doc.write(&mut out).unwrap();
    assert!(out.starts_with(b"%PDF-"));
    assert!(out.windows(8).any(|w| w == b"/Count 2"));
}
