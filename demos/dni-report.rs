use ficha_gen::report::Report;
use ficha_gen::{Document, FontBook, Info, PageComposer, RasterProvider, Record, ReportStyle};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!("usage: dni-report <regular.ttf> <bold.ttf> <response.json> [out.pdf]");
        std::process::exit(1);
    }

    // load the faces used for labels (bold) and everything else (regular)
    let mut fonts = FontBook::new();
    let regular = fonts
        .load_font(std::fs::read(&args[0]).expect("can read regular font"))
        .expect("can parse regular font");
    let bold = fonts
        .load_font(std::fs::read(&args[1]).expect("can read bold font"))
        .expect("can parse bold font");

    // the lookup response, as returned by the API: {"result": {...}}
    let body = std::fs::read(&args[2]).expect("can read response");
    let data = Record::from_response(&body)
        .expect("response is valid json")
        .expect("response has a result");
    let dni = data.text("nuDni").unwrap_or_else(|| "SIN-DNI".to_string());

    let composer = PageComposer::new(
        RasterProvider::new(&fonts),
        &fonts,
        ReportStyle::new(regular, bold),
    );
    let report = Report::new(&composer, &dni, &data);

    let mut doc = Document::new();
    doc.set_info(Info::for_report(&dni));

    // pages are rendered one at a time and embedded as soon as they're done
    for page in report.pages() {
        let page = page.expect("can compose page");
        println!("{:>3}. {}", page.number, page.description);
        doc.add_page(&page.page).expect("can embed page");
    }

    let path = args
        .get(3)
        .cloned()
        .unwrap_or_else(|| format!("ficha-{dni}.pdf"));
    let mut out = std::fs::File::create(&path).unwrap();
    doc.write(&mut out).unwrap();

    println!("\n{}", report.summary());
}
