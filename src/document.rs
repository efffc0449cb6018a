use crate::{
    canvas::PngData,
    info::Info,
    page::FinishedPage,
    pagesize::{PageSize, A4},
    refs::{ObjectReferences, RefType},
    ReportError,
};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect as PdfRect, Ref};
use std::io::Write;

/// A finished page, decoded and compressed for embedding
#[derive(Debug, Clone)]
struct EmbeddedPage {
    width: u32,
    height: u32,
    /// zlib-compressed 8 bit RGB samples
    data: Vec<u8>,
}

/// Assembles finished raster pages into a PDF, one image per PDF page. Each raster is
/// stretched over the whole paper size, so pages should share the paper's aspect ratio
/// to avoid distortion.
#[derive(Debug)]
pub struct Document {
    pub info: Option<Info>,
    pub page_size: PageSize,
    pages: Vec<EmbeddedPage>,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            info: None,
            page_size: A4,
            pages: Vec::new(),
        }
    }
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Document {
        self.page_size = page_size;
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append a finished page, returning its 0-based index in the document
    pub fn add_page(&mut self, page: &FinishedPage<PngData>) -> Result<usize, ReportError> {
        self.add_png(&page.output().0)
    }

    /// Append an encoded PNG as the next page, returning its 0-based index
    pub fn add_png(&mut self, png: &[u8]) -> Result<usize, ReportError> {
        let image = image::load_from_memory(png)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(ReportError::Pdf("page image has no pixels".to_string()));
        }
        let level = CompressionLevel::DefaultLevel as u8;
        let data = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);
        self.pages.push(EmbeddedPage {
            width: image.width(),
            height: image.height(),
            data,
        });
        Ok(self.pages.len() - 1)
    }

    /// Write the entire document to `w`. The document is built in memory first, so the
    /// compressed rasters of every page are held until the write completes.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), ReportError> {
        let Document {
            info,
            page_size,
            pages,
        } = self;

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.alloc(RefType::Catalog);
        let page_tree_id = refs.alloc(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.alloc(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        let (width, height) = (page_size.0 .0, page_size.1 .0);
        for (i, page) in pages.iter().enumerate() {
            let image_id = refs.alloc(RefType::Image(i));
            let content_id = refs.alloc(RefType::ContentForPage(i));

            let mut image = writer.image_xobject(image_id, &page.data);
            image.filter(Filter::FlateDecode);
            image.width(page.width as i32);
            image.height(page.height as i32);
            image.color_space().device_rgb();
            image.bits_per_component(8);
            image.finish();

            let mut pdf_page = writer.page(page_refs[i]);
            pdf_page.media_box(PdfRect::new(0.0, 0.0, width, height));
            pdf_page.parent(page_tree_id);
            pdf_page.contents(content_id);
            pdf_page
                .resources()
                .x_objects()
                .pair(Name(b"Im0"), image_id);
            pdf_page.finish();

            let mut content = Content::new();
            content.save_state();
            content.transform([width, 0.0, 0.0, height, 0.0, 0.0]);
            content.x_object(Name(b"Im0"));
            content.restore_state();
            writer.stream(content_id, &content.finish());
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}
