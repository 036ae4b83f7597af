use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

/// Flowing A4-landscape writer: text blocks and bordered tables are laid out
/// top to bottom, a new page starts whenever the next item does not fit.
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,

    content: Content,
    current_content_id: Option<Ref>,
    y: f32,

    page_w: f32,
    page_h: f32,
    margin: f32,
    line_h: f32,
    cell_pad: f32,

    next_id: i32,
    font_id: Ref,
    bold_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

const FONT: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        // hand-managed object ids
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_id = Ref::new(4);
        let next_id = 5;

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_id).base_font(Name(b"Helvetica-Bold"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),

            content: Content::new(),
            current_content_id: None,
            y: 0.0,

            page_w: 842.0,
            page_h: 595.0,
            margin: 40.0,
            line_h: 11.0,
            cell_pad: 4.0,

            next_id,
            font_id,
            bold_id,

            font_size: 9.0,
            header_font_size: 10.0,
            title_font_size: 16.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Close the current page (if any) and open a fresh one.
    fn new_page(&mut self) {
        self.finalize_page();

        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(FONT, self.font_id);
            fonts.pair(FONT_BOLD, self.bold_id);
        }
        drop(page);

        self.current_content_id = Some(content_id);
        self.content = Content::new();
        self.y = self.page_h - self.margin;

        let label = format!("Page {}", self.page_refs.len());
        draw_text(
            &mut self.content,
            FONT,
            self.page_w - self.margin - 50.0,
            self.margin - 25.0,
            self.font_size,
            &label,
        );
    }

    /// Write the current page's content stream.
    fn finalize_page(&mut self) {
        if let Some(id) = self.current_content_id.take() {
            let content = std::mem::replace(&mut self.content, Content::new());
            self.pdf.stream(id, &content.finish());
        }
    }

    /// Make sure `h` points of vertical space are left, breaking the page if not.
    fn reserve(&mut self, h: f32) {
        if self.current_content_id.is_none() || self.y - h < self.margin {
            self.new_page();
        }
    }

    fn usable_width(&self) -> f32 {
        self.page_w - 2.0 * self.margin
    }

    pub fn write_title(&mut self, text: &str) {
        let h = self.title_font_size + 8.0;
        self.reserve(h);
        self.y -= self.title_font_size;
        draw_text(
            &mut self.content,
            FONT_BOLD,
            self.margin,
            self.y,
            self.title_font_size,
            text,
        );
        self.y -= 8.0;
    }

    pub fn write_line(&mut self, text: &str) {
        for line in wrap(text, chars_for(self.usable_width(), self.font_size)) {
            self.reserve(self.line_h + 2.0);
            self.y -= self.line_h;
            draw_text(
                &mut self.content,
                FONT,
                self.margin,
                self.y,
                self.font_size,
                &line,
            );
        }
        self.y -= 2.0;
    }

    pub fn gap(&mut self, h: f32) {
        self.y -= h;
    }

    fn col_widths(&self, n_cols: usize) -> Vec<f32> {
        if n_cols == 0 {
            return Vec::new();
        }
        let total = self.usable_width();
        if n_cols == 1 {
            return vec![total];
        }
        // row label column is wider than the day columns
        let label_w = total * 0.16;
        let other = (total - label_w) / (n_cols - 1) as f32;
        let mut widths = vec![label_w];
        widths.extend(std::iter::repeat_n(other, n_cols - 1));
        widths
    }

    fn row_height(&self, cells: &[Vec<String>]) -> f32 {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        lines as f32 * self.line_h + 2.0 * self.cell_pad
    }

    fn draw_row(
        &mut self,
        widths: &[f32],
        cells: &[Vec<String>],
        h: f32,
        bold: bool,
        fill: Option<f32>,
    ) {
        let total: f32 = widths.iter().sum();
        let top = self.y;
        let bottom = top - h;

        if let Some(shade) = fill {
            self.content.save_state();
            self.content.set_fill_rgb(shade, shade, shade + 0.03);
            self.content.rect(self.margin, bottom, total, h);
            self.content.fill_nonzero();
            self.content.restore_state();
        }

        let (font, size) = if bold {
            (FONT_BOLD, self.header_font_size)
        } else {
            (FONT, self.font_size)
        };

        let mut x = self.margin;
        for (i, w) in widths.iter().enumerate() {
            let lines = cells.get(i).map(Vec::as_slice).unwrap_or(&[]);
            let mut ty = top - self.cell_pad - size;
            for line in lines {
                draw_text(&mut self.content, font, x + self.cell_pad, ty, size, line);
                ty -= self.line_h;
            }
            draw_cell_borders(&mut self.content, x, bottom, *w, h);
            x += w;
        }

        self.y = bottom;
    }

    /// Bordered table with the header repeated on every page it spans.
    pub fn write_table(&mut self, headers: &[String], rows: &[Vec<String>]) {
        let widths = self.col_widths(headers.len());
        let wrap_cells = |row: &[String], size: f32| -> Vec<Vec<String>> {
            row.iter()
                .zip(&widths)
                .map(|(text, w)| wrap(text, chars_for(w - 2.0 * self.cell_pad, size)))
                .collect()
        };

        let header_cells = wrap_cells(headers, self.header_font_size);
        let body: Vec<Vec<Vec<String>>> = rows
            .iter()
            .map(|r| wrap_cells(r, self.font_size))
            .collect();

        let header_h = self.row_height(&header_cells);
        let first_h = self.row_height(body.first().map(Vec::as_slice).unwrap_or(&[]));
        self.reserve(header_h + first_h);
        self.draw_row(&widths, &header_cells, header_h, true, Some(0.85));

        for (i, cells) in body.iter().enumerate() {
            let h = self.row_height(cells);
            if self.y - h < self.margin {
                self.new_page();
                self.draw_row(&widths, &header_cells, header_h, true, Some(0.85));
            }
            // zebra stripe
            let fill = if i % 2 == 0 { Some(0.96) } else { None };
            self.draw_row(&widths, cells, h, false, fill);
        }

        self.y -= 6.0;
    }

    /// Set up Catalog + Pages once and return the document bytes.
    pub fn finish(mut self) -> Vec<u8> {
        if self.page_refs.is_empty() {
            self.new_page();
        }
        self.finalize_page();

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let count = self.page_refs.len() as i32;
        self.pdf
            .pages(self.pages_id)
            .count(count)
            .kids(self.page_refs.iter().copied());

        self.pdf.finish()
    }
}

fn draw_text(content: &mut Content, font: Name, x: f32, y: f32, size: f32, text: &str) {
    let bytes = to_win_ansi(text);
    content.begin_text();
    content.set_font(font, size);
    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
    content.show(Str(&bytes));
    content.end_text();
}

fn draw_cell_borders(content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
    content.save_state();
    content.set_stroke_rgb(0.65, 0.65, 0.65);
    content.rect(x, y, w, h);
    content.stroke();
    content.restore_state();
}

/// Rough Helvetica capacity of a box `w` points wide.
fn chars_for(w: f32, size: f32) -> usize {
    ((w / (size * 0.52)).floor() as usize).max(1)
}

/// Wraps on whitespace, keeping explicit line breaks.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for para in text.lines() {
        if para.trim().is_empty() {
            out.push(String::new());
            continue;
        }
        out.extend(textwrap::wrap(para, width).into_iter().map(|c| c.into_owned()));
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

/// Standard Type1 fonts only cover Latin-1; anything else prints as '?'.
fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let cp = c as u32;
            if cp < 0x100 && !(0x80..0xA0).contains(&cp) {
                cp as u8
            } else {
                b'?'
            }
        })
        .collect()
}
