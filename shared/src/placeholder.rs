use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::markup::escape_html;

pub const PLACEHOLDER_WIDTH: u32 = 800;
pub const PLACEHOLDER_HEIGHT: u32 = 1100;

pub fn placeholder_svg(year: &str, page: u32) -> String {
    let year = escape_html(year);
    let cx = PLACEHOLDER_WIDTH / 2;
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\
<rect width=\"100%\" height=\"100%\" fill=\"#f4f5f7\" />\
<rect x=\"40\" y=\"40\" width=\"{iw}\" height=\"{ih}\" fill=\"none\" stroke=\"#c3c7cf\" stroke-width=\"4\" stroke-dasharray=\"16 12\" />\
<text x=\"{cx}\" y=\"480\" font-family=\"sans-serif\" font-size=\"72\" font-weight=\"700\" fill=\"#4a4e69\" text-anchor=\"middle\">Page {page}</text>\
<text x=\"{cx}\" y=\"560\" font-family=\"sans-serif\" font-size=\"40\" fill=\"#6c757d\" text-anchor=\"middle\">Project {year}</text>\
<text x=\"{cx}\" y=\"640\" font-family=\"sans-serif\" font-size=\"28\" fill=\"#9a9fa6\" text-anchor=\"middle\">Image unavailable</text>\
</svg>",
        w = PLACEHOLDER_WIDTH,
        h = PLACEHOLDER_HEIGHT,
        iw = PLACEHOLDER_WIDTH - 80,
        ih = PLACEHOLDER_HEIGHT - 80,
    )
}

pub fn placeholder_data_url(year: &str, page: u32) -> String {
    let encoded = STANDARD.encode(placeholder_svg(year, page));
    format!("data:image/svg+xml;base64,{encoded}")
}
