use crate::catalog::CatalogEntry;
use crate::resolver::expected_path;

pub const PROTECTED_IMAGE_CLASS: &str = "protected-image";
pub const YEAR_CARD_CLASS: &str = "year-card";
pub const VIEW_BUTTON_CLASS: &str = "btn-view";
pub const TOAST_CLASS: &str = "protection-toast";
pub const LOADED_CLASS: &str = "loaded";

pub const PROTECTION_STYLE_ID: &str = "folioProtectionStyle";

pub const PROTECTION_CSS: &str = r#"
.protected-image {
    pointer-events: none !important;
    user-select: none !important;
    -webkit-user-select: none !important;
    -moz-user-select: none !important;
    -ms-user-select: none !important;
    -webkit-user-drag: none !important;
}
.image-viewer-modal {
    user-select: none !important;
}
@media (max-width: 768px) {
    .image-container {
        touch-action: none !important;
    }
}
@media print {
    body * {
        display: none !important;
    }
    body:before {
        content: "Printing is not allowed for protected content.";
        display: block !important;
        font-size: 24px;
        color: red;
        text-align: center;
        margin-top: 100px;
    }
}
@keyframes slideInDown {
    from { transform: translate(-50%, -100%); opacity: 0; }
    to { transform: translate(-50%, 0); opacity: 1; }
}
@keyframes slideIn {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}
"#;

pub const NOTICE_TOAST_STYLE: &str = "position:fixed;top:20px;right:20px;background:var(--accent);color:white;padding:12px 20px;border-radius:8px;box-shadow:var(--shadow-md);z-index:10000;display:flex;align-items:center;gap:10px;animation:slideIn 0.3s ease;font-size:14px;font-weight:500;";

pub const ERROR_TOAST_STYLE: &str = "position:fixed;top:20px;left:50%;transform:translateX(-50%);background:#f72585;color:white;padding:15px 25px;border-radius:8px;z-index:10000;box-shadow:0 4px 15px rgba(0,0,0,0.3);font-weight:500;display:flex;align-items:center;gap:10px;animation:slideInDown 0.3s ease;";

pub const ACCESS_WARNING: &str = "Warning: Images may not load. Check console for details.";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn year_card_html(entry: &CatalogEntry) -> String {
    let year = escape_html(entry.year);
    format!(
        "<div class=\"year-card-header\"><h2>{year}</h2><p>Accountancy Project</p></div>\
<div class=\"year-card-content\"><div class=\"stats\">\
<div class=\"stat\"><i class=\"fas fa-file-alt\"></i><span class=\"stat-value\">{pages}</span><span class=\"stat-label\">Pages</span></div>\
<div class=\"stat\"><i class=\"fas fa-lock\"></i><span class=\"stat-value\">Protected</span><span class=\"stat-label\">View Only</span></div>\
</div><div class=\"year-note\"><i class=\"fas fa-info-circle\"></i> Click to view project</div></div>\
<div class=\"year-card-footer\"><button class=\"btn-view\" data-year=\"{year}\"><i class=\"fas fa-external-link-alt\"></i> Open Project</button></div>",
        pages = entry.page_count,
    )
}

pub fn toast_html(icon: &str, message: &str) -> String {
    format!(
        "<i class=\"fas {}\"></i><span>{}</span>",
        escape_html(icon),
        escape_html(message)
    )
}

pub fn not_found_html(year: &str, page: u32) -> String {
    format!(
        "Image not found for page {page}.<br>Expected: {}",
        escape_html(&expected_path(year, page))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn year_card_carries_year_and_page_count() {
        let entry = Catalog::builtin().get("2019").unwrap();
        let html = year_card_html(entry);
        assert!(html.contains("<h2>2019</h2>"));
        assert!(html.contains("<span class=\"stat-value\">10</span>"));
        assert!(html.contains("data-year=\"2019\""));
    }

    #[test]
    fn not_found_message_names_expected_file() {
        assert_eq!(
            not_found_html("2023", 2),
            "Image not found for page 2.<br>Expected: pdf/2023/page-2.jpg"
        );
    }
}
