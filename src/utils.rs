use crate::category::Category;

/// Collapse runs of whitespace (including newlines inside markup) into single spaces
pub fn normalize_text<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Default file name for a scraped result set
pub fn export_file_name(category: Category, pages: u32) -> String {
    format!("coinafrique_bs4_{}_pages_{}.csv", category.key(), pages)
}
