use crate::types::identifiers::Category;

pub const DEFAULT_DELIMITER: char = '_';

/// Derive a category from a file name: everything before the first delimiter.
///
/// Names without a delimiter fall back to the stem. A leading delimiter
/// yields the empty category.
pub fn category_from_file_name(file_name: &str, delimiter: char) -> Category {
    match file_name.split_once(delimiter) {
        Some((prefix, _)) => Category::new(prefix),
        None => Category::new(file_stem(file_name)),
    }
}

fn file_stem(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}
