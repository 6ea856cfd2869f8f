//! Category label cleanup.

/// Fragments removed from `LABEL2`, in order.
const REMOVALS: [&str; 7] = [
    "General ",
    "s Risk",
    " Hail",
    " Tornado",
    " Wind",
    " Fire",
    " Risk",
];

/// Shorten an SPC category label for the legend, e.g.
/// `"Significant Tornado Risk"` becomes `"Significant"`.
pub fn prettify(label: &str) -> String {
    REMOVALS
        .iter()
        .fold(label.to_string(), |acc, fragment| acc.replace(fragment, ""))
}

/// Significant-severity categories are drawn hatched.
pub fn is_significant(label: &str) -> bool {
    label.contains("Significant")
}
