use std::collections::BTreeSet;

pub const TAG_SEPARATOR: &str = ", ";

/// Label used in tag totals for spending that matched no keyword.
pub const UNTAGGED: &str = "Untagged";

/// The canonical tag string stored on a transaction: sorted ascending,
/// deduplicated and joined with `", "`. No tags gives the empty string.
pub fn canonical<I, T>(tags: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let sorted: BTreeSet<String> = tags
        .into_iter()
        .map(|t| t.as_ref().to_string())
        .collect();
    sorted.into_iter().collect::<Vec<_>>().join(TAG_SEPARATOR)
}

/// Split a stored tag string back into its tags. Tolerates stray whitespace
/// and empty segments so hand-edited values still split cleanly.
pub fn split(tags: &str) -> Vec<&str> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_sorts_and_dedups() {
        assert_eq!(canonical(["Travel", "Food", "Travel"]), "Food, Travel");
    }

    #[test]
    fn test_canonical_empty() {
        assert_eq!(canonical(Vec::<String>::new()), "");
    }

    #[test]
    fn test_split_trims_and_drops_empties() {
        assert_eq!(split(" A ,, B,"), vec!["A", "B"]);
        assert!(split("").is_empty());
        assert!(split(" , ").is_empty());
    }

    #[test]
    fn test_split_then_resort_reproduces_set() {
        let tags = ["Shopping", "Bills", "Groceries"];
        let stored = canonical(tags);
        assert_eq!(stored, "Bills, Groceries, Shopping");
        let mut back: Vec<&str> = stored.split(TAG_SEPARATOR).collect();
        back.sort();
        let mut expected = tags.to_vec();
        expected.sort();
        assert_eq!(back, expected);
    }
}
