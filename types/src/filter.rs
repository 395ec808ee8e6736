//! Filtering shared by the management tables.
//!
//! A screen owns a filter value (search text plus categorical selections).
//! [`RecordFilter::matches`] composes those into a single predicate and
//! [`derive_view`] applies it to the source records, keeping their order.

use std::fmt;

/// A closed enumeration that can be used as a categorical filter.
pub trait Categorical: Copy + PartialEq + 'static {
    /// Every variant, in the order they should be offered.
    const VARIANTS: &'static [Self];

    /// The label shown to users and used as the option value.
    fn label(self) -> &'static str;

    fn from_label(label: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.label() == label)
    }
}

/// Selection of a categorical filter. `All` places no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: Categorical> Choice<T> {
    pub const ALL_LABEL: &'static str = "ALL";

    pub fn admits(&self, value: T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == value,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => Self::ALL_LABEL,
            Self::Only(value) => value.label(),
        }
    }

    /// Parse an option value back into a selection.
    ///
    /// Only `"ALL"` or a known variant label is accepted.
    pub fn parse(label: &str) -> Option<Self> {
        if label == Self::ALL_LABEL {
            Some(Self::All)
        } else {
            T::from_label(label).map(Self::Only)
        }
    }

    /// `All` followed by every variant.
    pub fn options() -> impl Iterator<Item = Self> {
        std::iter::once(Self::All).chain(T::VARIANTS.iter().copied().map(Self::Only))
    }
}

impl<T: Categorical> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An entity shown in a filterable table.
pub trait Record {
    type Id: PartialEq + ?Sized;

    fn id(&self) -> &Self::Id;

    /// Text attributes matched against the search query.
    fn search_fields(&self) -> impl Iterator<Item = &str>;
}

/// Filter state for records of type `R`.
pub trait RecordFilter<R: Record> {
    /// The free-text query. Empty means no constraint.
    fn query(&self) -> &str;

    /// Whether every categorical selection admits the record.
    fn admits(&self, record: &R) -> bool;

    fn matches(&self, record: &R) -> bool {
        self.admits(record) && matches_query(record, self.query())
    }
}

/// Case-insensitive substring match against any of the record's search fields.
pub fn matches_query<R: Record>(record: &R, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    record
        .search_fields()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// The records satisfying `filter`, in source order.
pub fn derive_view<'a, R, F>(records: &'a [R], filter: &F) -> Vec<&'a R>
where
    R: Record,
    F: RecordFilter<R>,
{
    records.iter().filter(|r| filter.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Colour {
        Red,
        Blue,
    }

    impl Categorical for Colour {
        const VARIANTS: &'static [Self] = &[Self::Red, Self::Blue];

        fn label(self) -> &'static str {
            match self {
                Self::Red => "Red",
                Self::Blue => "Blue",
            }
        }
    }

    #[derive(Debug, PartialEq)]
    struct Item {
        id: u32,
        colour: Colour,
        title: &'static str,
        note: &'static str,
    }

    impl Record for Item {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn search_fields(&self) -> impl Iterator<Item = &str> {
            [self.title, self.note].into_iter()
        }
    }

    #[derive(Default)]
    struct ItemFilter {
        query: String,
        colour: Choice<Colour>,
    }

    impl RecordFilter<Item> for ItemFilter {
        fn query(&self) -> &str {
            &self.query
        }

        fn admits(&self, record: &Item) -> bool {
            self.colour.admits(record.colour)
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: 1, colour: Colour::Red, title: "Sadia Islam", note: "north" },
            Item { id: 2, colour: Colour::Blue, title: "Karim Ahmed", note: "south" },
            Item { id: 3, colour: Colour::Red, title: "Nusrat Jahan", note: "Sadar road" },
        ]
    }

    #[rstest]
    #[case("ALL", Some(Choice::All))]
    #[case("Red", Some(Choice::Only(Colour::Red)))]
    #[case("Blue", Some(Choice::Only(Colour::Blue)))]
    #[case("red", None)]
    #[case("", None)]
    fn parses_option_labels(#[case] label: &str, #[case] expected: Option<Choice<Colour>>) {
        assert_eq!(Choice::<Colour>::parse(label), expected);
    }

    #[test]
    fn options_start_with_all() {
        let labels: Vec<_> = Choice::<Colour>::options().map(|c| c.label()).collect();
        assert_eq!(labels, ["ALL", "Red", "Blue"]);
    }

    #[test]
    fn default_filter_keeps_everything_in_order() {
        let items = items();
        let view = derive_view(&items, &ItemFilter::default());
        let ids: Vec<_> = view.iter().map(|i| *i.id()).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn categorical_filter_has_no_false_positives_or_negatives() {
        let items = items();
        let filter = ItemFilter {
            colour: Choice::Only(Colour::Red),
            ..Default::default()
        };
        let view = derive_view(&items, &filter);

        assert!(view.iter().all(|i| i.colour == Colour::Red));
        let expected: Vec<_> = items.iter().filter(|i| i.colour == Colour::Red).collect();
        assert_eq!(view, expected);
    }

    #[rstest]
    #[case("sad", &[1, 3])]
    #[case("SADIA", &[1])]
    #[case("south", &[2])]
    #[case("ahmed", &[2])]
    #[case("nobody", &[])]
    fn query_is_case_insensitive_substring(#[case] query: &str, #[case] expected: &[u32]) {
        let items = items();
        let filter = ItemFilter {
            query: query.to_string(),
            ..Default::default()
        };
        let ids: Vec<_> = derive_view(&items, &filter).iter().map(|i| i.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn view_membership_matches_predicate() {
        let items = items();
        let filter = ItemFilter {
            query: "a".to_string(),
            colour: Choice::Only(Colour::Red),
        };
        let view = derive_view(&items, &filter);
        for item in &items {
            assert_eq!(view.contains(&item), filter.matches(item));
        }
    }
}
