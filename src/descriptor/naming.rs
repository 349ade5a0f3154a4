//! Accessor naming: derive `getTitle`/`setTitle`, `addCard`/`insertCardAt`, ...

/// Uppercase the first character of `name`.
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Singular form of a regular plural: the name minus its last character.
pub fn singular(plural: &str) -> &str {
    match plural.char_indices().last() {
        Some((idx, _)) => &plural[..idx],
        None => plural,
    }
}

/// Generated accessor names for one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAccessors {
    pub getter: String,
    pub setter: String,
}

impl PropertyAccessors {
    pub fn for_property(name: &str) -> Self {
        let cap = capitalize_first(name);
        Self {
            getter: format!("get{cap}"),
            setter: format!("set{cap}"),
        }
    }
}

/// Generated accessor names for one aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationAccessors {
    pub getter: String,
    pub setter: String,
    pub add: String,
    pub remove: String,
    pub insert_at: String,
    pub remove_at: String,
}

impl AggregationAccessors {
    pub fn for_aggregation(plural: &str) -> Self {
        let cap = capitalize_first(plural);
        let one = capitalize_first(singular(plural));
        Self {
            getter: format!("get{cap}"),
            setter: format!("set{cap}"),
            add: format!("add{one}"),
            remove: format!("remove{one}"),
            insert_at: format!("insert{one}At"),
            remove_at: format!("remove{one}At"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize() {
        assert_eq!(capitalize_first("title"), "Title");
        assert_eq!(capitalize_first("Title"), "Title");
        assert_eq!(capitalize_first("x"), "X");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn singular_drops_last_char() {
        assert_eq!(singular("cards"), "card");
        assert_eq!(singular("s"), "");
        assert_eq!(singular(""), "");
    }

    #[test]
    fn property_names() {
        let names = PropertyAccessors::for_property("loading");
        assert_eq!(names.getter, "getLoading");
        assert_eq!(names.setter, "setLoading");
    }

    #[test]
    fn aggregation_names() {
        let names = AggregationAccessors::for_aggregation("cards");
        assert_eq!(names.getter, "getCards");
        assert_eq!(names.setter, "setCards");
        assert_eq!(names.add, "addCard");
        assert_eq!(names.remove, "removeCard");
        assert_eq!(names.insert_at, "insertCardAt");
        assert_eq!(names.remove_at, "removeCardAt");
    }
}
