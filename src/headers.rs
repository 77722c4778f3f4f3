//! Ordered header storage and name canonicalisation.
//!
//! [`HeaderMap`] keeps header names in insertion order with their values in
//! the order they were added. Lookups ignore ASCII case while the stored name
//! keeps the spelling it was first inserted with.

/// Ordered, case-insensitive multimap of header names to values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, Vec<String>)>,
}

impl HeaderMap {
    /// Create an empty header map.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }

    /// Replace every value stored under `name` with `value`.
    ///
    /// An existing header keeps its position and original spelling.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx].1 = vec![value],
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Append `value` to the values stored under `name`.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx].1.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Values stored under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|idx| self.entries[idx].1.as_slice())
    }

    /// Returns true if a header called `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool { self.position(name).is_some() }

    /// Remove `name` and return its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    /// Number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Returns true if no headers are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Iterate over names and their values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderMap
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.append(name, value);
        }
        map
    }
}

/// Normalise a header name to Train-Case.
///
/// Each hyphen-delimited segment is lowercased and its first character
/// uppercased, so `content-TYPE` becomes `Content-Type`.
///
/// ```
/// use emitframe::headers::canonicalize;
///
/// assert_eq!(canonicalize("x-request-id"), "X-Request-Id");
/// assert_eq!(canonicalize("SET-COOKIE"), "Set-Cookie");
/// ```
#[must_use]
pub fn canonicalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (idx, segment) in name.split('-').enumerate() {
        if idx > 0 {
            out.push('-');
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(char::to_lowercase));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("content-type", "Content-Type")]
    #[case("CONTENT-LENGTH", "Content-Length")]
    #[case("x-FOO", "X-Foo")]
    #[case("set-cookie", "Set-Cookie")]
    #[case("etag", "Etag")]
    #[case("x--double", "X--Double")]
    #[case("-leading", "-Leading")]
    #[case("", "")]
    fn canonicalizes_to_train_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(canonicalize(input), expected);
    }

    #[test]
    fn preserves_insertion_order_and_value_order() {
        let mut map = HeaderMap::new();
        map.append("X-Foo", "1");
        map.append("Set-Cookie", "a=1");
        map.append("set-cookie", "b=2");
        map.append("Accept", "*/*");

        let collected: Vec<_> = map.iter().collect();
        assert_eq!(
            collected,
            vec![
                ("X-Foo", &["1".to_string()][..]),
                ("Set-Cookie", &["a=1".to_string(), "b=2".to_string()][..]),
                ("Accept", &["*/*".to_string()][..]),
            ]
        );
    }

    #[test]
    fn lookup_ignores_case_but_keeps_first_spelling() {
        let mut map = HeaderMap::new();
        map.insert("content-type", "text/plain");
        map.insert("Content-Type", "text/html");

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("CONTENT-TYPE"), Some(&["text/html".to_string()][..]));
        assert_eq!(map.iter().next().map(|(n, _)| n), Some("content-type"));
    }

    #[test]
    fn remove_drops_every_value() {
        let mut map: HeaderMap = [("Vary", "Accept"), ("vary", "Origin")].into_iter().collect();
        assert_eq!(
            map.remove("VARY"),
            Some(vec!["Accept".to_string(), "Origin".to_string()])
        );
        assert!(map.is_empty());
        assert!(!map.contains("Vary"));
    }
}
