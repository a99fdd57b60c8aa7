use std::collections::BTreeMap;

use serde::Serialize;

use super::fields;

/// Parameters of an outbound gateway request, kept sorted by key.
///
/// The key order is what makes [`OrderParameters::encode`] canonical: the signer and the
/// HTTP body both use the same encoding, so the gateway sees exactly the signed bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderParameters(BTreeMap<String, String>);

impl OrderParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Canonical `application/x-www-form-urlencoded` encoding, keys ascending.
    pub fn encode(&self) -> String {
        encode_pairs(self.iter())
    }

    /// Canonical encoding of everything except the `sign` field.
    pub fn encode_unsigned(&self) -> String {
        encode_pairs(self.iter().filter(|(k, _)| *k != fields::SIGN))
    }
}

fn encode_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        serializer.append_pair(k, v);
    }
    serializer.finish()
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OrderParameters {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        OrderParameters(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::OrderParameters;

    #[test]
    fn test_encode_sorts_keys_and_escapes_values() {
        let params = OrderParameters::from_iter([
            ("trade_type", "NATIVE"),
            ("body", "coffee & cake"),
            ("accessKeyId", "ak"),
            ("notify_url", "https://example.com/notify?a=1"),
        ]);

        assert_eq!(
            params.encode(),
            "accessKeyId=ak&body=coffee+%26+cake&notify_url=https%3A%2F%2Fexample.com%2Fnotify%3Fa%3D1&trade_type=NATIVE"
        );
    }

    #[test]
    fn test_encode_unsigned_skips_sign() {
        let mut params = OrderParameters::from_iter([("a", "1"), ("z", "2")]);
        params.set("sign", "abc=");

        assert_eq!(params.encode_unsigned(), "a=1&z=2");
        assert_eq!(params.encode(), "a=1&sign=abc%3D&z=2");
    }

    #[test]
    fn test_set_replaces_existing_value() {
        let mut params = OrderParameters::new();
        params.set("nonce", "first").set("nonce", "second");

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("nonce"), Some("second"));
    }
}
