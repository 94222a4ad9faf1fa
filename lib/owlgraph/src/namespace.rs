use crate::error::GraphError;
use crate::vocab::xml;

/// The namespace declarations of a graph, keyed by their attribute name.
///
/// Keys are the names the declarations have on the `rdf:RDF` element: `xmlns:owl`, `xmlns` for the
/// default namespace, and the reserved `xml:base`.
///
/// ```
/// use owlgraph::Namespaces;
///
/// let mut namespaces = Namespaces::default();
/// namespaces.insert("xmlns:ex", "http://example.com/#")?;
/// namespaces.set_base("http://example.com/");
/// assert_eq!(namespaces.get("xmlns:ex"), Some("http://example.com/#"));
/// assert_eq!(namespaces.base(), Some("http://example.com/"));
/// # Result::<_, owlgraph::GraphError>::Ok(())
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Namespaces {
    entries: Vec<(String, String)>,
}

impl Namespaces {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets a declaration and returns the value it replaces.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, GraphError> {
        let name = name.into();
        if name.is_empty() {
            return Err(GraphError::EmptyNamespaceName);
        }
        let value = value.into();
        if let Some((_, v)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            return Ok(Some(std::mem::replace(v, value)));
        }
        self.entries.push((name, value));
        Ok(None)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let position = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(position).1)
    }

    /// The declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The base URI stored under `xml:base`.
    #[inline]
    pub fn base(&self) -> Option<&str> {
        self.get(xml::BASE)
    }

    pub fn set_base(&mut self, base: impl Into<String>) -> Option<String> {
        let base = base.into();
        if let Some((_, v)) = self.entries.iter_mut().find(|(n, _)| n == xml::BASE) {
            return Some(std::mem::replace(v, base));
        }
        self.entries.push((xml::BASE.into(), base));
        None
    }

    /// The prefix a declaration binds: `owl` for `xmlns:owl`, the empty string for `xmlns`.
    ///
    /// Returns `None` for keys that are not namespace declarations, like `xml:base`.
    pub fn declared_prefix(name: &str) -> Option<&str> {
        if name == "xmlns" {
            Some("")
        } else {
            name.strip_prefix("xmlns:")
        }
    }
}
