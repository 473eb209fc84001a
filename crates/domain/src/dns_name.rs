use std::fmt;
use std::sync::Arc;

/// A DNS name as an ordered sequence of labels.
///
/// Labels are raw bytes without the separating dots. Comparison is exact and
/// case-sensitive: `Corp` and `corp` are different labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsName {
    labels: Arc<[Box<[u8]>]>,
}

impl DnsName {
    pub fn from_labels<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let labels: Vec<Box<[u8]>> = labels
            .into_iter()
            .map(|l| Box::from(l.as_ref()))
            .collect();
        Self {
            labels: labels.into(),
        }
    }

    /// Parse a dotted name. A single trailing dot is ignored and empty
    /// labels are dropped, so `"db.corp."` and `"db.corp"` are equal.
    pub fn parse(name: &str) -> Self {
        Self::from_labels(name.split('.').filter(|l| !l.is_empty()))
    }

    pub fn labels(&self) -> &[Box<[u8]>] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn first_label(&self) -> Option<&[u8]> {
        self.labels.first().map(|l| &l[..])
    }

    pub fn without_first_label(&self) -> DnsName {
        Self::from_labels(self.labels.iter().skip(1))
    }

    /// Whole-label suffix test. An empty suffix never matches.
    pub fn ends_with(&self, suffix: &DnsName) -> bool {
        if suffix.is_empty() || suffix.len() > self.len() {
            return false;
        }
        self.labels[self.len() - suffix.len()..] == suffix.labels[..]
    }

    /// Remove `suffix` from the end of the name.
    ///
    /// Returns `None` unless the name ends with `suffix` and keeps at least
    /// one label afterwards.
    pub fn strip_suffix(&self, suffix: &DnsName) -> Option<DnsName> {
        if !self.ends_with(suffix) || self.len() == suffix.len() {
            return None;
        }
        Some(Self::from_labels(
            self.labels[..self.len() - suffix.len()].iter(),
        ))
    }
}

impl fmt::Display for DnsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&String::from_utf8_lossy(label))?;
        }
        Ok(())
    }
}

impl Default for DnsName {
    fn default() -> Self {
        Self::from_labels(std::iter::empty::<&[u8]>())
    }
}

impl From<&str> for DnsName {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}
