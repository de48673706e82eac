/// Maps prediction indices to diagnostic class names.
///
/// The remote model indexes classes in alphabetical order, so the table is
/// always sorted on construction regardless of the order it was given in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        labels.sort();
        Self { labels }
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_LABELS;

    #[test]
    fn default_labels_sorted_alphabetically() {
        let table = LabelTable::new(DEFAULT_LABELS);
        assert_eq!(
            table.labels(),
            &[
                "High squamous intra-epithelial lesion",
                "Low squamous intra-epithelial lesion",
                "Negative for Intraepithelial malignancy",
                "Squamous cell carcinoma",
            ]
        );
        assert_eq!(table.label(4), None);
    }
}
