use polyclass_core::{PolyclassError, PolyclassResult};
use serde::{Deserialize, Serialize};

/// Nominal class attribute: a name and its ordered value labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAttribute {
    pub name: String,
    values: Vec<String>,
}

impl ClassAttribute {
    /// A class attribute needs at least one value.
    pub fn new(name: impl Into<String>, values: Vec<String>) -> PolyclassResult<Self> {
        if values.is_empty() {
            return Err(PolyclassError::InvalidData(
                "class attribute must have at least one value".into(),
            ));
        }
        Ok(ClassAttribute {
            name: name.into(),
            values,
        })
    }

    /// Binary attribute produced by an indicator relabeling.
    pub fn indicator(name: impl Into<String>) -> Self {
        ClassAttribute {
            name: name.into(),
            values: vec!["neg".into(), "pos".into()],
        }
    }

    /// Synthetic two-valued attribute used by pairwise sub-problems.
    pub fn pairwise() -> Self {
        ClassAttribute {
            name: "class".into(),
            values: vec!["class0".into(), "class1".into()],
        }
    }

    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}

/// Schema of a dataset: feature names plus the class attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub relation: String,
    pub feature_names: Vec<String>,
    pub class: ClassAttribute,
}

impl Header {
    pub fn new(
        relation: impl Into<String>,
        feature_names: Vec<String>,
        class: ClassAttribute,
    ) -> Self {
        Header {
            relation: relation.into(),
            feature_names,
            class,
        }
    }

    pub fn num_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn num_classes(&self) -> usize {
        self.class.num_values()
    }

    /// Same features, different class attribute.
    pub fn with_class(&self, class: ClassAttribute) -> Header {
        Header {
            relation: self.relation.clone(),
            feature_names: self.feature_names.clone(),
            class,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_attribute() {
        let attr = ClassAttribute::new("kind", vec!["a".into(), "b".into(), "c".into()]).unwrap();
        assert_eq!(attr.num_values(), 3);
        assert_eq!(attr.index_of("c"), Some(2));
        assert_eq!(attr.value(1), Some("b"));
        assert!(ClassAttribute::new("empty", vec![]).is_err());
    }

    #[test]
    fn test_with_class_keeps_features() {
        let attr = ClassAttribute::new("kind", vec!["a".into(), "b".into(), "c".into()]).unwrap();
        let header = Header::new("toy", vec!["x".into(), "y".into()], attr);
        let two = header.with_class(ClassAttribute::pairwise());
        assert_eq!(two.feature_names, header.feature_names);
        assert_eq!(two.num_classes(), 2);
        assert_eq!(two.class.values(), &["class0".to_string(), "class1".to_string()]);
    }
}
