use polyclass_codes::CodeKind;
use polyclass_core::{PolyclassError, PolyclassResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a multi-class problem is split into binary sub-problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Method {
    #[default]
    OneVsAll,
    RandomCode,
    ExhaustiveCode,
    OneVsOne,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::OneVsAll,
        Method::RandomCode,
        Method::ExhaustiveCode,
        Method::OneVsOne,
    ];

    /// Legacy numeric tag (0..=3).
    pub fn tag(self) -> u8 {
        match self {
            Method::OneVsAll => 0,
            Method::RandomCode => 1,
            Method::ExhaustiveCode => 2,
            Method::OneVsOne => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::OneVsAll => "one-vs-all",
            Method::RandomCode => "random-code",
            Method::ExhaustiveCode => "exhaustive-code",
            Method::OneVsOne => "one-vs-one",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Method::OneVsAll => "1-against-all",
            Method::RandomCode => "Random correction code",
            Method::ExhaustiveCode => "Exhaustive correction code",
            Method::OneVsOne => "1-against-1",
        }
    }

    /// The code generator behind this method; `None` for one-vs-one,
    /// which works on class pairs instead of a code matrix.
    pub fn code_kind(self, random_width_factor: f64) -> Option<CodeKind> {
        match self {
            Method::OneVsAll => Some(CodeKind::OneAgainstAll),
            Method::RandomCode => Some(CodeKind::Random {
                width_factor: random_width_factor,
            }),
            Method::ExhaustiveCode => Some(CodeKind::Exhaustive),
            Method::OneVsOne => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the kebab-case name, the numeric tag, or the description.
impl FromStr for Method {
    type Err = PolyclassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Method::ALL
            .into_iter()
            .find(|m| {
                key == m.as_str()
                    || key == m.tag().to_string()
                    || key == m.description().to_lowercase()
            })
            .ok_or_else(|| PolyclassError::UnknownMethod(s.to_string()))
    }
}

impl TryFrom<u8> for Method {
    type Error = PolyclassError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Method::ALL
            .into_iter()
            .find(|m| m.tag() == tag)
            .ok_or_else(|| PolyclassError::UnknownMethod(tag.to_string()))
    }
}

impl TryFrom<String> for Method {
    type Error = PolyclassError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Method> for String {
    fn from(m: Method) -> Self {
        m.as_str().to_string()
    }
}

/// Options of [`MultiClassClassifier`](crate::MultiClassClassifier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiClassConfig {
    pub method: Method,
    /// Random code length as a multiple of the class count.
    pub random_width_factor: f64,
    /// Seed for the random code generator; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Train and score sub-classifiers on the rayon thread pool.
    pub parallel: bool,
}

impl Default for MultiClassConfig {
    fn default() -> Self {
        MultiClassConfig {
            method: Method::OneVsAll,
            random_width_factor: 2.0,
            seed: None,
            parallel: false,
        }
    }
}

impl MultiClassConfig {
    pub fn new(method: Method) -> Self {
        MultiClassConfig {
            method,
            ..Default::default()
        }
    }

    pub fn with_random_width_factor(mut self, factor: f64) -> Self {
        self.random_width_factor = factor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> PolyclassResult<()> {
        let w = self.random_width_factor;
        if !(w > 0.0) || !w.is_finite() {
            return Err(PolyclassError::InvalidParameter(format!(
                "random_width_factor must be a positive number, got {w}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!("one-vs-one".parse::<Method>().unwrap(), Method::OneVsOne);
        assert_eq!("2".parse::<Method>().unwrap(), Method::ExhaustiveCode);
        assert_eq!(" Random correction code ".parse::<Method>().unwrap(), Method::RandomCode);
        assert_eq!(Method::try_from(0u8).unwrap(), Method::OneVsAll);
        assert_eq!(
            "bch".parse::<Method>().unwrap_err(),
            PolyclassError::UnknownMethod("bch".into())
        );
        assert!(Method::try_from(4u8).is_err());
    }

    #[test]
    fn test_config_defaults_from_json() {
        let cfg: MultiClassConfig = serde_json::from_str(r#"{"method": "random-code"}"#).unwrap();
        assert_eq!(cfg.method, Method::RandomCode);
        assert_eq!(cfg.random_width_factor, 2.0);
        assert_eq!(cfg.seed, None);
        assert!(!cfg.parallel);

        let empty: MultiClassConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, MultiClassConfig::default());
    }

    #[test]
    fn test_config_rejects_unknown_method() {
        let res = serde_json::from_str::<MultiClassConfig>(r#"{"method": "bch-code"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let cfg = MultiClassConfig::new(Method::OneVsOne).with_seed(9).with_parallel(true);
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"one-vs-one\""));
        let back: MultiClassConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_validate() {
        assert!(MultiClassConfig::default().validate().is_ok());
        let bad = MultiClassConfig::default().with_random_width_factor(-1.0);
        assert!(matches!(bad.validate(), Err(PolyclassError::InvalidParameter(_))));
    }
}
