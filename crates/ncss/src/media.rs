//! Media and container query condition trees.
//!
//! This is the Media Queries Level 4 subset the compiler emits: feature
//! tests (`plain`, `range`, `boolean`, `interval`) combined with
//! `and` / `or` / `not`. Container queries reuse [`Condition`].

use crate::units::Length;

/// One media query: `[only|not] <type> and <condition>`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaQuery {
    pub qualifier: Option<Qualifier>,
    pub media_type: MediaType,
    pub condition: Option<Condition>,
}

impl MediaQuery {
    /// A query on `all` media with the given condition.
    pub fn new(condition: Condition) -> Self {
        Self {
            qualifier: None,
            media_type: MediaType::All,
            condition: Some(condition),
        }
    }

    pub fn with_type(mut self, media_type: MediaType) -> Self {
        self.media_type = media_type;
        self
    }

    pub fn negated(mut self) -> Self {
        self.qualifier = Some(Qualifier::Not);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Qualifier {
    Only,
    Not,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MediaType {
    #[default]
    All,
    Screen,
    Print,
    Custom(String),
}

/// A boolean condition tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Condition {
    Feature(QueryFeature),
    Not(Box<Condition>),
    Operation {
        operator: Operator,
        conditions: Vec<Condition>,
    },
    /// Container style queries; never match.
    Style,
}

impl Condition {
    pub fn and(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Operation {
            operator: Operator::And,
            conditions: conditions.into_iter().collect(),
        }
    }

    pub fn or(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Operation {
            operator: Operator::Or,
            conditions: conditions.into_iter().collect(),
        }
    }

    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    /// `(name: value)`
    pub fn plain(name: FeatureName, value: impl Into<FeatureValue>) -> Self {
        Condition::Feature(QueryFeature::Plain {
            name,
            value: value.into(),
        })
    }

    /// `(name <op> value)`
    pub fn range(name: FeatureName, operator: Comparison, value: impl Into<FeatureValue>) -> Self {
        Condition::Feature(QueryFeature::Range {
            name,
            operator,
            value: value.into(),
        })
    }

    /// `(name)`
    pub fn boolean(name: FeatureName) -> Self {
        Condition::Feature(QueryFeature::Boolean { name })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Operator {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum QueryFeature {
    Plain {
        name: FeatureName,
        value: FeatureValue,
    },
    Range {
        name: FeatureName,
        operator: Comparison,
        value: FeatureValue,
    },
    Boolean {
        name: FeatureName,
    },
    /// `start <start_operator> name <end_operator> end`
    Interval {
        name: FeatureName,
        start: FeatureValue,
        start_operator: Comparison,
        end: FeatureValue,
        end_operator: Comparison,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FeatureName {
    Width,
    Height,
    MinWidth,
    MaxWidth,
    MinHeight,
    MaxHeight,
    Orientation,
    PrefersColorScheme,
    PrefersReducedMotion,
    DisplayMode,
    Ltr,
    Rtl,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Comparison {
    Equal,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
}

impl Comparison {
    /// `lhs <op> rhs`
    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::Equal => lhs == rhs,
            Comparison::GreaterThan => lhs > rhs,
            Comparison::GreaterThanEqual => lhs >= rhs,
            Comparison::LessThan => lhs < rhs,
            Comparison::LessThanEqual => lhs <= rhs,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FeatureValue {
    Number(f64),
    Length(Length),
    Ident(String),
    /// Ratios, resolutions and anything else the runtime cannot compare.
    Unsupported,
}

impl From<f64> for FeatureValue {
    fn from(n: f64) -> Self {
        FeatureValue::Number(n)
    }
}

impl From<i32> for FeatureValue {
    fn from(n: i32) -> Self {
        FeatureValue::Number(n as f64)
    }
}

impl From<Length> for FeatureValue {
    fn from(length: Length) -> Self {
        FeatureValue::Length(length)
    }
}

impl From<&str> for FeatureValue {
    fn from(ident: &str) -> Self {
        FeatureValue::Ident(ident.to_string())
    }
}
