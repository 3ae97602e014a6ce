use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingStatusCode {
    #[serde(rename = "S")]
    Single,
    #[serde(rename = "MFJ")]
    MarriedFilingJointly,
    #[serde(rename = "MFS")]
    MarriedFilingSeparately,
    #[serde(rename = "HOH")]
    HeadOfHousehold,
    #[serde(rename = "QSS")]
    QualifyingSurvivingSpouse,
}

impl FilingStatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
            Self::QualifyingSurvivingSpouse => "QSS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "S" => Some(Self::Single),
            "MFJ" => Some(Self::MarriedFilingJointly),
            "MFS" => Some(Self::MarriedFilingSeparately),
            "HOH" => Some(Self::HeadOfHousehold),
            "QSS" => Some(Self::QualifyingSurvivingSpouse),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
            Self::QualifyingSurvivingSpouse => "Qualifying Surviving Spouse",
        }
    }
}

impl fmt::Display for FilingStatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}
