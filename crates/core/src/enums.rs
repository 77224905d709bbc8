//! Closed vocabularies stored as lowercase text.
//!
//! Every enum here serializes as its lowercase name, round-trips through
//! [`std::str::FromStr`] (and `TryFrom<String>`, which is how database rows
//! decode them), and reports unknown values as
//! [`CoreError::Validation`](crate::error::CoreError::Validation).

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// All accepted values, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The stored text value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $( $text => Ok($name::$variant), )+
                    other => Err($crate::error::CoreError::Validation(format!(
                        "Invalid {} '{}'. Must be one of: {}",
                        $label,
                        other,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

define_text_enum! {
    /// Craft a project belongs to.
    ProjectType("project type") {
        Knitting = "knitting",
        Crochet = "crochet",
    }
}

define_text_enum! {
    /// Project lifecycle status. Every transition is permitted.
    ProjectStatus("project status") {
        Active = "active",
        Completed = "completed",
        Frogged = "frogged",
        Hibernating = "hibernating",
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Active
    }
}

define_text_enum! {
    /// Unit for the quantity of a yarn used in a project.
    QuantityUnit("quantity unit") {
        Skeins = "skeins",
        Balls = "balls",
        Grams = "grams",
        Meters = "meters",
    }
}

impl Default for QuantityUnit {
    fn default() -> Self {
        QuantityUnit::Skeins
    }
}

define_text_enum! {
    PhotoType("photo type") {
        Progress = "progress",
        Finished = "finished",
        Detail = "detail",
        Inspiration = "inspiration",
        Other = "other",
    }
}

define_text_enum! {
    /// Category of an additional (non-yarn) project cost.
    CostCategory("cost category") {
        Notions = "notions",
        Pattern = "pattern",
        Tools = "tools",
        Other = "other",
    }
}

define_text_enum! {
    NeedleType("needle type") {
        Straight = "straight",
        Circular = "circular",
        Dpn = "dpn",
    }
}

define_text_enum! {
    LengthUnit("length unit") {
        Meters = "meters",
        Yards = "yards",
        Feet = "feet",
    }
}

define_text_enum! {
    WeightUnit("weight unit") {
        Grams = "grams",
        Ounces = "ounces",
        Pounds = "pounds",
    }
}

define_text_enum! {
    /// Whether a gauge swatch was measured before or after blocking.
    GaugeType("gauge type") {
        Blocked = "blocked",
        Unblocked = "unblocked",
    }
}

define_text_enum! {
    ConversionUnit("conversion unit") {
        Stitches = "stitches",
        Rows = "rows",
        Cm = "cm",
        Inches = "inches",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use assert_matches::assert_matches;

    #[test]
    fn parses_known_values() {
        assert_eq!("frogged".parse::<ProjectStatus>().unwrap(), ProjectStatus::Frogged);
        assert_eq!("dpn".parse::<NeedleType>().unwrap(), NeedleType::Dpn);
    }

    #[test]
    fn rejects_unknown_value_with_choices() {
        let err = "sewing".parse::<ProjectType>().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("knitting, crochet"));
    }

    #[test]
    fn serializes_as_lowercase_text() {
        let json = serde_json::to_value(QuantityUnit::Grams).unwrap();
        assert_eq!(json, "grams");
        let back: CostCategory = serde_json::from_value(serde_json::json!("notions")).unwrap();
        assert_eq!(back, CostCategory::Notions);
    }

    #[test]
    fn defaults() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::Active);
        assert_eq!(QuantityUnit::default(), QuantityUnit::Skeins);
    }

    #[test]
    fn all_lists_every_variant() {
        assert_eq!(ProjectStatus::ALL.len(), 4);
        assert_eq!(ConversionUnit::ALL[3].as_str(), "inches");
    }
}
