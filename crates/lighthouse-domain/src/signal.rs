//! Signal module - one categorized observation pulled out of a source document

use std::fmt;
use std::str::FromStr;

/// Speaker recorded when the source text does not attribute a statement
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// The fixed set of categories a signal can belong to
///
/// The wire names (`Explicit_Requirement`, ...) are what the extraction prompt
/// asks the model to emit and what the synthesis prompt maps onto PRD sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalCategory {
    /// A requirement stated outright
    ExplicitRequirement,
    /// A requirement implied by what was said
    ImplicitRequirement,
    /// A concrete technical constraint or specification
    TechnicalSpecification,
    /// A user interface or experience detail
    UiUxDetail,
    /// A decision the participants settled on
    DecisionMade,
    /// Something someone has to go and do
    ActionItem,
    /// A problem users are experiencing
    UserPainPoint,
    /// A business objective behind the work
    BusinessGoal,
    /// An unresolved question
    OpenQuestion,
    /// A risk someone called out
    IdentifiedRisk,
}

impl SignalCategory {
    /// All categories, in the order the prompts list them
    pub const ALL: [SignalCategory; 10] = [
        SignalCategory::ExplicitRequirement,
        SignalCategory::ImplicitRequirement,
        SignalCategory::TechnicalSpecification,
        SignalCategory::UiUxDetail,
        SignalCategory::DecisionMade,
        SignalCategory::ActionItem,
        SignalCategory::UserPainPoint,
        SignalCategory::BusinessGoal,
        SignalCategory::OpenQuestion,
        SignalCategory::IdentifiedRisk,
    ];

    /// Get the wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalCategory::ExplicitRequirement => "Explicit_Requirement",
            SignalCategory::ImplicitRequirement => "Implicit_Requirement",
            SignalCategory::TechnicalSpecification => "Technical_Specification",
            SignalCategory::UiUxDetail => "UI_UX_Detail",
            SignalCategory::DecisionMade => "Decision_Made",
            SignalCategory::ActionItem => "Action_Item",
            SignalCategory::UserPainPoint => "User_Pain_Point",
            SignalCategory::BusinessGoal => "Business_Goal",
            SignalCategory::OpenQuestion => "Open_Question",
            SignalCategory::IdentifiedRisk => "Identified_Risk",
        }
    }

    /// Parse a category from its wire name
    ///
    /// Only the exact wire names are accepted (surrounding whitespace aside).
    /// Anything else invalidates the signal that carries it.
    ///
    /// # Examples
    ///
    /// ```
    /// use lighthouse_domain::SignalCategory;
    ///
    /// assert_eq!(
    ///     SignalCategory::parse("UI_UX_Detail"),
    ///     Some(SignalCategory::UiUxDetail)
    /// );
    /// assert_eq!(SignalCategory::parse("ui ux detail"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown signal category: '{}'", s))
    }
}

/// How strongly the source pushed on a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    /// Urgent or emphasized
    High,
    /// Ordinary weight
    #[default]
    Medium,
    /// Mentioned in passing
    Low,
}

impl Priority {
    /// Get the wire name of the priority
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Parse a priority, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single extracted observation about the source document
///
/// Signals are immutable once created. They are accumulated per run and
/// consumed exactly once by synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    /// Category from the fixed enumeration
    pub category: SignalCategory,

    /// Who said it, or [`UNKNOWN_SPEAKER`]
    pub speaker: String,

    /// Direct or near-direct quote
    pub content: String,

    /// Priority hint from the source
    pub priority: Priority,
}

impl Signal {
    /// Create a new signal
    ///
    /// A blank speaker is normalized to [`UNKNOWN_SPEAKER`]. Blank content is
    /// rejected since such a signal carries no observation.
    ///
    /// # Examples
    ///
    /// ```
    /// use lighthouse_domain::{Priority, Signal, SignalCategory};
    ///
    /// let signal = Signal::new(
    ///     SignalCategory::ExplicitRequirement,
    ///     "  ",
    ///     "We need CSV export",
    ///     Priority::High,
    /// ).unwrap();
    /// assert_eq!(signal.speaker, "Unknown");
    /// ```
    pub fn new(
        category: SignalCategory,
        speaker: impl Into<String>,
        content: impl Into<String>,
        priority: Priority,
    ) -> Result<Self, String> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err("content is empty".to_string());
        }

        let speaker = speaker.into();
        let speaker = if speaker.trim().is_empty() {
            UNKNOWN_SPEAKER.to_string()
        } else {
            speaker.trim().to_string()
        };

        Ok(Self {
            category,
            speaker,
            content,
            priority,
        })
    }

    /// Whether the speaker could be attributed
    pub fn is_attributed(&self) -> bool {
        self.speaker != UNKNOWN_SPEAKER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names_round_trip() {
        for category in SignalCategory::ALL {
            assert_eq!(SignalCategory::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_category_rejects_unknown() {
        assert!(SignalCategory::parse("Requirement").is_none());
        assert!(SignalCategory::parse("explicit_requirement").is_none());
        assert!(SignalCategory::parse("").is_none());
        assert!("Feature_Request".parse::<SignalCategory>().is_err());
    }

    #[test]
    fn test_category_tolerates_whitespace() {
        assert_eq!(
            SignalCategory::parse("  Open_Question\n"),
            Some(SignalCategory::OpenQuestion)
        );
    }

    #[test]
    fn test_priority_parse_is_case_insensitive() {
        assert_eq!(Priority::parse("HIGH"), Some(Priority::High));
        assert_eq!(Priority::parse("medium"), Some(Priority::Medium));
        assert_eq!(Priority::parse(" Low "), Some(Priority::Low));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn test_signal_requires_content() {
        let result = Signal::new(
            SignalCategory::ActionItem,
            "Sarah",
            "   ",
            Priority::Low,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_signal_keeps_attribution() {
        let signal = Signal::new(
            SignalCategory::ActionItem,
            " Sarah ",
            "Send the mockups",
            Priority::Low,
        )
        .unwrap();
        assert_eq!(signal.speaker, "Sarah");
        assert!(signal.is_attributed());
    }
}
