//! Relation types and the inverse-type resolver
//!
//! An edge's relation type always names what the *related* person is to the
//! *declarer*: `(declarer = Beto, related = Ana, Parent)` reads "Ana is
//! Beto's parent". Gender never changes a type code, it only selects the
//! display label.

use crate::person::Gender;
use std::fmt;

/// Closed enumeration of kinship types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationType {
    /// Father or mother
    Parent,
    /// Son or daughter
    Child,
    /// Brother or sister
    Sibling,
    /// Husband or wife
    Spouse,
    /// Grandfather or grandmother
    Grandparent,
    /// Grandson or granddaughter
    Grandchild,
    /// Parent of a grandparent
    GreatGrandparent,
    /// Child of a grandchild
    GreatGrandchild,
    /// Sibling of a parent
    UncleAunt,
    /// Child of a sibling
    NephewNiece,
    /// Child of an uncle or aunt
    Cousin,
    /// Spouse of a sibling, or sibling of a spouse
    SiblingInLaw,
    /// Parent of a spouse
    ParentInLaw,
    /// Spouse of a child
    ChildInLaw,
    /// Parent of a child's spouse
    CoParentInLaw,
}

impl RelationType {
    /// Every relation type, in display order
    pub const ALL: [RelationType; 15] = [
        RelationType::Parent,
        RelationType::Child,
        RelationType::Sibling,
        RelationType::Spouse,
        RelationType::Grandparent,
        RelationType::Grandchild,
        RelationType::GreatGrandparent,
        RelationType::GreatGrandchild,
        RelationType::UncleAunt,
        RelationType::NephewNiece,
        RelationType::Cousin,
        RelationType::SiblingInLaw,
        RelationType::ParentInLaw,
        RelationType::ChildInLaw,
        RelationType::CoParentInLaw,
    ];

    /// Stable storage code
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Parent => "parent",
            RelationType::Child => "child",
            RelationType::Sibling => "sibling",
            RelationType::Spouse => "spouse",
            RelationType::Grandparent => "grandparent",
            RelationType::Grandchild => "grandchild",
            RelationType::GreatGrandparent => "great_grandparent",
            RelationType::GreatGrandchild => "great_grandchild",
            RelationType::UncleAunt => "uncle_aunt",
            RelationType::NephewNiece => "nephew_niece",
            RelationType::Cousin => "cousin",
            RelationType::SiblingInLaw => "sibling_in_law",
            RelationType::ParentInLaw => "parent_in_law",
            RelationType::ChildInLaw => "child_in_law",
            RelationType::CoParentInLaw => "co_parent_in_law",
        }
    }

    /// Parse a storage code (exact match, no gendered labels)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }

    /// The same fact seen from the other side of the edge
    pub fn inverse(&self) -> Self {
        match self {
            RelationType::Parent => RelationType::Child,
            RelationType::Child => RelationType::Parent,
            RelationType::Grandparent => RelationType::Grandchild,
            RelationType::Grandchild => RelationType::Grandparent,
            RelationType::GreatGrandparent => RelationType::GreatGrandchild,
            RelationType::GreatGrandchild => RelationType::GreatGrandparent,
            RelationType::UncleAunt => RelationType::NephewNiece,
            RelationType::NephewNiece => RelationType::UncleAunt,
            RelationType::ParentInLaw => RelationType::ChildInLaw,
            RelationType::ChildInLaw => RelationType::ParentInLaw,
            RelationType::Sibling
            | RelationType::Spouse
            | RelationType::Cousin
            | RelationType::SiblingInLaw
            | RelationType::CoParentInLaw => *self,
        }
    }

    /// Whether the inverse equals the type itself
    pub fn is_symmetric(&self) -> bool {
        self.inverse() == *self
    }

    /// Generations between the declarer and the related person.
    ///
    /// Positive when the related person belongs to an older generation.
    pub fn generation(&self) -> i8 {
        match self {
            RelationType::GreatGrandparent => 3,
            RelationType::Grandparent => 2,
            RelationType::Parent | RelationType::UncleAunt | RelationType::ParentInLaw => 1,
            RelationType::Sibling
            | RelationType::Spouse
            | RelationType::Cousin
            | RelationType::SiblingInLaw
            | RelationType::CoParentInLaw => 0,
            RelationType::Child | RelationType::NephewNiece | RelationType::ChildInLaw => -1,
            RelationType::Grandchild => -2,
            RelationType::GreatGrandchild => -3,
        }
    }

    /// Display label for a related person of the given gender
    pub fn label(&self, gender: Gender) -> &'static str {
        let (male, female, neutral) = self.labels();
        match gender {
            Gender::Male => male,
            Gender::Female => female,
            Gender::Unknown => neutral,
        }
    }

    /// (male, female, neutral) labels
    fn labels(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            RelationType::Parent => ("father", "mother", "parent"),
            RelationType::Child => ("son", "daughter", "child"),
            RelationType::Sibling => ("brother", "sister", "sibling"),
            RelationType::Spouse => ("husband", "wife", "spouse"),
            RelationType::Grandparent => ("grandfather", "grandmother", "grandparent"),
            RelationType::Grandchild => ("grandson", "granddaughter", "grandchild"),
            RelationType::GreatGrandparent => {
                ("great-grandfather", "great-grandmother", "great-grandparent")
            }
            RelationType::GreatGrandchild => {
                ("great-grandson", "great-granddaughter", "great-grandchild")
            }
            RelationType::UncleAunt => ("uncle", "aunt", "uncle/aunt"),
            RelationType::NephewNiece => ("nephew", "niece", "nephew/niece"),
            RelationType::Cousin => ("cousin", "cousin", "cousin"),
            RelationType::SiblingInLaw => ("brother-in-law", "sister-in-law", "sibling-in-law"),
            RelationType::ParentInLaw => ("father-in-law", "mother-in-law", "parent-in-law"),
            RelationType::ChildInLaw => ("son-in-law", "daughter-in-law", "child-in-law"),
            RelationType::CoParentInLaw => {
                ("co-father-in-law", "co-mother-in-law", "co-parent-in-law")
            }
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationLabel::parse(s)
            .map(|label| label.relation_type)
            .ok_or_else(|| format!("Invalid relation type: {}", s))
    }
}

/// A relation type as typed by a user, possibly gendered ("mother")
///
/// `expected_gender` is set when the label itself implies a gender; it feeds
/// the gender-coherence check but never the stored type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationLabel {
    /// Underlying type code
    pub relation_type: RelationType,

    /// Gender implied by the label, if any
    pub expected_gender: Option<Gender>,
}

impl RelationLabel {
    /// Parse a type code or a gendered display label.
    ///
    /// Case, surrounding whitespace and `-`/space separators are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use kindred_domain::{Gender, RelationLabel, RelationType};
    ///
    /// let label = RelationLabel::parse("Mother").unwrap();
    /// assert_eq!(label.relation_type, RelationType::Parent);
    /// assert_eq!(label.expected_gender, Some(Gender::Female));
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase().replace(['-', ' ', '/'], "_");

        if let Some(relation_type) = RelationType::parse(&key) {
            return Some(relation_type.into());
        }

        for relation_type in RelationType::ALL {
            let (male, female, neutral) = relation_type.labels();
            let normalized = |label: &str| label.replace(['-', ' ', '/'], "_");

            // Cousin shares one label for every gender
            if male == female && key == normalized(male) {
                return Some(relation_type.into());
            }
            if key == normalized(male) {
                return Some(Self::gendered(relation_type, Gender::Male));
            }
            if key == normalized(female) {
                return Some(Self::gendered(relation_type, Gender::Female));
            }
            if key == normalized(neutral) {
                return Some(relation_type.into());
            }
        }

        None
    }

    /// A label carrying an expected gender
    pub fn gendered(relation_type: RelationType, gender: Gender) -> Self {
        Self {
            relation_type,
            expected_gender: Some(gender),
        }
    }

    /// Display text of this label
    pub fn text(&self) -> &'static str {
        self.relation_type
            .label(self.expected_gender.unwrap_or(Gender::Unknown))
    }
}

impl From<RelationType> for RelationLabel {
    fn from(relation_type: RelationType) -> Self {
        Self {
            relation_type,
            expected_gender: None,
        }
    }
}

/// Output of the inverse-type resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedType {
    /// Inverted type code
    pub relation_type: RelationType,

    /// Label for the person the inverted type describes
    pub label: &'static str,
}

/// Invert a declared type and label it for the related person's gender.
///
/// Total over the enumeration; unknown gender yields the neutral label.
///
/// # Examples
///
/// ```
/// use kindred_domain::{inverse_type, Gender, RelationType};
///
/// let resolved = inverse_type(RelationType::Child, Gender::Female);
/// assert_eq!(resolved.relation_type, RelationType::Parent);
/// assert_eq!(resolved.label, "mother");
/// ```
pub fn inverse_type(relation_type: RelationType, related_gender: Gender) -> ResolvedType {
    let inverted = relation_type.inverse();
    ResolvedType {
        relation_type: inverted,
        label: inverted.label(related_gender),
    }
}
