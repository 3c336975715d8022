//! Incompatibility table between relation types
//!
//! Two people can hold several relations at once (a cousin may also be a
//! spouse) but some pairs are contradictory. The table lists, per type, the
//! types it cannot coexist with; `conflicts` closes it under symmetry.

use kindred_domain::RelationType;
use RelationType::*;

const LINEAL: &[RelationType] = &[
    Parent,
    Child,
    Sibling,
    Spouse,
    Grandparent,
    Grandchild,
    GreatGrandparent,
    GreatGrandchild,
];

fn incompatible_with(relation_type: RelationType) -> &'static [RelationType] {
    match relation_type {
        Parent | Child | Sibling | Spouse | Grandparent | Grandchild | GreatGrandparent
        | GreatGrandchild => LINEAL,
        UncleAunt => &[
            Parent,
            Child,
            Sibling,
            Grandparent,
            Grandchild,
            GreatGrandparent,
            GreatGrandchild,
            NephewNiece,
        ],
        NephewNiece => &[
            Parent,
            Child,
            Sibling,
            Grandparent,
            Grandchild,
            GreatGrandparent,
            GreatGrandchild,
            UncleAunt,
        ],
        Cousin => &[
            Parent,
            Child,
            Sibling,
            Grandparent,
            Grandchild,
            GreatGrandparent,
            GreatGrandchild,
        ],
        SiblingInLaw => &[Parent, Child, Sibling],
        ParentInLaw => &[Child, Spouse, ChildInLaw, Grandchild, GreatGrandchild],
        ChildInLaw => &[Parent, Spouse, ParentInLaw, Grandparent, GreatGrandparent],
        CoParentInLaw => &[Parent, Child, Grandparent, Grandchild],
    }
}

/// Whether a pair cannot hold both types at once
pub fn conflicts(a: RelationType, b: RelationType) -> bool {
    a != b && (incompatible_with(a).contains(&b) || incompatible_with(b).contains(&a))
}
