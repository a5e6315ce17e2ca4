// Greedy star clustering over the similarity matrix.
//
// Walk ids in matrix order. The first unassigned id seeds a new group;
// every later unassigned id joins if its similarity TO THE SEED clears
// the threshold. Members are never compared to each other, only to the
// seed, so a group is a star around its first-encountered
// representative, not a clique.
//
// This is order-dependent on purpose: [A, B, C] and [C, B, A] can group
// differently when similarities straddle the threshold. Report shapes
// and downstream consumers depend on exactly this behavior, so it is
// preserved as-is rather than generalized to transitive clustering.

use serde::Serialize;

use crate::similarity::SimilarityMatrix;

/// An ordered, non-empty list of document ids. The first member is the
/// group's seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub members: Vec<String>,
}

impl Group {
    /// The seed: the representative every other member matched against.
    pub fn seed(&self) -> &str {
        &self.members[0]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// A group holding more than one document is a duplicate group.
    pub fn is_duplicate(&self) -> bool {
        self.members.len() > 1
    }
}

/// Partition the matrix's documents into star clusters at `threshold`.
///
/// Total over any well-formed matrix: the result is always an exact
/// partition of the matrix ids: every id in exactly one group, no
/// group empty.
pub fn group_documents(matrix: &SimilarityMatrix, threshold: f64) -> Vec<Group> {
    let n = matrix.len();
    let mut assigned = vec![false; n];
    let mut groups = Vec::new();

    for seed in 0..n {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;
        let mut members = vec![matrix.ids()[seed].clone()];

        for candidate in 0..n {
            if candidate == seed || assigned[candidate] {
                continue;
            }
            // Seed comparison only, never against earlier joiners.
            if matrix.get(seed, candidate) >= threshold {
                assigned[candidate] = true;
                members.push(matrix.ids()[candidate].clone());
            }
        }

        groups.push(Group { members });
    }

    groups
}
