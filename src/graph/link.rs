//! Entity linking: bridging triples between independently built stores.
//!
//! The linker walks every ordered pair of stores, evaluates a [`MatchRule`]
//! over their entity subjects, and emits a `relatedTo` bridging triple per
//! positive match. It never mutates its inputs and never touches existing
//! triples; merging the bridges into a unified store is the caller's move.
//!
//! Matching is not transitive: if A matches B and B matches C, no A–C bridge
//! is inferred. Re-run linking against the merged result if closure is
//! wanted. When several entities match the same subject, every match is
//! emitted (fan-out), reported at debug level rather than treated as an
//! error.

use std::collections::HashSet;

use crate::ident::{Identifier, Namespace};

use super::Triple;
use super::store::GraphStore;

/// Namespace prefix reserved for bridging predicates.
pub const LINK_NAMESPACE: &str = "link";

/// Local name of the identity-bridging predicate.
pub const RELATED_TO: &str = "relatedTo";

/// The `link_relatedTo` predicate identifier.
pub fn related_to() -> Identifier {
    let namespace = Namespace::new(LINK_NAMESPACE).expect("link namespace is canonical");
    Identifier::from_parts(&namespace, RELATED_TO).expect("link predicate is canonical")
}

/// Decides whether two entities from different stores denote the same
/// real-world thing.
///
/// The correct general-purpose strategy (exact code, fuzzy text,
/// multi-field) depends on the sources being linked, so it stays a pluggable
/// policy behind this trait.
pub trait MatchRule {
    /// Whether `a` (from the earlier store) and `b` (from the later store)
    /// denote the same entity.
    fn matches(&self, a: &Identifier, b: &Identifier) -> bool;
}

/// Matches when both identifiers embed a known external code, e.g. a ChEMBL
/// compound code appearing in a recall description and a compound record.
#[derive(Debug, Clone)]
pub struct SharedCode {
    code: String,
}

impl SharedCode {
    /// Match on the given external code.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl MatchRule for SharedCode {
    fn matches(&self, a: &Identifier, b: &Identifier) -> bool {
        a.local().contains(&self.code) && b.local().contains(&self.code)
    }
}

/// Matches when one local name contains the other, e.g. `CHEMBL25` and
/// `CHEMBL25_synonym_1`.
#[derive(Debug, Clone, Default)]
pub struct LocalContainment;

impl MatchRule for LocalContainment {
    fn matches(&self, a: &Identifier, b: &Identifier) -> bool {
        b.local().contains(a.local()) || a.local().contains(b.local())
    }
}

/// Discover shared entities across stores and emit bridging triples.
///
/// For every ordered pair of distinct stores (i, j) with i < j, every
/// subject pair is evaluated under the rule; positive matches become
/// `(subject_i, link_relatedTo, subject_j)`. Rule hits between subjects of
/// the same namespace are not cross-source links and are skipped. An empty
/// result means no entities happened to correspond: success, not an error.
pub fn link(stores: &[&GraphStore], rule: &dyn MatchRule) -> Vec<Triple> {
    let predicate = related_to();
    let mut bridges = Vec::new();
    let mut seen: HashSet<(Identifier, Identifier)> = HashSet::new();

    for (i, left) in stores.iter().enumerate() {
        for right in &stores[i + 1..] {
            for a in left.subjects() {
                let mut hits = 0usize;
                for b in right.subjects() {
                    if !rule.matches(a, b) {
                        continue;
                    }
                    if a.namespace() == b.namespace() {
                        tracing::debug!(subject = %a, other = %b, "match within one namespace, not a link");
                        continue;
                    }
                    hits += 1;
                    if seen.insert(((*a).clone(), (*b).clone())) {
                        bridges.push(Triple::new(
                            (*a).clone(),
                            predicate.clone(),
                            (*b).clone(),
                        ));
                    }
                }
                if hits > 1 {
                    tracing::debug!(
                        subject = %a,
                        store = right.name(),
                        matches = hits,
                        "ambiguous match fans out"
                    );
                }
            }
        }
    }

    tracing::info!(
        stores = stores.len(),
        bridges = bridges.len(),
        "linking complete"
    );
    bridges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Literal, Term};
    use crate::ident::canonicalize;

    fn ns(prefix: &str) -> Namespace {
        Namespace::new(prefix).unwrap()
    }

    fn store_with_subjects(name: &str, prefix: &str, subjects: &[&str]) -> GraphStore {
        let namespace = ns(prefix);
        let mut store = GraphStore::new(name, namespace.clone());
        for s in subjects {
            store.insert(Triple::new(
                canonicalize(&namespace, s).unwrap(),
                canonicalize(&namespace, "label").unwrap(),
                Literal::text(*s),
            ));
        }
        store
    }

    #[test]
    fn containment_rule_bridges_compound_and_synonym() {
        let compounds = store_with_subjects("compound", "chem", &["CHEMBL25"]);
        let synonyms = store_with_subjects("synonyms", "pubchem", &["CHEMBL25_synonym_1"]);

        let bridges = link(&[&compounds, &synonyms], &LocalContainment);
        assert_eq!(bridges.len(), 1);
        let bridge = &bridges[0];
        assert_eq!(bridge.subject.to_string(), "chem_CHEMBL25");
        assert_eq!(bridge.predicate, related_to());
        assert_eq!(
            bridge.object,
            Term::Id(canonicalize(&ns("pubchem"), "CHEMBL25_synonym_1").unwrap())
        );
    }

    #[test]
    fn shared_code_rule_requires_the_code_on_both_sides() {
        let recalls = store_with_subjects(
            "recalls",
            "fda",
            &["Aspirin_325mg_CHEMBL25_lot_7", "Widget_A"],
        );
        let compounds = store_with_subjects("compound", "chem", &["CHEMBL25", "CHEMBL1201"]);

        let bridges = link(&[&recalls, &compounds], &SharedCode::new("CHEMBL25"));
        assert_eq!(bridges.len(), 1);
        assert_eq!(bridges[0].subject.local(), "Aspirin_325mg_CHEMBL25_lot_7");
        assert_eq!(bridges[0].object.as_id().unwrap().local(), "CHEMBL25");
    }

    #[test]
    fn fan_out_emits_every_match() {
        let compounds = store_with_subjects("compound", "chem", &["CHEMBL25"]);
        let synonyms = store_with_subjects(
            "synonyms",
            "pubchem",
            &["CHEMBL25_synonym_1", "CHEMBL25_synonym_2"],
        );

        let bridges = link(&[&compounds, &synonyms], &LocalContainment);
        assert_eq!(bridges.len(), 2);
        assert!(bridges.iter().all(|t| t.subject.local() == "CHEMBL25"));
    }

    #[test]
    fn linking_never_mutates_the_inputs() {
        let left = store_with_subjects("compound", "chem", &["CHEMBL25"]);
        let right = store_with_subjects("synonyms", "pubchem", &["CHEMBL25_synonym_1"]);
        let left_before: Vec<Triple> = left.triples().cloned().collect();
        let right_before: Vec<Triple> = right.triples().cloned().collect();

        let _ = link(&[&left, &right], &LocalContainment);

        assert_eq!(left.triples().cloned().collect::<Vec<_>>(), left_before);
        assert_eq!(right.triples().cloned().collect::<Vec<_>>(), right_before);
    }

    #[test]
    fn no_match_is_an_empty_success() {
        let a = store_with_subjects("a", "fda", &["Widget_A"]);
        let b = store_with_subjects("b", "chem", &["CHEMBL25"]);
        let bridges = link(&[&a, &b], &SharedCode::new("CHEMBL99"));
        assert!(bridges.is_empty());
    }

    #[test]
    fn same_namespace_matches_are_not_links() {
        let a = store_with_subjects("a", "chem", &["CHEMBL25"]);
        let b = store_with_subjects("b", "chem", &["CHEMBL25_synonym_1"]);
        let bridges = link(&[&a, &b], &LocalContainment);
        assert!(bridges.is_empty());
    }

    #[test]
    fn pairs_are_ordered_earlier_store_first() {
        let stores = [
            store_with_subjects("s1", "chem", &["CHEMBL25"]),
            store_with_subjects("s2", "pubchem", &["CHEMBL25_x"]),
            store_with_subjects("s3", "fda", &["CHEMBL25_y"]),
        ];
        let refs: Vec<&GraphStore> = stores.iter().collect();
        let bridges = link(&refs, &SharedCode::new("CHEMBL25"));

        // (s1,s2), (s1,s3), (s2,s3): three ordered pairs, one bridge each.
        assert_eq!(bridges.len(), 3);
        assert_eq!(bridges[0].subject.namespace(), "chem");
        assert_eq!(bridges[0].object.as_id().unwrap().namespace(), "pubchem");
        assert_eq!(bridges[2].subject.namespace(), "pubchem");
        assert_eq!(bridges[2].object.as_id().unwrap().namespace(), "fda");
    }

    #[test]
    fn linking_is_not_transitive() {
        // A in s1 matches B in s2 via the shared code, B matches C in s3 by
        // containment of B's local in C's, but no A-C bridge appears under a
        // rule that only relates those two hops.
        let s1 = store_with_subjects("s1", "chem", &["AAA_X"]);
        let s2 = store_with_subjects("s2", "pubchem", &["X_BBB"]);
        let s3 = store_with_subjects("s3", "fda", &["X_BBB_CCC"]);

        struct Chain;
        impl MatchRule for Chain {
            fn matches(&self, a: &Identifier, b: &Identifier) -> bool {
                (a.local() == "AAA_X" && b.local() == "X_BBB")
                    || (a.local() == "X_BBB" && b.local() == "X_BBB_CCC")
            }
        }

        let bridges = link(&[&s1, &s2, &s3], &Chain);
        assert_eq!(bridges.len(), 2);
        assert!(
            !bridges
                .iter()
                .any(|t| t.subject.local() == "AAA_X"
                    && t.object.as_id().unwrap().local() == "X_BBB_CCC")
        );
    }
}
