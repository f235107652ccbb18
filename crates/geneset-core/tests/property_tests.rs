use std::collections::BTreeSet;

use geneset_core::catalog::{CatalogBuilder, PrimaryRecord};
use geneset_core::input::HierarchyNode;
use geneset_core::model::{Annotation, Association};
use geneset_core::{AssociationAggregator, GeneGeneSetBuilder, SourceType};
use proptest::prelude::*;
use proptest::sample::Index;

const PRODUCTS: usize = 5;

/// A DAG whose nodes may sit under several parents, rendered as a nested
/// hierarchy with repeated subtrees.
#[derive(Debug, Clone)]
struct Forest {
    parents: Vec<BTreeSet<usize>>,
}

impl Forest {
    fn new(n: usize, tree_parents: Vec<Option<Index>>, extra: Vec<(Index, Index)>) -> Self {
        let mut parents = vec![BTreeSet::new(); n];
        for (i, parent) in tree_parents.into_iter().enumerate().skip(1) {
            if let Some(parent) = parent {
                parents[i].insert(parent.index(i));
            }
        }
        if n > 1 {
            for (child, parent) in extra {
                let child = 1 + child.index(n - 1);
                parents[child].insert(parent.index(child));
            }
        }
        Self { parents }
    }

    fn len(&self) -> usize {
        self.parents.len()
    }

    fn id(i: usize) -> String {
        format!("N{i:03}")
    }

    fn children(&self, node: usize) -> Vec<usize> {
        (0..self.len()).filter(|c| self.parents[*c].contains(&node)).collect()
    }

    fn subtree(&self, node: usize) -> HierarchyNode {
        let children = self.children(node).into_iter().map(|c| self.subtree(c)).collect();
        HierarchyNode::new(format!("name {node}")).with_children(children)
    }

    fn hierarchy(&self) -> Vec<HierarchyNode> {
        (0..self.len())
            .filter(|i| self.parents[*i].is_empty())
            .map(|root| self.subtree(root))
            .collect()
    }

    /// Every node above `node`, computed from the parent links.
    fn ancestors(&self, node: usize) -> BTreeSet<usize> {
        let mut found = BTreeSet::new();
        for &parent in &self.parents[node] {
            found.insert(parent);
            found.extend(self.ancestors(parent));
        }
        found
    }
}

fn forest() -> impl Strategy<Value = Forest> {
    (1usize..20)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec(prop::option::weighted(0.8, any::<Index>()), n),
                prop::collection::vec((any::<Index>(), any::<Index>()), 0..5),
            )
        })
        .prop_map(|(n, tree_parents, extra)| Forest::new(n, tree_parents, extra))
}

/// `(product, node index, negated)` rows.
fn rows() -> impl Strategy<Value = Vec<(usize, Index, bool)>> {
    prop::collection::vec((0..PRODUCTS, any::<Index>(), prop::bool::weighted(0.2)), 0..30)
}

fn product(p: usize) -> String {
    format!("U{p}")
}

fn associations(forest: &Forest, rows: &[(usize, Index, bool)]) -> Vec<Association> {
    rows.iter()
        .map(|(p, node, negated)| {
            let node = Forest::id(node.index(forest.len()));
            if *negated {
                Association::negative(product(*p), node)
            } else {
                Association::positive(product(*p), node)
            }
        })
        .collect()
}

/// Node indices with a positive and no negative row for any of `products`.
fn expected_direct(forest: &Forest, rows: &[(usize, Index, bool)], products: &[usize]) -> BTreeSet<usize> {
    let negated: BTreeSet<(usize, usize)> = rows
        .iter()
        .filter(|(_, _, negated)| *negated)
        .map(|(p, node, _)| (*p, node.index(forest.len())))
        .collect();
    rows.iter()
        .filter(|(p, _, negated)| !negated && products.contains(p))
        .map(|(p, node, _)| (*p, node.index(forest.len())))
        .filter(|pair| !negated.contains(pair))
        .map(|(_, node)| node)
        .collect()
}

fn catalog_for(forest: &Forest) -> geneset_core::TermCatalog {
    let records: Vec<_> = (0..forest.len())
        .map(|i| PrimaryRecord::new(Forest::id(i), format!("name {i}")))
        .collect();
    let mut catalog = CatalogBuilder::new(SourceType::Pathway).primary(records).build();
    catalog.attach_hierarchy(&forest.hierarchy());
    catalog
}

proptest! {
    #[test]
    fn prop_negated_pairs_never_indexed(forest in forest(), rows in rows()) {
        let (index, _) = AssociationAggregator::aggregate(associations(&forest, &rows));
        for (p, node, negated) in &rows {
            if *negated {
                let node = Forest::id(node.index(forest.len()));
                prop_assert!(!index.contains(&product(*p), &node));
            }
        }
    }

    #[test]
    fn prop_prune_retains_used_and_ancestors_exactly(forest in forest(), rows in rows()) {
        let (index, _) = AssociationAggregator::aggregate(associations(&forest, &rows));
        let all: Vec<usize> = (0..PRODUCTS).collect();
        let used = expected_direct(&forest, &rows, &all);

        let mut expected: BTreeSet<String> = BTreeSet::new();
        for &node in &used {
            expected.insert(Forest::id(node));
            expected.extend(forest.ancestors(node).into_iter().map(Forest::id));
        }

        let (catalog, report) = catalog_for(&forest).prune(&index);
        let retained: BTreeSet<String> = catalog.node_ids().map(str::to_string).collect();
        prop_assert_eq!(&retained, &expected);
        prop_assert_eq!(report.nodes_after, expected.len());
    }

    #[test]
    fn prop_gene_sets_are_deduplicated_direct_first_and_sound(
        forest in forest(),
        rows in rows(),
        products in prop::collection::btree_set(0..PRODUCTS, 0..=PRODUCTS),
    ) {
        let (index, _) = AssociationAggregator::aggregate(associations(&forest, &rows));
        let (catalog, _) = catalog_for(&forest).prune(&index);
        let products: Vec<usize> = products.into_iter().collect();
        let names: Vec<String> = products.iter().map(|p| product(*p)).collect();

        let sets = GeneGeneSetBuilder::new(&catalog, &index)
            .build_for_products(names.iter().map(String::as_str));

        let ids: BTreeSet<&str> = sets.iter().map(|s| s.id.as_str()).collect();
        prop_assert_eq!(ids.len(), sets.len());

        let direct = expected_direct(&forest, &rows, &products);
        let mut reachable = BTreeSet::new();
        for &node in &direct {
            reachable.extend(forest.ancestors(node));
        }

        for set in &sets {
            let node: usize = set.id[1..].parse().unwrap();
            if direct.contains(&node) {
                prop_assert_eq!(set.annotation, Annotation::Direct);
            } else {
                prop_assert_eq!(set.annotation, Annotation::Inferred);
                prop_assert!(reachable.contains(&node));
            }
        }

        let expected: BTreeSet<usize> = direct.union(&reachable).copied().collect();
        prop_assert_eq!(sets.len(), expected.len());
    }
}
