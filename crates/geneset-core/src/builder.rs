//! Per-gene DIRECT / INFERRED gene set derivation.
//!
//! For a gene with products `P`:
//!
//! - `direct = ⋃ index[p]` for `p ∈ P`
//! - `inferred = ⋃ ancestors(n)` for `n ∈ direct`, minus `direct`
//!
//! Every id in `direct ∪ inferred` yields exactly one [`GeneGeneSet`], DIRECT
//! taking precedence. The builder only borrows the frozen catalog and index, so
//! genes can be processed in parallel.

use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

use crate::association::MembershipIndex;
use crate::catalog::{Pruned, TermCatalog};
use crate::model::{Annotation, CrossReference, Gene, GeneAnnotations, GeneGeneSet, SourceType};

/// Builds the gene sets of one source for any gene.
#[derive(Debug, Clone, Copy)]
pub struct GeneGeneSetBuilder<'a> {
    catalog: &'a TermCatalog<Pruned>,
    index: &'a MembershipIndex,
    cross_reference: CrossReference,
}

impl<'a> GeneGeneSetBuilder<'a> {
    /// A builder joining genes on their UniProt ids.
    pub fn new(catalog: &'a TermCatalog<Pruned>, index: &'a MembershipIndex) -> Self {
        Self {
            catalog,
            index,
            cross_reference: CrossReference::Uniprot,
        }
    }

    pub fn with_cross_reference(mut self, cross_reference: CrossReference) -> Self {
        self.cross_reference = cross_reference;
        self
    }

    pub fn source_type(&self) -> SourceType {
        self.catalog.source_type()
    }

    /// Gene sets of `gene`, sorted by id. Empty when the gene has no evidence.
    pub fn build(&self, gene: &Gene) -> Vec<GeneGeneSet> {
        self.build_for_products(gene.cross_references(self.cross_reference))
    }

    /// Gene sets for an arbitrary product id set.
    pub fn build_for_products<'p, I>(&self, products: I) -> Vec<GeneGeneSet>
    where
        I: IntoIterator<Item = &'p str>,
    {
        let direct = self.direct_nodes(products);

        let mut inferred: BTreeSet<&str> = BTreeSet::new();
        for id in direct.keys() {
            for ancestor in self.catalog.ancestor_ids(id) {
                if !direct.contains_key(ancestor) && self.catalog.contains(ancestor) {
                    inferred.insert(ancestor);
                }
            }
        }

        let mut gene_sets: Vec<GeneGeneSet> = direct
            .into_iter()
            .map(|(id, qualifiers)| {
                let qualifiers = (!qualifiers.is_empty()).then_some(qualifiers);
                self.gene_set(id, Annotation::Direct, qualifiers)
            })
            .chain(
                inferred
                    .into_iter()
                    .map(|id| self.gene_set(id, Annotation::Inferred, None)),
            )
            .collect();
        gene_sets.sort_by(|a, b| a.id.cmp(&b.id));
        gene_sets
    }

    /// Directly annotated node ids with their unioned qualifiers.
    ///
    /// Node ids the pruned catalog does not hold are dropped.
    fn direct_nodes<'p, I>(&self, products: I) -> BTreeMap<&'a str, BTreeSet<String>>
    where
        I: IntoIterator<Item = &'p str>,
    {
        let mut direct: BTreeMap<&'a str, BTreeSet<String>> = BTreeMap::new();
        for product in products {
            for node_id in self.index.nodes(product) {
                let Some(node) = self.catalog.get(node_id) else {
                    continue;
                };
                let qualifiers = direct.entry(node.id.as_str()).or_default();
                if let Some(found) = self.index.qualifiers(product, node_id) {
                    qualifiers.extend(found.iter().cloned());
                }
            }
        }
        direct
    }

    fn gene_set(&self, id: &str, annotation: Annotation, qualifiers: Option<BTreeSet<String>>) -> GeneGeneSet {
        let name = self
            .catalog
            .get(id)
            .map(|node| node.name_or_id())
            .unwrap_or(id)
            .to_string();

        GeneGeneSet {
            id: id.to_string(),
            name,
            source_type: self.catalog.source_type(),
            annotation,
            qualifiers,
        }
    }

    /// Build every gene in parallel. Output order follows `genes`.
    pub fn build_all(&self, genes: &[Gene]) -> Vec<GeneAnnotations> {
        genes
            .par_iter()
            .map(|gene| GeneAnnotations {
                gene_id: gene.id.clone(),
                gene_sets: self.build(gene),
            })
            .collect()
    }
}
