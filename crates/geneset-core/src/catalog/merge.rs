//! Merging of primary and secondary record streams into one node per id.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use tracing::{debug, info};

use super::{AncestorIndex, Merged, TermCatalog};
use crate::model::{Association, Node, SourceType};

/// A record from the authoritative stream (GO term file, Reactome summation file).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryRecord {
    pub id: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub namespace: Option<String>,
    pub alt_ids: Vec<String>,
    pub synonyms: Vec<String>,
    pub obsolete: bool,
}

impl PrimaryRecord {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: Some(display_name.into()),
            ..Self::default()
        }
    }
}

/// A record from the membership stream (Reactome UniProt file).
///
/// Carries the node's members and a display name used only when no primary
/// record named the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryRecord {
    pub id: String,
    pub display_name: Option<String>,
    pub evidence_code: Option<String>,
    pub members: Vec<String>,
}

impl SecondaryRecord {
    /// Positive `(member, node)` associations carried by this record.
    pub fn associations(&self) -> impl Iterator<Item = Association> + '_ {
        self.members
            .iter()
            .map(move |member| Association::positive(member.clone(), self.id.clone()))
    }
}

/// Counters gathered while merging records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    pub primary_records: usize,
    pub secondary_records: usize,
    /// Nodes dropped because their last primary record marked them obsolete.
    pub obsolete_excluded: usize,
    /// Nodes first seen in the secondary stream, with no primary record.
    pub missing_primary: usize,
    /// Nodes whose display name came from the secondary stream.
    pub name_fallbacks: usize,
    /// Repeated primary records disagreeing on the obsolete flag.
    pub flag_conflicts: usize,
    /// Nodes materialized from hierarchy or reasoner references alone.
    pub partial_nodes: usize,
}

/// Builder state before any record was consumed.
#[derive(Debug)]
pub struct AcceptingPrimary;

/// Builder state after the primary stream was consumed.
#[derive(Debug)]
pub struct AcceptingSecondary;

/// Builds a [`TermCatalog`] from ordered record streams.
///
/// The primary stream must be consumed before the secondary one, which the
/// builder enforces by type: `secondary` only exists after `primary`.
#[derive(Debug)]
pub struct CatalogBuilder<S = AcceptingPrimary> {
    source_type: SourceType,
    exclude_obsolete: bool,
    nodes: FxHashMap<String, Node>,
    stats: MergeStats,
    _stage: PhantomData<S>,
}

impl CatalogBuilder<AcceptingPrimary> {
    pub fn new(source_type: SourceType) -> Self {
        Self {
            source_type,
            exclude_obsolete: false,
            nodes: FxHashMap::default(),
            stats: MergeStats::default(),
            _stage: PhantomData,
        }
    }

    /// Drop nodes left obsolete once the primary stream is merged.
    pub fn exclude_obsolete(mut self, exclude: bool) -> Self {
        self.exclude_obsolete = exclude;
        self
    }

    /// Consume the primary stream. Later records for the same id overwrite
    /// fields they carry, including the obsolete flag.
    pub fn primary<I, R>(mut self, records: I) -> CatalogBuilder<AcceptingSecondary>
    where
        I: IntoIterator<Item = R>,
        R: Into<PrimaryRecord>,
    {
        for record in records {
            let record = record.into();
            self.stats.primary_records += 1;
            self.merge_primary(record);
        }

        if self.exclude_obsolete {
            let before = self.nodes.len();
            self.nodes.retain(|_, node| !node.obsolete);
            self.stats.obsolete_excluded = before - self.nodes.len();
        }

        info!(
            source = %self.source_type,
            records = self.stats.primary_records,
            obsolete = self.stats.obsolete_excluded,
            nodes = self.nodes.len(),
            "Merged primary records"
        );

        CatalogBuilder {
            source_type: self.source_type,
            exclude_obsolete: self.exclude_obsolete,
            nodes: self.nodes,
            stats: self.stats,
            _stage: PhantomData,
        }
    }

    fn merge_primary(&mut self, record: PrimaryRecord) {
        let source_type = self.source_type;
        let existing = self.nodes.contains_key(&record.id);
        let node = self
            .nodes
            .entry(record.id.clone())
            .or_insert_with(|| Node::new(record.id.clone(), source_type));

        if existing && node.obsolete != record.obsolete {
            self.stats.flag_conflicts += 1;
            debug!(id = %record.id, "Conflicting obsolete flag, last record wins");
        }
        node.obsolete = record.obsolete;

        if record.display_name.is_some() {
            node.display_name = record.display_name;
        }
        if record.description.is_some() {
            node.description = record.description;
        }
        if record.namespace.is_some() {
            node.namespace = record.namespace;
        }
        if !record.alt_ids.is_empty() {
            node.alt_ids = record.alt_ids;
        }
        if !record.synonyms.is_empty() {
            node.synonyms = record.synonyms;
        }
    }
}

impl CatalogBuilder<AcceptingSecondary> {
    /// Consume secondary records. They never replace a name set by a primary record.
    pub fn secondary<I, R>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<SecondaryRecord>,
    {
        let before = self.stats.secondary_records;
        for record in records {
            self.stats.secondary_records += 1;
            self.merge_secondary(record.into());
        }

        info!(
            source = %self.source_type,
            records = self.stats.secondary_records - before,
            missing_primary = self.stats.missing_primary,
            name_fallbacks = self.stats.name_fallbacks,
            "Merged secondary records"
        );
        self
    }

    fn merge_secondary(&mut self, record: SecondaryRecord) {
        let source_type = self.source_type;
        if !self.nodes.contains_key(&record.id) {
            self.stats.missing_primary += 1;
            debug!(id = %record.id, "Secondary record without primary record");
        }

        let node = self
            .nodes
            .entry(record.id.clone())
            .or_insert_with(|| Node::new(record.id.clone(), source_type));

        if record.evidence_code.is_some() {
            node.evidence_code = record.evidence_code;
        }
        if node.display_name.is_none() && record.display_name.is_some() {
            node.display_name = record.display_name;
            self.stats.name_fallbacks += 1;
        }
    }

    /// Finish merging. Ancestor paths are attached to the returned catalog.
    pub fn build(self) -> TermCatalog<Merged> {
        TermCatalog {
            source_type: self.source_type,
            nodes: self.nodes,
            ancestors: AncestorIndex::new(),
            stats: self.stats,
            _state: PhantomData,
        }
    }
}
