//! The fixed inspection sequence over an opened dataset.
//!
//! Queries run in a fixed order: catalog listing, example node (full and
//! projected), example relationship (full and projected), named-entity
//! lookup, and the one-hop neighbour join. Every query is read-only.

use kg2_config::{LookupConfig, QuerySet};
use kg2_core::{EntityRecord, TableListing};
use serde::Serialize;

use crate::{DriverError, GraphDatabase, QueryResult};

/// Everything the sequence produced.
#[derive(Debug, Clone, Serialize)]
pub struct DriverOutput {
    pub tables: TableListing,
    pub example_node: EntityRecord,
    pub example_node_fields: EntityRecord,
    pub example_rel: EntityRecord,
    pub example_rel_fields: EntityRecord,
    pub disease: QueryResult,
    pub disease_gene: QueryResult,
}

pub struct QueryDriver<'a> {
    db: &'a GraphDatabase,
    queries: &'a QuerySet,
    lookups: &'a LookupConfig,
}

impl<'a> QueryDriver<'a> {
    #[must_use]
    pub const fn new(db: &'a GraphDatabase, queries: &'a QuerySet, lookups: &'a LookupConfig) -> Self {
        Self {
            db,
            queries,
            lookups,
        }
    }

    /// Rendered text of a named query.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Config`] for an unknown name or placeholder.
    pub fn sql(&self, name: &str) -> Result<String, DriverError> {
        Ok(self.queries.render(name, self.lookups)?)
    }

    /// Run any named query and materialize the result.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Config`] for an unknown name and
    /// [`DriverError::Graph`] if the query fails.
    pub fn run_named(&self, name: &str) -> Result<QueryResult, DriverError> {
        let sql = self.sql(name)?;
        tracing::info!(query = name, "running query");
        Ok(self.db.execute(&sql)?)
    }

    /// A lookup that must match at least one record.
    fn required_one(&self, name: &str) -> Result<EntityRecord, DriverError> {
        let sql = self.sql(name)?;
        tracing::info!(query = name, "running lookup");
        self.db
            .fetch_one(&sql)?
            .ok_or_else(|| DriverError::NotFound {
                query: name.to_string(),
            })
    }

    /// # Errors
    ///
    /// Returns [`DriverError::Graph`] if the catalog query fails.
    pub fn show_tables(&self) -> Result<TableListing, DriverError> {
        let sql = self.sql("show_tables")?;
        tracing::info!(query = "show_tables", "running query");
        Ok(self.db.show_tables(&sql)?)
    }

    /// # Errors
    ///
    /// Returns [`DriverError::NotFound`] if the configured node id is absent.
    pub fn example_node(&self) -> Result<EntityRecord, DriverError> {
        self.required_one("example_node")
    }

    /// # Errors
    ///
    /// Returns [`DriverError::NotFound`] if the configured node id is absent.
    pub fn example_node_fields(&self) -> Result<EntityRecord, DriverError> {
        self.required_one("example_node_fields")
    }

    /// # Errors
    ///
    /// Returns [`DriverError::NotFound`] if no relationship matches the
    /// configured label and id.
    pub fn example_rel(&self) -> Result<EntityRecord, DriverError> {
        self.required_one("example_rel")
    }

    /// # Errors
    ///
    /// Returns [`DriverError::NotFound`] if no relationship matches the
    /// configured label and id.
    pub fn example_rel_fields(&self) -> Result<EntityRecord, DriverError> {
        self.required_one("example_rel_fields")
    }

    /// Named-entity lookup; an empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Graph`] if the query fails.
    pub fn disease_lookup(&self) -> Result<QueryResult, DriverError> {
        let result = self.run_named("disease_lookup")?;
        if result.is_empty() {
            tracing::warn!(
                label = %self.lookups.entity_label,
                name = %self.lookups.entity_name,
                "no entity matched the configured name"
            );
        }
        Ok(result)
    }

    /// One-hop neighbour join; an empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Graph`] if the query fails.
    pub fn disease_gene_hop(&self) -> Result<QueryResult, DriverError> {
        self.run_named("disease_gene_hop")
    }

    /// Run the whole sequence in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error any step reports.
    pub fn run_all(&self) -> Result<DriverOutput, DriverError> {
        Ok(DriverOutput {
            tables: self.show_tables()?,
            example_node: self.example_node()?,
            example_node_fields: self.example_node_fields()?,
            example_rel: self.example_rel()?,
            example_rel_fields: self.example_rel_fields()?,
            disease: self.disease_lookup()?,
            disease_gene: self.disease_gene_hop()?,
        })
    }
}
