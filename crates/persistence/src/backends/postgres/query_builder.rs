//! PostgreSQL dissociation query builder.
//!
//! Builds the set-difference statements with `$N` placeholders and
//! schema-qualified table names. Each statement selects distinct
//! `(study_id, title)` pairs: a positive predicate on the outer row and a
//! correlated `NOT EXISTS` over the same study for the negative predicate.

use std::fmt;

use crate::error::{BackendError, StorageError, StorageResult};

/// Regular expression stripping a classifier namespace (`terms_<source>__`)
/// from the front of an annotation term.
pub const TERM_PREFIX_PATTERN: &str = "^terms_[^_]+__";

/// Text search configuration used on both sides of `@@`.
pub const TEXT_SEARCH_CONFIG: &str = "english";

/// A validated SQL schema identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaName(String);

impl SchemaName {
    /// Accepts `[A-Za-z_][A-Za-z0-9_]*`, the identifiers that are safe to
    /// splice into SQL text unquoted.
    pub fn parse(name: &str) -> StorageResult<Self> {
        let mut chars = name.chars();
        let valid_head = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid_head && valid_tail {
            Ok(SchemaName(name.to_string()))
        } else {
            Err(StorageError::Backend(BackendError::InvalidConfiguration {
                message: format!("invalid schema name '{}'", name),
            }))
        }
    }

    /// Returns `schema.table`.
    pub fn qualify(&self, table: &str) -> String {
        format!("{}.{}", self.0, table)
    }

    /// Returns the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the statements run by the PostgreSQL backend.
pub struct DissociationQueryBuilder;

impl DissociationQueryBuilder {
    /// Term dissociation.
    ///
    /// Parameters: `$1` include phrase, `$2` exclude phrase, `$3` limit (bigint).
    pub fn term_dissociation(schema: &SchemaName) -> String {
        let annotations = schema.qualify("annotations_terms");
        let metadata = schema.qualify("metadata");
        format!(
            "SELECT DISTINCT at.study_id::text AS study_id, m.title::text AS title
             FROM {annotations} at
             LEFT JOIN {metadata} m ON at.study_id = m.study_id
             WHERE {include}
               AND NOT EXISTS (
                   SELECT 1 FROM {annotations} at2
                   WHERE at2.study_id = at.study_id
                     AND {exclude}
               )
             LIMIT $3",
            include = Self::term_match("at.term", 1),
            exclude = Self::term_match("at2.term", 2),
        )
    }

    /// Spatial dissociation.
    ///
    /// Parameters: `$1..$3` include point, `$4..$6` exclude point,
    /// `$7` radius, `$8` limit (bigint).
    pub fn spatial_dissociation(schema: &SchemaName) -> String {
        let coordinates = schema.qualify("coordinates");
        let metadata = schema.qualify("metadata");
        format!(
            "SELECT DISTINCT c1.study_id::text AS study_id, m.title::text AS title
             FROM {coordinates} c1
             LEFT JOIN {metadata} m ON c1.study_id = m.study_id
             WHERE {include}
               AND NOT EXISTS (
                   SELECT 1 FROM {coordinates} c2
                   WHERE c2.study_id = c1.study_id
                     AND {exclude}
               )
             LIMIT $8",
            include = Self::point_within("c1.geom", 1, 7),
            exclude = Self::point_within("c2.geom", 4, 7),
        )
    }

    /// Full-text predicate on a prefix-stripped term column.
    fn term_match(column: &str, phrase_param: usize) -> String {
        format!(
            "to_tsvector('{config}', regexp_replace({column}, '{pattern}', '', 'g')) @@ plainto_tsquery('{config}', ${phrase_param})",
            config = TEXT_SEARCH_CONFIG,
            pattern = TERM_PREFIX_PATTERN,
        )
    }

    /// 3-D proximity predicate. The query point takes the SRID of the stored
    /// geometry it is compared against.
    fn point_within(column: &str, first_param: usize, radius_param: usize) -> String {
        format!(
            "ST_3DDWithin({column}, ST_SetSRID(ST_MakePoint(${x}, ${y}, ${z}), ST_SRID({column})), ${radius_param})",
            x = first_param,
            y = first_param + 1,
            z = first_param + 2,
        )
    }

    /// `SELECT COUNT(*)` over a study table.
    pub fn count(schema: &SchemaName, table: &str) -> String {
        format!("SELECT COUNT(*) FROM {}", schema.qualify(table))
    }

    /// Coordinate sample as JSON objects. `$1` is the sample size.
    pub fn coordinates_sample(schema: &SchemaName) -> String {
        format!(
            "SELECT jsonb_build_object('study_id', study_id, 'x', ST_X(geom), 'y', ST_Y(geom), 'z', ST_Z(geom))
             FROM {} LIMIT $1",
            schema.qualify("coordinates")
        )
    }

    /// Metadata sample with every column. `$1` is the sample size.
    pub fn metadata_sample(schema: &SchemaName) -> String {
        format!(
            "SELECT to_jsonb(m) FROM {} m LIMIT $1",
            schema.qualify("metadata")
        )
    }

    /// Annotation sample as JSON objects. `$1` is the sample size.
    pub fn annotations_sample(schema: &SchemaName) -> String {
        format!(
            "SELECT jsonb_build_object('study_id', study_id, 'contrast_id', contrast_id, 'term', term, 'weight', weight)
             FROM {} LIMIT $1",
            schema.qualify("annotations_terms")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns() -> SchemaName {
        SchemaName::parse("ns").unwrap()
    }

    #[test]
    fn test_schema_name_validation() {
        assert!(SchemaName::parse("ns").is_ok());
        assert!(SchemaName::parse("_study_2").is_ok());
        assert!(SchemaName::parse("").is_err());
        assert!(SchemaName::parse("2ns").is_err());
        assert!(SchemaName::parse("ns.public").is_err());
        assert!(SchemaName::parse("ns;drop").is_err());
        assert!(SchemaName::parse("\"ns\"").is_err());
    }

    #[test]
    fn test_term_query_is_schema_qualified() {
        let sql = DissociationQueryBuilder::term_dissociation(&ns());
        assert!(sql.contains("FROM ns.annotations_terms at\n"));
        assert!(sql.contains("LEFT JOIN ns.metadata m ON at.study_id = m.study_id"));
        assert!(sql.contains("SELECT 1 FROM ns.annotations_terms at2"));
        assert!(!sql.contains("search_path"));
    }

    #[test]
    fn test_term_query_strips_prefix_on_both_sides() {
        let sql = DissociationQueryBuilder::term_dissociation(&ns());
        assert!(sql.contains(
            "to_tsvector('english', regexp_replace(at.term, '^terms_[^_]+__', '', 'g')) @@ plainto_tsquery('english', $1)"
        ));
        assert!(sql.contains(
            "to_tsvector('english', regexp_replace(at2.term, '^terms_[^_]+__', '', 'g')) @@ plainto_tsquery('english', $2)"
        ));
        assert!(sql.contains("NOT EXISTS"));
        assert!(sql.trim_end().ends_with("LIMIT $3"));
    }

    #[test]
    fn test_spatial_query_binds_stored_srid() {
        let sql = DissociationQueryBuilder::spatial_dissociation(&ns());
        assert!(sql.contains(
            "ST_3DDWithin(c1.geom, ST_SetSRID(ST_MakePoint($1, $2, $3), ST_SRID(c1.geom)), $7)"
        ));
        assert!(sql.contains(
            "ST_3DDWithin(c2.geom, ST_SetSRID(ST_MakePoint($4, $5, $6), ST_SRID(c2.geom)), $7)"
        ));
        assert!(sql.contains("WHERE c2.study_id = c1.study_id"));
        assert!(sql.trim_end().ends_with("LIMIT $8"));
    }

    #[test]
    fn test_other_schema() {
        let schema = SchemaName::parse("studies_v2").unwrap();
        let sql = DissociationQueryBuilder::spatial_dissociation(&schema);
        assert!(sql.contains("FROM studies_v2.coordinates c1"));
        assert!(!sql.contains("ns."));
    }

    #[test]
    fn test_diagnostic_queries() {
        assert_eq!(
            DissociationQueryBuilder::count(&ns(), "metadata"),
            "SELECT COUNT(*) FROM ns.metadata"
        );
        assert!(DissociationQueryBuilder::metadata_sample(&ns()).contains("to_jsonb(m)"));
        assert!(DissociationQueryBuilder::coordinates_sample(&ns()).contains("ST_Z(geom)"));
        assert!(
            DissociationQueryBuilder::annotations_sample(&ns()).contains("FROM ns.annotations_terms")
        );
    }
}
