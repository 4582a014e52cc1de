//! End-to-end synthesis tests over realistic catalogs.

use insta::assert_snapshot;
use lariat::prelude::*;

use sqlparser::dialect::{DuckDbDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect};
use sqlparser::parser::Parser;

/// Parse `sql` with sqlparser to prove it is syntactically valid.
fn assert_parses(sql: &str, dialect: Dialect) {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::MySql => Box::new(MySqlDialect {}),
        Dialect::TSql => Box::new(MsSqlDialect {}),
        Dialect::DuckDb => Box::new(DuckDbDialect {}),
    };
    Parser::parse_sql(&*parser_dialect, sql)
        .unwrap_or_else(|e| panic!("invalid {} SQL: {}\n{}", dialect, e, sql));
}

fn assert_parses_postgres(sql: &str) {
    assert_parses(sql, Dialect::Postgres);
}

fn assert_parses_tsql(sql: &str) {
    assert_parses(sql, Dialect::TSql);
}

/// orders(id) 1-N items(order_id, price, qty)
fn orders_catalog() -> SchemaCatalog {
    let mut catalog = SchemaCatalog::new();
    catalog
        .add_table(TableDef::new("t_orders", "orders"))
        .add_table(TableDef::new("t_items", "items"))
        .add_column(ColumnDef::new("c_order_id", "t_orders", "id"))
        .add_column(ColumnDef::new("c_item_order", "t_items", "order_id"))
        .add_column(ColumnDef::new("c_item_price", "t_items", "price"))
        .add_relationship(Relationship::new(
            "rel_items",
            RelationKind::OneToMany,
            "c_order_id",
            "c_item_order",
        ));
    catalog
}

/// tags(id, weight) N-M posts(id) via post_tags(post_id, tag_id)
fn tags_catalog() -> SchemaCatalog {
    let mut catalog = SchemaCatalog::new();
    catalog
        .add_table(TableDef::new("t_tags", "tags"))
        .add_table(TableDef::new("t_posts", "posts"))
        .add_table(TableDef::new("t_post_tags", "post_tags"))
        .add_column(ColumnDef::new("c_tag_id", "t_tags", "id"))
        .add_column(ColumnDef::new("c_tag_weight", "t_tags", "weight"))
        .add_column(ColumnDef::new("c_post_id", "t_posts", "id"))
        .add_column(ColumnDef::new("c_pt_tag", "t_post_tags", "tag_id"))
        .add_column(ColumnDef::new("c_pt_post", "t_post_tags", "post_id"))
        .add_relationship(
            Relationship::new("rel_post_tags", RelationKind::ManyToMany, "c_tag_id", "c_post_id")
                .with_junction(JunctionLink::new("t_post_tags", "c_pt_tag", "c_pt_post")),
        );
    catalog
}

#[test]
fn one_to_many_sum_over_child_rows() {
    let catalog = orders_catalog();
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_items", "c_item_price", "sum");

    let fragment = synth.synthesize(&spec).unwrap();
    let sql = fragment.to_sql(Dialect::Postgres);

    assert_snapshot!(sql, @r#"
    SELECT
      SUM("rollup_src"."price")
    FROM "items" AS "rollup_src"
    WHERE "orders"."id" = "rollup_src"."order_id"
    "#);
    assert_parses_postgres(&sql);
}

#[test]
fn one_to_many_tsql_quoting() {
    let catalog = orders_catalog();
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_items", "c_item_price", "sum");

    let sql = synth.synthesize(&spec).unwrap().to_sql(Dialect::TSql);

    assert_snapshot!(sql, @r#"
    SELECT
      SUM([rollup_src].[price])
    FROM [items] AS [rollup_src]
    WHERE [orders].[id] = [rollup_src].[order_id]
    "#);
    assert_parses_tsql(&sql);
}

#[test]
fn one_to_one_generates_same_shape_as_one_to_many() {
    let mut catalog = orders_catalog();
    catalog.add_relationship(Relationship::new(
        "rel_invoice",
        RelationKind::OneToOne,
        "c_order_id",
        "c_item_order",
    ));
    let synth = RollupSynthesizer::new(&catalog);

    let one_to_many = synth
        .synthesize(&RollupSpec::new("rel_items", "c_item_price", "max"))
        .unwrap();
    let one_to_one = synth
        .synthesize(&RollupSpec::new("rel_invoice", "c_item_price", "max"))
        .unwrap();

    // Structurally identical generation; only the declared cardinality
    // differs, and the synthesizer does not special-case it.
    assert_eq!(one_to_many, one_to_one);
}

#[test]
fn many_to_many_aggregates_over_far_end_parent() {
    let catalog = tags_catalog();
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_post_tags", "c_tag_weight", "max");

    let fragment = synth.synthesize(&spec).unwrap();
    let sql = fragment.to_sql(Dialect::Postgres);

    assert_snapshot!(sql, @r#"
    SELECT
      MAX("rollup_src"."weight")
    FROM "tags" AS "rollup_src"
    INNER JOIN "post_tags" ON "post_tags"."tag_id" = "rollup_src"."id"
    WHERE "post_tags"."post_id" = "posts"."id"
    "#);
    assert_parses_postgres(&sql);
}

#[test]
fn many_to_many_swapped_junction_keys_is_a_different_query() {
    let catalog = tags_catalog();
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_post_tags", "c_tag_weight", "max");
    let correct = synth.synthesize(&spec).unwrap();

    // Same catalog, but the junction keys are declared backwards.
    let mut swapped_catalog = tags_catalog();
    swapped_catalog.add_relationship(
        Relationship::new("rel_post_tags", RelationKind::ManyToMany, "c_tag_id", "c_post_id")
            .with_junction(JunctionLink::new("t_post_tags", "c_pt_post", "c_pt_tag")),
    );
    let swapped_synth = RollupSynthesizer::new(&swapped_catalog);
    let swapped = swapped_synth.synthesize(&spec).unwrap();

    // Both are syntactically valid; only one is correct. The difference must
    // be structurally detectable.
    assert_ne!(correct, swapped);
    assert!(correct
        .to_sql(Dialect::Postgres)
        .contains("\"post_tags\".\"tag_id\" = \"rollup_src\".\"id\""));
    assert!(swapped
        .to_sql(Dialect::Postgres)
        .contains("\"post_tags\".\"post_id\" = \"rollup_src\".\"id\""));
}

#[test]
fn correlation_alias_overrides_outer_reference() {
    let catalog = orders_catalog();
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_items", "c_item_price", "sum");

    let fragment = synth
        .synthesize_with(&spec, SynthOptions::new().correlated_to("o"))
        .unwrap();
    let sql = fragment.to_sql(Dialect::Postgres);

    assert!(sql.contains("\"o\".\"id\" = \"rollup_src\".\"order_id\""));
    assert!(!sql.contains("\"orders\".\"id\""));
}

#[test]
fn correlation_alias_applies_to_many_to_many_child_side() {
    let catalog = tags_catalog();
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_post_tags", "c_tag_weight", "count");

    let fragment = synth
        .synthesize_with(&spec, SynthOptions::new().correlated_to("p"))
        .unwrap();
    let sql = fragment.to_sql(Dialect::Postgres);

    assert!(sql.contains("\"post_tags\".\"post_id\" = \"p\".\"id\""));
}

#[test]
fn schema_qualified_tables_flow_into_paths() {
    let mut catalog = SchemaCatalog::new();
    catalog
        .add_table(TableDef::new("t_orders", "orders").with_schema("sales"))
        .add_table(TableDef::new("t_items", "items").with_schema("sales"))
        .add_column(ColumnDef::new("c_order_id", "t_orders", "id"))
        .add_column(ColumnDef::new("c_item_order", "t_items", "order_id"))
        .add_column(ColumnDef::new("c_item_price", "t_items", "price"))
        .add_relationship(Relationship::new(
            "rel_items",
            RelationKind::OneToMany,
            "c_order_id",
            "c_item_order",
        ));
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_items", "c_item_price", "avg");

    let sql = synth.synthesize(&spec).unwrap().to_sql(Dialect::Postgres);

    assert!(sql.contains("FROM \"sales\".\"items\" AS \"rollup_src\""));
    assert!(sql.contains("WHERE \"sales\".\"orders\".\"id\" = \"rollup_src\".\"order_id\""));
    assert_parses_postgres(&sql);
}

#[test]
fn custom_path_resolver_is_honored() {
    struct Prefixed;
    impl TablePathResolver for Prefixed {
        fn table_path(&self, table: &TableDef) -> TablePath {
            TablePath::new(&format!("tenant_42__{}", table.name))
        }
    }

    let catalog = orders_catalog();
    let resolver = Prefixed;
    let synth = RollupSynthesizer::with_path_resolver(&catalog, &resolver);
    let spec = RollupSpec::new("rel_items", "c_item_price", "sum");

    let sql = synth.synthesize(&spec).unwrap().to_sql(Dialect::Postgres);
    assert!(sql.contains("\"tenant_42__items\""));
    assert!(sql.contains("\"tenant_42__orders\""));
}

#[test]
fn aggregate_identifier_passes_through_verbatim() {
    let catalog = orders_catalog();
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_items", "c_item_price", "bool_and");

    let sql = synth.synthesize(&spec).unwrap().to_sql(Dialect::Postgres);
    assert!(sql.contains("BOOL_AND(\"rollup_src\".\"price\")"));
}

#[test]
fn fragments_render_valid_sql_for_every_dialect() {
    let direct = orders_catalog();
    let junction = tags_catalog();
    let direct_synth = RollupSynthesizer::new(&direct);
    let junction_synth = RollupSynthesizer::new(&junction);

    let direct_frag = direct_synth
        .synthesize(&RollupSpec::new("rel_items", "c_item_price", "sum"))
        .unwrap();
    let junction_frag = junction_synth
        .synthesize(&RollupSpec::new("rel_post_tags", "c_tag_weight", "max"))
        .unwrap();

    for dialect in [Dialect::Postgres, Dialect::MySql, Dialect::TSql, Dialect::DuckDb] {
        assert_parses(&direct_frag.to_sql(dialect), dialect);
        assert_parses(&junction_frag.to_sql(dialect), dialect);
    }
}

#[test]
fn synthesize_is_idempotent() {
    let catalog = tags_catalog();
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_post_tags", "c_tag_weight", "max");

    let first = synth.synthesize(&spec).unwrap();
    let second = synth.synthesize(&spec).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_sql(Dialect::Postgres), second.to_sql(Dialect::Postgres));
}

#[test]
fn fragment_exposes_its_parts() {
    let catalog = tags_catalog();
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_post_tags", "c_tag_weight", "max");

    let fragment = synth.synthesize(&spec).unwrap();
    assert_eq!(fragment.source().path, TablePath::new("tags"));
    assert_eq!(fragment.source().alias.as_deref(), Some(ROLLUP_SOURCE_ALIAS));
    assert_eq!(fragment.joins().len(), 1);
    assert_eq!(
        *fragment.aggregate(),
        func("max", vec![table_col(ROLLUP_SOURCE_ALIAS, "weight")])
    );
    assert_eq!(
        *fragment.correlation(),
        path_col(TablePath::new("post_tags"), "post_id").eq(path_col(TablePath::new("posts"), "id"))
    );
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

#[test]
fn unknown_relationship_is_reported() {
    let catalog = orders_catalog();
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_ghost", "c_item_price", "sum");

    let err = synth.synthesize(&spec).unwrap_err();
    assert_eq!(err, RollupError::UnknownRelationship("rel_ghost".into()));
    assert!(err.is_metadata_not_found());
}

#[test]
fn unknown_rollup_column_is_reported() {
    let catalog = orders_catalog();
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_items", "c_ghost", "sum");

    let err = synth.synthesize(&spec).unwrap_err();
    assert_eq!(err, RollupError::UnknownColumn("c_ghost".into()));
}

#[test]
fn many_to_one_yields_unsupported_kind() {
    let mut catalog = orders_catalog();
    catalog.add_relationship(Relationship::new(
        "rel_owner",
        RelationKind::ManyToOne,
        "c_order_id",
        "c_item_order",
    ));
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_owner", "c_item_price", "sum");

    let err = synth.synthesize(&spec).unwrap_err();
    assert_eq!(
        err,
        RollupError::UnsupportedRelationshipKind {
            relationship: "rel_owner".into(),
            kind: RelationKind::ManyToOne,
        }
    );
}

#[test]
fn missing_junction_yields_junction_not_resolved() {
    let mut catalog = tags_catalog();
    catalog.add_relationship(Relationship::new(
        "rel_post_tags",
        RelationKind::ManyToMany,
        "c_tag_id",
        "c_post_id",
    ));
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_post_tags", "c_tag_weight", "max");

    let err = synth.synthesize(&spec).unwrap_err();
    assert_eq!(
        err,
        RollupError::JunctionNotResolved {
            relationship: "rel_post_tags".into()
        }
    );
}

#[test]
fn empty_aggregate_function_is_rejected() {
    let catalog = orders_catalog();
    let synth = RollupSynthesizer::new(&catalog);
    let spec = RollupSpec::new("rel_items", "c_item_price", "");

    let err = synth.synthesize(&spec).unwrap_err();
    assert_eq!(
        err,
        RollupError::EmptyAggregateFunction {
            relationship: "rel_items".into()
        }
    );
}
