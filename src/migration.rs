use sea_orm::sea_query::{Alias, ColumnDef, Expr, Index, Query, Table};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, Schema,
    TransactionTrait,
};
use std::collections::HashSet;
use tracing::info;

use crate::entities::{cart_item, product, purchase, review, user};

//applied versions are recorded in the schema_migrations ledger, so running
//this on every startup is safe and never touches existing data
struct Migration {
    version: i64,
    name: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial_schema",
    },
    Migration {
        version: 2,
        name: "unique_cart_line",
    },
];

pub async fn run(db: &DatabaseConnection) -> Result<(), DbErr> {
    ensure_ledger(db).await?;
    let applied = applied_versions(db).await?;

    //a ledger version this build does not know means a newer build ran here
    let known: HashSet<i64> = MIGRATIONS
        .iter()
        .map(|migration| migration.version)
        .collect();
    if let Some(ahead) = applied
        .iter()
        .copied()
        .filter(|version| !known.contains(version))
        .max()
    {
        return Err(DbErr::Migration(format!(
            "Schema version {ahead} was applied by a newer build"
        )));
    }

    for migration in MIGRATIONS {
        if applied.contains(&migration.version) {
            continue;
        }
        let txn = db.begin().await?;
        apply(migration.version, &txn).await?;
        record(migration, &txn).await?;
        txn.commit().await?;
        info!(
            version = migration.version,
            name = migration.name,
            "Applied migration"
        );
    }

    Ok(())
}

async fn apply(version: i64, txn: &DatabaseTransaction) -> Result<(), DbErr> {
    match version {
        1 => initial_schema(txn).await,
        2 => unique_cart_line(txn).await,
        other => Err(DbErr::Migration(format!(
            "Unknown migration version {other}"
        ))),
    }
}

//v1: the five storefront tables in foreign key order
async fn initial_schema(txn: &DatabaseTransaction) -> Result<(), DbErr> {
    create_table(txn, user::Entity).await?;
    create_table(txn, product::Entity).await?;
    create_table(txn, review::Entity).await?;
    create_table(txn, cart_item::Entity).await?;
    create_table(txn, purchase::Entity).await?;

    let reviews_unique = Index::create()
        .if_not_exists()
        .name("uq_reviews_user_product")
        .table(review::Entity)
        .col(review::Column::UserId)
        .col(review::Column::ProductId)
        .unique()
        .to_owned();
    txn.execute(txn.get_database_backend().build(&reviews_unique))
        .await?;

    Ok(())
}

//v2: one cart line per (user, product), backs the insert-or-increment upsert
async fn unique_cart_line(txn: &DatabaseTransaction) -> Result<(), DbErr> {
    let stmt = Index::create()
        .if_not_exists()
        .name("uq_cart_items_user_product")
        .table(cart_item::Entity)
        .col(cart_item::Column::UserId)
        .col(cart_item::Column::ProductId)
        .unique()
        .to_owned();
    txn.execute(txn.get_database_backend().build(&stmt)).await?;

    Ok(())
}

async fn create_table<E: EntityTrait>(txn: &DatabaseTransaction, entity: E) -> Result<(), DbErr> {
    let backend = txn.get_database_backend();
    let schema = Schema::new(backend);

    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    txn.execute(backend.build(&stmt)).await?;

    //secondary indexes come from the entity `indexed` attributes
    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        txn.execute(backend.build(&index)).await?;
    }

    Ok(())
}

async fn ensure_ledger(db: &DatabaseConnection) -> Result<(), DbErr> {
    let stmt = Table::create()
        .table(Alias::new("schema_migrations"))
        .if_not_exists()
        .col(
            ColumnDef::new(Alias::new("version"))
                .big_integer()
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(Alias::new("name")).string().not_null())
        .col(
            ColumnDef::new(Alias::new("applied_at"))
                .timestamp()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .to_owned();
    db.execute(db.get_database_backend().build(&stmt)).await?;

    Ok(())
}

async fn applied_versions(db: &DatabaseConnection) -> Result<HashSet<i64>, DbErr> {
    let stmt = Query::select()
        .column(Alias::new("version"))
        .from(Alias::new("schema_migrations"))
        .to_owned();
    let rows = db.query_all(db.get_database_backend().build(&stmt)).await?;

    let mut versions = HashSet::new();
    for row in rows {
        versions.insert(row.try_get::<i64>("", "version")?);
    }
    Ok(versions)
}

async fn record(migration: &Migration, txn: &DatabaseTransaction) -> Result<(), DbErr> {
    let stmt = Query::insert()
        .into_table(Alias::new("schema_migrations"))
        .columns([Alias::new("version"), Alias::new("name")])
        .values_panic([migration.version.into(), migration.name.into()])
        .to_owned();
    txn.execute(txn.get_database_backend().build(&stmt)).await?;

    Ok(())
}
