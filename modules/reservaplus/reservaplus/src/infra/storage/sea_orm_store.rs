use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;

use super::entity::{self, Entity as KvItemEntity};
use super::migrations::Migrator;
use crate::domain::store::{
    ItemKey, KeyValueStore, PARTITION_ATTR, SORT_ATTR, StoreItem, with_key_attributes,
};

/// Relational stand-in for the key-value table, for local runs without AWS.
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    /// Connect and bring the schema up to date.
    ///
    /// # Errors
    /// Returns an error if the database is unreachable or a migration fails.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let mut options = ConnectOptions::new(url.to_owned());
        options.sqlx_logging(false);
        if url.contains(":memory:") {
            // Each pooled connection would otherwise see its own empty database.
            options.max_connections(1).min_connections(1);
        }

        let db = Database::connect(options).await?;
        Migrator::up(&db, None).await?;
        Ok(Self { db })
    }

    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn upsert(&self, key: &ItemKey, item: &StoreItem) -> anyhow::Result<()> {
        let model = entity::ActiveModel {
            pk: ActiveValue::Set(key.partition.clone()),
            sk: ActiveValue::Set(key.sort.clone()),
            attributes: ActiveValue::Set(serde_json::to_string(&strip_keys(item))?),
        };

        KvItemEntity::insert(model)
            .on_conflict(
                OnConflict::columns([entity::Column::Pk, entity::Column::Sk])
                    .update_column(entity::Column::Attributes)
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

fn strip_keys(item: &StoreItem) -> StoreItem {
    item.iter()
        .filter(|(name, _)| name.as_str() != PARTITION_ATTR && name.as_str() != SORT_ATTR)
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

fn model_to_item(model: entity::Model) -> anyhow::Result<StoreItem> {
    let attributes = match serde_json::from_str(&model.attributes)? {
        Value::Object(map) => map,
        other => anyhow::bail!(
            "kv_items({}, {}) holds non-object attributes: {other}",
            model.pk,
            model.sk
        ),
    };
    Ok(with_key_attributes(
        &ItemKey::new(model.pk, model.sk),
        attributes,
    ))
}

#[async_trait]
impl KeyValueStore for SeaOrmStore {
    async fn get_item(&self, key: &ItemKey) -> anyhow::Result<Option<StoreItem>> {
        KvItemEntity::find_by_id((key.partition.clone(), key.sort.clone()))
            .one(&self.db)
            .await?
            .map(model_to_item)
            .transpose()
    }

    async fn query_partition(
        &self,
        partition: &str,
        sort_prefix: &str,
    ) -> anyhow::Result<Vec<StoreItem>> {
        let models = KvItemEntity::find()
            .filter(entity::Column::Pk.eq(partition))
            .filter(entity::Column::Sk.starts_with(sort_prefix))
            .order_by_asc(entity::Column::Sk)
            .all(&self.db)
            .await?;

        // LIKE treats `_` and `%` as wildcards; re-check the literal prefix.
        models
            .into_iter()
            .filter(|m| m.sk.starts_with(sort_prefix))
            .map(model_to_item)
            .collect()
    }

    async fn update_fields(&self, key: &ItemKey, fields: StoreItem) -> anyhow::Result<()> {
        let mut item = self.get_item(key).await?.unwrap_or_default();
        item.extend(fields);
        self.upsert(key, &item).await
    }

    async fn put_item(&self, key: &ItemKey, item: StoreItem) -> anyhow::Result<()> {
        self.upsert(key, &item).await
    }
}
