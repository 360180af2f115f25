//! DynamoDB-backed store gateway.

use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::timeout::TimeoutConfig;
use aws_sdk_dynamodb::types::AttributeValue;

use super::attribute::{from_json, item_from_dynamo, item_to_dynamo};
use crate::config::DynamoDbConfig;
use crate::domain::store::{ItemKey, KeyValueStore, PARTITION_ATTR, SORT_ATTR, StoreItem};

pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    /// Load the shared AWS config from the environment and apply overrides.
    pub async fn from_env(config: &DynamoDbConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::new(&sdk_config, config)
    }

    /// Build on top of an existing `SdkConfig`, keeping its credentials,
    /// retry settings and HTTP client.
    #[must_use]
    pub fn new(sdk_config: &aws_config::SdkConfig, config: &DynamoDbConfig) -> Self {
        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);

        if let Some(region) = &config.region {
            builder = builder.region(aws_sdk_dynamodb::config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(Duration::from_millis(timeout_ms))
                    .build(),
            );
        }

        Self::from_client(Client::from_conf(builder.build()), config.table_name.clone())
    }

    #[must_use]
    pub fn from_client(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

fn key_attributes(key: &ItemKey) -> (AttributeValue, AttributeValue) {
    (
        AttributeValue::S(key.partition.clone()),
        AttributeValue::S(key.sort.clone()),
    )
}

/// `SET #f0 = :v0, #f1 = :v1, ...`; attribute names are always aliased.
fn update_expression(fields: &StoreItem) -> String {
    let assignments: Vec<String> = (0..fields.len())
        .map(|i| format!("#f{i} = :v{i}"))
        .collect();
    format!("SET {}", assignments.join(", "))
}

#[async_trait]
impl KeyValueStore for DynamoDbStore {
    async fn get_item(&self, key: &ItemKey) -> anyhow::Result<Option<StoreItem>> {
        let (pk, sk) = key_attributes(key);
        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PARTITION_ATTR, pk)
            .key(SORT_ATTR, sk)
            .send()
            .await
            .map_err(|e| anyhow!("DynamoDB GetItem failed for {key}: {e}"))?;

        Ok(response.item().map(item_from_dynamo))
    }

    async fn query_partition(
        &self,
        partition: &str,
        sort_prefix: &str,
    ) -> anyhow::Result<Vec<StoreItem>> {
        let mut items = Vec::new();
        let mut last_evaluated_key = None;

        loop {
            let mut request = self
                .client
                .query()
                .table_name(&self.table_name)
                .expression_attribute_names("#pk", PARTITION_ATTR)
                .expression_attribute_values(":pk", AttributeValue::S(partition.to_owned()));

            request = if sort_prefix.is_empty() {
                request.key_condition_expression("#pk = :pk")
            } else {
                request
                    .key_condition_expression("#pk = :pk AND begins_with(#sk, :sk)")
                    .expression_attribute_names("#sk", SORT_ATTR)
                    .expression_attribute_values(":sk", AttributeValue::S(sort_prefix.to_owned()))
            };

            if let Some(key) = last_evaluated_key.take() {
                request = request.set_exclusive_start_key(Some(key));
            }

            let response = request
                .send()
                .await
                .map_err(|e| anyhow!("DynamoDB Query failed for {partition}: {e}"))?;

            items.extend(response.items().iter().map(item_from_dynamo));

            match response.last_evaluated_key() {
                Some(key) if !key.is_empty() => last_evaluated_key = Some(key.clone()),
                _ => break,
            }
        }

        Ok(items)
    }

    async fn update_fields(&self, key: &ItemKey, fields: StoreItem) -> anyhow::Result<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let (pk, sk) = key_attributes(key);
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(PARTITION_ATTR, pk)
            .key(SORT_ATTR, sk)
            .update_expression(update_expression(&fields));

        for (i, (name, value)) in fields.iter().enumerate() {
            request = request
                .expression_attribute_names(format!("#f{i}"), name)
                .expression_attribute_values(format!(":v{i}"), from_json(value));
        }

        request
            .send()
            .await
            .map_err(|e| anyhow!("DynamoDB UpdateItem failed for {key}: {e}"))?;
        Ok(())
    }

    async fn put_item(&self, key: &ItemKey, item: StoreItem) -> anyhow::Result<()> {
        let mut attributes = item_to_dynamo(&item);
        let (pk, sk) = key_attributes(key);
        attributes.insert(PARTITION_ATTR.to_owned(), pk);
        attributes.insert(SORT_ATTR.to_owned(), sk);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(attributes))
            .send()
            .await
            .map_err(|e| anyhow!("DynamoDB PutItem failed for {key}: {e}"))?;
        Ok(())
    }
}
