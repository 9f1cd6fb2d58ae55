//! Service Repository (treatment catalog)

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{CatalogService, CatalogServiceCreate, CatalogServiceUpdate};

#[derive(Clone)]
pub struct ServiceRepository {
    base: BaseRepository,
}

impl ServiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active services
    pub async fn find_all(&self) -> RepoResult<Vec<CatalogService>> {
        let services: Vec<CatalogService> = self
            .base
            .db()
            .query("SELECT * FROM service WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(services)
    }

    /// Find all services including inactive
    pub async fn find_all_with_inactive(&self) -> RepoResult<Vec<CatalogService>> {
        let services: Vec<CatalogService> = self
            .base
            .db()
            .query("SELECT * FROM service ORDER BY name")
            .await?
            .take(0)?;
        Ok(services)
    }

    /// Find service by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CatalogService>> {
        let thing = parse_record_id(id)?;
        let service: Option<CatalogService> = self.base.db().select(thing).await?;
        Ok(service)
    }

    /// Create a new catalog entry
    pub async fn create(&self, data: CatalogServiceCreate) -> RepoResult<CatalogService> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE service SET
                    name = $name,
                    category = $category,
                    base_price = $base_price,
                    commission_rate = $commission_rate,
                    is_active = true
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("category", data.category))
            .bind(("base_price", data.base_price))
            .bind(("commission_rate", data.commission_rate))
            .await?;

        let created: Option<CatalogService> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create service".to_string()))
    }

    /// Update a catalog entry
    pub async fn update(&self, id: &str, data: CatalogServiceUpdate) -> RepoResult<CatalogService> {
        let thing = parse_record_id(id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Service {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    category = $category OR category,
                    base_price = IF $has_base_price THEN $base_price ELSE base_price END,
                    commission_rate = IF $has_commission_rate THEN $commission_rate ELSE commission_rate END,
                    is_active = IF $has_is_active THEN $is_active ELSE is_active END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("category", data.category))
            .bind(("has_base_price", data.base_price.is_some()))
            .bind(("base_price", data.base_price))
            .bind(("has_commission_rate", data.commission_rate.is_some()))
            .bind(("commission_rate", data.commission_rate))
            .bind(("has_is_active", data.is_active.is_some()))
            .bind(("is_active", data.is_active))
            .await?;

        result
            .take::<Option<CatalogService>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Service {} not found", id)))
    }
}
